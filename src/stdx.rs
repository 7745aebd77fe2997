pub(crate) mod error;
#[cfg(feature = "client")]
pub(crate) mod http;
pub(crate) mod serde;
pub(crate) mod text;
pub(crate) mod time;
