//! Content sources supported by the crate.

pub mod mangahub;
