//! An abstraction for MangaHub, served through the GraphQL API at `api.mghubcdn.com`.
//!
//! MangaHub identifies a manga by its slug (`red-storm_123`) and a chapter by the
//! manga slug plus the chapter number. The API echoes neither reliably, so each
//! [`Request`] carries [`Metadata`](request::Metadata) that the host hands back
//! when parsing, and the ids in every parsed value come from there.
//!
//! Images live on two CDNs that are not interchangeable: covers on
//! `thumb.mghubcdn.com`, chapter pages on `img.mghubcdn.com`. Both, and the API
//! endpoint, are part of the [`Config`].

mod api;
#[cfg(feature = "client")]
pub mod client;
pub mod chapter;
pub mod config;
pub mod errors;
mod graphql;
pub mod manga;
pub mod meta;
pub mod request;
pub mod response;
pub mod source;
pub mod tile;

pub use chapter::{Chapter, ChapterDetails};
#[cfg(feature = "client")]
pub use client::{Client, ClientBuilder};
pub use config::Config;
pub use manga::Manga;
pub use meta::{Language, Status};
pub use request::Request;
pub use source::{MangaHub, Source};
pub use tile::{HomeSection, MangaTile, PagedResults};
