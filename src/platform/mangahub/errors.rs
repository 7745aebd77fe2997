//! Errors that can happen when building requests for, or parsing responses from, MangaHub.

use thiserror::Error;

pub use crate::stdx::error::MissingPath;

#[allow(missing_docs)]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    ResponseError(#[from] ResponseError),

    #[cfg(feature = "client")]
    #[error(transparent)]
    ClientError(#[from] ClientError),
}

#[allow(missing_docs)]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` is not a valid url: {source}")]
    MalformedUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("`{field}` must be an `http` or `https` url, got `{url}`")]
    UnsupportedScheme { field: &'static str, url: String },
}

/// Failures while turning a raw response body into the canonical shapes.
#[allow(missing_docs)]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The body was not JSON, or a field had an unexpected type.
    #[error("failed to decode response body: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A path a single-entity response cannot do without was absent.
    #[error(transparent)]
    MissingPath(#[from] MissingPath),
    /// The path was absent and the GraphQL envelope explained why.
    #[error("api returned errors: {}", .0.join("; "))]
    Api(Vec<String>),
    /// The chapter `pages` string did not decode into a known page list.
    #[error("`pages` is not a recognised page list: {0}")]
    MalformedPages(#[source] serde_json::Error),
    /// A CDN path could not be joined onto its base.
    #[error("failed to build image url from `{path}`: {source}")]
    MalformedImagePath {
        path: String,
        #[source]
        source: url::ParseError,
    },
    /// The metadata handed back belongs to a different intent.
    #[error("expected metadata for {expected}, got metadata for {got}")]
    MetadataMismatch {
        expected: &'static str,
        got: &'static str,
    },
}

#[cfg(feature = "client")]
#[allow(missing_docs)]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("api responded with http status {0}")]
    Status(u16),
    #[error(transparent)]
    ResponseError(#[from] ResponseError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::Unexpected(anyhow::Error::from(error))
    }
}
