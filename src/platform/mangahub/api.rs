//! Raw shapes of `api.mghubcdn.com` GraphQL responses.
//!
//! Everything is optional: the API returns `null` for whatever it does not
//! have, and which paths are required is decided by the caller.

pub(super) mod chapter;
pub(super) mod latest;
pub(super) mod manga;
pub(super) mod search;

use serde::{Deserialize, de::DeserializeOwned};

use super::{errors::ResponseError, response::Body};
use crate::stdx::error::MissingPath;

#[derive(Deserialize, Debug)]
pub(super) struct Envelope<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<ApiError>>,
}

#[derive(Deserialize, Debug)]
pub(super) struct ApiError {
    pub message: String,
}

impl<T: DeserializeOwned> Envelope<T> {
    pub fn decode(body: Body<'_>) -> Result<Self, ResponseError> {
        let value = body.decode()?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Logs upstream errors that came with a response whose data is still usable.
pub(super) fn warn_errors(errors: Option<&[ApiError]>, intent: &'static str) {
    for error in errors.unwrap_or_default() {
        tracing::warn!(intent, message = %error.message, "api reported an error");
    }
}

/// The error for a required path that was absent, preferring the api's own explanation.
pub(super) fn missing(errors: Option<Vec<ApiError>>, path: &'static str) -> ResponseError {
    match errors {
        Some(errors) if !errors.is_empty() => {
            ResponseError::Api(errors.into_iter().map(|error| error.message).collect())
        }
        _ => ResponseError::MissingPath(MissingPath(path)),
    }
}
