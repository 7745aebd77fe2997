//! Request descriptors handed to the host for execution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;
use url::Url;

use super::{config::Config, errors::ResponseError, graphql::GraphQLQuery};

/// HTTP method of a [`Request`].
///
/// Every MangaHub query is a `POST` to the GraphQL endpoint.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// `POST`
    Post,
}

impl Method {
    /// The method as written on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side-channel data that must be handed back, untouched, when parsing the
/// response to the [`Request`] it came with.
///
/// The API does not echo the slug or chapter a response belongs to, so the ids
/// in the parsed result come from here and never from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Metadata {
    /// A search request.
    Search,
    /// A details request for the manga with this slug.
    MangaDetails {
        /// Slug the request was built for.
        id: String,
    },
    /// A chapter list request.
    Chapters {
        /// Slug of the manga owning the chapters.
        manga_id: String,
    },
    /// A page list request.
    ChapterDetails {
        /// Slug of the manga owning the chapter.
        manga_id: String,
        /// Chapter id, which is the chapter number as a string.
        chapter_id: String,
    },
    /// A home page request.
    HomeSections,
}

impl Metadata {
    /// Name of the intent this metadata belongs to.
    #[must_use]
    pub const fn intent(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::MangaDetails { .. } => "manga details",
            Self::Chapters { .. } => "chapters",
            Self::ChapterDetails { .. } => "chapter details",
            Self::HomeSections => "home sections",
        }
    }

    pub(super) fn mismatch(&self, expected: &'static str) -> ResponseError {
        ResponseError::MetadataMismatch {
            expected,
            got: self.intent(),
        }
    }
}

/// The `application/json` body of a GraphQL request.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    operation_name: &'static str,
    query: &'static str,
    variables: Map<String, Value>,
}

impl Payload {
    /// Name of the GraphQL operation.
    #[must_use]
    pub fn operation_name(&self) -> &str {
        self.operation_name
    }

    /// The GraphQL document. Never contains caller supplied text.
    #[must_use]
    pub fn query(&self) -> &str {
        self.query
    }

    /// Values bound to the document's `$variables`.
    #[must_use]
    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// The body as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "operationName": self.operation_name,
            "query": self.query,
            "variables": self.variables,
        })
    }

    /// The body serialized for the wire.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// A fully described HTTP request for the host to perform.
///
/// The adapter never performs I/O. The host sends the request and passes the raw
/// response body, together with [`Request::metadata()`], back to the matching
/// parse function.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    url: Url,
    method: Method,
    headers: Vec<(&'static str, &'static str)>,
    payload: Payload,
    metadata: Metadata,
}

impl Request {
    pub(super) fn graphql(
        config: &Config,
        query: &GraphQLQuery,
        variables: Map<String, Value>,
        metadata: Metadata,
    ) -> Self {
        Self {
            url: config.api().clone(),
            method: Method::Post,
            headers: vec![("content-type", "application/json")],
            payload: Payload {
                operation_name: query.operation_name,
                query: query.document,
                variables,
            },
            metadata,
        }
    }

    /// Endpoint to send the request to.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Headers to send along, as `(name, value)` pairs.
    #[must_use]
    pub fn headers(&self) -> &[(&'static str, &'static str)] {
        &self.headers
    }

    /// The structured GraphQL body.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The serialized body.
    #[must_use]
    pub fn body(&self) -> String {
        self.payload.to_json()
    }

    /// Metadata to echo back when parsing the response.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}
