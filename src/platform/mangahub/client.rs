//! An async executor for [`Request`]s, standing in for a host application.

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::instrument;

use super::{
    chapter::{Chapter, ChapterDetails},
    config::Config,
    errors::ClientError,
    manga::Manga,
    request::{Method, Request},
    response::Body,
    source::{MangaHub, Source},
    tile::{HomeSection, PagedResults},
};
use crate::stdx::http::{DEFAULT_USER_AGENT, IRetry};

/// A builder for configuring and creating instances of [`Client`] with custom settings.
///
/// # Example
///
/// ```
/// # use mangahub::platform::mangahub::{ClientBuilder, config::Config};
/// let client = ClientBuilder::new()
///     .user_agent("custom-agent/1.0")
///     .config(Config::default())
///     .build()?;
/// # Ok::<(), mangahub::platform::mangahub::errors::ClientError>(())
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    builder: reqwest::ClientBuilder,
    config: Config,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with the default user agent (`mangahub/VERSION`)
    /// and the production endpoints.
    #[must_use]
    pub fn new() -> Self {
        let builder = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .use_rustls_tls()
            .brotli(true);

        Self {
            builder,
            config: Config::default(),
        }
    }

    /// Sets a custom `User-Agent` header for the [`Client`].
    #[must_use]
    pub fn user_agent(self, user_agent: &str) -> Self {
        Self {
            builder: self.builder.user_agent(user_agent),
            ..self
        }
    }

    /// Points the client at other endpoints, e.g. a mock server.
    #[must_use]
    pub fn config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    /// Consumes the `ClientBuilder` and returns a fully-configured [`Client`].
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the underlying HTTP client could not be built,
    /// such as when TLS initialization fails.
    pub fn build(self) -> Result<Client, ClientError> {
        Ok(Client {
            http: self.builder.build()?,
            source: Arc::new(MangaHub::with_config(self.config)),
        })
    }
}

/// Sends the requests [`MangaHub`] builds and parses the responses with it.
///
/// The adapter itself never does I/O. This is the smallest possible host: one
/// request per call, retried on `429` and transport errors, with manga details
/// for several ids fetched concurrently.
///
/// # Example
///
/// ```no_run
/// # use mangahub::platform::mangahub::{Client, errors::ClientError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ClientError> {
/// let client = Client::new()?;
///
/// for chapter in client.chapters("red-storm_123").await? {
///     println!("{}: {:?}", chapter.id(), chapter.title());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    source: Arc<MangaHub>,
}

impl Client {
    /// A client with default settings, pointed at production.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the HTTP client could not be built.
    pub fn new() -> Result<Self, ClientError> {
        ClientBuilder::new().build()
    }

    /// Returns a [`ClientBuilder`] for creating a custom-configured `Client`.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The adapter requests are built and parsed with.
    #[must_use]
    pub fn source(&self) -> &MangaHub {
        &self.source
    }

    /// Searches MangaHub by title.
    pub async fn search(&self, query: &str) -> Result<PagedResults, ClientError> {
        let request = self.source.search_request(query);
        let body = self.execute(&request).await?;
        Ok(self.source.search(Body::from(&body), request.metadata())?)
    }

    /// Fetches details for every slug, concurrently, returned in the order given.
    pub async fn manga_details(&self, ids: &[&str]) -> Result<Vec<Manga>, ClientError> {
        let requests = self.source.manga_details_requests(ids);

        try_join_all(requests.iter().map(|request| async move {
            let body = self.execute(request).await?;
            Ok::<_, ClientError>(self.source.manga_details(Body::from(&body), request.metadata())?)
        }))
        .await
    }

    /// Fetches the chapter list of a manga, in source order.
    pub async fn chapters(&self, manga_id: &str) -> Result<Vec<Chapter>, ClientError> {
        let request = self.source.chapters_request(manga_id);
        let body = self.execute(&request).await?;
        Ok(self.source.chapters(Body::from(&body), request.metadata())?)
    }

    /// Fetches the pages of a chapter.
    pub async fn chapter_details(
        &self,
        manga_id: &str,
        chapter_id: &str,
    ) -> Result<ChapterDetails, ClientError> {
        let request = self.source.chapter_details_request(manga_id, chapter_id);
        let body = self.execute(&request).await?;
        Ok(self
            .source
            .chapter_details(Body::from(&body), request.metadata())?)
    }

    /// Fetches the landing page shelves.
    pub async fn home_sections(&self) -> Result<Vec<HomeSection>, ClientError> {
        let request = self.source.home_sections_request();
        let body = self.execute(&request).await?;
        Ok(self
            .source
            .home_sections(Body::from(&body), request.metadata())?)
    }

    /// Sends a request and returns the raw body.
    ///
    /// GraphQL reports most failures in a `200` body, so only non-success statuses
    /// are errors here.
    #[instrument(name = "sending graphql request", skip_all, fields(operation = request.payload().operation_name()))]
    pub async fn execute(&self, request: &Request) -> Result<String, ClientError> {
        let method = match request.method() {
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.http.request(method, request.url().clone());

        for (name, value) in request.headers() {
            builder = builder.header(*name, *value);
        }

        let response = builder.body(request.body()).retry().send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "api responded with a failure status");
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
