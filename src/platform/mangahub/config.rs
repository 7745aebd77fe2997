//! Endpoint configuration for the MangaHub adapter.

use serde::{Deserialize, Serialize};
use url::Url;

use super::errors::ConfigError;

/// Production GraphQL endpoint.
pub const API_ENDPOINT: &str = "https://api.mghubcdn.com/graphql";
/// CDN serving manga covers and tile thumbnails.
pub const THUMBNAIL_CDN: &str = "https://thumb.mghubcdn.com/";
/// CDN serving chapter page images.
pub const PAGE_CDN: &str = "https://img.mghubcdn.com/file/imghub/";

/// The three bases the adapter talks to or builds URLs against.
///
/// The two CDNs are not interchangeable: covers only exist on the thumbnail CDN and
/// pages only exist on the page CDN.
///
/// [`Config::default()`] points at production. Use [`ConfigBuilder`] to point the
/// adapter somewhere else, e.g. a mock server in tests.
///
/// # Example
///
/// ```
/// # use mangahub::platform::mangahub::config::Config;
/// let config = Config::builder()
///     .api("http://localhost:8080/graphql")
///     .build()?;
///
/// assert_eq!("http://localhost:8080/graphql", config.api().as_str());
/// # Ok::<(), mangahub::platform::mangahub::errors::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct Config {
    api: Url,
    thumbnail_cdn: Url,
    page_cdn: Url,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: production(API_ENDPOINT),
            thumbnail_cdn: production(THUMBNAIL_CDN),
            page_cdn: production(PAGE_CDN),
        }
    }
}

#[allow(clippy::expect_used, reason = "production constants are checked by the tests below")]
fn production(url: &str) -> Url {
    Url::parse(url).expect("production urls should always parse")
}

impl Config {
    /// Returns a [`ConfigBuilder`] seeded with the production endpoints.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// The GraphQL endpoint every request is posted to.
    #[must_use]
    pub fn api(&self) -> &Url {
        &self.api
    }

    /// Base that cover paths are joined onto.
    #[must_use]
    pub fn thumbnail_cdn(&self) -> &Url {
        &self.thumbnail_cdn
    }

    /// Base that page paths are joined onto.
    #[must_use]
    pub fn page_cdn(&self) -> &Url {
        &self.page_cdn
    }

    pub(super) fn cover_url(&self, path: &str) -> Result<Url, url::ParseError> {
        join(&self.thumbnail_cdn, path)
    }

    pub(super) fn page_url(&self, path: &str) -> Result<Url, url::ParseError> {
        join(&self.page_cdn, path)
    }
}

// Paths are appended segment by segment, so `:`, `#` and `?` in a file name stay part
// of the path. Only full `http(s)` urls replace the base.
fn join(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let path = path.trim();
    if path.starts_with("http://") || path.starts_with("https://") {
        return Url::parse(path);
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(path.split('/').filter(|segment| !segment.is_empty()));

    Ok(url)
}

/// Builds a validated [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    api: String,
    thumbnail_cdn: String,
    page_cdn: String,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    /// Creates a builder seeded with the production endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: API_ENDPOINT.to_owned(),
            thumbnail_cdn: THUMBNAIL_CDN.to_owned(),
            page_cdn: PAGE_CDN.to_owned(),
        }
    }

    /// Overrides the GraphQL endpoint.
    #[must_use]
    pub fn api(self, url: &str) -> Self {
        Self {
            api: url.to_owned(),
            ..self
        }
    }

    /// Overrides the cover CDN.
    #[must_use]
    pub fn thumbnail_cdn(self, url: &str) -> Self {
        Self {
            thumbnail_cdn: url.to_owned(),
            ..self
        }
    }

    /// Overrides the page CDN.
    #[must_use]
    pub fn page_cdn(self, url: &str) -> Self {
        Self {
            page_cdn: url.to_owned(),
            ..self
        }
    }

    /// Validates every url and returns the [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a url fails to parse or is not `http`/`https`.
    pub fn build(self) -> Result<Config, ConfigError> {
        Ok(Config {
            api: parse("api", &self.api, false)?,
            thumbnail_cdn: parse("thumbnail_cdn", &self.thumbnail_cdn, true)?,
            page_cdn: parse("page_cdn", &self.page_cdn, true)?,
        })
    }
}

fn parse(field: &'static str, raw: &str, base: bool) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|source| ConfigError::MalformedUrl { field, source })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            field,
            url: url.to_string(),
        });
    }

    if base && !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default = "default_api")]
    api: String,
    #[serde(default = "default_thumbnail_cdn")]
    thumbnail_cdn: String,
    #[serde(default = "default_page_cdn")]
    page_cdn: String,
}

fn default_api() -> String {
    API_ENDPOINT.to_owned()
}

fn default_thumbnail_cdn() -> String {
    THUMBNAIL_CDN.to_owned()
}

fn default_page_cdn() -> String {
    PAGE_CDN.to_owned()
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        ConfigBuilder {
            api: raw.api,
            thumbnail_cdn: raw.thumbnail_cdn,
            page_cdn: raw.page_cdn,
        }
        .build()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_should_match_builder() -> Result<(), ConfigError> {
        assert_eq!(Config::default(), Config::builder().build()?);
        Ok(())
    }

    #[test]
    fn should_join_cover_onto_thumbnail_cdn() -> Result<(), url::ParseError> {
        let config = Config::default();
        assert_eq!(
            "https://thumb.mghubcdn.com/mn/red-storm.jpg",
            config.cover_url("mn/red-storm.jpg")?.as_str()
        );
        assert_eq!(
            "https://thumb.mghubcdn.com/mn/red-storm.jpg",
            config.cover_url("/mn/red-storm.jpg")?.as_str()
        );
        Ok(())
    }

    #[test]
    fn should_keep_page_cdn_path() -> Result<(), url::ParseError> {
        let config = Config::default();
        assert_eq!(
            "https://img.mghubcdn.com/file/imghub/red-storm_123/1/1.jpg",
            config.page_url("red-storm_123/1/1.jpg")?.as_str()
        );
        Ok(())
    }

    #[test]
    fn should_pass_absolute_paths_through() -> Result<(), url::ParseError> {
        let config = Config::default();
        assert_eq!(
            "https://example.com/a.jpg",
            config.page_url("https://example.com/a.jpg")?.as_str()
        );
        Ok(())
    }

    #[test]
    fn should_treat_page_paths_as_paths_not_url_references() -> Result<(), url::ParseError> {
        let config = Config::default();
        assert_eq!(
            "https://img.mghubcdn.com/file/imghub/m/1/a:b.jpg",
            config.page_url("m/1/a:b.jpg")?.as_str()
        );
        assert_eq!(
            "https://img.mghubcdn.com/file/imghub/page:1.jpg",
            config.page_url("page:1.jpg")?.as_str()
        );
        assert_eq!(
            "https://img.mghubcdn.com/file/imghub/m/1/x%231.jpg",
            config.page_url("m/1/x#1.jpg")?.as_str()
        );
        assert_eq!(
            "https://img.mghubcdn.com/file/imghub/m/1/what%3F.jpg",
            config.page_url("m/1/what?.jpg")?.as_str()
        );
        assert_eq!(
            "https://thumb.mghubcdn.com/mn/red-storm.jpg",
            config.cover_url("//mn//red-storm.jpg")?.as_str()
        );
        Ok(())
    }

    #[test]
    fn should_append_missing_trailing_slash_to_bases() -> Result<(), ConfigError> {
        let config = Config::builder()
            .page_cdn("http://localhost:9000/pages")
            .build()?;
        assert_eq!("http://localhost:9000/pages/", config.page_cdn().as_str());
        Ok(())
    }

    #[test]
    fn should_reject_non_http_urls() {
        let err = Config::builder().api("ftp://example.com").build().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme { field: "api", .. }));

        let err = Config::builder().thumbnail_cdn("not a url").build().unwrap_err();
        assert!(matches!(err, ConfigError::MalformedUrl { field: "thumbnail_cdn", .. }));
    }

    #[test]
    fn should_deserialize_with_defaults() -> Result<(), serde_json::Error> {
        let config: Config = serde_json::from_str(r#"{"api": "http://127.0.0.1:1234/graphql"}"#)?;
        assert_eq!("http://127.0.0.1:1234/graphql", config.api().as_str());
        assert_eq!(THUMBNAIL_CDN, config.thumbnail_cdn().as_str());
        Ok(())
    }

    #[test]
    fn should_fail_deserializing_invalid_urls() {
        assert!(serde_json::from_str::<Config>(r#"{"page_cdn": "mailto:a@b.c"}"#).is_err());
    }
}
