//! The host-facing contract and its MangaHub implementation.

use serde_json::{Map, Value};
use tracing::instrument;

use super::{
    api::{self, Envelope},
    chapter::{Chapter, ChapterDetails},
    config::Config,
    errors::ResponseError,
    graphql::GraphQLQuery,
    manga::Manga,
    request::{Metadata, Request},
    response::Body,
    tile::{HomeSection, MangaTile, PagedResults},
};

/// Static facts about a source, shown by the host in its source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    /// Display name.
    pub name: &'static str,
    /// Version of the source implementation.
    pub version: &'static str,
    /// Who maintains the source.
    pub author: &'static str,
    /// Short description, may be empty.
    pub description: &'static str,
    /// Icon file name, relative to the source's bundle.
    pub icon: &'static str,
    /// Public website of the source.
    pub website_base_url: &'static str,
    /// Whether the whole source is adult content.
    pub hentai_source: bool,
}

/// What the host wants from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent<'a> {
    /// Search by title.
    Search(&'a str),
    /// Details for every listed slug.
    MangaDetails(&'a [&'a str]),
    /// Chapter list of a manga.
    Chapters(&'a str),
    /// Pages of one chapter.
    ChapterDetails {
        /// Slug of the manga.
        manga_id: &'a str,
        /// Chapter id, i.e. the chapter number.
        chapter_id: &'a str,
    },
    /// Shelves for the landing page.
    HomeSections,
}

/// A parsed response, tagged by the intent it answers.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// Search hits.
    Search(PagedResults),
    /// One manga.
    MangaDetails(Box<Manga>),
    /// Chapters in source order.
    Chapters(Vec<Chapter>),
    /// Pages of a chapter.
    ChapterDetails(ChapterDetails),
    /// Landing page shelves.
    HomeSections(Vec<HomeSection>),
}

/// The contract between a content source and the host application.
///
/// Each intent is a pure `*_request` builder and a pure parser. The host sends the
/// [`Request`], then hands the raw body and [`Request::metadata()`] back to the
/// parser of the same intent.
///
/// List intents (search, chapters, home) treat a missing path as "nothing found"
/// and return an empty result. Single-entity intents fail with
/// [`ResponseError::MissingPath`], or [`ResponseError::Api`] when the GraphQL
/// envelope says why.
pub trait Source {
    /// Static information about the source.
    fn info(&self) -> SourceInfo;

    /// Builds a title search.
    fn search_request(&self, query: &str) -> Request;

    /// Parses a search response.
    fn search(&self, body: Body<'_>, metadata: &Metadata) -> Result<PagedResults, ResponseError>;

    /// Builds one details request per slug, in the given order.
    fn manga_details_requests(&self, ids: &[&str]) -> Vec<Request>;

    /// Parses a details response. The manga id comes from `metadata`.
    fn manga_details(&self, body: Body<'_>, metadata: &Metadata) -> Result<Manga, ResponseError>;

    /// Builds a chapter list request.
    fn chapters_request(&self, manga_id: &str) -> Request;

    /// Parses a chapter list, keeping source order.
    fn chapters(&self, body: Body<'_>, metadata: &Metadata) -> Result<Vec<Chapter>, ResponseError>;

    /// Builds a page list request for `chapter_id` of `manga_id`.
    fn chapter_details_request(&self, manga_id: &str, chapter_id: &str) -> Request;

    /// Parses a page list.
    fn chapter_details(
        &self,
        body: Body<'_>,
        metadata: &Metadata,
    ) -> Result<ChapterDetails, ResponseError>;

    /// Builds the landing page request.
    fn home_sections_request(&self) -> Request;

    /// Parses the landing page.
    fn home_sections(
        &self,
        body: Body<'_>,
        metadata: &Metadata,
    ) -> Result<Vec<HomeSection>, ResponseError>;

    /// Builds every request an intent needs.
    fn build_requests(&self, intent: Intent<'_>) -> Vec<Request> {
        match intent {
            Intent::Search(query) => vec![self.search_request(query)],
            Intent::MangaDetails(ids) => self.manga_details_requests(ids),
            Intent::Chapters(manga_id) => vec![self.chapters_request(manga_id)],
            Intent::ChapterDetails {
                manga_id,
                chapter_id,
            } => vec![self.chapter_details_request(manga_id, chapter_id)],
            Intent::HomeSections => vec![self.home_sections_request()],
        }
    }

    /// Parses a body with the parser its metadata belongs to.
    fn parse_response(
        &self,
        body: Body<'_>,
        metadata: &Metadata,
    ) -> Result<Parsed, ResponseError> {
        Ok(match metadata {
            Metadata::Search => Parsed::Search(self.search(body, metadata)?),
            Metadata::MangaDetails { .. } => {
                Parsed::MangaDetails(Box::new(self.manga_details(body, metadata)?))
            }
            Metadata::Chapters { .. } => Parsed::Chapters(self.chapters(body, metadata)?),
            Metadata::ChapterDetails { .. } => {
                Parsed::ChapterDetails(self.chapter_details(body, metadata)?)
            }
            Metadata::HomeSections => Parsed::HomeSections(self.home_sections(body, metadata)?),
        })
    }
}

/// The MangaHub source.
///
/// Stateless apart from its [`Config`], so one instance can serve any number of
/// concurrent calls.
///
/// # Example
///
/// ```
/// # use mangahub::platform::mangahub::{MangaHub, Source, response::Body};
/// let source = MangaHub::new();
///
/// let request = source.search_request("red storm");
/// assert_eq!("https://api.mghubcdn.com/graphql", request.url().as_str());
///
/// // The host performs the request, then:
/// let body = r#"{"data":{"search":{"rows":[{"title":"Red Storm","slug":"red-storm_123","image":"mn/red-storm.jpg"}],"count":1}}}"#;
/// let results = source.search(Body::from(body), request.metadata())?;
///
/// assert_eq!("red-storm_123", results.results()[0].id());
/// # Ok::<(), mangahub::platform::mangahub::errors::ResponseError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MangaHub {
    config: Config,
}

impl MangaHub {
    /// Facts about the MangaHub source.
    pub const INFO: SourceInfo = SourceInfo {
        name: "MangaHub",
        // Tracks the crate, so hosts see a new source version on every release.
        version: env!("CARGO_PKG_VERSION"),
        author: "Alysson Souza e Silva",
        description: "",
        icon: "icon.png",
        website_base_url: "https://mangahub.io",
        hentai_source: false,
    };

    /// A source pointed at production.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A source pointed at the given endpoints.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// The endpoints in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn graphql(&self, query: &GraphQLQuery, variables: Map<String, Value>, metadata: Metadata) -> Request {
        Request::graphql(&self.config, query, variables, metadata)
    }
}

/// Chapter numbers are bound as `Float`. Anything that is not a number is
/// forwarded as-is and left for the API to reject.
fn number_variable(chapter_id: &str) -> Value {
    chapter_id
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .and_then(serde_json::Number::from_f64)
        .map_or_else(|| Value::from(chapter_id), Value::Number)
}

fn variables<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .collect()
}

impl Source for MangaHub {
    fn info(&self) -> SourceInfo {
        Self::INFO
    }

    fn search_request(&self, query: &str) -> Request {
        self.graphql(
            &GraphQLQuery::SEARCH,
            variables([("q", Value::from(query))]),
            Metadata::Search,
        )
    }

    #[instrument(name = "parsing search response", skip_all)]
    fn search(&self, body: Body<'_>, metadata: &Metadata) -> Result<PagedResults, ResponseError> {
        if !matches!(metadata, Metadata::Search) {
            return Err(metadata.mismatch("search"));
        }

        let Envelope { data, errors } = Envelope::<api::search::Data>::decode(body)?;
        api::warn_errors(errors.as_deref(), "search");

        let Some(search) = data.and_then(|data| data.search) else {
            tracing::warn!("response has no `data.search`, returning no results");
            return Ok(PagedResults::default());
        };

        let Some(rows) = search.rows else {
            tracing::warn!("response has no `data.search.rows`, returning no results");
            return Ok(PagedResults::default());
        };

        Ok(PagedResults {
            results: rows
                .into_iter()
                .filter_map(|row| MangaTile::from_row(row, &self.config))
                .collect(),
            total: search.count,
        })
    }

    fn manga_details_requests(&self, ids: &[&str]) -> Vec<Request> {
        ids.iter()
            .map(|id| {
                self.graphql(
                    &GraphQLQuery::MANGA,
                    variables([("slug", Value::from(*id))]),
                    Metadata::MangaDetails {
                        id: (*id).to_owned(),
                    },
                )
            })
            .collect()
    }

    #[instrument(name = "parsing manga details response", skip_all)]
    fn manga_details(&self, body: Body<'_>, metadata: &Metadata) -> Result<Manga, ResponseError> {
        let Metadata::MangaDetails { id } = metadata else {
            return Err(metadata.mismatch("manga details"));
        };

        let Envelope { data, errors } = Envelope::<api::manga::Data>::decode(body)?;

        let Some(manga) = data.and_then(|data| data.manga) else {
            tracing::warn!(id, "response has no `data.manga`");
            return Err(api::missing(errors, "data.manga"));
        };

        api::warn_errors(errors.as_deref(), "manga details");

        Ok(Manga::from_api(manga, id, &self.config))
    }

    fn chapters_request(&self, manga_id: &str) -> Request {
        self.graphql(
            &GraphQLQuery::CHAPTERS,
            variables([("slug", Value::from(manga_id))]),
            Metadata::Chapters {
                manga_id: manga_id.to_owned(),
            },
        )
    }

    #[instrument(name = "parsing chapters response", skip_all)]
    fn chapters(&self, body: Body<'_>, metadata: &Metadata) -> Result<Vec<Chapter>, ResponseError> {
        let Metadata::Chapters { manga_id } = metadata else {
            return Err(metadata.mismatch("chapters"));
        };

        let Envelope { data, errors } = Envelope::<api::manga::Data>::decode(body)?;
        api::warn_errors(errors.as_deref(), "chapters");

        let Some(chapters) = data
            .and_then(|data| data.manga)
            .and_then(|manga| manga.chapters)
        else {
            tracing::warn!(manga_id, "response has no `data.manga.chapters`, returning no chapters");
            return Ok(Vec::new());
        };

        Ok(chapters
            .into_iter()
            .filter_map(|chapter| Chapter::from_api(chapter, manga_id))
            .collect())
    }

    fn chapter_details_request(&self, manga_id: &str, chapter_id: &str) -> Request {
        self.graphql(
            &GraphQLQuery::CHAPTER,
            variables([
                ("slug", Value::from(manga_id)),
                ("number", number_variable(chapter_id)),
            ]),
            Metadata::ChapterDetails {
                manga_id: manga_id.to_owned(),
                chapter_id: chapter_id.to_owned(),
            },
        )
    }

    #[instrument(name = "parsing chapter details response", skip_all)]
    fn chapter_details(
        &self,
        body: Body<'_>,
        metadata: &Metadata,
    ) -> Result<ChapterDetails, ResponseError> {
        let Metadata::ChapterDetails {
            manga_id,
            chapter_id,
        } = metadata
        else {
            return Err(metadata.mismatch("chapter details"));
        };

        let Envelope { data, errors } = Envelope::<api::chapter::Data>::decode(body)?;

        let Some(chapter) = data.and_then(|data| data.chapter) else {
            tracing::warn!(manga_id, chapter_id, "response has no `data.chapter`");
            return Err(api::missing(errors, "data.chapter"));
        };

        api::warn_errors(errors.as_deref(), "chapter details");

        ChapterDetails::from_api(chapter, manga_id, chapter_id, &self.config)
    }

    fn home_sections_request(&self) -> Request {
        self.graphql(&GraphQLQuery::LATEST_POPULAR, Map::new(), Metadata::HomeSections)
    }

    #[instrument(name = "parsing home sections response", skip_all)]
    fn home_sections(
        &self,
        body: Body<'_>,
        metadata: &Metadata,
    ) -> Result<Vec<HomeSection>, ResponseError> {
        if !matches!(metadata, Metadata::HomeSections) {
            return Err(metadata.mismatch("home sections"));
        }

        let Envelope { data, errors } = Envelope::<api::latest::Data>::decode(body)?;
        api::warn_errors(errors.as_deref(), "home sections");

        let rows = data
            .and_then(|data| data.latest_popular)
            .unwrap_or_else(|| {
                tracing::warn!("response has no `data.latestPopular`, returning an empty shelf");
                Vec::new()
            });

        let items = rows
            .into_iter()
            .filter_map(|row| MangaTile::from_row(row, &self.config))
            .collect();

        Ok(vec![HomeSection::latest(items)])
    }
}
