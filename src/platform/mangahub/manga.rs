//! Full manga details.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{api, config::Config, meta::Status, tile};
use crate::stdx::{text, time};

/// A tag the host can filter or display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    id: String,
    label: String,
}

impl Tag {
    /// Tag id. MangaHub genres have no separate id, so this equals the label.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A labelled group of tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSection {
    id: &'static str,
    label: &'static str,
    tags: Vec<Tag>,
}

impl TagSection {
    fn genres(genres: Vec<String>) -> Self {
        Self {
            id: "1",
            label: "genres",
            tags: genres
                .into_iter()
                .map(|genre| Tag {
                    id: genre.clone(),
                    label: genre,
                })
                .collect(),
        }
    }

    /// Section id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id
    }

    /// Section label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label
    }

    /// Tags in the order MangaHub listed them.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// Everything MangaHub knows about a single manga.
///
/// Gotten from [`Source::manga_details()`](super::source::Source::manga_details()).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manga {
    pub(super) id: String,
    pub(super) title: String,
    pub(super) alternative_title: Option<String>,
    pub(super) artist: Option<String>,
    pub(super) author: Option<String>,
    pub(super) image: Option<String>,
    pub(super) status: Status,
    pub(super) tags: Vec<TagSection>,
    pub(super) description: Option<String>,
    pub(super) last_update: Option<DateTime<Utc>>,
    pub(super) hentai: bool,
    pub(super) latest_chapter: Option<f64>,
}

impl Manga {
    /// Builds the canonical manga from a `manga` query result.
    ///
    /// `id` is the slug the request was made for: MangaHub does not echo one that
    /// can be relied on.
    pub(super) fn from_api(raw: api::manga::Manga, id: &str, config: &Config) -> Self {
        let genres = raw
            .genres
            .as_deref()
            .map(|genres| text::split_unique(genres, ','))
            .unwrap_or_default();

        let last_update = raw.updated_date.as_deref().and_then(|date| {
            let parsed = time::parse(date);
            if parsed.is_none() {
                tracing::debug!(date, "unparseable `updatedDate`");
            }
            parsed
        });

        Self {
            id: id.to_owned(),
            title: raw.title.as_deref().map(text::clean).unwrap_or_default(),
            alternative_title: non_empty(raw.alternative_title.as_deref()),
            artist: non_empty(raw.artist.as_deref()),
            author: non_empty(raw.author.as_deref()),
            image: tile::cover(config, raw.image.as_deref()),
            status: Status::from_api(raw.status.as_deref()),
            tags: vec![TagSection::genres(genres)],
            description: non_empty(raw.description.as_deref()),
            last_update,
            hentai: raw.is_yaoi.unwrap_or(false)
                || raw.is_porn.unwrap_or(false)
                || raw.is_soft_porn.unwrap_or(false),
            latest_chapter: raw.latest_chapter,
        }
    }

    /// Slug the manga was requested with.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Main title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Alternative titles, as a single string the way MangaHub stores them.
    #[must_use]
    pub fn alternative_title(&self) -> Option<&str> {
        self.alternative_title.as_deref()
    }

    /// Artist credit.
    #[must_use]
    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    /// Author credit.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Absolute cover url on the thumbnail CDN.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Publication status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Tag sections. MangaHub only has a single `genres` section.
    #[must_use]
    pub fn tags(&self) -> &[TagSection] {
        &self.tags
    }

    /// Genre labels in listed order, without repeats.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .flat_map(|section| section.tags.iter().map(|tag| tag.label.as_str()))
    }

    /// Synopsis with HTML entities decoded.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// When MangaHub last touched the entry.
    #[must_use]
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Adult content, set when any of `isYaoi`, `isPorn` or `isSoftPorn` is.
    #[must_use]
    pub fn is_hentai(&self) -> bool {
        self.hentai
    }

    /// MangaHub has no ratings, so this is always `0.0`.
    #[must_use]
    pub fn rating(&self) -> f32 {
        0.0
    }

    /// Number of the newest chapter.
    #[must_use]
    pub fn latest_chapter(&self) -> Option<f64> {
        self.latest_chapter
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(text::clean).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(json: serde_json::Value) -> api::manga::Manga {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn should_echo_requested_id_and_map_fields() {
        let manga = Manga::from_api(
            raw(serde_json::json!({
                "id": 123,
                "slug": "some-other-slug",
                "title": "Red Storm",
                "status": "ongoing",
                "image": "mn/red-storm.jpg",
                "author": "Cyungchan Noh",
                "artist": "Cyungchan Noh",
                "genres": "Action, Drama, Martial arts",
                "description": "Ruthless &amp; cold.",
                "isYaoi": false,
                "isPorn": false,
                "isSoftPorn": false,
                "updatedDate": "2021-03-04T05:06:07.000Z",
                "latestChapter": 400
            })),
            "red-storm_123",
            &Config::default(),
        );

        assert_eq!("red-storm_123", manga.id());
        assert_eq!("Red Storm", manga.title());
        assert_eq!(Some("https://thumb.mghubcdn.com/mn/red-storm.jpg"), manga.image());
        assert_eq!(Status::Ongoing, manga.status());
        assert_eq!(Some("Cyungchan Noh"), manga.author());
        assert_eq!(Some("Ruthless & cold."), manga.description());
        assert_eq!(vec!["Action", "Drama", "Martial arts"], manga.genres().collect::<Vec<_>>());
        assert_eq!("genres", manga.tags()[0].label());
        assert!(!manga.is_hentai());
        assert_eq!(Some(400.0), manga.latest_chapter());
        assert!(manga.last_update().is_some());
    }

    #[test]
    fn should_flag_adult_content_when_any_flag_is_set() {
        for flag in ["isYaoi", "isPorn", "isSoftPorn"] {
            let mut flags = serde_json::Map::new();
            flags.insert(flag.to_owned(), serde_json::Value::Bool(true));

            let manga = Manga::from_api(raw(flags.into()), "x", &Config::default());
            assert!(manga.is_hentai(), "`{flag}` should mark the manga as adult");
        }
    }

    #[test]
    fn should_tolerate_nulls() {
        let manga = Manga::from_api(
            raw(serde_json::json!({
                "title": null,
                "status": null,
                "genres": null,
                "image": null,
                "isYaoi": null
            })),
            "x",
            &Config::default(),
        );

        assert_eq!("", manga.title());
        assert_eq!(Status::Completed, manga.status());
        assert_eq!(0, manga.genres().count());
        assert_eq!(None, manga.image());
        assert!(!manga.is_hentai());
    }

    #[test]
    fn should_not_emit_empty_genres_from_trailing_separator() {
        let manga = Manga::from_api(
            raw(serde_json::json!({ "genres": "Action, Drama, " })),
            "x",
            &Config::default(),
        );
        assert_eq!(vec!["Action", "Drama"], manga.genres().collect::<Vec<_>>());
    }
}
