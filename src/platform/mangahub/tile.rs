//! List projections: search hits and home page shelves.

use serde::Serialize;

use super::{api::search::Row, config::Config};
use crate::stdx::text;

/// Minimal projection of a manga used in list views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MangaTile {
    pub(super) id: String,
    pub(super) title: String,
    pub(super) image: Option<String>,
    pub(super) latest_chapter: Option<f64>,
}

impl MangaTile {
    /// Slug of the manga.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Absolute cover url on the thumbnail CDN.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Number of the newest chapter, when the API reported one.
    #[must_use]
    pub fn latest_chapter(&self) -> Option<f64> {
        self.latest_chapter
    }

    /// Rows without a slug cannot be opened later, so they are dropped.
    pub(super) fn from_row(row: Row, config: &Config) -> Option<Self> {
        let Some(slug) = row.slug.filter(|slug| !slug.trim().is_empty()) else {
            tracing::debug!(title = ?row.title, "skipping row without a slug");
            return None;
        };

        Some(Self {
            title: row.title.as_deref().map(text::clean).unwrap_or_default(),
            image: cover(config, row.image.as_deref()),
            latest_chapter: row.latest_chapter,
            id: slug,
        })
    }
}

/// Joins a relative cover path onto the thumbnail CDN.
///
/// Covers are decorative: a path that cannot be joined is logged and dropped
/// rather than failing the whole response.
pub(super) fn cover(config: &Config, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|path| !path.is_empty())?;

    match config.cover_url(path) {
        Ok(url) => Some(url.into()),
        Err(err) => {
            tracing::warn!(path, %err, "failed to build cover url");
            None
        }
    }
}

/// Search results.
///
/// MangaHub search is fixed to `offset: 0`, so there is never a next page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PagedResults {
    pub(super) results: Vec<MangaTile>,
    pub(super) total: Option<u32>,
}

impl PagedResults {
    /// Hits in the order the API ranked them.
    #[must_use]
    pub fn results(&self) -> &[MangaTile] {
        &self.results
    }

    /// Consumes the page, returning its hits.
    #[must_use]
    pub fn into_results(self) -> Vec<MangaTile> {
        self.results
    }

    /// Total number of matches upstream, which can exceed [`Self::results()`].
    #[must_use]
    pub fn total(&self) -> Option<u32> {
        self.total
    }

    /// Whether the search came back empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A named, ordered shelf of tiles on the host's landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeSection {
    pub(super) id: &'static str,
    pub(super) title: &'static str,
    pub(super) items: Vec<MangaTile>,
}

impl HomeSection {
    pub(super) fn latest(items: Vec<MangaTile>) -> Self {
        Self {
            id: "latest",
            title: "Latest",
            items,
        }
    }

    /// Stable id of the section.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id
    }

    /// Display title of the section.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title
    }

    /// Tiles in API order.
    #[must_use]
    pub fn items(&self) -> &[MangaTile] {
        &self.items
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(slug: Option<&str>, image: Option<&str>) -> Row {
        Row {
            title: Some("Red Storm".to_owned()),
            slug: slug.map(str::to_owned),
            image: image.map(str::to_owned),
            latest_chapter: Some(400.0),
        }
    }

    #[test]
    fn should_build_tile_with_cover_on_thumbnail_cdn() {
        let tile = MangaTile::from_row(row(Some("red-storm_123"), Some("mn/red-storm.jpg")), &Config::default())
            .unwrap();

        assert_eq!("red-storm_123", tile.id());
        assert_eq!("Red Storm", tile.title());
        assert_eq!(Some("https://thumb.mghubcdn.com/mn/red-storm.jpg"), tile.image());
        assert_eq!(Some(400.0), tile.latest_chapter());
    }

    #[test]
    fn should_drop_rows_without_slug() {
        assert!(MangaTile::from_row(row(None, None), &Config::default()).is_none());
        assert!(MangaTile::from_row(row(Some("  "), None), &Config::default()).is_none());
    }

    #[test]
    fn should_leave_blank_covers_empty() {
        assert_eq!(None, cover(&Config::default(), Some("")));
        assert_eq!(None, cover(&Config::default(), None));
    }
}
