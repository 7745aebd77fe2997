//! Chapter listings and chapter pages.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{
    api,
    config::Config,
    errors::{MissingPath, ResponseError},
    meta::Language,
};
use crate::stdx::{text, time};

/// A single entry of a manga's chapter list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter {
    pub(super) id: String,
    pub(super) manga_id: String,
    pub(super) number: f64,
    pub(super) title: Option<String>,
    pub(super) language: Language,
    pub(super) published: Option<DateTime<Utc>>,
}

impl Chapter {
    /// Rows without a number have no usable id and are dropped.
    pub(super) fn from_api(raw: api::manga::Chapter, manga_id: &str) -> Option<Self> {
        let Some(number) = raw.number else {
            tracing::debug!(manga_id, title = ?raw.title, "skipping chapter without a number");
            return None;
        };

        let published = raw.date.as_deref().and_then(|date| {
            let parsed = time::parse(date);
            if parsed.is_none() {
                tracing::debug!(manga_id, number, date, "unparseable chapter `date`");
            }
            parsed
        });

        Some(Self {
            id: id_for(number),
            manga_id: manga_id.to_owned(),
            number,
            title: raw
                .title
                .as_deref()
                .map(text::clean)
                .filter(|title| !title.is_empty()),
            language: Language::En,
            published,
        })
    }

    /// Chapter id: the chapter number as a string, e.g. `"12"` or `"12.5"`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Slug of the manga the chapter belongs to.
    #[must_use]
    pub fn manga_id(&self) -> &str {
        &self.manga_id
    }

    /// Chapter number.
    #[must_use]
    pub fn number(&self) -> f64 {
        self.number
    }

    /// Chapter title, if it has one beyond its number.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Always [`Language::En`].
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// When the chapter went up.
    #[must_use]
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published
    }
}

/// `12.0` becomes `"12"`, `12.5` stays `"12.5"`.
fn id_for(number: f64) -> String {
    number.to_string()
}

/// The readable content of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterDetails {
    pub(super) id: String,
    pub(super) manga_id: String,
    pub(super) pages: Vec<String>,
    pub(super) long_strip: bool,
}

impl ChapterDetails {
    pub(super) fn from_api(
        raw: api::chapter::Chapter,
        manga_id: &str,
        chapter_id: &str,
        config: &Config,
    ) -> Result<Self, ResponseError> {
        let pages = match raw.pages {
            Some(pages) if !pages.is_null() => decode_pages(pages)?,
            _ => {
                return Err(MissingPath("data.chapter.pages").into());
            }
        };

        let pages = pages
            .into_iter()
            .map(|path| {
                config
                    .page_url(&path)
                    .map(String::from)
                    .map_err(|source| ResponseError::MalformedImagePath { path, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: chapter_id.to_owned(),
            manga_id: manga_id.to_owned(),
            pages: text::dedup_ordered(pages),
            long_strip: raw
                .manga
                .and_then(|manga| manga.is_webtoon)
                .unwrap_or(false),
        })
    }

    /// Chapter id the pages were requested for.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Slug of the manga the chapter belongs to.
    #[must_use]
    pub fn manga_id(&self) -> &str {
        &self.manga_id
    }

    /// Absolute page urls on the page CDN, in reading order.
    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Whether the reader should lay the chapter out as a vertical strip.
    #[must_use]
    pub fn is_long_strip(&self) -> bool {
        self.long_strip
    }
}

/// Second stage of the decode: `pages` is itself JSON, almost always sent as a string.
fn decode_pages(pages: Value) -> Result<Vec<String>, ResponseError> {
    let pages: api::chapter::Pages = match pages {
        Value::String(encoded) => serde_json::from_str(&encoded),
        decoded => serde_json::from_value(decoded),
    }
    .map_err(ResponseError::MalformedPages)?;

    Ok(pages
        .into_paths()
        .into_iter()
        .map(|path| path.trim().to_owned())
        .filter(|path| !path.is_empty())
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw_chapter(json: Value) -> api::chapter::Chapter {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn should_stringify_numbers_like_the_site_does() {
        assert_eq!("12", id_for(12.0));
        assert_eq!("12.5", id_for(12.5));
        assert_eq!("0", id_for(0.0));
    }

    #[test]
    fn should_build_chapter_from_row() {
        let raw: api::manga::Chapter = serde_json::from_value(serde_json::json!({
            "id": 1,
            "number": 3,
            "title": "The &quot;Storm&quot;",
            "slug": "chapter-3",
            "date": "2020-09-06 04:27:48"
        }))
        .unwrap();

        let chapter = Chapter::from_api(raw, "red-storm_123").unwrap();

        assert_eq!("3", chapter.id());
        assert_eq!("red-storm_123", chapter.manga_id());
        assert_eq!(3.0, chapter.number());
        assert_eq!(Some("The \"Storm\""), chapter.title());
        assert_eq!(Language::En, chapter.language());
        assert_eq!(Some(1_599_366_468), chapter.published().map(|date| date.timestamp()));
    }

    #[test]
    fn should_drop_rows_without_a_finite_number() {
        for number in ["NaN", "inf", ""] {
            let raw: api::manga::Chapter =
                serde_json::from_value(serde_json::json!({ "number": number })).unwrap();
            assert_eq!(None, Chapter::from_api(raw, "red-storm_123"), "`{number}` should be dropped");
        }
    }

    #[test]
    fn should_decode_pages_twice() -> Result<(), ResponseError> {
        let details = ChapterDetails::from_api(
            raw_chapter(serde_json::json!({
                "pages": "[\"a.jpg\",\"b.jpg\"]",
                "manga": { "isWebtoon": true }
            })),
            "red-storm_123",
            "1",
            &Config::default(),
        )?;

        assert_eq!(
            vec![
                "https://img.mghubcdn.com/file/imghub/a.jpg",
                "https://img.mghubcdn.com/file/imghub/b.jpg"
            ],
            details.pages()
        );
        assert!(details.is_long_strip());
        assert_eq!("1", details.id());
        assert_eq!("red-storm_123", details.manga_id());
        Ok(())
    }

    #[test]
    fn should_accept_prefixed_page_lists() -> Result<(), ResponseError> {
        let details = ChapterDetails::from_api(
            raw_chapter(serde_json::json!({
                "pages": "{\"p\":\"red-storm_123/1/\",\"i\":[\"1.jpg\",\"2.jpg\"]}"
            })),
            "red-storm_123",
            "1",
            &Config::default(),
        )?;

        assert_eq!(
            vec![
                "https://img.mghubcdn.com/file/imghub/red-storm_123/1/1.jpg",
                "https://img.mghubcdn.com/file/imghub/red-storm_123/1/2.jpg"
            ],
            details.pages()
        );
        assert!(!details.is_long_strip());
        Ok(())
    }

    #[test]
    fn should_keep_odd_file_names_on_the_page_cdn() -> Result<(), ResponseError> {
        let details = ChapterDetails::from_api(
            raw_chapter(serde_json::json!({
                "pages": "[\"m/1/a:b.jpg\",\"page:1.jpg\",\"m/1/x#1.jpg\"]"
            })),
            "m",
            "1",
            &Config::default(),
        )?;

        assert_eq!(
            vec![
                "https://img.mghubcdn.com/file/imghub/m/1/a:b.jpg",
                "https://img.mghubcdn.com/file/imghub/page:1.jpg",
                "https://img.mghubcdn.com/file/imghub/m/1/x%231.jpg"
            ],
            details.pages()
        );
        Ok(())
    }

    #[test]
    fn should_accept_already_decoded_pages() -> Result<(), ResponseError> {
        let details = ChapterDetails::from_api(
            raw_chapter(serde_json::json!({ "pages": ["a.jpg", "a.jpg", "b.jpg"] })),
            "m",
            "1",
            &Config::default(),
        )?;

        assert_eq!(2, details.pages().len());
        Ok(())
    }

    #[test]
    fn should_fail_on_missing_or_garbage_pages() {
        let err = ChapterDetails::from_api(
            raw_chapter(serde_json::json!({ "pages": null })),
            "m",
            "1",
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ResponseError::MissingPath(path) if path.path() == "data.chapter.pages"));

        let err = ChapterDetails::from_api(
            raw_chapter(serde_json::json!({ "pages": "not json" })),
            "m",
            "1",
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ResponseError::MalformedPages(_)));
    }
}
