//! Contains metadata implementations for MangaHub.

use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Publication status of a manga.
///
/// MangaHub only distinguishes `ongoing` from everything else, so the mapping
/// from the API string is total: `"ongoing"` is [`Status::Ongoing`], any other
/// value (or no value) is [`Status::Completed`].
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    /// Still releasing chapters.
    Ongoing,
    /// Finished, or anything MangaHub does not call `ongoing`.
    Completed,
}

impl Status {
    /// Maps the raw `status` field of a `manga` query.
    #[must_use]
    pub fn from_api(status: Option<&str>) -> Self {
        match status {
            Some("ongoing") => Self::Ongoing,
            _ => Self::Completed,
        }
    }
}

impl From<&str> for Status {
    fn from(status: &str) -> Self {
        Self::from_api(Some(status))
    }
}

/// Language a chapter is published in.
///
/// MangaHub's `m01` catalogue is English only.
#[non_exhaustive]
#[derive(
    Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Language {
    /// English
    #[default]
    En,
}

impl Language {
    /// ISO 639-1 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// An error that can occur when parsing a [`Language`] code.
#[derive(Debug, Error)]
#[error("failed to parse `{0}` into `Language`, only `en` is served by MangaHub")]
pub struct ParseLanguageError(String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" | "EN" | "english" | "English" => Ok(Self::En),
            _ => Err(ParseLanguageError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_only_treat_ongoing_as_ongoing() {
        assert_eq!(Status::Ongoing, Status::from("ongoing"));
        assert_eq!(Status::Completed, Status::from("completed"));
        assert_eq!(Status::Completed, Status::from("Ongoing"));
        assert_eq!(Status::Completed, Status::from(""));
        assert_eq!(Status::Completed, Status::from_api(None));
    }

    #[test]
    fn should_parse_language() -> Result<(), ParseLanguageError> {
        assert_eq!(Language::En, Language::from_str("en")?);
        assert!(Language::from_str("fr").is_err());
        assert_eq!("en", Language::En.to_string());
        Ok(())
    }
}
