//! GraphQL documents sent to `api.mghubcdn.com`.
//!
//! Caller supplied values never appear in a document, they travel in the
//! `variables` map. `x: m01` selects the MangaHub catalogue on the shared API.

pub(super) struct GraphQLQuery {
    pub operation_name: &'static str,
    pub document: &'static str,
}

const SEARCH: &str = r#"query Search($q: String) {
  search(x: m01, q: $q, genre: "all", mod: POPULAR, count: true, offset: 0) {
    rows {
      id
      rank
      title
      slug
      status
      author
      genres
      image
      latestChapter
      unauthFile
      createdDate
    }
    count
  }
}"#;

const MANGA: &str = r"query Manga($slug: String) {
  manga(x: m01, slug: $slug) {
    id
    rank
    title
    slug
    status
    image
    latestChapter
    author
    artist
    genres
    description
    alternativeTitle
    mainSlug
    isYaoi
    isPorn
    isSoftPorn
    unauthFile
    noCoverAd
    isLicensed
    createdDate
    updatedDate
  }
}";

const CHAPTERS: &str = r"query Chapters($slug: String) {
  manga(x: m01, slug: $slug) {
    chapters {
      id
      number
      title
      slug
      date
    }
  }
}";

const CHAPTER: &str = r"query Chapter($slug: String, $number: Float) {
  chapter(x: m01, slug: $slug, number: $number) {
    id
    title
    mangaID
    number
    date
    pages
    manga {
      isWebtoon
    }
  }
}";

const LATEST_POPULAR: &str = r"query LatestPopular {
  latestPopular(x: m01) {
    id
    title
    slug
    image
    latestChapter
    updatedDate
  }
}";

impl GraphQLQuery {
    pub const SEARCH: Self = Self {
        operation_name: "Search",
        document: SEARCH,
    };

    pub const MANGA: Self = Self {
        operation_name: "Manga",
        document: MANGA,
    };

    pub const CHAPTERS: Self = Self {
        operation_name: "Chapters",
        document: CHAPTERS,
    };

    pub const CHAPTER: Self = Self {
        operation_name: "Chapter",
        document: CHAPTER,
    };

    pub const LATEST_POPULAR: Self = Self {
        operation_name: "LatestPopular",
        document: LATEST_POPULAR,
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn documents_should_only_take_values_through_variables() {
        for query in [
            GraphQLQuery::SEARCH,
            GraphQLQuery::MANGA,
            GraphQLQuery::CHAPTERS,
            GraphQLQuery::CHAPTER,
            GraphQLQuery::LATEST_POPULAR,
        ] {
            assert!(
                query.document.starts_with(&format!("query {}", query.operation_name)),
                "`{}` should be a named operation",
                query.operation_name
            );
            assert!(query.document.contains("x: m01"));
        }
    }
}
