use thiserror::Error;

/// A path the response was expected to carry was absent or `null`.
///
/// Paths are written the way they appear in the GraphQL response, e.g.
/// `data.chapter` or `data.manga.chapters`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("response is missing `{0}`")]
pub struct MissingPath(pub &'static str);

impl MissingPath {
    /// The dotted path that was missing.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &'static str {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_name_the_missing_path() {
        let err = MissingPath("data.chapter");
        pretty_assertions::assert_eq!("data.chapter", err.path());
        pretty_assertions::assert_eq!("response is missing `data.chapter`", err.to_string());
    }
}
