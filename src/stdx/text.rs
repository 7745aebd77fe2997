/// Decodes HTML entities left in API text (`&amp;`, `&#39;`, ...) and trims it.
pub fn clean(raw: &str) -> String {
    html_escape::decode_html_entities(raw.trim()).trim().to_owned()
}

/// Splits a separated list, dropping blanks and repeats while keeping first-seen order.
pub fn split_unique(raw: &str, separator: char) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    for item in raw.split(separator).map(str::trim).filter(|item| !item.is_empty()) {
        if !items.iter().any(|seen| seen == item) {
            items.push(item.to_owned());
        }
    }

    items
}

/// Drops repeated entries, keeping the first occurrence of each.
pub fn dedup_ordered(items: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(items.len());

    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }

    unique
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_decode_entities() {
        assert_eq!("Tom & Jerry's", clean("  Tom &amp; Jerry&#39;s "));
    }

    #[test]
    fn should_split_without_empty_artifacts() {
        assert_eq!(vec!["Action", "Drama"], split_unique("Action, Drama, ", ','));
        assert_eq!(vec!["Action", "Drama"], split_unique(",Action,, Drama,Action", ','));
        assert!(split_unique("", ',').is_empty());
    }

    #[test]
    fn should_keep_first_occurrence() {
        let items = vec!["b".to_owned(), "a".to_owned(), "b".to_owned()];
        assert_eq!(vec!["b", "a"], dedup_ordered(items));
    }
}
