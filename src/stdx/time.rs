use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses the timestamps the API hands out.
///
/// The API is not consistent across fields: `updatedDate` is usually RFC 3339,
/// chapter `date` is sometimes a naive `YYYY-MM-DD HH:MM:SS` in UTC. Anything
/// else yields `None`.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if raw.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
