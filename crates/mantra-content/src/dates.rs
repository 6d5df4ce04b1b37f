//! Post date parsing and display formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a post date. Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS`
/// (read as UTC), or a bare `YYYY-MM-DD` (midnight UTC).
#[must_use]
pub fn parse_post_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `"March 14, 2026"`. Unparseable input is returned unchanged.
#[must_use]
pub fn format_date(raw: &str) -> String {
    parse_post_date(raw).map_or_else(|| raw.to_owned(), |d| d.format("%B %-d, %Y").to_string())
}

/// `"Mar 14, 2026"`. Unparseable input is returned unchanged.
#[must_use]
pub fn format_date_short(raw: &str) -> String {
    parse_post_date(raw).map_or_else(|| raw.to_owned(), |d| d.format("%b %-d, %Y").to_string())
}
