//! Normalization of `Last Changed Date` values reported by svn

use chrono::{DateTime, NaiveDate};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// Parse the calendar date out of a changed-date string.
///
/// svn reports `2024-03-01 10:15:00 +0100 (Fri, 01 Mar 2024)`; after the info
/// parser trims it this is usually `2024-03-01 10:15:00`. Only the leading
/// date token is significant. RFC 3339 timestamps are accepted too.
pub fn parse_changed_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }

    let token = raw.split_whitespace().next().unwrap_or(raw);
    let token = token.split('T').next().unwrap_or(token);
    let parsed = DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok());
    if parsed.is_none() {
        tracing::warn!("Unrecognized last changed date '{}'", raw);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_svn_info_date() {
        let date = parse_changed_date("2024-03-01 10:15:00").expect("date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).expect("ymd"));
    }

    #[test]
    fn parses_alternate_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 12, 31).expect("ymd");
        assert_eq!(parse_changed_date("2023/12/31"), Some(expected));
        assert_eq!(parse_changed_date("31.12.2023"), Some(expected));
        assert_eq!(parse_changed_date("2023-12-31T23:00:00+01:00"), Some(expected));
        assert_eq!(parse_changed_date("2023-12-31T08:00:00.123456Z"), Some(expected));
    }

    #[test]
    fn unparsable_dates_are_none() {
        assert_eq!(parse_changed_date(""), None);
        assert_eq!(parse_changed_date("yesterday"), None);
    }
}
