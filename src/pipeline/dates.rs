// src/pipeline/dates.rs
//! Canonical release-date handling. Every date comparison in the pipeline
//! goes through `parse_release_date`, so an upstream value is either a full
//! valid ISO date or treated as absent, never coerced per call site.

use chrono::NaiveDate;

/// Total parse of an upstream `release_date`/`first_air_date` value.
/// Empty, missing, or partially-formed values all come back as `None`.
pub fn parse_release_date(raw: Option<&str>) -> Option<NaiveDate> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Display year: first four characters of the raw date field, empty if absent.
pub fn year_of(raw: Option<&str>) -> String {
    raw.unwrap_or_default().chars().take(4).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_iso_dates_only() {
        assert_eq!(
            parse_release_date(Some("2020-01-31")),
            NaiveDate::from_ymd_opt(2020, 1, 31)
        );
        assert_eq!(parse_release_date(Some(" 2020-01-31 ")).map(|d| d.to_string()),
            Some("2020-01-31".to_string()));
        assert_eq!(parse_release_date(Some("2020")), None);
        assert_eq!(parse_release_date(Some("2020-13-01")), None);
        assert_eq!(parse_release_date(Some("")), None);
        assert_eq!(parse_release_date(None), None);
    }

    #[test]
    fn year_is_first_four_chars_or_empty() {
        assert_eq!(year_of(Some("1999-03-30")), "1999");
        assert_eq!(year_of(Some("199")), "199");
        assert_eq!(year_of(Some("")), "");
        assert_eq!(year_of(None), "");
    }
}
