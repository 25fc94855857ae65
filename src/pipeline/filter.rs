// src/pipeline/filter.rs
use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::pipeline::dates::parse_release_date;
use crate::tmdb::types::SourceItem;

/// Why an item was dropped. One bucket per step of the admission chain;
/// rejected items are not reported individually, only counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingIdentity,
    Duplicate,
    Adult,
    Language,
    ReleaseDate,
    Artwork,
}

/// Per-variant switches for the admission chain. `today` is injected rather
/// than read from the clock so date checks stay deterministic under test.
#[derive(Debug, Clone)]
pub struct FilterPolicy {
    /// When set, `original_language` must equal this code exactly.
    pub original_language: Option<String>,
    /// When set, items released before this year are dropped.
    pub min_year: Option<i32>,
    pub today: NaiveDate,
}

impl FilterPolicy {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            original_language: None,
            min_year: None,
            today,
        }
    }

    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.original_language = Some(lang.into());
        self
    }

    pub fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = Some(year);
        self
    }
}

/// The admission chain in its fixed order, short-circuiting on the first
/// failure: identity completeness, dedup, adult flag, original language,
/// release-date validity, poster presence.
///
/// A parseable date later than `today` is unreleased and rejected; with the
/// canonical total parse this also covers any future-year value.
pub fn screen(
    policy: &FilterPolicy,
    seen: &HashSet<u64>,
    item: &SourceItem,
) -> Result<(), Rejection> {
    if item.id == 0 || item.display_title().is_none() {
        return Err(Rejection::MissingIdentity);
    }
    if seen.contains(&item.id) {
        return Err(Rejection::Duplicate);
    }
    if item.adult {
        return Err(Rejection::Adult);
    }
    if let Some(lang) = policy.original_language.as_deref() {
        if item.original_language.as_deref() != Some(lang) {
            return Err(Rejection::Language);
        }
    }
    let date = parse_release_date(item.release_or_air_date()).ok_or(Rejection::ReleaseDate)?;
    if date > policy.today {
        return Err(Rejection::ReleaseDate);
    }
    if let Some(floor) = policy.min_year {
        if date.year() < floor {
            return Err(Rejection::ReleaseDate);
        }
    }
    if item.poster().is_none() {
        return Err(Rejection::Artwork);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn valid_item(id: u64) -> SourceItem {
        SourceItem {
            id,
            title: Some(format!("Movie {id}")),
            original_language: Some("en".into()),
            release_date: Some("2020-01-01".into()),
            poster_path: Some("/p.jpg".into()),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_a_complete_item() {
        let policy = FilterPolicy::new(today()).with_language("en");
        assert_eq!(screen(&policy, &HashSet::new(), &valid_item(1)), Ok(()));
    }

    #[test]
    fn chain_order_reports_the_first_failing_step() {
        let policy = FilterPolicy::new(today()).with_language("en");
        let mut seen = HashSet::new();
        seen.insert(7);

        // Duplicate wins over the later adult check.
        let mut item = valid_item(7);
        item.adult = true;
        assert_eq!(screen(&policy, &seen, &item), Err(Rejection::Duplicate));

        // Adult wins over the later language check.
        let mut item = valid_item(8);
        item.adult = true;
        item.original_language = Some("fr".into());
        assert_eq!(screen(&policy, &seen, &item), Err(Rejection::Adult));
    }

    #[test]
    fn missing_title_or_zero_id_is_incomplete() {
        let policy = FilterPolicy::new(today());
        let mut item = valid_item(1);
        item.id = 0;
        assert_eq!(
            screen(&policy, &HashSet::new(), &item),
            Err(Rejection::MissingIdentity)
        );
        let mut item = valid_item(1);
        item.title = None;
        assert_eq!(
            screen(&policy, &HashSet::new(), &item),
            Err(Rejection::MissingIdentity)
        );
    }

    #[test]
    fn language_filter_only_applies_when_active() {
        let mut item = valid_item(2);
        item.original_language = Some("ko".into());

        let lax = FilterPolicy::new(today());
        assert_eq!(screen(&lax, &HashSet::new(), &item), Ok(()));

        let strict = FilterPolicy::new(today()).with_language("en");
        assert_eq!(
            screen(&strict, &HashSet::new(), &item),
            Err(Rejection::Language)
        );

        // Absent language is a mismatch when the filter is active.
        item.original_language = None;
        assert_eq!(
            screen(&strict, &HashSet::new(), &item),
            Err(Rejection::Language)
        );
    }

    #[test]
    fn future_or_malformed_dates_are_rejected() {
        let policy = FilterPolicy::new(today());

        let mut item = valid_item(3);
        item.release_date = Some("2025-06-15".into());
        assert_eq!(
            screen(&policy, &HashSet::new(), &item),
            Err(Rejection::ReleaseDate)
        );

        item.release_date = Some("soon".into());
        assert_eq!(
            screen(&policy, &HashSet::new(), &item),
            Err(Rejection::ReleaseDate)
        );

        item.release_date = None;
        assert_eq!(
            screen(&policy, &HashSet::new(), &item),
            Err(Rejection::ReleaseDate)
        );
    }

    #[test]
    fn min_year_floor_applies_when_set() {
        let policy = FilterPolicy::new(today()).with_min_year(1990);
        let mut item = valid_item(4);
        item.release_date = Some("1985-05-01".into());
        assert_eq!(
            screen(&policy, &HashSet::new(), &item),
            Err(Rejection::ReleaseDate)
        );
        item.release_date = Some("1990-01-01".into());
        assert_eq!(screen(&policy, &HashSet::new(), &item), Ok(()));
    }

    #[test]
    fn missing_poster_rejects_even_a_perfect_item() {
        let policy = FilterPolicy::new(today());
        let mut item = valid_item(5);
        item.vote_average = 10.0;
        item.poster_path = None;
        assert_eq!(
            screen(&policy, &HashSet::new(), &item),
            Err(Rejection::Artwork)
        );
    }
}
