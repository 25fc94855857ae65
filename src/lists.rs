// src/lists.rs
//! Registry of the named TMDB lists, playlist categories, TV networks, and
//! collection search terms the fetchers walk, plus the snapshot document
//! shapes the list fetchers write. Per-list parameters are data here, not
//! string-keyed dictionaries scattered through the binaries.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::ListItem;
use crate::tmdb::types::{ListQuery, MediaKind};

/// Fixed category ids the playlist generators assign to their headline
/// blocks; genre categories use the TMDB genre id, network categories extend
/// the 99999 block with the network id.
pub const CATEGORY_VOD_POPULAR: &str = "999991";
pub const CATEGORY_VOD_NOW_PLAYING: &str = "999992";
pub const CATEGORY_TV_POPULAR: &str = "88881";
pub const CATEGORY_TV_TOP_RATED: &str = "88882";
pub const CATEGORY_TV_ON_THE_AIR: &str = "88883";

/// Page caps per query family; list snapshots and genre sweeps use the
/// configured `CATALOG_MAX_PAGES` instead.
pub const HEADLINE_PAGE_CAP: u32 = 15;
pub const NETWORK_PAGE_CAP: u32 = 10;
pub const COLLECTION_SEARCH_PAGE_CAP: u32 = 100;

/// The VOD playlist restricts discovery to one production country.
pub const VOD_ORIGIN_COUNTRY: &str = "US";

/// How a named list maps onto the API: a plain listing endpoint, or a
/// discover query carrying extra parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ListKind {
    Standard,
    Discover { extra: Vec<(String, String)> },
}

/// One named list offered by the snapshot fetchers.
#[derive(Debug, Clone)]
pub struct ListSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub media: MediaKind,
    pub endpoint: &'static str,
    pub kind: ListKind,
    pub page_cap: u32,
}

impl ListSpec {
    /// The full listing query for this list. The original-language
    /// restriction rides on every series call but only on movie discover
    /// queries; the standard movie endpoints ignore it upstream.
    pub fn query(&self, language: &str, region: &str, original_language: &str) -> ListQuery {
        let mut q = ListQuery::new(self.endpoint)
            .with_param("language", language)
            .with_param("region", region)
            .with_param("include_adult", "false");
        if self.media == MediaKind::Series || matches!(self.kind, ListKind::Discover { .. }) {
            q = q.with_param("with_original_language", original_language);
        }
        if let ListKind::Discover { extra } = &self.kind {
            for (k, v) in extra {
                q = q.with_param(k.clone(), v.clone());
            }
        }
        q
    }

    /// Snapshot file name under the list output directory.
    pub fn filename(&self) -> String {
        match self.media {
            MediaKind::Movie => format!("{}_movies.json", self.key),
            MediaKind::Series => format!("{}_series.json", self.key),
        }
    }
}

/// Six-week lookback window for the latest-releases discover queries.
pub fn release_window(today: NaiveDate) -> (String, String) {
    let from = today - chrono::Duration::weeks(6);
    (
        from.format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}

/// The movie lists the snapshot fetcher knows, in fetch order.
pub fn movie_lists(today: NaiveDate, page_cap: u32) -> Vec<ListSpec> {
    let (from, to) = release_window(today);
    vec![
        ListSpec {
            key: "now_playing",
            name: "Now Playing",
            description: "Movies now playing in theaters",
            media: MediaKind::Movie,
            endpoint: "movie/now_playing",
            kind: ListKind::Standard,
            page_cap,
        },
        ListSpec {
            key: "popular",
            name: "Popular",
            description: "Popular movies",
            media: MediaKind::Movie,
            endpoint: "movie/popular",
            kind: ListKind::Standard,
            page_cap,
        },
        ListSpec {
            key: "top_rated",
            name: "Top Rated",
            description: "Top rated movies",
            media: MediaKind::Movie,
            endpoint: "movie/top_rated",
            kind: ListKind::Standard,
            page_cap,
        },
        ListSpec {
            key: "upcoming",
            name: "Upcoming",
            description: "Upcoming movie releases",
            media: MediaKind::Movie,
            endpoint: "movie/upcoming",
            kind: ListKind::Standard,
            page_cap,
        },
        ListSpec {
            key: "latest_releases",
            name: "Latest Releases",
            description: "Latest releases (Digital, Physical, TV)",
            media: MediaKind::Movie,
            endpoint: "discover/movie",
            kind: ListKind::Discover {
                extra: vec![
                    // 4=Digital, 5=Physical, 6=TV
                    ("with_release_type".into(), "4|5|6".into()),
                    ("release_date.gte".into(), from),
                    ("release_date.lte".into(), to),
                    ("sort_by".into(), "popularity.desc".into()),
                ],
            },
            page_cap,
        },
    ]
}

/// The series lists the snapshot fetcher knows, in fetch order.
pub fn series_lists(today: NaiveDate, page_cap: u32) -> Vec<ListSpec> {
    let (from, to) = release_window(today);
    vec![
        ListSpec {
            key: "airing_today",
            name: "Airing Today",
            description: "TV series airing today",
            media: MediaKind::Series,
            endpoint: "tv/airing_today",
            kind: ListKind::Standard,
            page_cap,
        },
        ListSpec {
            key: "on_the_air",
            name: "On The Air",
            description: "TV series airing in the next 7 days",
            media: MediaKind::Series,
            endpoint: "tv/on_the_air",
            kind: ListKind::Standard,
            page_cap,
        },
        ListSpec {
            key: "popular",
            name: "Popular",
            description: "Popular TV series",
            media: MediaKind::Series,
            endpoint: "tv/popular",
            kind: ListKind::Standard,
            page_cap,
        },
        ListSpec {
            key: "top_rated",
            name: "Top Rated",
            description: "Top rated TV series",
            media: MediaKind::Series,
            endpoint: "tv/top_rated",
            kind: ListKind::Standard,
            page_cap,
        },
        ListSpec {
            key: "latest_releases",
            name: "Latest Releases",
            description: "Latest releases (Digital, Physical, Premiere)",
            media: MediaKind::Series,
            endpoint: "discover/tv",
            kind: ListKind::Discover {
                extra: vec![
                    ("first_air_date.gte".into(), from),
                    ("first_air_date.lte".into(), to),
                    ("sort_by".into(), "first_air_date.desc".into()),
                    // Returning Series, Planned, In Production, Ended
                    ("with_status".into(), "0|2|3".into()),
                    // All types
                    ("with_type".into(), "0|1|2|3|4|5|6".into()),
                ],
            },
            page_cap,
        },
    ]
}

/// Resolve a subset selection against a registry: selection order wins and
/// unknown keys are logged and skipped. `None` keeps the whole registry.
pub fn select_lists(registry: Vec<ListSpec>, selection: Option<&[String]>) -> Vec<ListSpec> {
    let Some(keys) = selection else {
        return registry;
    };
    let mut picked = Vec::with_capacity(keys.len());
    for key in keys {
        match registry.iter().find(|spec| spec.key == key) {
            Some(spec) => picked.push(spec.clone()),
            None => warn!(list = %key, "unknown list in selection, skipping"),
        }
    }
    picked
}

/// One fixed category block of the playlist generators: a listing endpoint
/// fetched under a fixed category id and name, with its own page cap.
#[derive(Debug, Clone, Copy)]
pub struct PlaylistCategory {
    pub endpoint: &'static str,
    pub name: &'static str,
    pub category_id: &'static str,
    pub page_cap: u32,
    pub extra: &'static [(&'static str, &'static str)],
}

pub const MOVIE_CATEGORIES: [PlaylistCategory; 2] = [
    PlaylistCategory {
        endpoint: "movie/now_playing",
        name: "Now Playing",
        category_id: CATEGORY_VOD_NOW_PLAYING,
        page_cap: HEADLINE_PAGE_CAP,
        extra: &[("with_release_type", "4|5|6")],
    },
    PlaylistCategory {
        endpoint: "movie/popular",
        name: "Popular",
        category_id: CATEGORY_VOD_POPULAR,
        page_cap: HEADLINE_PAGE_CAP,
        extra: &[("with_release_type", "4|5|6")],
    },
];

pub const SERIES_CATEGORIES: [PlaylistCategory; 3] = [
    PlaylistCategory {
        endpoint: "tv/on_the_air",
        name: "On The Air",
        category_id: CATEGORY_TV_ON_THE_AIR,
        page_cap: HEADLINE_PAGE_CAP,
        extra: &[],
    },
    PlaylistCategory {
        endpoint: "tv/top_rated",
        name: "Top Rated",
        category_id: CATEGORY_TV_TOP_RATED,
        page_cap: HEADLINE_PAGE_CAP,
        extra: &[],
    },
    PlaylistCategory {
        endpoint: "tv/popular",
        name: "Popular",
        category_id: CATEGORY_TV_POPULAR,
        page_cap: HEADLINE_PAGE_CAP,
        extra: &[],
    },
];

/// Base query for the VOD playlist fetches.
pub fn vod_query(endpoint: &str, language: &str, region: &str) -> ListQuery {
    ListQuery::new(endpoint)
        .with_param("language", language)
        .with_param("region", region)
        .with_param("include_adult", "false")
        .with_param("with_origin_country", VOD_ORIGIN_COUNTRY)
}

/// Base query for the TV playlist fetches.
pub fn tv_query(endpoint: &str, language: &str, region: &str, original_language: &str) -> ListQuery {
    ListQuery::new(endpoint)
        .with_param("language", language)
        .with_param("region", region)
        .with_param("include_adult", "false")
        .with_param("with_original_language", original_language)
}

/// TV network categories by TMDB network id.
#[derive(Debug, Clone, Copy)]
pub struct Network {
    pub name: &'static str,
    pub id: u32,
}

impl Network {
    pub fn category_id(&self) -> String {
        format!("99999{}", self.id)
    }
}

pub const TV_NETWORKS: [Network; 13] = [
    Network { name: "Apple TV+", id: 2552 },
    Network { name: "Discovery", id: 64 },
    Network { name: "Disney+", id: 2739 },
    Network { name: "HBO", id: 49 },
    Network { name: "History", id: 65 },
    Network { name: "Hulu", id: 453 },
    Network { name: "Investigation", id: 244 },
    Network { name: "Lifetime", id: 34 },
    Network { name: "Netflix", id: 213 },
    Network { name: "Oxygen", id: 132 },
    Network { name: "Amazon Prime", id: 1024 },
    Network { name: "Paramount+", id: 4330 },
    Network { name: "Peacock", id: 3353 },
];

/// Search terms that sweep the collection catalog: a–z, 0–9, and a few
/// high-yield seed words.
pub fn collection_search_terms() -> Vec<String> {
    let mut terms: Vec<String> = ('a'..='z').map(String::from).collect();
    terms.extend(('0'..='9').map(String::from));
    terms.extend(
        ["the ", "star ", "super ", "dark ", "night ", "dead ", "final ", "last "]
            .into_iter()
            .map(String::from),
    );
    terms
}

// --- snapshot document shapes ---

/// `movie_lists/<key>_movies.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieListSnapshot {
    pub list_type: String,
    pub list_name: String,
    pub total_movies: usize,
    pub updated_at: String,
    pub movies: Vec<ListItem>,
}

/// `movie_lists/summary.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSummary {
    pub updated_at: String,
    pub lists: BTreeMap<String, usize>,
    pub total_unique_movies: usize,
}

impl ListSummary {
    /// Totals the per-list counts. A movie carried by several lists is
    /// counted once per list, so the total can exceed the distinct-id count.
    pub fn new(updated_at: String, lists: BTreeMap<String, usize>) -> Self {
        let total_unique_movies: usize = lists.values().sum();
        Self {
            updated_at,
            lists,
            total_unique_movies,
        }
    }
}

/// `series_lists/<key>_series.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesListSnapshot {
    pub list_name: String,
    pub description: String,
    pub total_count: usize,
    pub fetched_at: String,
    pub series: Vec<ListItem>,
}

/// `series_lists/index.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesIndex {
    pub updated_at: String,
    pub lists: BTreeMap<String, usize>,
    pub total_unique_series: usize,
}

impl SeriesIndex {
    /// Totals the per-list counts, overlap included, like [`ListSummary::new`].
    pub fn new(updated_at: String, lists: BTreeMap<String, usize>) -> Self {
        let total_unique_series: usize = lists.values().sum();
        Self {
            updated_at,
            lists,
            total_unique_series,
        }
    }
}

/// `updated_at` stamp used by the movie snapshots (UTC, no offset marker).
pub fn plain_stamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// RFC 3339 stamp used by the series snapshots.
pub fn rfc3339_stamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, false)
}
