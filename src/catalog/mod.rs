// src/catalog/mod.rs
//! Catalog records and the normalization that builds them: artwork and
//! playback URLs, the XTream-style entry shapes, the snapshot item shape,
//! and the sort-and-renumber finalization every playlist goes through.

pub mod m3u;

use serde::{Deserialize, Serialize};

use crate::pipeline::dates::{parse_release_date, year_of};
use crate::tmdb::types::{MediaKind, SourceItem};

pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/";

/// Rendition sizes the image CDN serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkSize {
    W500,
    Original,
}

impl ArtworkSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtworkSize::W500 => "w500",
            ArtworkSize::Original => "original",
        }
    }
}

/// CDN URL for an artwork path. An absent path yields an empty string, never
/// a broken URL.
pub fn artwork_url(size: ArtworkSize, path: Option<&str>) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{TMDB_IMAGE_BASE}{}{p}", size.as_str()),
        _ => String::new(),
    }
}

/// Playback URL a catalog entry points at.
pub fn playback_url(server_url: &str, id: u64, kind: MediaKind) -> String {
    format!(
        "{}/play.php?id={id}&type={}",
        server_url.trim_end_matches('/'),
        kind.play_type()
    )
}

/// Seam the finalizer works through: where an entry sorts, and where its
/// number lands.
pub trait CatalogRecord {
    fn sort_key(&self) -> (&str, &str);
    fn set_num(&mut self, num: u32);
}

/// Stable sort by (group name, year), empty year first, then dense 1-based
/// renumbering. Entries with equal keys keep their insertion order.
pub fn finalize<E: CatalogRecord>(entries: &mut [E]) {
    entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.set_num(index as u32 + 1);
    }
}

/// XTream-style VOD record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieEntry {
    pub num: u32,
    pub name: String,
    pub stream_type: String,
    pub stream_id: u64,
    pub stream_icon: String,
    pub rating: f32,
    pub rating_5based: f32,
    pub added: i64,
    pub category_id: String,
    pub category_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    pub year: String,
    pub container_extension: String,
    pub custom_sid: String,
    pub direct_source: String,
}

impl MovieEntry {
    /// Entry for a movie admitted from a category listing.
    pub fn from_listing(
        num: u32,
        item: &SourceItem,
        category_id: &str,
        category_name: &str,
        server_url: &str,
    ) -> Self {
        let title = item.display_title().unwrap_or_default();
        let year = year_of(item.release_or_air_date());
        let name = if year.is_empty() {
            title.to_string()
        } else {
            format!("{title} ({year})")
        };
        let added = parse_release_date(item.release_or_air_date())
            .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())
            .unwrap_or(0);
        Self {
            num,
            name,
            stream_type: "movie".to_string(),
            stream_id: item.id,
            stream_icon: artwork_url(ArtworkSize::Original, item.poster()),
            rating: item.vote_average,
            rating_5based: item.vote_average / 2.0,
            added,
            category_id: category_id.to_string(),
            category_name: category_name.to_string(),
            plot: item.overview.clone(),
            backdrop_path: item
                .backdrop()
                .map(|p| artwork_url(ArtworkSize::Original, Some(p))),
            collection_id: None,
            collection_name: None,
            year,
            container_extension: "mp4".to_string(),
            custom_sid: String::new(),
            direct_source: playback_url(server_url, item.id, MediaKind::Movie),
        }
    }

    /// Entry for a member of an admitted collection. The collection itself is
    /// the category; names stay bare so the collection groups cleanly.
    pub fn from_collection_member(
        num: u32,
        item: &SourceItem,
        collection_id: u64,
        collection_name: &str,
        server_url: &str,
        added: i64,
    ) -> Self {
        Self {
            num,
            name: item.display_title().unwrap_or_default().to_string(),
            stream_type: "movie".to_string(),
            stream_id: item.id,
            stream_icon: artwork_url(ArtworkSize::W500, item.poster()),
            rating: item.vote_average,
            rating_5based: item.vote_average / 2.0,
            added,
            category_id: collection_id.to_string(),
            category_name: collection_name.to_string(),
            plot: None,
            backdrop_path: None,
            collection_id: Some(collection_id),
            collection_name: Some(collection_name.to_string()),
            year: year_of(item.release_or_air_date()),
            container_extension: "mp4".to_string(),
            custom_sid: String::new(),
            direct_source: playback_url(server_url, item.id, MediaKind::Movie),
        }
    }
}

impl CatalogRecord for MovieEntry {
    fn sort_key(&self) -> (&str, &str) {
        (&self.category_name, &self.year)
    }

    fn set_num(&mut self, num: u32) {
        self.num = num;
    }
}

/// XTream-style series record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub num: u32,
    pub name: String,
    pub series_id: u64,
    pub cover: String,
    pub plot: String,
    pub cast: String,
    pub director: String,
    pub genre: String,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub last_modified: String,
    pub rating: f32,
    pub rating_5based: f32,
    pub backdrop_path: Vec<String>,
    pub youtube_trailer: String,
    pub episode_run_time: String,
    pub category_id: String,
    pub category_name: String,
}

impl SeriesEntry {
    pub fn from_listing(
        num: u32,
        item: &SourceItem,
        category_id: &str,
        category_name: &str,
        last_modified: &str,
    ) -> Self {
        let title = item.display_title().unwrap_or_default();
        let year = year_of(item.release_or_air_date());
        let name = if year.is_empty() {
            title.to_string()
        } else {
            format!("{title} ({year})")
        };
        Self {
            num,
            name,
            series_id: item.id,
            cover: artwork_url(ArtworkSize::Original, item.poster()),
            plot: item.overview.clone().unwrap_or_default(),
            cast: String::new(),
            director: String::new(),
            genre: category_name.to_string(),
            release_date: item.first_air_date.clone().unwrap_or_default(),
            last_modified: last_modified.to_string(),
            rating: item.vote_average,
            rating_5based: item.vote_average / 2.0,
            backdrop_path: vec![artwork_url(ArtworkSize::Original, item.backdrop())],
            youtube_trailer: String::new(),
            episode_run_time: String::new(),
            category_id: category_id.to_string(),
            category_name: category_name.to_string(),
        }
    }
}

impl CatalogRecord for SeriesEntry {
    fn sort_key(&self) -> (&str, &str) {
        (
            &self.category_name,
            self.release_date.get(..4).unwrap_or(""),
        )
    }

    fn set_num(&mut self, num: u32) {
        self.num = num;
    }
}

/// Snapshot record the list fetchers emit: the admitted item's fields with
/// absent values filled the way the snapshots expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub poster_path: String,
    #[serde(default)]
    pub backdrop_path: String,
    pub vote_average: f32,
    pub vote_count: u32,
    pub popularity: f32,
    #[serde(default)]
    pub adult: bool,
    pub genre_ids: Vec<u32>,
    pub original_language: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origin_country: Vec<String>,
}

impl ListItem {
    pub fn movie(item: &SourceItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            original_title: item.original_title.clone().or_else(|| item.title.clone()),
            name: None,
            original_name: None,
            overview: item.overview.clone().unwrap_or_default(),
            release_date: Some(item.release_date.clone().unwrap_or_default()),
            first_air_date: None,
            poster_path: item.poster_path.clone().unwrap_or_default(),
            backdrop_path: item.backdrop_path.clone().unwrap_or_default(),
            vote_average: item.vote_average,
            vote_count: item.vote_count,
            popularity: item.popularity,
            adult: item.adult,
            genre_ids: item.genre_ids.clone(),
            original_language: item
                .original_language
                .clone()
                .unwrap_or_else(|| "en".to_string()),
            origin_country: Vec::new(),
        }
    }

    pub fn series(item: &SourceItem) -> Self {
        Self {
            id: item.id,
            title: None,
            original_title: None,
            name: item.name.clone(),
            original_name: item.original_name.clone().or_else(|| item.name.clone()),
            overview: item.overview.clone().unwrap_or_default(),
            release_date: None,
            first_air_date: Some(item.first_air_date.clone().unwrap_or_default()),
            poster_path: item.poster_path.clone().unwrap_or_default(),
            backdrop_path: item.backdrop_path.clone().unwrap_or_default(),
            vote_average: item.vote_average,
            vote_count: item.vote_count,
            popularity: item.popularity,
            adult: item.adult,
            genre_ids: item.genre_ids.clone(),
            original_language: item
                .original_language
                .clone()
                .unwrap_or_else(|| "en".to_string()),
            origin_country: item.origin_country.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str, date: &str) -> SourceItem {
        SourceItem {
            id,
            title: Some(title.to_string()),
            release_date: Some(date.to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: Some("/backdrop.jpg".to_string()),
            overview: Some("A film.".to_string()),
            vote_average: 7.0,
            vote_count: 321,
            popularity: 12.5,
            ..Default::default()
        }
    }

    #[test]
    fn artwork_url_joins_size_and_path() {
        assert_eq!(
            artwork_url(ArtworkSize::W500, Some("/poster.jpg")),
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
        assert_eq!(
            artwork_url(ArtworkSize::Original, Some("/b.jpg")),
            "https://image.tmdb.org/t/p/original/b.jpg"
        );
        assert_eq!(artwork_url(ArtworkSize::W500, None), "");
        assert_eq!(artwork_url(ArtworkSize::W500, Some("")), "");
    }

    #[test]
    fn playback_url_carries_id_and_kind() {
        assert_eq!(
            playback_url("http://host", 42, MediaKind::Movie),
            "http://host/play.php?id=42&type=movie"
        );
        assert_eq!(
            playback_url("http://host/", 42, MediaKind::Series),
            "http://host/play.php?id=42&type=series"
        );
    }

    #[test]
    fn listing_entry_carries_year_in_name_and_halved_rating() {
        let entry = MovieEntry::from_listing(
            3,
            &item(42, "Heat", "1995-12-15"),
            "999991",
            "Popular",
            "http://host",
        );
        assert_eq!(entry.name, "Heat (1995)");
        assert_eq!(entry.year, "1995");
        assert_eq!(entry.rating_5based, 3.5);
        assert_eq!(entry.stream_type, "movie");
        assert_eq!(entry.container_extension, "mp4");
        assert_eq!(entry.direct_source, "http://host/play.php?id=42&type=movie");
        assert_eq!(
            entry.stream_icon,
            "https://image.tmdb.org/t/p/original/poster.jpg"
        );
        assert!(entry.collection_id.is_none());
        assert_eq!(entry.added, 818985600);
    }

    #[test]
    fn collection_member_keeps_bare_name_and_w500_icon() {
        let entry = MovieEntry::from_collection_member(
            1,
            &item(7, "Alien", "1979-05-25"),
            8091,
            "Alien Collection",
            "http://host",
            1_700_000_000,
        );
        assert_eq!(entry.name, "Alien");
        assert_eq!(entry.category_id, "8091");
        assert_eq!(entry.category_name, "Alien Collection");
        assert_eq!(entry.collection_id, Some(8091));
        assert_eq!(entry.collection_name.as_deref(), Some("Alien Collection"));
        assert_eq!(
            entry.stream_icon,
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
        assert_eq!(entry.added, 1_700_000_000);
    }

    #[test]
    fn finalize_sorts_by_group_then_year_and_renumbers() {
        let mut entries = vec![
            MovieEntry::from_listing(1, &item(1, "Late", "2001-01-01"), "2", "B Group", "s"),
            MovieEntry::from_listing(2, &item(2, "Early", "1990-01-01"), "2", "B Group", "s"),
            MovieEntry::from_listing(3, &item(3, "Other", "1980-01-01"), "1", "A Group", "s"),
        ];
        finalize(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Other (1980)", "Early (1990)", "Late (2001)"]);
        let nums: Vec<u32> = entries.iter().map(|e| e.num).collect();
        assert_eq!(nums, vec![1, 2, 3]);
    }

    #[test]
    fn finalize_puts_missing_year_first_and_keeps_tie_order() {
        let mut a = MovieEntry::from_listing(1, &item(1, "First", "1999-01-01"), "1", "G", "s");
        a.year.clear();
        let b = MovieEntry::from_listing(2, &item(2, "Second", "1999-01-01"), "1", "G", "s");
        let c = MovieEntry::from_listing(3, &item(3, "Third", "1999-06-01"), "1", "G", "s");
        let mut entries = vec![b, c, a];
        finalize(&mut entries);
        let ids: Vec<u64> = entries.iter().map(|e| e.stream_id).collect();
        // Empty year leads; the two 1999 entries keep their insertion order.
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(
            entries.iter().map(|e| e.num).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn series_entry_shape_matches_the_catalog() {
        let mut source = item(9, "", "");
        source.title = None;
        source.name = Some("Severance".to_string());
        source.first_air_date = Some("2022-02-18".to_string());
        source.release_date = None;
        let entry = SeriesEntry::from_listing(1, &source, "88881", "Popular", "2024-03-01 10:00:00");
        assert_eq!(entry.name, "Severance (2022)");
        assert_eq!(entry.genre, "Popular");
        assert_eq!(entry.release_date, "2022-02-18");
        assert_eq!(entry.backdrop_path.len(), 1);
        assert_eq!(entry.sort_key(), ("Popular", "2022"));
    }

    #[test]
    fn movie_list_item_fills_fallbacks() {
        let mut source = item(5, "Dune", "2021-10-22");
        source.original_title = None;
        source.original_language = None;
        source.backdrop_path = None;
        let snapshot = ListItem::movie(&source);
        assert_eq!(snapshot.original_title.as_deref(), Some("Dune"));
        assert_eq!(snapshot.original_language, "en");
        assert_eq!(snapshot.release_date.as_deref(), Some("2021-10-22"));
        assert_eq!(snapshot.backdrop_path, "");
        assert!(snapshot.name.is_none());
    }

    #[test]
    fn series_list_item_carries_origin_country() {
        let mut source = item(6, "", "");
        source.title = None;
        source.name = Some("Dark".to_string());
        source.original_name = None;
        source.origin_country = vec!["DE".to_string()];
        source.adult = true;
        let snapshot = ListItem::series(&source);
        assert_eq!(snapshot.original_name.as_deref(), Some("Dark"));
        assert_eq!(snapshot.origin_country, vec!["DE".to_string()]);
        assert!(snapshot.title.is_none());
        assert!(snapshot.adult);
    }
}
