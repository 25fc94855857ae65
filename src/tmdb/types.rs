// src/tmdb/types.rs
use serde::{Deserialize, Serialize};

/// One raw record from a TMDB listing, discover, or search response.
/// Movies carry `title`/`release_date`; TV shows and collections use
/// `name`/`first_air_date` instead, so both sides stay optional and the
/// accessors below pick whichever is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceItem {
    #[serde(default)]
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub original_language: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub popularity: f32,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    pub overview: Option<String>,
    #[serde(default)]
    pub origin_country: Vec<String>,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|v| !v.is_empty())
}

impl SourceItem {
    /// Movie `title` falling back to TV/collection `name`; empty counts as absent.
    pub fn display_title(&self) -> Option<&str> {
        non_empty(&self.title).or_else(|| non_empty(&self.name))
    }

    /// Movie `release_date` falling back to TV `first_air_date`.
    pub fn release_or_air_date(&self) -> Option<&str> {
        non_empty(&self.release_date).or_else(|| non_empty(&self.first_air_date))
    }

    pub fn poster(&self) -> Option<&str> {
        non_empty(&self.poster_path)
    }

    pub fn backdrop(&self) -> Option<&str> {
        non_empty(&self.backdrop_path)
    }
}

fn first_page() -> u32 {
    1
}

/// One page of a paginated listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<SourceItem>,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// Collection detail response; `parts` are the member movies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDetails {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub parts: Vec<SourceItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Movie vs. series, where endpoints or playback tags differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn genre_endpoint(self) -> &'static str {
        match self {
            MediaKind::Movie => "genre/movie/list",
            MediaKind::Series => "genre/tv/list",
        }
    }

    /// The `type` tag carried on templated playback URLs.
    pub fn play_type(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }
}

/// A fully-specified listing request minus the page number, which the
/// paginator supplies per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_prefers_movie_title() {
        let item = SourceItem {
            title: Some("Heat".into()),
            name: Some("Heat (TV)".into()),
            ..Default::default()
        };
        assert_eq!(item.display_title(), Some("Heat"));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let item = SourceItem {
            title: Some(String::new()),
            name: Some("Severance".into()),
            poster_path: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(item.display_title(), Some("Severance"));
        assert_eq!(item.poster(), None);
    }

    #[test]
    fn listing_page_tolerates_missing_fields() {
        let page: ListingPage = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.results.is_empty());
    }

    #[test]
    fn source_item_ignores_unknown_fields() {
        let raw = r#"{
            "id": 603,
            "title": "The Matrix",
            "original_language": "en",
            "release_date": "1999-03-30",
            "poster_path": "/matrix.jpg",
            "adult": false,
            "vote_average": 8.2,
            "vote_count": 26000,
            "popularity": 88.5,
            "genre_ids": [28, 878],
            "video": false,
            "media_type": "movie"
        }"#;
        let item: SourceItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.id, 603);
        assert_eq!(item.release_or_air_date(), Some("1999-03-30"));
        assert_eq!(item.genre_ids, vec![28, 878]);
    }
}
