// src/config.rs
//! Environment-driven settings shared by all fetcher binaries, plus the
//! quality thresholds behind the collection gate. Everything is read once at
//! startup; only a missing API credential is fatal.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::pipeline::filter::FilterPolicy;

// --- env names & defaults ---
pub const ENV_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "SECRET_API_KEY";
pub const ENV_LANGUAGE: &str = "TMDB_LANGUAGE";
pub const ENV_REGION: &str = "TMDB_REGION";
pub const ENV_FETCH_LISTS: &str = "FETCH_LISTS";
pub const ENV_FETCH_SERIES_LISTS: &str = "FETCH_SERIES_LISTS";
pub const ENV_MAX_PAGES: &str = "CATALOG_MAX_PAGES";
pub const ENV_SERVER_URL: &str = "CATALOG_SERVER_URL";
pub const ENV_OUTPUT_DIR: &str = "CATALOG_OUTPUT_DIR";
pub const ENV_QUALITY_PATH: &str = "CATALOG_QUALITY_PATH";
pub const ENV_MIN_VOTES: &str = "CATALOG_MIN_VOTES";
pub const ENV_MIN_RATING: &str = "CATALOG_MIN_RATING";
pub const ENV_MIN_POPULARITY: &str = "CATALOG_MIN_POPULARITY";
pub const ENV_MIN_COLLECTION_SIZE: &str = "CATALOG_MIN_COLLECTION_SIZE";
pub const ENV_MIN_YEAR: &str = "CATALOG_MIN_YEAR";

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_REGION: &str = "US";
pub const DEFAULT_MAX_PAGES: u32 = 25;
pub const DEFAULT_SERVER_URL: &str = "[[SERVER_URL]]";
pub const DEFAULT_QUALITY_PATH: &str = "config/quality.toml";

/// Parse an optional env var, ignoring unset, empty, or unparseable values.
fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

/// Non-empty env var value, trimmed.
fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Comma-separated env var as a list; unset or all-empty counts as absent.
fn csv_env(name: &str) -> Option<Vec<String>> {
    let raw = env::var(name).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Thresholds for the collection quality gate. Loaded from env vars, falling
/// back to an optional TOML file, falling back to these built-in defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    pub min_votes: u32,
    pub min_rating: f32,
    pub min_popularity: f32,
    pub min_collection_size: usize,
    pub min_year: Option<i32>,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_votes: 100,
            min_rating: 6.0,
            min_popularity: 5.0,
            min_collection_size: 2,
            min_year: None,
        }
    }
}

impl QualityThresholds {
    /// Resolve thresholds: `$CATALOG_QUALITY_PATH` (or `config/quality.toml`)
    /// seeds the values, then individual env vars override field by field.
    /// An unreadable file is logged and ignored; thresholds are never fatal.
    pub fn load() -> Self {
        let mut q = Self::from_file_default().unwrap_or_default();
        if let Some(v) = parse_env(ENV_MIN_VOTES) {
            q.min_votes = v;
        }
        if let Some(v) = parse_env(ENV_MIN_RATING) {
            q.min_rating = v;
        }
        if let Some(v) = parse_env(ENV_MIN_POPULARITY) {
            q.min_popularity = v;
        }
        if let Some(v) = parse_env(ENV_MIN_COLLECTION_SIZE) {
            q.min_collection_size = v;
        }
        if let Some(v) = parse_env(ENV_MIN_YEAR) {
            q.min_year = Some(v);
        }
        q
    }

    fn from_file_default() -> Option<Self> {
        let path = env::var(ENV_QUALITY_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_QUALITY_PATH));
        let content = fs::read_to_string(&path).ok()?;
        match toml::from_str(&content) {
            Ok(q) => Some(q),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed quality config");
                None
            }
        }
    }
}

/// One run's configuration, captured from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub language: String,
    pub region: String,
    pub max_pages: u32,
    pub server_url: String,
    pub output_dir: PathBuf,
    /// `$FETCH_LISTS` subset selection; `None` means every registered list.
    pub fetch_lists: Option<Vec<String>>,
    /// `$FETCH_SERIES_LISTS`; the series fetcher falls back to `fetch_lists`.
    pub fetch_series_lists: Option<Vec<String>>,
    pub quality: QualityThresholds,
}

impl Settings {
    /// Read all settings. Fails only when the API key is missing or empty,
    /// which must terminate a run before any network activity.
    pub fn from_env() -> Result<Self> {
        let api_key = non_empty_env(ENV_API_KEY)
            .or_else(|| non_empty_env(ENV_API_KEY_FALLBACK))
            .with_context(|| {
                format!("{ENV_API_KEY} is not set (set it or {ENV_API_KEY_FALLBACK} before running)")
            })?;

        Ok(Self {
            api_key,
            language: non_empty_env(ENV_LANGUAGE).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            region: non_empty_env(ENV_REGION).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            max_pages: parse_env(ENV_MAX_PAGES).unwrap_or(DEFAULT_MAX_PAGES),
            server_url: non_empty_env(ENV_SERVER_URL)
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            output_dir: non_empty_env(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            fetch_lists: csv_env(ENV_FETCH_LISTS),
            fetch_series_lists: csv_env(ENV_FETCH_SERIES_LISTS),
            quality: QualityThresholds::load(),
        })
    }

    /// Primary subtag of the configured language ("en-US" -> "en"); the value
    /// `original_language` filters compare against.
    pub fn original_language(&self) -> &str {
        self.language.split('-').next().unwrap_or(&self.language)
    }

    /// Movie list subset selection, if any.
    pub fn movie_list_selection(&self) -> Option<&[String]> {
        self.fetch_lists.as_deref()
    }

    /// Series list subset selection; `$FETCH_SERIES_LISTS` wins over
    /// `$FETCH_LISTS`, matching the movie fetcher's variable as a fallback.
    pub fn series_list_selection(&self) -> Option<&[String]> {
        self.fetch_series_lists
            .as_deref()
            .or(self.fetch_lists.as_deref())
    }

    /// The filter policy every variant starts from; callers enable the
    /// original-language check where their script activates it.
    pub fn filter_policy(&self, today: NaiveDate) -> FilterPolicy {
        let mut policy = FilterPolicy::new(today);
        if let Some(year) = self.quality.min_year {
            policy = policy.with_min_year(year);
        }
        policy
    }
}
