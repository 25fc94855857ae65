// src/tmdb/client.rs
//! Thin async client for the TMDB v3 API. Every call carries the api key and
//! the configured metadata language; pagination lives in the pipeline, not
//! here.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::pipeline::paginate::ListingSource;
use crate::tmdb::types::{CollectionDetails, Genre, GenreList, ListQuery, ListingPage, MediaKind};

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct TmdbClient {
    base_url: String,
    api_key: String,
    language: String,
    client: Client,
    timeout: Duration,
}

impl TmdbClient {
    pub fn new(api_key: String, language: String) -> Self {
        Self {
            base_url: TMDB_BASE_URL.to_string(),
            api_key,
            language,
            client: Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point the client at a different API root (tests use a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .query(&[("api_key", self.api_key.as_str())]);
        for (key, value) in params {
            request = request.query(&[(key.as_str(), value.as_str())]);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("requesting {path}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("{path} returned {status}");
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("decoding {path} response"))
    }

    /// Full collection record, member parts included.
    pub async fn fetch_collection(&self, id: u64) -> Result<CollectionDetails> {
        let path = format!("collection/{id}");
        let params = [("language".to_string(), self.language.clone())];
        self.get_json(&path, &params).await
    }

    /// Genre id/name table for one media kind.
    pub async fn fetch_genres(&self, media: MediaKind) -> Result<Vec<Genre>> {
        let params = [("language".to_string(), self.language.clone())];
        let list: GenreList = self.get_json(media.genre_endpoint(), &params).await?;
        Ok(list.genres)
    }
}

#[async_trait]
impl ListingSource for TmdbClient {
    async fn fetch_page(&self, query: &ListQuery, page: u32) -> Result<ListingPage> {
        debug!(endpoint = %query.endpoint, page, "fetching listing page");
        let mut params = query.params.clone();
        params.push(("page".to_string(), page.to_string()));
        self.get_json(&query.endpoint, &params).await
    }
}
