// src/pipeline/paginate.rs
//! Page walker shared by every fetcher. Walks a listing query page by page
//! and hands each batch of results to a callback. Failed pages are skipped
//! after a short backoff; a run of consecutive failures ends the walk.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::tmdb::types::{ListQuery, ListingPage, SourceItem};

/// Anything that can serve numbered pages of a listing query.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery, page: u32) -> Result<ListingPage>;
}

/// Walk tuning.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub page_cap: u32,
    pub page_delay: Duration,
    pub failure_backoff: Duration,
    pub max_consecutive_failures: u32,
}

impl WalkOptions {
    pub fn new(page_cap: u32) -> Self {
        Self {
            page_cap,
            page_delay: Duration::from_millis(100),
            failure_backoff: Duration::from_millis(250),
            max_consecutive_failures: 3,
        }
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn with_failure_backoff(mut self, backoff: Duration) -> Self {
        self.failure_backoff = backoff;
        self
    }
}

/// What a walk saw, for logging and run summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub pages_fetched: u32,
    pub pages_failed: u32,
    pub items_seen: usize,
}

/// Walk `query` from page 1 up to the cap, handing every non-empty page of
/// results to `on_page`. Ends at the cap, past the reported last page, on an
/// empty page, or after too many consecutive failures.
pub async fn walk_pages<S, F>(
    source: &S,
    query: &ListQuery,
    opts: &WalkOptions,
    mut on_page: F,
) -> WalkStats
where
    S: ListingSource + ?Sized,
    F: FnMut(Vec<SourceItem>),
{
    let mut stats = WalkStats::default();
    let mut consecutive_failures = 0u32;
    let mut page = 1u32;
    while page <= opts.page_cap {
        match source.fetch_page(query, page).await {
            Ok(listing) => {
                consecutive_failures = 0;
                stats.pages_fetched += 1;
                if listing.results.is_empty() {
                    break;
                }
                stats.items_seen += listing.results.len();
                on_page(listing.results);
                if page >= listing.total_pages {
                    break;
                }
                if !opts.page_delay.is_zero() {
                    tokio::time::sleep(opts.page_delay).await;
                }
            }
            Err(err) => {
                stats.pages_failed += 1;
                consecutive_failures += 1;
                warn!(
                    endpoint = %query.endpoint,
                    page,
                    error = %err,
                    "page fetch failed, skipping"
                );
                if consecutive_failures >= opts.max_consecutive_failures {
                    warn!(
                        endpoint = %query.endpoint,
                        failures = consecutive_failures,
                        "stopping walk after repeated page failures"
                    );
                    break;
                }
                if !opts.failure_backoff.is_zero() {
                    tokio::time::sleep(opts.failure_backoff).await;
                }
            }
        }
        page += 1;
    }
    stats
}
