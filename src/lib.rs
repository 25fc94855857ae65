// src/lib.rs
// Public library surface for the fetch binaries and integration tests.

pub mod catalog;
pub mod config;
pub mod lists;
pub mod output;
pub mod pipeline;
pub mod tmdb;

// ---- Re-exports for stable public API ----
pub use crate::catalog::{finalize, ListItem, MovieEntry, SeriesEntry};
pub use crate::config::{QualityThresholds, Settings};
pub use crate::pipeline::paginate::{walk_pages, ListingSource, WalkOptions, WalkStats};
pub use crate::pipeline::{run_listing, AdmissionGate, AdmissionStats, CatalogBuilder};
pub use crate::tmdb::TmdbClient;

use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber the binaries start with. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}
