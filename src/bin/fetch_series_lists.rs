//! Fetches the configured TMDB series lists into per-list JSON snapshots under
//! `series_lists/`, plus an index document. Series within a snapshot are
//! ordered by popularity, most popular first.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use tmdb_playlist_generator::catalog::ListItem;
use tmdb_playlist_generator::lists::{self, SeriesIndex, SeriesListSnapshot};
use tmdb_playlist_generator::pipeline::paginate::WalkOptions;
use tmdb_playlist_generator::pipeline::{run_listing, CatalogBuilder};
use tmdb_playlist_generator::{init_tracing, output, Settings, TmdbClient};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env()?;
    let client = TmdbClient::new(settings.api_key.clone(), settings.language.clone());
    let now = Utc::now();
    let today = now.date_naive();
    let stamp = lists::rfc3339_stamp(now);

    let registry = lists::series_lists(today, settings.max_pages);
    let selected = lists::select_lists(registry, settings.series_list_selection());

    let out_dir = settings.output_dir.join("series_lists");
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for spec in &selected {
        info!(list = spec.key, endpoint = spec.endpoint, "fetching series list");
        let policy = settings
            .filter_policy(today)
            .with_language(settings.original_language());
        let mut builder: CatalogBuilder<ListItem> = CatalogBuilder::new(policy);
        let query = spec.query(
            &settings.language,
            &settings.region,
            settings.original_language(),
        );
        let opts = WalkOptions::new(spec.page_cap);
        let stats = run_listing(&client, &query, &opts, &mut builder, |_, item| {
            ListItem::series(item)
        })
        .await;

        let admission = builder.stats();
        info!(
            list = spec.key,
            pages = stats.pages_fetched,
            failed_pages = stats.pages_failed,
            admitted = admission.admitted,
            rejected = admission.rejected(),
            "series list fetched"
        );

        let mut series = builder.finish();
        if series.is_empty() {
            warn!(list = spec.key, "no series admitted, skipping snapshot");
            continue;
        }
        series.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

        counts.insert(spec.key.to_string(), series.len());

        let snapshot = SeriesListSnapshot {
            list_name: spec.key.to_string(),
            description: spec.description.to_string(),
            total_count: series.len(),
            fetched_at: stamp.clone(),
            series,
        };
        output::write_json_pretty(&out_dir.join(spec.filename()), &snapshot)?;
    }

    let index = SeriesIndex::new(stamp, counts);
    output::write_json_pretty(&out_dir.join("index.json"), &index)?;

    info!(
        lists = selected.len(),
        total_series = index.total_unique_series,
        "series list fetch complete"
    );
    Ok(())
}
