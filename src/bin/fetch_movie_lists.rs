//! Fetches the configured TMDB movie lists into per-list JSON snapshots under
//! `movie_lists/`, plus a summary document.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use tmdb_playlist_generator::catalog::ListItem;
use tmdb_playlist_generator::lists::{self, ListSummary, MovieListSnapshot};
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
    let stamp = lists::plain_stamp(now);

    let registry = lists::movie_lists(today, settings.max_pages);
    let selected = lists::select_lists(registry, settings.movie_list_selection());

    let out_dir = settings.output_dir.join("movie_lists");
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for spec in &selected {
        info!(list = spec.key, endpoint = spec.endpoint, "fetching movie list");
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
            ListItem::movie(item)
        })
        .await;

        let admission = builder.stats();
        info!(
            list = spec.key,
            pages = stats.pages_fetched,
            failed_pages = stats.pages_failed,
            admitted = admission.admitted,
            rejected = admission.rejected(),
            "movie list fetched"
        );

        let movies = builder.finish();
        counts.insert(spec.key.to_string(), movies.len());

        let snapshot = MovieListSnapshot {
            list_type: spec.key.to_string(),
            list_name: spec.name.to_string(),
            total_movies: movies.len(),
            updated_at: stamp.clone(),
            movies,
        };
        output::write_json_pretty(&out_dir.join(spec.filename()), &snapshot)?;
    }

    let summary = ListSummary::new(stamp, counts);
    output::write_json_pretty(&out_dir.join("summary.json"), &summary)?;

    info!(
        lists = selected.len(),
        total_movies = summary.total_unique_movies,
        "movie list fetch complete"
    );
    Ok(())
}
