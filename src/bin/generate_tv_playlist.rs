//! Builds the TV playlist: the headline categories, one category per streaming
//! network, and one per TV genre, all behind a single run-wide admission gate,
//! finalized into `tv_playlist.json`.

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use tmdb_playlist_generator::catalog::{finalize, SeriesEntry};
use tmdb_playlist_generator::lists::{self, NETWORK_PAGE_CAP, SERIES_CATEGORIES, TV_NETWORKS};
use tmdb_playlist_generator::pipeline::paginate::WalkOptions;
use tmdb_playlist_generator::pipeline::{run_listing, CatalogBuilder};
use tmdb_playlist_generator::tmdb::types::MediaKind;
use tmdb_playlist_generator::{init_tracing, output, Settings, TmdbClient};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env()?;
    let client = TmdbClient::new(settings.api_key.clone(), settings.language.clone());
    let now = Utc::now();
    let today = now.date_naive();
    let last_modified = lists::plain_stamp(now);

    let policy = settings
        .filter_policy(today)
        .with_language(settings.original_language());
    let mut builder: CatalogBuilder<SeriesEntry> = CatalogBuilder::new(policy);

    for category in SERIES_CATEGORIES {
        let mut query = lists::tv_query(
            category.endpoint,
            &settings.language,
            &settings.region,
            settings.original_language(),
        );
        for (key, value) in category.extra {
            query = query.with_param(*key, *value);
        }
        let before = builder.len();
        let opts = WalkOptions::new(category.page_cap);
        let stats = run_listing(&client, &query, &opts, &mut builder, |num, item| {
            SeriesEntry::from_listing(num, item, category.category_id, category.name, &last_modified)
        })
        .await;
        info!(
            category = category.name,
            pages = stats.pages_fetched,
            added = builder.len() - before,
            "category fetched"
        );
    }

    for network in TV_NETWORKS {
        let category_id = network.category_id();
        let query = lists::tv_query(
            "discover/tv",
            &settings.language,
            &settings.region,
            settings.original_language(),
        )
        .with_param("with_networks", network.id.to_string())
        .with_param("sort_by", "popularity.desc");
        let before = builder.len();
        let opts = WalkOptions::new(NETWORK_PAGE_CAP);
        let stats = run_listing(&client, &query, &opts, &mut builder, |num, item| {
            SeriesEntry::from_listing(num, item, &category_id, network.name, &last_modified)
        })
        .await;
        info!(
            network = network.name,
            pages = stats.pages_fetched,
            added = builder.len() - before,
            "network category fetched"
        );
    }

    match client.fetch_genres(MediaKind::Series).await {
        Ok(genres) => {
            for genre in genres {
                let category_id = genre.id.to_string();
                let query = lists::tv_query(
                    "discover/tv",
                    &settings.language,
                    &settings.region,
                    settings.original_language(),
                )
                .with_param("with_genres", category_id.clone())
                .with_param("sort_by", "popularity.desc");
                let before = builder.len();
                let opts = WalkOptions::new(settings.max_pages);
                let stats = run_listing(&client, &query, &opts, &mut builder, |num, item| {
                    SeriesEntry::from_listing(num, item, &category_id, &genre.name, &last_modified)
                })
                .await;
                info!(
                    genre = %genre.name,
                    pages = stats.pages_fetched,
                    added = builder.len() - before,
                    "genre category fetched"
                );
            }
        }
        Err(err) => warn!(error = %err, "could not fetch genres, skipping genre categories"),
    }

    let admission = builder.stats();
    let mut entries = builder.finish();
    finalize(&mut entries);

    output::write_json_pretty(&settings.output_dir.join("tv_playlist.json"), &entries)?;

    info!(
        entries = entries.len(),
        rejected = admission.rejected(),
        duplicates = admission.duplicates,
        "tv playlist generated"
    );
    Ok(())
}
