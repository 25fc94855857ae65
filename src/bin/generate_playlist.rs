//! Builds the VOD playlist: the headline categories plus one category per
//! movie genre, all behind a single run-wide admission gate, finalized into
//! `playlist.json` and `playlist.m3u8`.

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use tmdb_playlist_generator::catalog::{finalize, m3u, MovieEntry};
use tmdb_playlist_generator::lists::{self, MOVIE_CATEGORIES};
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
    let today = Utc::now().date_naive();

    // One gate for the whole run: the first category to admit an id keeps it.
    let mut builder: CatalogBuilder<MovieEntry> =
        CatalogBuilder::new(settings.filter_policy(today));

    for category in MOVIE_CATEGORIES {
        let mut query = lists::vod_query(category.endpoint, &settings.language, &settings.region);
        for (key, value) in category.extra {
            query = query.with_param(*key, *value);
        }
        let before = builder.len();
        let opts = WalkOptions::new(category.page_cap);
        let stats = run_listing(&client, &query, &opts, &mut builder, |num, item| {
            MovieEntry::from_listing(
                num,
                item,
                category.category_id,
                category.name,
                &settings.server_url,
            )
        })
        .await;
        info!(
            category = category.name,
            pages = stats.pages_fetched,
            added = builder.len() - before,
            "category fetched"
        );
    }

    match client.fetch_genres(MediaKind::Movie).await {
        Ok(genres) => {
            for genre in genres {
                let category_id = genre.id.to_string();
                let query =
                    lists::vod_query("discover/movie", &settings.language, &settings.region)
                        .with_param("with_genres", category_id.clone())
                        .with_param("with_release_type", "4|5|6")
                        .with_param("sort_by", "popularity.desc");
                let before = builder.len();
                let opts = WalkOptions::new(settings.max_pages);
                let stats = run_listing(&client, &query, &opts, &mut builder, |num, item| {
                    MovieEntry::from_listing(
                        num,
                        item,
                        &category_id,
                        &genre.name,
                        &settings.server_url,
                    )
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

    output::write_json_pretty(&settings.output_dir.join("playlist.json"), &entries)?;
    output::write_text(
        &settings.output_dir.join("playlist.m3u8"),
        &m3u::render_m3u(&entries),
    )?;

    info!(
        entries = entries.len(),
        rejected = admission.rejected(),
        duplicates = admission.duplicates,
        "playlist generated"
    );
    Ok(())
}
