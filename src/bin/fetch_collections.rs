//! Sweeps the collection catalog through search, fetches each candidate
//! collection's detail, gates whole collections on size, language share, and
//! quality, and writes the collection playlist plus the collection name index.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

use tmdb_playlist_generator::catalog::{finalize, MovieEntry};
use tmdb_playlist_generator::lists::{self, COLLECTION_SEARCH_PAGE_CAP};
use tmdb_playlist_generator::pipeline::collections::{
    assess_group, CollectionGroup, CollectionRef, GroupVerdict,
};
use tmdb_playlist_generator::pipeline::paginate::{walk_pages, WalkOptions};
use tmdb_playlist_generator::pipeline::CatalogBuilder;
use tmdb_playlist_generator::tmdb::types::ListQuery;
use tmdb_playlist_generator::{init_tracing, output, Settings, TmdbClient};

const REQUEST_DELAY: Duration = Duration::from_millis(30);
const FAILURE_BACKOFF: Duration = Duration::from_millis(100);
const MAX_CONSECUTIVE_DETAIL_FAILURES: u32 = 3;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env()?;
    let client = TmdbClient::new(settings.api_key.clone(), settings.language.clone());
    let now = Utc::now();
    let today = now.date_naive();
    let added = now.timestamp();

    // Phase 1: sweep the search terms, collecting candidate collection ids.
    // First name seen wins; the BTreeMap keys the detail phase in id order.
    let mut candidates: BTreeMap<u64, String> = BTreeMap::new();
    let search_opts = WalkOptions::new(COLLECTION_SEARCH_PAGE_CAP)
        .with_page_delay(REQUEST_DELAY)
        .with_failure_backoff(FAILURE_BACKOFF);
    for term in lists::collection_search_terms() {
        let query = ListQuery::new("search/collection")
            .with_param("language", settings.language.clone())
            .with_param("query", term.clone());
        walk_pages(&client, &query, &search_opts, |batch| {
            for hit in batch {
                if hit.id == 0 {
                    continue;
                }
                let name = hit.display_title().unwrap_or_default().to_string();
                candidates.entry(hit.id).or_insert(name);
            }
        })
        .await;
        info!(term = %term, collections = candidates.len(), "collections searched");
    }
    info!(collections = candidates.len(), "collection search finished");

    // Phase 2: fetch details, gate each collection as a group, admit members.
    let policy = settings
        .filter_policy(today)
        .with_language(settings.original_language());
    let mut builder: CatalogBuilder<MovieEntry> = CatalogBuilder::new(policy);
    let mut refs: Vec<CollectionRef> = Vec::new();
    let mut admitted_groups = 0usize;
    let mut consecutive_failures = 0u32;
    let total = candidates.len();

    for (index, (id, _)) in candidates.iter().enumerate() {
        match client.fetch_collection(*id).await {
            Ok(details) => {
                consecutive_failures = 0;
                let group = CollectionGroup::from(details);
                match assess_group(&group, settings.original_language(), &settings.quality) {
                    GroupVerdict::Admitted => {
                        admitted_groups += 1;
                        let before = builder.len();
                        for member in &group.members {
                            builder.admit_with(member, |num, item| {
                                MovieEntry::from_collection_member(
                                    num,
                                    item,
                                    group.id,
                                    &group.name,
                                    &settings.server_url,
                                    added,
                                )
                            });
                        }
                        if builder.len() > before {
                            refs.push(CollectionRef {
                                id: group.id,
                                name: group.name.clone(),
                            });
                        }
                    }
                    verdict => {
                        debug!(collection = group.id, name = %group.name, ?verdict, "collection skipped");
                    }
                }
            }
            Err(err) => {
                consecutive_failures += 1;
                warn!(collection = *id, error = %err, "collection detail fetch failed, skipping");
                if consecutive_failures >= MAX_CONSECUTIVE_DETAIL_FAILURES {
                    warn!(
                        failures = consecutive_failures,
                        "stopping detail fetch after repeated failures"
                    );
                    break;
                }
                tokio::time::sleep(FAILURE_BACKOFF).await;
                continue;
            }
        }
        if (index + 1) % 100 == 0 {
            info!(
                processed = index + 1,
                total,
                groups = admitted_groups,
                entries = builder.len(),
                "collection progress"
            );
        }
        tokio::time::sleep(REQUEST_DELAY).await;
    }

    let admission = builder.stats();
    let mut entries = builder.finish();
    finalize(&mut entries);
    refs.sort_by(|a, b| a.name.cmp(&b.name));

    output::write_json(
        &settings.output_dir.join("collections_playlist.json"),
        &entries,
    )?;
    output::write_json_pretty(&settings.output_dir.join("collections_list.json"), &refs)?;

    info!(
        entries = entries.len(),
        collections = refs.len(),
        groups_admitted = admitted_groups,
        rejected = admission.rejected(),
        "collection playlist generated"
    );
    Ok(())
}
