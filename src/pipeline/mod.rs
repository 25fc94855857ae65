// src/pipeline/mod.rs
//! The shared ingestion pipeline. Every fetcher builds its catalog the same
//! way: paginate a listing, dedup by id, screen each item, build an entry
//! from the survivors, then let the catalog layer sort and renumber.

pub mod collections;
pub mod dates;
pub mod filter;
pub mod paginate;

use std::collections::HashSet;

use crate::tmdb::types::{ListQuery, SourceItem};
use filter::{screen, FilterPolicy, Rejection};
use paginate::{walk_pages, ListingSource, WalkOptions, WalkStats};

/// Counts of admitted items and of rejections by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdmissionStats {
    pub admitted: usize,
    pub missing_identity: usize,
    pub duplicates: usize,
    pub adult: usize,
    pub language: usize,
    pub release_date: usize,
    pub artwork: usize,
}

impl AdmissionStats {
    pub fn rejected(&self) -> usize {
        self.missing_identity
            + self.duplicates
            + self.adult
            + self.language
            + self.release_date
            + self.artwork
    }

    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::MissingIdentity => self.missing_identity += 1,
            Rejection::Duplicate => self.duplicates += 1,
            Rejection::Adult => self.adult += 1,
            Rejection::Language => self.language += 1,
            Rejection::ReleaseDate => self.release_date += 1,
            Rejection::Artwork => self.artwork += 1,
        }
    }
}

/// A filter policy plus the ids already admitted under it. The id set spans
/// whatever scope the gate lives in: one list for the snapshot fetchers, one
/// whole run for the playlist generators.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    policy: FilterPolicy,
    seen: HashSet<u64>,
    stats: AdmissionStats,
}

impl AdmissionGate {
    pub fn new(policy: FilterPolicy) -> Self {
        Self {
            policy,
            seen: HashSet::new(),
            stats: AdmissionStats::default(),
        }
    }

    /// Screen one item; an admitted id is remembered and will not pass again.
    pub fn admit(&mut self, item: &SourceItem) -> Result<(), Rejection> {
        match screen(&self.policy, &self.seen, item) {
            Ok(()) => {
                self.seen.insert(item.id);
                self.stats.admitted += 1;
                Ok(())
            }
            Err(rejection) => {
                self.stats.record(rejection);
                Err(rejection)
            }
        }
    }

    pub fn stats(&self) -> AdmissionStats {
        self.stats
    }
}

/// Collects catalog entries behind an admission gate. Numbers assigned here
/// are provisional; `catalog::finalize` renumbers after the final sort.
pub struct CatalogBuilder<E> {
    gate: AdmissionGate,
    entries: Vec<E>,
}

impl<E> CatalogBuilder<E> {
    pub fn new(policy: FilterPolicy) -> Self {
        Self {
            gate: AdmissionGate::new(policy),
            entries: Vec::new(),
        }
    }

    /// Run one item through the gate and, if admitted, append the entry
    /// `build` makes from it. Returns whether the item was admitted.
    pub fn admit_with(
        &mut self,
        item: &SourceItem,
        build: impl FnOnce(u32, &SourceItem) -> E,
    ) -> bool {
        if self.gate.admit(item).is_err() {
            return false;
        }
        let num = self.entries.len() as u32 + 1;
        self.entries.push(build(num, item));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> AdmissionStats {
        self.gate.stats()
    }

    pub fn finish(self) -> Vec<E> {
        self.entries
    }
}

/// Walk one listing query and feed every result through the builder.
pub async fn run_listing<S, E, B>(
    source: &S,
    query: &ListQuery,
    opts: &WalkOptions,
    builder: &mut CatalogBuilder<E>,
    mut build: B,
) -> WalkStats
where
    S: ListingSource + ?Sized,
    B: FnMut(u32, &SourceItem) -> E,
{
    walk_pages(source, query, opts, |batch| {
        for item in &batch {
            builder.admit_with(item, &mut build);
        }
    })
    .await
}
