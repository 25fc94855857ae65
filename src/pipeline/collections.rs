// src/pipeline/collections.rs
//! Collection-level admission. A collection is judged as a whole before any
//! of its members enters the catalog; quality floors apply to the group, not
//! to individual members.

use serde::{Deserialize, Serialize};

use crate::config::QualityThresholds;
use crate::tmdb::types::{CollectionDetails, SourceItem};

/// A named collection and its member movies.
#[derive(Debug, Clone)]
pub struct CollectionGroup {
    pub id: u64,
    pub name: String,
    pub members: Vec<SourceItem>,
}

impl From<CollectionDetails> for CollectionGroup {
    fn from(details: CollectionDetails) -> Self {
        Self {
            id: details.id,
            name: details.name,
            members: details.parts,
        }
    }
}

/// Why a collection was admitted or turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupVerdict {
    Admitted,
    TooSmall,
    LanguageMinority,
    QualityShortfall,
}

/// Judge a collection as a whole. It must reach the minimum size, members in
/// the target language must hold at least half the group, and at least
/// `min_collection_size` members must clear the vote, rating, and popularity
/// floors together.
pub fn assess_group(
    group: &CollectionGroup,
    target_language: &str,
    quality: &QualityThresholds,
) -> GroupVerdict {
    let total = group.members.len();
    if total < quality.min_collection_size {
        return GroupVerdict::TooSmall;
    }
    let language_members = group
        .members
        .iter()
        .filter(|m| m.original_language.as_deref() == Some(target_language))
        .count();
    if language_members * 2 < total {
        return GroupVerdict::LanguageMinority;
    }
    let quality_members = group
        .members
        .iter()
        .filter(|m| meets_quality(m, quality))
        .count();
    if quality_members < quality.min_collection_size {
        return GroupVerdict::QualityShortfall;
    }
    GroupVerdict::Admitted
}

fn meets_quality(item: &SourceItem, quality: &QualityThresholds) -> bool {
    item.vote_count >= quality.min_votes
        && item.vote_average >= quality.min_rating
        && item.popularity >= quality.min_popularity
}

/// Entry of the collection name index (`collections_list.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionRef {
    pub id: u64,
    pub name: String,
}
