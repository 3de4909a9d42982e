//! Serializable output views
//!
//! Two views over the computed results: the full similarity record (every
//! edge, for downstream analysis) and the compact UI record (top-k display
//! keys only). Both use BTreeMaps so serialized output is byte-identical
//! across runs on the same input.

use serde::Serialize;
use std::collections::BTreeMap;
use tunematch_core::SimilarityEdge;
use tunematch_engine::{RankedMap, SimilarityMap};

/// One neighbor entry in the full similarity record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighborRecord {
    pub id: String,
    pub score: f32,
    pub title: String,
    pub artist: String,
}

impl From<&SimilarityEdge> for NeighborRecord {
    fn from(edge: &SimilarityEdge) -> Self {
        Self {
            id: edge.target_id.to_string(),
            score: edge.score,
            title: edge.target_title.clone(),
            artist: edge.target_artist.clone(),
        }
    }
}

/// Full similarity record keyed by source track id
pub type FullRecord = BTreeMap<String, Vec<NeighborRecord>>;

/// Compact UI record: "artist<TAB>title" mapped to neighbor keys of the
/// same form, descending by similarity
pub type UiRecord = BTreeMap<String, Vec<String>>;

/// Every computed edge per source, unranked and untruncated
#[must_use]
pub fn full_record(raw: &SimilarityMap) -> FullRecord {
    raw.iter()
        .map(|(identity, edges)| {
            (
                identity.id.to_string(),
                edges.iter().map(NeighborRecord::from).collect(),
            )
        })
        .collect()
}

/// Top-k neighbor display keys per source, taken from the ranked map
#[must_use]
pub fn ui_record(ranked: &RankedMap) -> UiRecord {
    ranked
        .iter()
        .map(|(identity, edges)| {
            let neighbors = edges
                .iter()
                .map(|e| format!("{}\t{}", e.target_artist, e.target_title))
                .collect();
            (identity.ui_key(), neighbors)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tunematch_core::{CatalogRow, TrackId};
    use tunematch_engine::{
        FeatureVectorBuilder, HashTextEmbedder, RankingAggregator, SimilarityEngine,
    };

    fn row(id: &str, artist: &str, title: &str, genre: &str) -> CatalogRow {
        CatalogRow {
            artist: artist.to_string(),
            title: title.to_string(),
            id: TrackId::new(id),
            genre: genre.to_string(),
            lyrics: "la la".to_string(),
            danceability: 0.7,
            energy: 0.8,
            key: 5.0,
            loudness: -6.5,
            mode: 1.0,
            speechiness: 0.05,
            acousticness: 0.2,
            instrumentalness: 0.0,
            liveness: 0.12,
            valence: 0.9,
            tempo: 120.0,
            time_signature: 4.0,
        }
    }

    fn computed() -> (SimilarityMap, RankedMap) {
        let rows = vec![
            row("A", "X", "S1", "pop"),
            row("B", "Y", "S2", "pop"),
            row("C", "Z", "S3", "rock"),
        ];
        let builder = FeatureVectorBuilder::new(Arc::new(HashTextEmbedder::new(16)));
        let (songs, _) = builder.build_all(&rows);
        let raw = SimilarityEngine::new().compute(&songs).unwrap();
        let ranked = RankingAggregator::new(2).unwrap().rank(&raw).unwrap();
        (raw, ranked)
    }

    #[test]
    fn test_full_record_has_every_edge() {
        let (raw, _) = computed();
        let full = full_record(&raw);

        assert_eq!(full.len(), 3);
        for neighbors in full.values() {
            assert_eq!(neighbors.len(), 2);
        }
        let a = &full["A"];
        assert!(a.iter().any(|n| n.id == "B" && n.artist == "Y" && n.title == "S2"));
    }

    #[test]
    fn test_ui_record_keys_and_values() {
        let (_, ranked) = computed();
        let ui = ui_record(&ranked);

        assert_eq!(ui.len(), 3);
        let a_neighbors = &ui["X\tS1"];
        assert!(a_neighbors.len() <= 2);
        // B shares genre and lyrics with A, so it ranks first
        assert_eq!(a_neighbors[0], "Y\tS2");
        for value in a_neighbors {
            assert!(value.contains('\t'));
        }
    }

    #[test]
    fn test_records_serialize_deterministically() {
        let (raw, ranked) = computed();
        let full_a = serde_json::to_string(&full_record(&raw)).unwrap();
        let full_b = serde_json::to_string(&full_record(&raw)).unwrap();
        assert_eq!(full_a, full_b);

        let ui_a = serde_json::to_string(&ui_record(&ranked)).unwrap();
        let ui_b = serde_json::to_string(&ui_record(&ranked)).unwrap();
        assert_eq!(ui_a, ui_b);
    }
}
