//! All-pairs similarity computation
//!
//! The O(n²) core of the pipeline: every song scored against every other
//! song (by track id, never against itself) with cosine similarity on
//! unit-normalized vectors. Vectors are normalized once before the pair
//! loop; the loop itself is pure dot products.

use crate::builder::SongVector;
use ahash::AHashMap;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use tunematch_core::{Error, Result, SimilarityEdge, SongIdentity, TrackId, Vector};

/// Raw similarity results, one edge list per source song.
///
/// Entries keep catalog iteration order so downstream ranking and export
/// stay deterministic; an id index gives O(1) lookup.
#[derive(Debug, Clone)]
pub struct SimilarityMap {
    entries: Vec<(SongIdentity, Vec<SimilarityEdge>)>,
    index: AHashMap<TrackId, usize>,
}

impl SimilarityMap {
    pub(crate) fn from_entries(entries: Vec<(SongIdentity, Vec<SimilarityEdge>)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (identity, _))| (identity.id.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Number of source songs
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of edges across all sources
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|(_, edges)| edges.len()).sum()
    }

    /// Edges for one source song
    #[must_use]
    pub fn get(&self, id: &TrackId) -> Option<&[SimilarityEdge]> {
        self.index
            .get(id)
            .map(|&i| self.entries[i].1.as_slice())
    }

    /// Iterate sources in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&SongIdentity, &[SimilarityEdge])> {
        self.entries
            .iter()
            .map(|(identity, edges)| (identity, edges.as_slice()))
    }
}

/// Computes the all-pairs similarity map.
///
/// Serial by default; the outer loop over source songs can run on rayon
/// workers, each owning its own output partition with read-only access to
/// the shared normalized vector set. A cancellation flag, checked once per
/// outer iteration, aborts the run cleanly before anything is persisted.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    parallel: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl SimilarityEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the outer loop on rayon workers
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Install a cancellation flag checked per outer iteration
    #[must_use]
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Compute cosine similarity for every ordered pair of distinct songs.
    ///
    /// Fewer than 2 songs is a fatal configuration error, distinct from
    /// the row-level drops that happened upstream. Zero vectors and any
    /// non-finite score come out as exactly 0.0.
    pub fn compute(&self, songs: &[SongVector]) -> Result<SimilarityMap> {
        if songs.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if songs.len() < 2 {
            return Err(Error::CatalogTooSmall { valid: songs.len() });
        }

        // Normalize once, outside the pair loop
        let normalized: Vec<Vector> = songs.iter().map(|s| s.vector.normalized()).collect();

        let source_edges = |i: usize| -> Result<(SongIdentity, Vec<SimilarityEdge>)> {
            if let Some(flag) = &self.cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(Error::Cancelled);
                }
            }

            let source = &songs[i];
            let mut edges = Vec::with_capacity(songs.len() - 1);
            for (j, target) in songs.iter().enumerate() {
                // Compared by track id, not position
                if source.identity.id == target.identity.id {
                    continue;
                }
                edges.push(SimilarityEdge {
                    target_id: target.identity.id.clone(),
                    score: score(&normalized[i], &normalized[j]),
                    target_title: target.identity.title.clone(),
                    target_artist: target.identity.artist.clone(),
                });
            }
            Ok((source.identity.clone(), edges))
        };

        let entries: Result<Vec<_>> = if self.parallel {
            (0..songs.len()).into_par_iter().map(source_edges).collect()
        } else {
            (0..songs.len()).map(source_edges).collect()
        };

        let map = SimilarityMap::from_entries(entries?);
        debug!(
            "Computed {} similarity edges for {} songs",
            map.edge_count(),
            map.len()
        );
        Ok(map)
    }
}

/// Cosine similarity of two unit-normalized vectors.
///
/// Zero vectors stay zero through normalization, so their dot product is
/// 0.0; any non-finite result is clamped to 0.0 as well.
#[inline]
fn score(a: &Vector, b: &Vector) -> f32 {
    let s = a.dot(b);
    if s.is_finite() {
        s
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunematch_core::Vector;

    fn song(id: &str, artist: &str, title: &str, vector: Vec<f32>) -> SongVector {
        SongVector {
            identity: SongIdentity {
                id: TrackId::new(id),
                artist: artist.to_string(),
                title: title.to_string(),
            },
            vector: Vector::new(vector),
        }
    }

    fn three_songs() -> Vec<SongVector> {
        vec![
            song("A", "X", "S1", vec![1.0, 0.0, 0.0]),
            song("B", "Y", "S2", vec![1.0, 0.0, 0.0]),
            song("C", "Z", "S3", vec![0.0, 1.0, 0.0]),
        ]
    }

    #[test]
    fn test_edge_count_and_no_self_edges() {
        let songs = three_songs();
        let map = SimilarityEngine::new().compute(&songs).unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.edge_count(), 3 * 2);
        for (identity, edges) in map.iter() {
            assert_eq!(edges.len(), 2);
            assert!(edges.iter().all(|e| e.target_id != identity.id));
        }
    }

    #[test]
    fn test_symmetry() {
        let songs = vec![
            song("A", "X", "S1", vec![0.3, 0.7, 0.1, 0.9]),
            song("B", "Y", "S2", vec![0.8, 0.2, 0.5, 0.4]),
        ];
        let map = SimilarityEngine::new().compute(&songs).unwrap();

        let ab = map.get(&TrackId::new("A")).unwrap()[0].score;
        let ba = map.get(&TrackId::new("B")).unwrap()[0].score;
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_identical_vectors_score_one() {
        let songs = three_songs();
        let map = SimilarityEngine::new().compute(&songs).unwrap();

        let a_edges = map.get(&TrackId::new("A")).unwrap();
        let to_b = a_edges.iter().find(|e| e.target_id == TrackId::new("B")).unwrap();
        let to_c = a_edges.iter().find(|e| e.target_id == TrackId::new("C")).unwrap();

        assert!((to_b.score - 1.0).abs() < 1e-6);
        assert!(to_b.score > to_c.score);
        assert_eq!(to_b.target_artist, "Y");
        assert_eq!(to_b.target_title, "S2");
    }

    #[test]
    fn test_zero_vector_scores_zero_everywhere() {
        let songs = vec![
            song("A", "X", "S1", vec![0.0, 0.0, 0.0]),
            song("B", "Y", "S2", vec![1.0, 2.0, 3.0]),
            song("C", "Z", "S3", vec![4.0, 5.0, 6.0]),
        ];
        let map = SimilarityEngine::new().compute(&songs).unwrap();

        for edge in map.get(&TrackId::new("A")).unwrap() {
            assert_eq!(edge.score, 0.0);
            assert!(!edge.score.is_nan());
        }
        for (identity, edges) in map.iter() {
            if identity.id == TrackId::new("A") {
                continue;
            }
            let to_a = edges.iter().find(|e| e.target_id == TrackId::new("A")).unwrap();
            assert_eq!(to_a.score, 0.0);
        }
    }

    #[test]
    fn test_scores_within_cosine_range() {
        let songs = vec![
            song("A", "X", "S1", vec![1.0, -2.0, 3.0]),
            song("B", "Y", "S2", vec![-1.0, 2.0, -3.0]),
            song("C", "Z", "S3", vec![0.5, 0.5, 0.5]),
        ];
        let map = SimilarityEngine::new().compute(&songs).unwrap();
        for (_, edges) in map.iter() {
            for edge in edges {
                assert!(edge.score >= -1.0 - 1e-6 && edge.score <= 1.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let songs = three_songs();
        let serial = SimilarityEngine::new().compute(&songs).unwrap();
        let parallel = SimilarityEngine::new().parallel(true).compute(&songs).unwrap();

        assert_eq!(serial.len(), parallel.len());
        for ((id_s, edges_s), (id_p, edges_p)) in serial.iter().zip(parallel.iter()) {
            assert_eq!(id_s, id_p);
            assert_eq!(edges_s, edges_p);
        }
    }

    #[test]
    fn test_too_few_songs_is_fatal() {
        let one = vec![song("A", "X", "S1", vec![1.0, 0.0])];
        assert!(matches!(
            SimilarityEngine::new().compute(&one),
            Err(Error::CatalogTooSmall { valid: 1 })
        ));
        assert!(matches!(
            SimilarityEngine::new().compute(&[]),
            Err(Error::EmptyCatalog)
        ));
    }

    #[test]
    fn test_cancellation() {
        let flag = Arc::new(AtomicBool::new(true));
        let engine = SimilarityEngine::new().with_cancellation(flag);
        assert!(matches!(
            engine.compute(&three_songs()),
            Err(Error::Cancelled)
        ));
    }

    #[test]
    fn test_edges_in_catalog_order() {
        let songs = three_songs();
        let map = SimilarityEngine::new().compute(&songs).unwrap();

        let b_edges = map.get(&TrackId::new("B")).unwrap();
        assert_eq!(b_edges[0].target_id, TrackId::new("A"));
        assert_eq!(b_edges[1].target_id, TrackId::new("C"));
    }
}
