//! Top-k ranking of raw similarity results
//!
//! Sorts each source's edge list descending by score with a stable sort,
//! so tied scores keep catalog iteration order, then truncates to the
//! configured k.

use crate::similarity::SimilarityMap;
use std::cmp::Ordering;
use tunematch_core::{Error, Result, SimilarityEdge, SongIdentity, TrackId};

/// Default number of neighbors kept per song
pub const DEFAULT_TOP_K: usize = 5;

/// Ranked similarity results: per source, at most k edges in
/// non-increasing score order
#[derive(Debug, Clone)]
pub struct RankedMap {
    inner: SimilarityMap,
    k: usize,
}

impl RankedMap {
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Ranked edges for one source song
    #[must_use]
    pub fn get(&self, id: &TrackId) -> Option<&[SimilarityEdge]> {
        self.inner.get(id)
    }

    /// Iterate sources in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&SongIdentity, &[SimilarityEdge])> {
        self.inner.iter()
    }
}

/// Groups, sorts, and truncates raw similarity results
#[derive(Debug, Clone)]
pub struct RankingAggregator {
    k: usize,
}

impl Default for RankingAggregator {
    fn default() -> Self {
        Self { k: DEFAULT_TOP_K }
    }
}

impl RankingAggregator {
    /// Create an aggregator keeping the top `k` neighbors per song.
    ///
    /// `k` must be positive; the upper bound (catalog size - 1) is checked
    /// at ranking time when the catalog size is known.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidConfig(
                "top-k must be a positive integer".to_string(),
            ));
        }
        Ok(Self { k })
    }

    /// Rank every source's edges and truncate to the top k.
    ///
    /// Sources with fewer than k edges keep whatever they have. Given the
    /// same raw map and k, the output is identical across runs.
    pub fn rank(&self, raw: &SimilarityMap) -> Result<RankedMap> {
        let max = raw.len().saturating_sub(1);
        if self.k > max {
            return Err(Error::InvalidTopK { k: self.k, max });
        }

        let entries = raw
            .iter()
            .map(|(identity, edges)| {
                let mut ranked = edges.to_vec();
                // Stable sort: ties keep prior (catalog) order
                ranked.sort_by(|a, b| {
                    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
                });
                ranked.truncate(self.k);
                (identity.clone(), ranked)
            })
            .collect();

        Ok(RankedMap {
            inner: SimilarityMap::from_entries(entries),
            k: self.k,
        })
    }
}
