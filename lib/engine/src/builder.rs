//! Feature vector construction
//!
//! Turns one catalog row into a single fixed-length vector: genre
//! embedding, then lyrics embedding, then the ten audio attributes in
//! declared order. The identity triple (artist, title, id) rides alongside
//! the vector for reporting and never enters the similarity arithmetic.

use crate::embed::TextEmbedder;
use std::sync::Arc;
use tracing::{debug, warn};
use tunematch_core::{CatalogRow, Error, Result, SongIdentity, Vector, AUDIO_ATTRIBUTE_COUNT};

/// A catalog row reduced to its identity and combined feature vector
#[derive(Debug, Clone)]
pub struct SongVector {
    pub identity: SongIdentity,
    pub vector: Vector,
}

/// Builds combined feature vectors from catalog rows.
///
/// The embedder is injected once and reused for every row; it is never
/// re-created inside the build loop.
pub struct FeatureVectorBuilder {
    embedder: Arc<dyn TextEmbedder>,
}

impl FeatureVectorBuilder {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self { embedder }
    }

    /// Total length of every vector produced by this builder:
    /// genre embedding + lyrics embedding + audio attributes
    #[must_use]
    pub fn vector_dim(&self) -> usize {
        2 * self.embedder.dim() + AUDIO_ATTRIBUTE_COUNT
    }

    /// Build the feature vector for one row.
    ///
    /// Fails if the embedder fails, returns a vector of unexpected length,
    /// or the combined vector contains non-finite components. A failed row
    /// never corrupts the length contract of the surviving set.
    pub fn build(&self, row: &CatalogRow) -> Result<SongVector> {
        let genre = self.embed_checked(&row.genre)?;
        let lyrics = self.embed_checked(&strip_newlines(&row.lyrics))?;

        let mut components: Vec<f32> = Vec::with_capacity(self.vector_dim());
        components.extend_from_slice(genre.as_slice());
        components.extend_from_slice(lyrics.as_slice());
        components.extend_from_slice(&row.audio_attributes());

        let vector = Vector::new(components);
        if !vector.is_finite() {
            return Err(Error::MalformedRow {
                id: row.id.to_string(),
                reason: "non-finite feature component".to_string(),
            });
        }
        debug_assert_eq!(vector.dim(), self.vector_dim());

        Ok(SongVector {
            identity: row.identity(),
            vector,
        })
    }

    /// Build vectors for a whole catalog, dropping failed rows.
    ///
    /// Row-level failures are recovered locally: the offending row is
    /// logged with its track id and counted, and the run continues.
    pub fn build_all(&self, rows: &[CatalogRow]) -> (Vec<SongVector>, usize) {
        let mut songs = Vec::with_capacity(rows.len());
        let mut dropped = 0usize;

        for row in rows {
            match self.build(row) {
                Ok(song) => songs.push(song),
                Err(e) => {
                    warn!("Dropping track '{}': {}", row.id, e);
                    dropped += 1;
                }
            }
        }

        debug!(
            "Built {} feature vectors of dimension {} ({} dropped)",
            songs.len(),
            self.vector_dim(),
            dropped
        );
        (songs, dropped)
    }

    fn embed_checked(&self, text: &str) -> Result<Vector> {
        let vector = self.embedder.embed(text)?;
        if vector.dim() != self.embedder.dim() {
            return Err(Error::InvalidDimension {
                expected: self.embedder.dim(),
                actual: vector.dim(),
            });
        }
        Ok(vector)
    }
}

/// Strip embedded newline sequences from lyrics before embedding.
///
/// Catalog lyrics carry both literal `\n` escape sequences and real line
/// breaks; both are removed.
fn strip_newlines(lyrics: &str) -> String {
    lyrics.replace("\\n", "").replace(['\n', '\r'], "")
}
