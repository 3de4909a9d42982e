//! Text embedding capability
//!
//! The pipeline treats "turn a text field into a fixed-length vector" as an
//! injected capability behind [`TextEmbedder`]. The shipped default is a
//! deterministic hash-based embedder; callers with a real embedding model
//! plug it in through the same trait.

use std::collections::HashSet;
use tunematch_core::{Result, Vector};

/// Default dimension for text embeddings
pub const DEFAULT_TEXT_DIM: usize = 64;

/// A capability that maps text to a fixed-length numeric vector.
///
/// Implementations must be deterministic for identical input text within a
/// run, and must always return a vector of exactly `dim()` components.
pub trait TextEmbedder: Send + Sync {
    /// Dimensionality of every vector produced by this embedder
    fn dim(&self) -> usize;

    /// Compute the embedding for a text field
    fn embed(&self, text: &str) -> Result<Vector>;
}

/// Hash-based text embedder
///
/// Hashes character trigrams and whole words into a fixed-size vector and
/// L2-normalizes the result. Deterministic across runs. Not a semantic
/// model, but a self-contained default that keeps the pipeline runnable
/// without an external embedding service.
#[derive(Debug, Clone)]
pub struct HashTextEmbedder {
    dim: usize,
}

impl HashTextEmbedder {
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashTextEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_DIM)
    }
}

impl TextEmbedder for HashTextEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vector> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut components = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in generate_trigrams(&normalized) {
            let mut hasher = DefaultHasher::new();
            trigram.hash(&mut hasher);
            let hash = hasher.finish();

            let pos = (hash as usize) % self.dim;
            components[pos] += 1.0;
        }

        // Word-level hashing on top of trigrams; words contribute more
        for word in normalized.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let hash = hasher.finish();

            let pos = (hash as usize) % self.dim;
            components[pos] += 2.0;
        }

        let mut vector = Vector::new(components);
        vector.normalize();
        Ok(vector)
    }
}

/// Generate character trigrams from a string
fn generate_trigrams(s: &str) -> HashSet<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    if chars.len() < 3 {
        return HashSet::new();
    }

    chars
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}
