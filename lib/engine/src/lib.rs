//! # tunematch Engine
//!
//! The similarity engine for tunematch: feature vector construction,
//! all-pairs cosine similarity, and top-k ranking.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌───────────────┐
//! │ CatalogRow  │────>│ FeatureVector    │────>│ Similarity    │
//! │ (input)     │     │ Builder          │     │ Engine (n²)   │
//! └─────────────┘     └──────────────────┘     └───────────────┘
//!                              │                       │
//!                       ┌──────────────┐      ┌────────────────┐
//!                       │ TextEmbedder │      │ Ranking        │
//!                       │ (injected)   │      │ Aggregator (k) │
//!                       └──────────────┘      └────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tunematch_engine::{
//!     FeatureVectorBuilder, HashTextEmbedder, RankingAggregator, SimilarityEngine,
//! };
//! # use tunematch_core::CatalogRow;
//! # fn rows() -> Vec<CatalogRow> { Vec::new() }
//!
//! let builder = FeatureVectorBuilder::new(Arc::new(HashTextEmbedder::default()));
//! let (songs, _dropped) = builder.build_all(&rows());
//! if songs.len() >= 2 {
//!     let raw = SimilarityEngine::new().compute(&songs).unwrap();
//!     let ranked = RankingAggregator::new(5).unwrap().rank(&raw).unwrap();
//! }
//! ```

pub mod builder;
pub mod embed;
pub mod ranking;
pub mod similarity;

pub use builder::{FeatureVectorBuilder, SongVector};
pub use embed::{HashTextEmbedder, TextEmbedder, DEFAULT_TEXT_DIM};
pub use ranking::{RankedMap, RankingAggregator, DEFAULT_TOP_K};
pub use similarity::{SimilarityEngine, SimilarityMap};
