//! # tunematch
//!
//! A content-based song recommendation engine.
//!
//! tunematch takes a catalog of songs - each with genre text, lyrics text,
//! and Spotify-style audio descriptors - builds one combined feature vector
//! per song, computes the all-pairs cosine similarity matrix, and produces
//! a ranked top-k neighbor list for every song.
//!
//! ## Quick Start
//!
//! ### As a Binary
//!
//! ```bash
//! cargo install tunematch
//! tunematch --catalog data.json --out-dir ./out --top-k 5
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tunematch::prelude::*;
//!
//! let load = load_catalog("data.json").unwrap();
//! let builder = FeatureVectorBuilder::new(Arc::new(HashTextEmbedder::default()));
//! let (songs, dropped) = builder.build_all(&load.rows);
//!
//! let raw = SimilarityEngine::new().compute(&songs).unwrap();
//! let ranked = RankingAggregator::new(5).unwrap().rank(&raw).unwrap();
//!
//! let paths = ResultExporter::new("./out").export(&ranked, &raw).unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! tunematch is composed of several crates:
//!
//! - [`tunematch-core`](https://docs.rs/tunematch-core) - Vectors, catalog data model, shared errors
//! - [`tunematch-engine`](https://docs.rs/tunematch-engine) - Feature building, similarity, ranking
//! - [`tunematch-export`](https://docs.rs/tunematch-export) - Output artifacts with atomic writes

// Re-export core types
pub use tunematch_core::{
    load_catalog, CatalogLoad, CatalogRow, Error, Result, SimilarityEdge, SongIdentity,
    TrackId, Vector, AUDIO_ATTRIBUTES, AUDIO_ATTRIBUTE_COUNT,
};

// Re-export engine
pub use tunematch_engine::{
    FeatureVectorBuilder, HashTextEmbedder, RankedMap, RankingAggregator, SimilarityEngine,
    SimilarityMap, SongVector, TextEmbedder, DEFAULT_TEXT_DIM, DEFAULT_TOP_K,
};

// Re-export export layer
pub use tunematch_export::{ExportPaths, ResultExporter, FULL_FILENAME, UI_FILENAME};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_catalog, CatalogLoad, CatalogRow, Error, ExportPaths, FeatureVectorBuilder,
        HashTextEmbedder, RankedMap, RankingAggregator, Result, ResultExporter,
        SimilarityEdge, SimilarityEngine, SimilarityMap, SongIdentity, SongVector,
        TextEmbedder, TrackId, Vector, DEFAULT_TEXT_DIM, DEFAULT_TOP_K,
    };
}
