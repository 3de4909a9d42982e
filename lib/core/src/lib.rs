//! # tunematch Core
//!
//! Core library for the tunematch recommendation engine.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`Vector`] - Dense vector representation with cosine similarity
//! - [`CatalogRow`] - One song with text fields and audio descriptors
//! - [`SongIdentity`] / [`TrackId`] - Identity carried alongside vectors
//! - [`SimilarityEdge`] - One scored target song for a given source
//!
//! ## Example
//!
//! ```rust
//! use tunematch_core::Vector;
//!
//! let a = Vector::new(vec![1.0, 0.0, 0.0]);
//! let b = Vector::new(vec![1.0, 0.0, 0.0]);
//! assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-6);
//! ```

pub mod catalog;
pub mod error;
pub mod vector;

pub use catalog::{
    load_catalog, CatalogLoad, CatalogRow, SimilarityEdge, SongIdentity, TrackId,
    AUDIO_ATTRIBUTES, AUDIO_ATTRIBUTE_COUNT,
};
pub use error::{Error, Result};
pub use vector::Vector;
