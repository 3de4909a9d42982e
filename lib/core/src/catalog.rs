//! Catalog data model
//!
//! The catalog is the finished tabular dataset handed over by the data
//! acquisition side: one row per song, duplicate (artist, title) pairs
//! already resolved. The loader here only guards the invariants the
//! similarity pipeline depends on (deserializable rows, unique track ids)
//! and drops anything that violates them.

use crate::error::Result;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Audio attributes embedded into the feature vector, in declared order.
///
/// Tempo and time_signature are carried in [`CatalogRow`] but intentionally
/// excluded from this list and therefore from the vector.
pub const AUDIO_ATTRIBUTES: [&str; 10] = [
    "danceability",
    "energy",
    "key",
    "loudness",
    "mode",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
];

/// Number of audio attributes contributing to the feature vector
pub const AUDIO_ATTRIBUTE_COUNT: usize = AUDIO_ATTRIBUTES.len();

/// Stable identifier of a track, unique per catalog row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TrackId {
    fn from(s: String) -> Self {
        TrackId(s)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        TrackId(s.to_string())
    }
}

/// One song from the catalog with its text fields and audio descriptors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRow {
    pub artist: String,
    pub title: String,
    pub id: TrackId,
    pub genre: String,
    pub lyrics: String,
    pub danceability: f32,
    pub energy: f32,
    pub key: f32,
    pub loudness: f32,
    pub mode: f32,
    pub speechiness: f32,
    pub acousticness: f32,
    pub instrumentalness: f32,
    pub liveness: f32,
    pub valence: f32,
    /// Carried for completeness, never embedded
    pub tempo: f32,
    /// Carried for completeness, never embedded
    pub time_signature: f32,
}

impl CatalogRow {
    /// The audio attributes in the order declared by [`AUDIO_ATTRIBUTES`]
    #[must_use]
    pub fn audio_attributes(&self) -> [f32; AUDIO_ATTRIBUTE_COUNT] {
        [
            self.danceability,
            self.energy,
            self.key,
            self.loudness,
            self.mode,
            self.speechiness,
            self.acousticness,
            self.instrumentalness,
            self.liveness,
            self.valence,
        ]
    }

    #[inline]
    #[must_use]
    pub fn identity(&self) -> SongIdentity {
        SongIdentity {
            id: self.id.clone(),
            artist: self.artist.clone(),
            title: self.title.clone(),
        }
    }
}

/// Identity of a song, carried alongside its vector but never inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongIdentity {
    pub id: TrackId,
    pub artist: String,
    pub title: String,
}

impl SongIdentity {
    /// Compact display key used by the UI artifact: "artist<TAB>title"
    #[must_use]
    pub fn ui_key(&self) -> String {
        format!("{}\t{}", self.artist, self.title)
    }
}

/// A single computed similarity: one target song scored against a source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityEdge {
    pub target_id: TrackId,
    pub score: f32,
    pub target_title: String,
    pub target_artist: String,
}

/// Catalog loaded from disk with row-level drop accounting
#[derive(Debug)]
pub struct CatalogLoad {
    pub rows: Vec<CatalogRow>,
    /// Rows rejected during loading (malformed or duplicate id)
    pub dropped: usize,
}

/// Load a catalog from a JSON array of rows.
///
/// Malformed rows and rows repeating an already-seen track id are dropped
/// and counted, not propagated as errors; the caller decides whether the
/// surviving row count is workable.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogLoad> {
    let contents = std::fs::read_to_string(path)?;
    let raw: Vec<serde_json::Value> = serde_json::from_str(&contents)
        .map_err(|e| crate::error::Error::Serialization(e.to_string()))?;

    let mut rows = Vec::with_capacity(raw.len());
    let mut seen: AHashSet<TrackId> = AHashSet::with_capacity(raw.len());
    let mut dropped = 0usize;

    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<CatalogRow>(value) {
            Ok(row) => {
                if seen.contains(&row.id) {
                    warn!("Dropping row {}: duplicate track id '{}'", index, row.id);
                    dropped += 1;
                    continue;
                }
                seen.insert(row.id.clone());
                rows.push(row);
            }
            Err(e) => {
                warn!("Dropping row {}: {}", index, e);
                dropped += 1;
            }
        }
    }

    Ok(CatalogLoad { rows, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_row_json(id: &str, artist: &str, title: &str) -> serde_json::Value {
        serde_json::json!({
            "artist": artist,
            "title": title,
            "id": id,
            "genre": "pop",
            "lyrics": "la la",
            "danceability": 0.7,
            "energy": 0.8,
            "key": 5.0,
            "loudness": -6.5,
            "mode": 1.0,
            "speechiness": 0.05,
            "acousticness": 0.2,
            "instrumentalness": 0.0,
            "liveness": 0.12,
            "valence": 0.9,
            "tempo": 120.0,
            "time_signature": 4.0
        })
    }

    fn write_catalog(values: &[serde_json::Value]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = serde_json::to_string(&values).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_audio_attribute_order() {
        let row: CatalogRow =
            serde_json::from_value(sample_row_json("t1", "X", "S1")).unwrap();
        let attrs = row.audio_attributes();
        assert_eq!(attrs.len(), AUDIO_ATTRIBUTE_COUNT);
        assert_eq!(attrs[0], 0.7); // danceability first
        assert_eq!(attrs[9], 0.9); // valence last
        // tempo and time_signature never appear
        assert!(!attrs.contains(&120.0));
        assert!(!attrs.contains(&4.0));
    }

    #[test]
    fn test_ui_key_uses_tab_separator() {
        let identity = SongIdentity {
            id: TrackId::new("t1"),
            artist: "X".to_string(),
            title: "S1".to_string(),
        };
        assert_eq!(identity.ui_key(), "X\tS1");
    }

    #[test]
    fn test_load_catalog() {
        let file = write_catalog(&[
            sample_row_json("t1", "X", "S1"),
            sample_row_json("t2", "Y", "S2"),
        ]);

        let load = load_catalog(file.path()).unwrap();
        assert_eq!(load.rows.len(), 2);
        assert_eq!(load.dropped, 0);
        assert_eq!(load.rows[0].id, TrackId::new("t1"));
    }

    #[test]
    fn test_load_catalog_drops_malformed_row() {
        let file = write_catalog(&[
            sample_row_json("t1", "X", "S1"),
            serde_json::json!({"artist": "broken"}),
        ]);

        let load = load_catalog(file.path()).unwrap();
        assert_eq!(load.rows.len(), 1);
        assert_eq!(load.dropped, 1);
    }

    #[test]
    fn test_load_catalog_drops_duplicate_id() {
        let file = write_catalog(&[
            sample_row_json("t1", "X", "S1"),
            sample_row_json("t1", "Y", "S2"),
            sample_row_json("t2", "Z", "S3"),
        ]);

        let load = load_catalog(file.path()).unwrap();
        assert_eq!(load.rows.len(), 2);
        assert_eq!(load.dropped, 1);
        assert_eq!(load.rows[1].id, TrackId::new("t2"));
    }

    #[test]
    fn test_load_catalog_invalid_json_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        assert!(load_catalog(file.path()).is_err());
    }
}
