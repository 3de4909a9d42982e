//! Result export
//!
//! Writes the two output artifacts to durable storage. Each artifact goes
//! through a `.tmp` sibling and an atomic rename, so a failed run never
//! leaves a partially written file in place. Export failures are fatal and
//! surfaced to the caller.

use crate::records::{full_record, ui_record};
use std::path::{Path, PathBuf};
use tracing::info;
use tunematch_core::{Error, Result};
use tunematch_engine::{RankedMap, SimilarityMap};

/// File name of the full similarity artifact
pub const FULL_FILENAME: &str = "similarity.json";

/// File name of the compact UI artifact
pub const UI_FILENAME: &str = "ui.json";

/// Locations of the written artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub full: PathBuf,
    pub ui: PathBuf,
}

/// Renders ranked results into the two output artifacts
#[derive(Debug, Clone)]
pub struct ResultExporter {
    out_dir: PathBuf,
}

impl ResultExporter {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    /// Write the full similarity record and the compact UI record.
    ///
    /// Writes are atomic per artifact, not transactional across both: if
    /// the second write fails the first stays in place.
    pub fn export(&self, ranked: &RankedMap, raw: &SimilarityMap) -> Result<ExportPaths> {
        std::fs::create_dir_all(&self.out_dir)?;

        let full_path = self.out_dir.join(FULL_FILENAME);
        let full = serde_json::to_vec_pretty(&full_record(raw))
            .map_err(|e| Error::Serialization(e.to_string()))?;
        write_atomic(&full_path, &full)?;

        let ui_path = self.out_dir.join(UI_FILENAME);
        let ui = serde_json::to_vec_pretty(&ui_record(ranked))
            .map_err(|e| Error::Serialization(e.to_string()))?;
        write_atomic(&ui_path, &ui)?;

        info!(
            "Exported {} sources to {:?} and {:?}",
            raw.len(),
            full_path,
            ui_path
        );
        Ok(ExportPaths {
            full: full_path,
            ui: ui_path,
        })
    }
}

/// Write to a temporary sibling, then rename into place
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let temp_file = path.with_extension("tmp");
    std::fs::write(&temp_file, data)?;
    std::fs::rename(&temp_file, path)?;
    Ok(())
}
