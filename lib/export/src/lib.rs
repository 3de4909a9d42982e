//! # tunematch Export
//!
//! Output layer for tunematch: renders ranked similarity results into the
//! two artifacts consumed downstream.
//!
//! - **Full similarity record** ([`records::full_record`]) - every computed
//!   edge per source track id, for analysis.
//! - **Compact UI record** ([`records::ui_record`]) - per source display
//!   key, the top-k neighbor display keys only.
//!
//! [`ResultExporter`] writes both as JSON with atomic-per-artifact writes.

pub mod exporter;
pub mod records;

pub use exporter::{ExportPaths, ResultExporter, FULL_FILENAME, UI_FILENAME};
pub use records::{full_record, ui_record, FullRecord, NeighborRecord, UiRecord};
