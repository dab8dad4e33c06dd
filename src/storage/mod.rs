//! Persistence sinks for extraction records.
//!
//! Two sinks satisfy the same contract: [`FileStorage`] writes per-document
//! artifacts to the filesystem, [`SqlStorage`] normalizes the record into a
//! seven-table SQLite schema with query, list, and delete lifecycle
//! operations layered on top of save.

pub mod file;
pub mod sql;

pub use file::FileStorage;
pub use sql::{
    SqlStorage, StoredDocument, StoredExtraction, StoredFontStyle, StoredHeading, StoredImage,
    StoredLink, StoredPageText, StoredTable,
};

use crate::error::Result;
use crate::model::ExtractionRecord;

/// Capability contract for persisting one extraction record.
pub trait Storage {
    /// Persist `record` under the document name `name`.
    fn save(&self, record: &ExtractionRecord, name: &str) -> Result<()>;
}
