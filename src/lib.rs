//! # undoc
//!
//! Structured content extraction from PDF, DOCX, and PPTX documents.
//!
//! Every container format is handled by a loader variant satisfying one
//! capability contract — metadata, page text with headings and font spans,
//! hyperlinks, embedded images, tables — and every variant converges on the
//! same normalized [`ExtractionRecord`]. The record can then be persisted to
//! per-document files ([`FileStorage`]) or to a SQLite database with a
//! queryable structure ([`SqlStorage`]).
//!
//! The underlying format-parsing libraries stay outside this crate: each
//! format declares a source trait ([`source::PdfSource`],
//! [`source::PptxSource`], [`source::DocxSource`]) describing the typed
//! document model a binding must deliver.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use undoc::{FileStorage, LoaderRegistry, OutputConfig, SqlStorage, Storage};
//! # use std::path::Path;
//! # use undoc::source::docx::{DocxSource, WordDocument};
//! # use undoc::source::pdf::{PdfDocument, PdfSource};
//! # use undoc::source::pptx::{PptxSource, SlideDeck};
//! # struct PdfBinding;
//! # struct PptxBinding;
//! # struct DocxBinding;
//! # impl PdfSource for PdfBinding {
//! #     fn load(&self, _: &Path) -> undoc::Result<PdfDocument> { unimplemented!() }
//! # }
//! # impl PptxSource for PptxBinding {
//! #     fn load(&self, _: &Path) -> undoc::Result<SlideDeck> { unimplemented!() }
//! # }
//! # impl DocxSource for DocxBinding {
//! #     fn load(&self, _: &Path) -> undoc::Result<WordDocument> { unimplemented!() }
//! # }
//!
//! fn main() -> undoc::Result<()> {
//!     let registry = LoaderRegistry::new(
//!         Arc::new(PdfBinding),
//!         Arc::new(PptxBinding),
//!         Arc::new(DocxBinding),
//!     );
//!
//!     let extractor = registry.open("input/report.pdf")?;
//!     let record = extractor.extract_record()?;
//!
//!     FileStorage::new(OutputConfig::default()).save(&record, "report")?;
//!     SqlStorage::open("documents.db")?.save(&record, "report")?;
//!     Ok(())
//! }
//! ```

pub mod csv;
pub mod detect;
pub mod error;
pub mod loader;
pub mod model;
pub mod source;
pub mod storage;

// Re-export commonly used types
pub use detect::DocumentFormat;
pub use error::{Error, Result};
pub use loader::{
    DocumentLoader, DocxLoader, Extractor, LoaderRegistry, OutputConfig, PdfLoader, PptxLoader,
};
pub use model::{
    DocumentMetadata, ExtractionRecord, FontSpan, ImageExtraction, ImageRef, LinkRef, SkippedItem,
    SkippedKind, TableExtraction, TableRef, TextContent,
};
pub use storage::{FileStorage, SqlStorage, Storage, StoredDocument, StoredExtraction};
