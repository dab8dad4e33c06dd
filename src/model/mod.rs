//! Extraction record types.
//!
//! This module defines the normalized representation every loader variant
//! converges on: page-indexed text with font and heading metadata, plus the
//! hyperlink, image, and table references extracted from a document.

mod metadata;
mod record;

pub use metadata::DocumentMetadata;
pub use record::{
    ExtractionRecord, FontSpan, ImageExtraction, ImageRef, LinkRef, SkippedItem, SkippedKind,
    TableExtraction, TableRef, TextContent,
};
