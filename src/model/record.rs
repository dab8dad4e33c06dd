//! The normalized extraction record and its parts.

use super::DocumentMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Page-indexed text content with font and heading metadata.
///
/// Page keys are 1-based and ordered. Every walked page or slide gets an
/// entry, even when it contributed no fragments; a document with no pages
/// yields an empty map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// Ordered text fragments per page
    pub pages: BTreeMap<u32, Vec<String>>,

    /// Font/size metadata per non-blank fragment
    pub font_styles: Vec<FontSpan>,

    /// Fragments promoted to headings, per page
    pub headings: BTreeMap<u32, Vec<String>>,
}

impl TextContent {
    /// Create empty text content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that no page holds any fragment.
    pub fn is_empty(&self) -> bool {
        self.pages.values().all(|fragments| fragments.is_empty())
    }
}

/// Font and size metadata for one text fragment.
///
/// Never emitted for blank or whitespace-only text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpan {
    /// 1-based page or slide number
    pub page_number: u32,

    /// The fragment text (trimmed, non-blank)
    pub text: String,

    /// Font identifier: the reported font name, or a paragraph style name for
    /// formats that expose no reliable font information
    pub font: String,

    /// Size in points
    pub size: f64,
}

/// A hyperlink discovered in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRef {
    /// Target URL
    pub url: String,

    /// 1-based page or slide number where the link appears
    pub page_number: u32,

    /// Display text associated with the link, when the format exposes one
    pub text: Option<String>,

    /// Originating shape name, for formats with named shapes
    pub shape_name: Option<String>,
}

/// An embedded image written to disk during extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// 1-based page or slide number where the image appears
    pub page_number: u32,

    /// Path the image bytes were written to
    pub image_path: PathBuf,

    /// Alternative text, when the format exposes one
    pub alt_text: Option<String>,
}

/// A table extracted from the document.
///
/// Row lengths within one grid need not be uniform; merged cells collapse to
/// repeated or empty strings upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    /// 1-based page or slide number where the table appears
    pub page_number: u32,

    /// Cell grid, rows of cell strings
    pub table: Vec<Vec<String>>,

    /// Position in the document's emitted-table sequence, for formats that
    /// number their tables
    pub table_index: Option<u32>,
}

/// Which kind of item was skipped during best-effort extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkippedKind {
    /// An embedded image failed to decode or write
    Image,
    /// A table artifact failed to write
    Table,
}

/// Structured outcome for one item that could not be extracted or persisted.
///
/// Per-item failures are isolated: they are logged, recorded here, and never
/// abort extraction of the remaining items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    /// 1-based page or slide number of the failed item
    pub page_number: u32,

    /// Item kind
    pub kind: SkippedKind,

    /// Human-readable failure reason
    pub reason: String,
}

/// Images extracted from a document, plus the items skipped along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageExtraction {
    /// Successfully written images
    pub images: Vec<ImageRef>,

    /// Per-item failures
    pub skipped: Vec<SkippedItem>,
}

/// Tables extracted from a document, plus the items skipped along the way.
///
/// A table whose CSV artifact failed to write is still present in `tables`;
/// the write failure is recorded in `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableExtraction {
    /// Extracted tables
    pub tables: Vec<TableRef>,

    /// Per-item failures
    pub skipped: Vec<SkippedItem>,
}

/// The normalized result of extracting one document.
///
/// Owned by the caller that assembled it; storage sinks consume it read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// File-level metadata
    pub metadata: DocumentMetadata,

    /// Page text with font and heading metadata
    pub text: TextContent,

    /// Discovered hyperlinks
    pub links: Vec<LinkRef>,

    /// Extracted images
    pub images: Vec<ImageRef>,

    /// Extracted tables
    pub tables: Vec<TableRef>,

    /// Items skipped during image and table extraction
    pub skipped: Vec<SkippedItem>,
}
