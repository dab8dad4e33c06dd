//! Portable-document source boundary.
//!
//! The model mirrors the page tree the parsing library exposes: pages hold
//! layout blocks, blocks hold lines, lines hold text spans with font name and
//! reported size in points.

use crate::error::Result;
use std::path::Path;

/// Interface a PDF parsing binding must satisfy.
pub trait PdfSource: Send + Sync {
    /// Load and fully parse the document at `path`.
    fn load(&self, path: &Path) -> Result<PdfDocument>;
}

/// A parsed PDF document.
#[derive(Debug, Clone, Default)]
pub struct PdfDocument {
    /// Pages in reading order
    pub pages: Vec<PdfPage>,
}

impl PdfDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// One page of a PDF document.
#[derive(Debug, Clone, Default)]
pub struct PdfPage {
    /// Layout blocks in reading order
    pub blocks: Vec<PdfBlock>,

    /// Link annotations on the page
    pub links: Vec<PdfLink>,

    /// Embedded raster images referenced by the page
    pub images: Vec<PdfImage>,

    /// Result of the page's table detection, at most one per page
    pub table: Option<Vec<Vec<String>>>,
}

/// A layout block: a group of lines.
#[derive(Debug, Clone, Default)]
pub struct PdfBlock {
    /// Lines within the block
    pub lines: Vec<PdfLine>,
}

/// A line of text spans.
#[derive(Debug, Clone, Default)]
pub struct PdfLine {
    /// Spans within the line
    pub spans: Vec<PdfSpan>,
}

/// A run of text with uniform font attributes.
#[derive(Debug, Clone)]
pub struct PdfSpan {
    /// Span text as reported by the library
    pub text: String,

    /// Font name
    pub font: String,

    /// Reported size in points
    pub size: f64,
}

impl PdfSpan {
    /// Create a span.
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
        }
    }
}

/// A link annotation on a page.
///
/// `uri` is `None` for intra-document jumps, which carry no external target.
#[derive(Debug, Clone, Default)]
pub struct PdfLink {
    /// External target URI, if the annotation has one
    pub uri: Option<String>,
}

/// An embedded raster image, already decoded by the binding.
#[derive(Debug, Clone)]
pub struct PdfImage {
    /// Raw image bytes
    pub data: Vec<u8>,

    /// File extension reported by the image table (e.g., "png", "jpeg")
    pub extension: String,
}
