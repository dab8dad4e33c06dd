//! Word-processing source boundary.
//!
//! The format exposes a flat paragraph/table stream with no page concept.
//! Hyperlink and image targets are indirect: runs reference relationship ids
//! which the document's relationship table resolves to URLs or binary parts.

use crate::error::Result;
use std::path::Path;

/// Relationship type URI for hyperlinks.
pub const HYPERLINK_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// Interface a word-processing parsing binding must satisfy.
pub trait DocxSource: Send + Sync {
    /// Load and fully parse the document at `path`.
    fn load(&self, path: &Path) -> Result<WordDocument>;
}

/// A parsed word-processing document.
#[derive(Debug, Clone, Default)]
pub struct WordDocument {
    /// Paragraphs in document order
    pub paragraphs: Vec<WordParagraph>,

    /// The document part's relationship table
    pub relationships: Vec<WordRelationship>,

    /// Table grids in document order, 1:1 with the native row/column layout
    pub tables: Vec<Vec<Vec<String>>>,
}

impl WordDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a relationship id to its entry, if present.
    pub fn resolve(&self, rel_id: &str) -> Option<&WordRelationship> {
        self.relationships.iter().find(|r| r.id == rel_id)
    }
}

/// One paragraph.
#[derive(Debug, Clone, Default)]
pub struct WordParagraph {
    /// Paragraph text as reported by the library
    pub text: String,

    /// Paragraph style name (e.g., "Normal", "Heading 1"), when set
    pub style: Option<String>,

    /// Hyperlink elements found in the paragraph's markup
    pub hyperlinks: Vec<WordHyperlink>,
}

impl WordParagraph {
    /// Create a paragraph with the given style.
    pub fn styled(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Some(style.into()),
            hyperlinks: Vec::new(),
        }
    }
}

/// A hyperlink element inside a paragraph, before relationship resolution.
#[derive(Debug, Clone)]
pub struct WordHyperlink {
    /// Relationship id referencing the target
    pub rel_id: String,

    /// Display text gathered from the hyperlink's runs
    pub text: String,
}

/// One entry of the document's relationship table.
#[derive(Debug, Clone)]
pub struct WordRelationship {
    /// Relationship id (e.g., "rId5")
    pub id: String,

    /// Relationship type URI
    pub rel_type: String,

    /// Target reference: a URL for hyperlinks, a part path for images
    pub target: String,

    /// Binary payload of the target part, for embedded media
    pub blob: Option<Vec<u8>>,
}

impl WordRelationship {
    /// Whether this relationship is a hyperlink.
    pub fn is_hyperlink(&self) -> bool {
        self.rel_type == HYPERLINK_REL_TYPE
    }

    /// Whether this relationship references an embedded image part.
    pub fn is_image(&self) -> bool {
        self.rel_type.contains("image")
    }
}
