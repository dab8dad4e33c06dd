//! Container format detection.

use crate::error::{Error, Result};
use std::path::Path;

/// Supported document container formats, identified by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Portable document format (`.pdf`)
    Pdf,
    /// Word-processing document (`.docx`)
    Docx,
    /// Presentation (`.pptx`)
    Pptx,
}

impl DocumentFormat {
    /// Resolve the format from a path's extension, case-insensitive.
    ///
    /// # Example
    /// ```
    /// use undoc::DocumentFormat;
    ///
    /// let format = DocumentFormat::from_path("slides/deck.PPTX").unwrap();
    /// assert_eq!(format, DocumentFormat::Pptx);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "pptx" => Ok(DocumentFormat::Pptx),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Canonical lowercase extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Pptx => "pptx",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_extensions() {
        assert_eq!(
            DocumentFormat::from_path("report.pdf").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_path("cover page.docx").unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_path("deck.pptx").unwrap(),
            DocumentFormat::Pptx
        );
    }

    #[test]
    fn test_detect_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_path("REPORT.PDF").unwrap(),
            DocumentFormat::Pdf
        );
    }

    #[test]
    fn test_detect_unknown_extension() {
        let result = DocumentFormat::from_path("notes.odt");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));

        let result = DocumentFormat::from_path("no_extension");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
