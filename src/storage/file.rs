//! Filesystem sink.

use super::Storage;
use crate::csv;
use crate::error::Result;
use crate::loader::OutputConfig;
use crate::model::ExtractionRecord;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;

/// Writes a document's derived artifacts to `<root>/<name>/`:
/// `extracted_text.txt`, `headings.txt`, `extracted_links.csv`, and
/// `font_styles.csv`.
///
/// The four writes are independent; each propagates its own I/O failure.
pub struct FileStorage {
    output: OutputConfig,
}

impl FileStorage {
    /// Create a sink writing under the given artifact root.
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }

    fn page_sections(pages: &BTreeMap<u32, Vec<String>>) -> String {
        let mut out = String::new();
        for (page, lines) in pages {
            let _ = writeln!(out, "Page {page}");
            out.push_str(&lines.join("\n"));
            out.push_str("\n\n");
        }
        out
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

impl Storage for FileStorage {
    fn save(&self, record: &ExtractionRecord, name: &str) -> Result<()> {
        let dir = self.output.document_dir(name);
        fs::create_dir_all(&dir)?;

        fs::write(
            dir.join("extracted_text.txt"),
            Self::page_sections(&record.text.pages),
        )?;

        fs::write(
            dir.join("headings.txt"),
            Self::page_sections(&record.text.headings),
        )?;

        let mut link_rows = vec![vec!["Page Number".to_string(), "URL".to_string()]];
        for link in &record.links {
            link_rows.push(vec![link.page_number.to_string(), link.url.clone()]);
        }
        csv::write_rows(&dir.join("extracted_links.csv"), &link_rows)?;

        let mut font_rows = vec![vec![
            "Page Number".to_string(),
            "Text".to_string(),
            "Font".to_string(),
            "Size".to_string(),
        ]];
        for span in &record.text.font_styles {
            if span.text.trim().is_empty() {
                continue;
            }
            font_rows.push(vec![
                span.page_number.to_string(),
                span.text.clone(),
                span.font.clone(),
                span.size.to_string(),
            ]);
        }
        csv::write_rows(&dir.join("font_styles.csv"), &font_rows)?;

        Ok(())
    }
}
