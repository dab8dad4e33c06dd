//! Word-processing loader.

use super::{DocumentLoader, OutputConfig};
use crate::csv;
use crate::error::Result;
use crate::model::{
    DocumentMetadata, FontSpan, ImageExtraction, ImageRef, LinkRef, SkippedItem, SkippedKind,
    TableExtraction, TableRef, TextContent,
};
use crate::source::docx::{DocxSource, WordDocument};
use log::warn;
use std::fs;
use std::path::Path;

/// The format has no native page concept; the whole document is one logical
/// page.
const PAGE_NUMBER: u32 = 1;

/// Size recorded for every fragment; the true rendered size is not reliably
/// available from the format.
const DEFAULT_FONT_SIZE_PT: f64 = 12.0;

/// Paragraph style names with this prefix promote their text to a heading.
const HEADING_STYLE_PREFIX: &str = "Heading";

/// Loader for word-processing files.
pub struct DocxLoader {
    metadata: DocumentMetadata,
    document: WordDocument,
    output: OutputConfig,
}

impl DocxLoader {
    /// Open a word-processing document through the given source binding.
    pub fn open<P: AsRef<Path>>(
        path: P,
        source: &dyn DocxSource,
        output: OutputConfig,
    ) -> Result<Self> {
        let metadata = DocumentMetadata::probe(&path)?;
        let document = source.load(path.as_ref())?;
        Ok(Self {
            metadata,
            document,
            output,
        })
    }
}

impl DocumentLoader for DocxLoader {
    fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    fn extract_text(&self) -> Result<TextContent> {
        let mut content = TextContent::new();
        let mut fragments = Vec::new();

        for paragraph in &self.document.paragraphs {
            let text = paragraph.text.trim();
            if text.is_empty() {
                continue;
            }
            fragments.push(text.to_string());

            let style = paragraph.style.as_deref().unwrap_or("Normal");
            content.font_styles.push(FontSpan {
                page_number: PAGE_NUMBER,
                text: text.to_string(),
                font: style.to_string(),
                size: DEFAULT_FONT_SIZE_PT,
            });

            if style.starts_with(HEADING_STYLE_PREFIX) {
                content
                    .headings
                    .entry(PAGE_NUMBER)
                    .or_default()
                    .push(text.to_string());
            }
        }

        content.pages.insert(PAGE_NUMBER, fragments);
        Ok(content)
    }

    fn extract_links(&self) -> Result<Vec<LinkRef>> {
        let mut links = Vec::new();

        // Pass 1: hyperlink elements in paragraph markup, resolved through
        // the relationship table.
        for paragraph in &self.document.paragraphs {
            for hyperlink in &paragraph.hyperlinks {
                if let Some(rel) = self.document.resolve(&hyperlink.rel_id) {
                    links.push(LinkRef {
                        url: rel.target.clone(),
                        page_number: PAGE_NUMBER,
                        text: Some(hyperlink.text.clone()),
                        shape_name: None,
                    });
                }
            }
        }

        // Pass 2: hyperlink-typed relationships with absolute targets not
        // already captured above.
        for rel in &self.document.relationships {
            if rel.is_hyperlink()
                && rel.target.starts_with("http")
                && !links.iter().any(|link| link.url == rel.target)
            {
                links.push(LinkRef {
                    url: rel.target.clone(),
                    page_number: PAGE_NUMBER,
                    text: Some("Link".to_string()),
                    shape_name: None,
                });
            }
        }

        Ok(links)
    }

    fn extract_images(&self) -> Result<ImageExtraction> {
        let dir = self.output.image_dir(self.metadata.file_stem());
        fs::create_dir_all(&dir)?;

        let mut result = ImageExtraction::default();
        let mut image_index = 0;
        for rel in &self.document.relationships {
            if !rel.is_image() {
                continue;
            }
            let Some(blob) = &rel.blob else {
                warn!("image relationship {} has no payload", rel.id);
                result.skipped.push(SkippedItem {
                    page_number: PAGE_NUMBER,
                    kind: SkippedKind::Image,
                    reason: format!("image relationship {} has no payload", rel.id),
                });
                continue;
            };

            let extension = rel.target.rsplit('.').next().unwrap_or("bin");
            let path = dir.join(format!("image_{}.{}", image_index, extension));
            match fs::write(&path, blob) {
                Ok(()) => {
                    result.images.push(ImageRef {
                        page_number: PAGE_NUMBER,
                        image_path: path,
                        alt_text: None,
                    });
                    image_index += 1;
                }
                Err(e) => {
                    warn!("failed to write image {}: {e}", rel.id);
                    result.skipped.push(SkippedItem {
                        page_number: PAGE_NUMBER,
                        kind: SkippedKind::Image,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(result)
    }

    fn extract_tables(&self) -> Result<TableExtraction> {
        let stem = self.metadata.file_stem();
        fs::create_dir_all(self.output.document_dir(stem))?;

        let mut result = TableExtraction::default();
        for (table_index, grid) in self.document.tables.iter().enumerate() {
            // First row is the header row; the grid stays 1:1 with the native
            // layout, merged cells appearing wherever the grid exposes them.
            let grid: Vec<Vec<String>> = grid
                .iter()
                .map(|row| row.iter().map(|cell| cell.trim().to_string()).collect())
                .collect();

            result.tables.push(TableRef {
                page_number: PAGE_NUMBER,
                table: grid.clone(),
                table_index: Some(table_index as u32),
            });

            let path = self.output.table_path(stem, table_index);
            if let Err(e) = csv::write_rows(&path, &grid) {
                warn!("failed to write table artifact {table_index}: {e}");
                result.skipped.push(SkippedItem {
                    page_number: PAGE_NUMBER,
                    kind: SkippedKind::Table,
                    reason: e.to_string(),
                });
            }
        }

        Ok(result)
    }
}
