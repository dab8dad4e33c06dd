//! Portable-document loader.

use super::{DocumentLoader, OutputConfig};
use crate::csv;
use crate::error::Result;
use crate::model::{
    DocumentMetadata, FontSpan, ImageExtraction, ImageRef, LinkRef, SkippedItem, SkippedKind,
    TableExtraction, TableRef, TextContent,
};
use crate::source::pdf::{PdfDocument, PdfSource};
use log::warn;
use std::fs;
use std::path::Path;

/// Reported font sizes strictly above this are classified as headings.
pub const HEADING_SIZE_PT: f64 = 12.0;

/// Loader for portable-document files.
///
/// Holds the fully parsed page tree for its lifetime; every operation walks
/// the in-memory model.
pub struct PdfLoader {
    metadata: DocumentMetadata,
    document: PdfDocument,
    output: OutputConfig,
}

impl PdfLoader {
    /// Open a PDF file through the given source binding.
    ///
    /// Probes metadata (failing with a not-found error if the file is absent)
    /// and eagerly parses the whole document.
    pub fn open<P: AsRef<Path>>(
        path: P,
        source: &dyn PdfSource,
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

impl DocumentLoader for PdfLoader {
    fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    fn extract_text(&self) -> Result<TextContent> {
        let mut content = TextContent::new();

        for (i, page) in self.document.pages.iter().enumerate() {
            let page_number = i as u32 + 1;
            let mut fragments = Vec::new();

            for block in &page.blocks {
                for line in &block.lines {
                    for span in &line.spans {
                        let text = span.text.trim();
                        if text.is_empty() {
                            continue;
                        }
                        fragments.push(text.to_string());
                        content.font_styles.push(FontSpan {
                            page_number,
                            text: text.to_string(),
                            font: span.font.clone(),
                            size: span.size,
                        });
                        if span.size > HEADING_SIZE_PT {
                            content
                                .headings
                                .entry(page_number)
                                .or_default()
                                .push(text.to_string());
                        }
                    }
                }
            }

            content.pages.insert(page_number, fragments);
        }

        Ok(content)
    }

    fn extract_links(&self) -> Result<Vec<LinkRef>> {
        let mut links = Vec::new();

        for (i, page) in self.document.pages.iter().enumerate() {
            let page_number = i as u32 + 1;
            for link in &page.links {
                // Annotations without a URI are intra-document jumps.
                if let Some(uri) = &link.uri {
                    links.push(LinkRef {
                        url: uri.clone(),
                        page_number,
                        text: None,
                        shape_name: None,
                    });
                }
            }
        }

        Ok(links)
    }

    fn extract_images(&self) -> Result<ImageExtraction> {
        let dir = self.output.image_dir(self.metadata.file_stem());
        fs::create_dir_all(&dir)?;

        let mut result = ImageExtraction::default();
        for (i, page) in self.document.pages.iter().enumerate() {
            let page_number = i as u32 + 1;
            for (img_index, image) in page.images.iter().enumerate() {
                let path = dir.join(format!(
                    "page_{}_img_{}.{}",
                    page_number, img_index, image.extension
                ));
                match fs::write(&path, &image.data) {
                    Ok(()) => result.images.push(ImageRef {
                        page_number,
                        image_path: path,
                        alt_text: None,
                    }),
                    Err(e) => {
                        warn!("failed to write image {} on page {page_number}: {e}", img_index);
                        result.skipped.push(SkippedItem {
                            page_number,
                            kind: SkippedKind::Image,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        Ok(result)
    }

    fn extract_tables(&self) -> Result<TableExtraction> {
        let stem = self.metadata.file_stem();
        fs::create_dir_all(self.output.document_dir(stem))?;

        let mut result = TableExtraction::default();
        let mut seq = 0;
        for (i, page) in self.document.pages.iter().enumerate() {
            let page_number = i as u32 + 1;
            let Some(table) = &page.table else {
                continue;
            };

            result.tables.push(TableRef {
                page_number,
                table: table.clone(),
                table_index: None,
            });

            let path = self.output.table_path(stem, seq);
            if let Err(e) = csv::write_rows(&path, table) {
                warn!("failed to write table artifact for page {page_number}: {e}");
                result.skipped.push(SkippedItem {
                    page_number,
                    kind: SkippedKind::Table,
                    reason: e.to_string(),
                });
            }
            seq += 1;
        }

        Ok(result)
    }
}
