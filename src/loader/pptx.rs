//! Presentation loader.

use super::{DocumentLoader, OutputConfig};
use crate::csv;
use crate::error::Result;
use crate::model::{
    DocumentMetadata, FontSpan, ImageExtraction, ImageRef, LinkRef, SkippedItem, SkippedKind,
    TableExtraction, TableRef, TextContent,
};
use crate::source::pptx::{PptxSource, SlideDeck, SlideShape, EMU_PER_POINT};
use log::warn;
use std::fs;
use std::path::Path;

/// Font size assumed for title runs that carry no explicit size.
const DEFAULT_TITLE_SIZE_PT: f64 = 24.0;

/// Font size assumed for body runs that carry no explicit size.
const DEFAULT_BODY_SIZE_PT: f64 = 12.0;

/// Loader for presentation files.
///
/// Slides are the logical pages. A slide's title placeholder doubles as its
/// heading; all other text-bearing shapes contribute body fragments.
pub struct PptxLoader {
    metadata: DocumentMetadata,
    deck: SlideDeck,
    output: OutputConfig,
}

impl PptxLoader {
    /// Open a presentation through the given source binding.
    pub fn open<P: AsRef<Path>>(
        path: P,
        source: &dyn PptxSource,
        output: OutputConfig,
    ) -> Result<Self> {
        let metadata = DocumentMetadata::probe(&path)?;
        let deck = source.load(path.as_ref())?;
        Ok(Self {
            metadata,
            deck,
            output,
        })
    }

    fn run_font_spans(
        shape: &SlideShape,
        page_number: u32,
        default_size: f64,
        spans: &mut Vec<FontSpan>,
    ) {
        let Some(frame) = &shape.text_frame else {
            return;
        };
        for paragraph in &frame.paragraphs {
            for run in &paragraph.runs {
                let text = run.text.trim();
                if text.is_empty() {
                    continue;
                }
                spans.push(FontSpan {
                    page_number,
                    text: text.to_string(),
                    font: run.font.clone().unwrap_or_else(|| "Default".to_string()),
                    size: run
                        .size
                        .map(|emu| emu as f64 / EMU_PER_POINT)
                        .unwrap_or(default_size),
                });
            }
        }
    }
}

impl DocumentLoader for PptxLoader {
    fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    fn extract_text(&self) -> Result<TextContent> {
        let mut content = TextContent::new();

        for (i, slide) in self.deck.slides.iter().enumerate() {
            let slide_number = i as u32 + 1;
            let mut fragments = Vec::new();

            if let Some(title) = slide.title_shape() {
                if let Some(frame) = &title.text_frame {
                    let title_text = frame.text().trim().to_string();
                    if !title_text.is_empty() {
                        fragments.push(title_text.clone());
                        content
                            .headings
                            .entry(slide_number)
                            .or_default()
                            .push(title_text);
                        Self::run_font_spans(
                            title,
                            slide_number,
                            DEFAULT_TITLE_SIZE_PT,
                            &mut content.font_styles,
                        );
                    }
                }
            }

            for (shape_index, shape) in slide.shapes.iter().enumerate() {
                if slide.title == Some(shape_index) {
                    continue;
                }
                let Some(frame) = &shape.text_frame else {
                    continue;
                };
                for paragraph in &frame.paragraphs {
                    let paragraph_text = paragraph.text().trim().to_string();
                    if paragraph_text.is_empty() {
                        continue;
                    }
                    fragments.push(paragraph_text);
                    for run in &paragraph.runs {
                        let text = run.text.trim();
                        if text.is_empty() {
                            continue;
                        }
                        content.font_styles.push(FontSpan {
                            page_number: slide_number,
                            text: text.to_string(),
                            font: run.font.clone().unwrap_or_else(|| "Default".to_string()),
                            size: run
                                .size
                                .map(|emu| emu as f64 / EMU_PER_POINT)
                                .unwrap_or(DEFAULT_BODY_SIZE_PT),
                        });
                    }
                }
            }

            content.pages.insert(slide_number, fragments);
        }

        Ok(content)
    }

    fn extract_links(&self) -> Result<Vec<LinkRef>> {
        let mut links = Vec::new();

        for (i, slide) in self.deck.slides.iter().enumerate() {
            let slide_number = i as u32 + 1;

            for shape in &slide.shapes {
                let shape_name = shape.name.clone().unwrap_or_else(|| "Unknown".to_string());

                // Shape-level click action.
                if let Some(url) = &shape.click_action {
                    let shape_text = shape
                        .text_frame
                        .as_ref()
                        .map(|frame| frame.text().trim().to_string())
                        .unwrap_or_default();
                    links.push(LinkRef {
                        url: url.clone(),
                        page_number: slide_number,
                        text: Some(shape_text),
                        shape_name: Some(shape_name.clone()),
                    });
                }

                // Run-level hyperlinks, appended independently of the above.
                if let Some(frame) = &shape.text_frame {
                    for paragraph in &frame.paragraphs {
                        for run in &paragraph.runs {
                            if let Some(url) = &run.hyperlink {
                                links.push(LinkRef {
                                    url: url.clone(),
                                    page_number: slide_number,
                                    text: Some(run.text.trim().to_string()),
                                    shape_name: Some(shape_name.clone()),
                                });
                            }
                        }
                    }
                }
            }
        }

        Ok(links)
    }

    fn extract_images(&self) -> Result<ImageExtraction> {
        let dir = self.output.image_dir(self.metadata.file_stem());
        fs::create_dir_all(&dir)?;

        let mut result = ImageExtraction::default();
        let mut image_index = 0;
        for (i, slide) in self.deck.slides.iter().enumerate() {
            let slide_number = i as u32 + 1;
            for shape in &slide.shapes {
                let Some(picture) = &shape.picture else {
                    continue;
                };
                let Some(png) = &picture.png else {
                    warn!("picture stream on slide {slide_number} could not be decoded");
                    result.skipped.push(SkippedItem {
                        page_number: slide_number,
                        kind: SkippedKind::Image,
                        reason: "picture stream could not be decoded".to_string(),
                    });
                    continue;
                };

                let path = dir.join(format!("slide_{}_img_{}.png", slide_number, image_index));
                match fs::write(&path, png) {
                    Ok(()) => {
                        result.images.push(ImageRef {
                            page_number: slide_number,
                            image_path: path,
                            alt_text: picture.alt_text.clone(),
                        });
                        image_index += 1;
                    }
                    Err(e) => {
                        warn!("failed to write image on slide {slide_number}: {e}");
                        result.skipped.push(SkippedItem {
                            page_number: slide_number,
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
        let mut table_index: u32 = 0;
        for (i, slide) in self.deck.slides.iter().enumerate() {
            let slide_number = i as u32 + 1;
            for shape in &slide.shapes {
                let Some(grid) = &shape.table else {
                    continue;
                };
                let grid: Vec<Vec<String>> = grid
                    .iter()
                    .map(|row| row.iter().map(|cell| cell.trim().to_string()).collect())
                    .collect();

                // Discard tables where every cell is blank.
                if grid.iter().all(|row| row.iter().all(|c| c.is_empty())) {
                    continue;
                }

                result.tables.push(TableRef {
                    page_number: slide_number,
                    table: grid.clone(),
                    table_index: Some(table_index),
                });

                let path = self.output.table_path(stem, table_index as usize);
                if let Err(e) = csv::write_rows(&path, &grid) {
                    warn!("failed to write table artifact for slide {slide_number}: {e}");
                    result.skipped.push(SkippedItem {
                        page_number: slide_number,
                        kind: SkippedKind::Table,
                        reason: e.to_string(),
                    });
                }
                table_index += 1;
            }
        }

        Ok(result)
    }
}
