//! Loader contract and format-specific variants.
//!
//! Every format variant satisfies [`DocumentLoader`]: constructed from a file
//! path (metadata is probed and the whole source document parsed eagerly),
//! exposing four extraction operations that are independently callable in any
//! order, any number of times. Image and table extraction write derived
//! artifacts to the filesystem as a documented side effect; re-extraction
//! overwrites artifacts of the same name.

pub mod docx;
pub mod pdf;
pub mod pptx;

pub use docx::DocxLoader;
pub use pdf::PdfLoader;
pub use pptx::PptxLoader;

use crate::detect::DocumentFormat;
use crate::error::Result;
use crate::model::{
    DocumentMetadata, ExtractionRecord, ImageExtraction, LinkRef, TableExtraction, TextContent,
};
use crate::source::{DocxSource, PdfSource, PptxSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The capability contract every format-specific loader satisfies.
pub trait DocumentLoader {
    /// File-level metadata computed at construction.
    fn metadata(&self) -> &DocumentMetadata;

    /// Extract page-indexed text with font and heading metadata.
    fn extract_text(&self) -> Result<TextContent>;

    /// Extract hyperlinks.
    fn extract_links(&self) -> Result<Vec<LinkRef>>;

    /// Extract embedded images, writing each to the artifact directory.
    fn extract_images(&self) -> Result<ImageExtraction>;

    /// Extract tables, writing each to its own CSV artifact.
    fn extract_tables(&self) -> Result<TableExtraction>;
}

/// Where derived artifacts (images, table CSVs, sink output) are written.
///
/// Threaded explicitly into loaders and the filesystem sink at construction;
/// nothing computes artifact paths from a process-wide convention.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Root directory; per-document artifacts live under `<root>/<name>/`
    pub root: PathBuf,
}

impl OutputConfig {
    /// Create a config with the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Per-document artifact directory.
    pub fn document_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Per-document image directory.
    pub fn image_dir(&self, name: &str) -> PathBuf {
        self.document_dir(name).join("images")
    }

    /// Path of the CSV artifact for one extracted table.
    pub fn table_path(&self, name: &str, index: usize) -> PathBuf {
        self.document_dir(name)
            .join(format!("extracted_table_{index}.csv"))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new("output")
    }
}

/// Uniform caller-facing surface over any loader variant.
///
/// Downstream code depends on the [`DocumentLoader`] contract, not the
/// concrete variant; `Extractor` also assembles the four operation results
/// into one [`ExtractionRecord`].
pub struct Extractor {
    loader: Box<dyn DocumentLoader>,
}

impl Extractor {
    /// Wrap a loader.
    pub fn new(loader: Box<dyn DocumentLoader>) -> Self {
        Self { loader }
    }

    /// File-level metadata of the wrapped loader.
    pub fn metadata(&self) -> &DocumentMetadata {
        self.loader.metadata()
    }

    /// Extract page-indexed text with font and heading metadata.
    pub fn extract_text(&self) -> Result<TextContent> {
        self.loader.extract_text()
    }

    /// Extract hyperlinks.
    pub fn extract_links(&self) -> Result<Vec<LinkRef>> {
        self.loader.extract_links()
    }

    /// Extract embedded images.
    pub fn extract_images(&self) -> Result<ImageExtraction> {
        self.loader.extract_images()
    }

    /// Extract tables.
    pub fn extract_tables(&self) -> Result<TableExtraction> {
        self.loader.extract_tables()
    }

    /// Run all four extraction operations and assemble the record.
    pub fn extract_record(&self) -> Result<ExtractionRecord> {
        let text = self.loader.extract_text()?;
        let links = self.loader.extract_links()?;
        let images = self.loader.extract_images()?;
        let tables = self.loader.extract_tables()?;

        let mut skipped = images.skipped;
        skipped.extend(tables.skipped);

        Ok(ExtractionRecord {
            metadata: self.loader.metadata().clone(),
            text,
            links,
            images: images.images,
            tables: tables.tables,
            skipped,
        })
    }
}

/// Dispatches a file to the loader variant matching its extension.
///
/// Owns one source binding per format plus the artifact configuration, so
/// callers open documents without naming a concrete variant.
pub struct LoaderRegistry {
    pdf: Arc<dyn PdfSource>,
    pptx: Arc<dyn PptxSource>,
    docx: Arc<dyn DocxSource>,
    output: OutputConfig,
}

impl LoaderRegistry {
    /// Create a registry over the three source bindings, with the default
    /// artifact root.
    pub fn new(
        pdf: Arc<dyn PdfSource>,
        pptx: Arc<dyn PptxSource>,
        docx: Arc<dyn DocxSource>,
    ) -> Self {
        Self {
            pdf,
            pptx,
            docx,
            output: OutputConfig::default(),
        }
    }

    /// Set the artifact root.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Open the loader for `path`, selected by extension, wrapped in an
    /// [`Extractor`].
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Extractor> {
        let loader: Box<dyn DocumentLoader> = match DocumentFormat::from_path(&path)? {
            DocumentFormat::Pdf => Box::new(PdfLoader::open(
                path,
                self.pdf.as_ref(),
                self.output.clone(),
            )?),
            DocumentFormat::Pptx => Box::new(PptxLoader::open(
                path,
                self.pptx.as_ref(),
                self.output.clone(),
            )?),
            DocumentFormat::Docx => Box::new(DocxLoader::open(
                path,
                self.docx.as_ref(),
                self.output.clone(),
            )?),
        };
        Ok(Extractor::new(loader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_paths() {
        let config = OutputConfig::new("artifacts");
        assert_eq!(config.document_dir("report"), PathBuf::from("artifacts/report"));
        assert_eq!(
            config.image_dir("report"),
            PathBuf::from("artifacts/report/images")
        );
        assert_eq!(
            config.table_path("report", 2),
            PathBuf::from("artifacts/report/extracted_table_2.csv")
        );
    }

    #[test]
    fn test_output_config_default_root() {
        let config = OutputConfig::default();
        assert_eq!(config.root, PathBuf::from("output"));
    }
}
