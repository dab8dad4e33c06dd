//! Format-library boundary.
//!
//! Each container format is parsed by an external library; this crate never
//! touches those libraries directly. Instead, one trait per format describes
//! the document model the library must deliver, fully typed: optional
//! attributes of the underlying object models (click actions, run hyperlinks,
//! alt text) are resolved into `Option` fields once, at this boundary, rather
//! than re-checked throughout extraction logic.
//!
//! Concrete bindings live outside this crate; tests supply in-memory
//! implementations of these traits.

pub mod docx;
pub mod pdf;
pub mod pptx;

pub use docx::DocxSource;
pub use pdf::PdfSource;
pub use pptx::PptxSource;
