//! Presentation source boundary.
//!
//! Slides hold shapes; a shape may carry a text frame, a click action, a
//! picture, or a table, in any combination. The slide's title placeholder is
//! referenced by index into `shapes` so that link discovery still walks the
//! title shape.

use crate::error::Result;
use std::path::Path;

/// Number of English Metric Units per point, the native font-size unit of the
/// presentation format.
pub const EMU_PER_POINT: f64 = 12700.0;

/// Interface a presentation parsing binding must satisfy.
pub trait PptxSource: Send + Sync {
    /// Load and fully parse the presentation at `path`.
    fn load(&self, path: &Path) -> Result<SlideDeck>;
}

/// A parsed presentation.
#[derive(Debug, Clone, Default)]
pub struct SlideDeck {
    /// Slides in order
    pub slides: Vec<Slide>,
}

impl SlideDeck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// One slide.
#[derive(Debug, Clone, Default)]
pub struct Slide {
    /// All shapes on the slide, including the title placeholder
    pub shapes: Vec<SlideShape>,

    /// Index of the title placeholder within `shapes`, if the slide has one
    pub title: Option<usize>,
}

impl Slide {
    /// The title placeholder shape, if present.
    pub fn title_shape(&self) -> Option<&SlideShape> {
        self.title.and_then(|i| self.shapes.get(i))
    }
}

/// A shape on a slide.
#[derive(Debug, Clone, Default)]
pub struct SlideShape {
    /// Shape name, when the format assigns one
    pub name: Option<String>,

    /// Text frame, for shapes that hold paragraph text
    pub text_frame: Option<TextFrame>,

    /// Resolved click-action hyperlink target
    pub click_action: Option<String>,

    /// Picture payload, for picture shapes
    pub picture: Option<Picture>,

    /// Cell grid, for table shapes
    pub table: Option<Vec<Vec<String>>>,
}

/// The paragraph container of a text-bearing shape.
#[derive(Debug, Clone, Default)]
pub struct TextFrame {
    /// Paragraphs in order
    pub paragraphs: Vec<SlideParagraph>,
}

impl TextFrame {
    /// Full text of the frame: paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One paragraph of a text frame.
#[derive(Debug, Clone, Default)]
pub struct SlideParagraph {
    /// Runs in order
    pub runs: Vec<SlideRun>,
}

impl SlideParagraph {
    /// Paragraph text: run texts concatenated.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone, Default)]
pub struct SlideRun {
    /// Run text
    pub text: String,

    /// Font name, when specified
    pub font: Option<String>,

    /// Font size in EMU, when specified
    pub size: Option<i64>,

    /// Resolved run-level hyperlink target
    pub hyperlink: Option<String>,
}

impl SlideRun {
    /// Create a plain run with no formatting attributes.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Picture payload of a picture shape.
///
/// Re-encoding to PNG happens inside the binding; `png` is `None` when the
/// image stream could not be decoded.
#[derive(Debug, Clone, Default)]
pub struct Picture {
    /// PNG-encoded image bytes
    pub png: Option<Vec<u8>>,

    /// Alternative text, when present
    pub alt_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let para = SlideParagraph {
            runs: vec![SlideRun::plain("Hello, "), SlideRun::plain("world")],
        };
        assert_eq!(para.text(), "Hello, world");
    }

    #[test]
    fn test_frame_text_joins_paragraphs() {
        let frame = TextFrame {
            paragraphs: vec![
                SlideParagraph {
                    runs: vec![SlideRun::plain("first")],
                },
                SlideParagraph {
                    runs: vec![SlideRun::plain("second")],
                },
            ],
        };
        assert_eq!(frame.text(), "first\nsecond");
    }

    #[test]
    fn test_title_shape_lookup() {
        let slide = Slide {
            shapes: vec![SlideShape::default(), SlideShape::default()],
            title: Some(1),
        };
        assert!(slide.title_shape().is_some());

        let untitled = Slide::default();
        assert!(untitled.title_shape().is_none());
    }
}
