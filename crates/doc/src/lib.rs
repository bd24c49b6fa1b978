//! The abstract word-processing document model.
//!
//! This is the in-memory representation of an article after rich-text
//! compilation and before binary encoding. It is independent of any output
//! format; encoders consume it through the [`DocumentRenderer`] trait.

use thiserror::Error;

/// The smallest styled unit of text.
///
/// A run whose text is a single `"\n"` represents a soft line break;
/// renderers emit a break instead of the literal character.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font_family: String,
    /// Half-point units (22 = 11pt).
    pub size_half_points: u32,
    /// Six-digit uppercase hex, no `#` prefix.
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextRun {
    pub fn is_line_break(&self) -> bool {
        self.text == "\n"
    }
}

/// Block-level text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// An ordered group of runs sharing block-level formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    pub alignment: Alignment,
    /// Heading level 1-3, `None` for body text.
    pub heading_level: Option<u8>,
    /// Line-spacing multiplier.
    pub line_spacing: f32,
}

impl Paragraph {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            alignment: Alignment::Left,
            heading_level: None,
            line_spacing: 1.5,
        }
    }
}

/// A complete document: title plus body paragraphs.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentModel {
    pub title: String,
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Document encoding failed: {0}")]
    Encode(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Abstraction over the binary document encoder.
///
/// Implementations turn the model into a downloadable byte stream (for
/// example WordprocessingML); the compilers never see the wire format.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &DocumentModel) -> Result<Vec<u8>, RenderError>;

    /// MIME type of the bytes produced by [`render`](Self::render).
    fn content_type(&self) -> &'static str;

    /// File extension (without dot) for download filenames.
    fn file_extension(&self) -> &'static str;
}
