//! WordprocessingML rendering of the abstract document model.
//!
//! This crate is the only place that knows the binary document format; the
//! compilers hand over a [`DocumentModel`] and get bytes back through the
//! [`DocumentRenderer`] trait.

use docx_rs::{
    AlignmentType, BreakType, Docx, LineSpacing, Paragraph as DocxParagraph, Run, RunFonts,
};
use pagesmith_doc::{Alignment, DocumentModel, DocumentRenderer, Paragraph, RenderError, TextRun};
use std::io::Cursor;

/// Word line units per single line spacing.
const LINE_UNITS: f32 = 240.0;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for DocxRenderer {
    fn render(&self, document: &DocumentModel) -> Result<Vec<u8>, RenderError> {
        let mut docx = Docx::new();

        // Title first, as a centered top-level heading.
        let title_run = Run::new().add_text(document.title.as_str()).size(32).bold();
        docx = docx.add_paragraph(
            DocxParagraph::new()
                .add_run(title_run)
                .style("Heading1")
                .align(AlignmentType::Center),
        );

        for paragraph in &document.paragraphs {
            docx = docx.add_paragraph(build_paragraph(paragraph));
        }

        let mut cursor = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut cursor)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    fn content_type(&self) -> &'static str {
        DOCX_CONTENT_TYPE
    }

    fn file_extension(&self) -> &'static str {
        "docx"
    }
}

fn build_paragraph(paragraph: &Paragraph) -> DocxParagraph {
    let mut out = DocxParagraph::new()
        .align(alignment(paragraph.alignment))
        .line_spacing(
            LineSpacing::new().line((paragraph.line_spacing * LINE_UNITS).round() as _),
        );

    if let Some(level) = paragraph.heading_level {
        out = out.style(heading_style(level));
    }

    for run in &paragraph.runs {
        out = out.add_run(build_run(run));
    }
    out
}

fn build_run(run: &TextRun) -> Run {
    if run.is_line_break() {
        return Run::new().add_break(BreakType::TextWrapping);
    }

    let mut out = Run::new()
        .add_text(run.text.as_str())
        .fonts(RunFonts::new().ascii(run.font_family.as_str()))
        .size(run.size_half_points as usize)
        .color(run.color.as_str());
    if run.bold {
        out = out.bold();
    }
    if run.italic {
        out = out.italic();
    }
    if run.underline {
        out = out.underline("single");
    }
    out
}

fn alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
        Alignment::Justify => AlignmentType::Both,
    }
}

fn heading_style(level: u8) -> &'static str {
    match level {
        1 => "Heading1",
        2 => "Heading2",
        _ => "Heading3",
    }
}
