//! Extraction backend seam.
//!
//! The pipeline consumes pages through [`ExtractionBackend`]; the default
//! implementation reads PDFs with the `pdf` crate by walking each page's
//! content stream. Layout metadata (font size, bold flag) is kept per line
//! so the section extractor can detect headings.

use std::path::Path;

use pdf::content::{Op, TextDrawAdjusted};
use pdf::file::FileOptions;
use pdf::object::Resolve;

use crate::error::ExtractionError;

/// One laid-out line of text with the signals heading detection needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub font_size: f32,
    pub bold: bool,
}

impl Line {
    pub fn new(text: impl Into<String>, font_size: f32, bold: bool) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold,
        }
    }
}

/// A page of extracted text. `number` is 1-based, matching output pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: u32,
    pub lines: Vec<Line>,
}

/// Provider of per-page text and layout for one document.
///
/// Implementations fail with [`ExtractionError`] for unreadable or corrupt
/// documents; the pipeline treats that as skip-and-continue, never abort.
pub trait ExtractionBackend {
    fn pages(&self, path: &Path) -> Result<Vec<Page>, ExtractionError>;
}

/// Default backend over the `pdf` crate.
pub struct PdfBackend;

impl ExtractionBackend for PdfBackend {
    fn pages(&self, path: &Path) -> Result<Vec<Page>, ExtractionError> {
        let document = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let file = FileOptions::cached()
            .open(path)
            .map_err(|e| ExtractionError::new(&document, e.to_string()))?;

        let mut pages = Vec::new();
        for page_num in 0..file.num_pages() {
            let page = match file.get_page(page_num) {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("{document}: failed to load page {}: {e}", page_num + 1);
                    continue;
                }
            };

            let mut lines = Vec::new();
            if let Some(content) = &page.contents {
                if let Err(e) = collect_lines(&file, content, &mut lines) {
                    log::warn!(
                        "{document}: failed to read page {} content: {e}",
                        page_num + 1
                    );
                }
            }

            if !lines.is_empty() {
                pages.push(Page {
                    number: page_num + 1,
                    lines,
                });
            }
        }

        if pages.is_empty() {
            return Err(ExtractionError::new(&document, "no text could be extracted"));
        }
        Ok(pages)
    }
}

/// Walks the content stream, grouping draw ops into lines. A line breaks on
/// an explicit newline op or on a vertical text move large enough to be a
/// paragraph jump. The active font (size, bold-by-name) is tracked from
/// `TextFont` ops and stamped onto each finished line.
fn collect_lines(
    resolver: &impl Resolve,
    content: &pdf::content::Content,
    lines: &mut Vec<Line>,
) -> anyhow::Result<()> {
    let mut current = String::new();
    let mut font_size = 12.0f32;
    let mut bold = false;

    let flush = |buf: &mut String, size: f32, bold: bool, out: &mut Vec<Line>| {
        let text = buf.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            out.push(Line::new(text, size, bold));
        }
        buf.clear();
    };

    for op in content.operations(resolver)? {
        match op {
            Op::TextFont { name, size } => {
                flush(&mut current, font_size, bold, lines);
                font_size = size;
                bold = name.as_str().to_ascii_lowercase().contains("bold");
            }
            Op::TextDraw { text } => {
                let s = text.to_string_lossy();
                if !s.trim().is_empty() {
                    current.push_str(&s);
                    current.push(' ');
                }
            }
            Op::TextDrawAdjusted { array } => {
                for item in array {
                    match item {
                        TextDrawAdjusted::Text(text) => {
                            let s = text.to_string_lossy();
                            if !s.trim().is_empty() {
                                current.push_str(&s);
                            }
                        }
                        TextDrawAdjusted::Spacing(_) => current.push(' '),
                    }
                }
                current.push(' ');
            }
            Op::TextNewline => flush(&mut current, font_size, bold, lines),
            Op::MoveTextPosition { translation } => {
                // Vertical jumps beyond ordinary leading mean a new line.
                if translation.y.abs() > 2.0 {
                    flush(&mut current, font_size, bold, lines);
                }
            }
            _ => {}
        }
    }
    flush(&mut current, font_size, bold, lines);
    Ok(())
}
