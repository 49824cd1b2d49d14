//! Structural section extractor: turns one document's laid-out pages into
//! an ordered sequence of sections using font-size, emphasis and
//! heading-pattern signals.

use std::path::Path;

use crate::extract::Page;
use crate::lexicon;

/// A structurally delimited unit of one document. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub document: String,
    pub title: String,
    /// 1 = top-level heading, deeper headings are 2 or 3.
    pub level: u8,
    /// 1-based page the heading was detected on.
    pub page: u32,
    pub body: String,
    /// Position index within the document, 0-based.
    pub position: usize,
}

/// Minimum preamble size (chars) that earns its own lead section instead of
/// being dropped as front matter.
const MIN_PREAMBLE_CHARS: usize = 120;

pub fn extract_sections(document: &str, pages: &[Page]) -> Vec<Section> {
    let body_size = dominant_font_size(pages);

    struct Open {
        title: String,
        level: u8,
        page: u32,
        body: String,
    }

    let mut sections: Vec<Section> = Vec::new();
    let mut open: Option<Open> = None;
    let mut preamble = String::new();
    let mut preamble_page = 0u32;

    let close = |open: &mut Option<Open>, sections: &mut Vec<Section>| {
        if let Some(sec) = open.take() {
            sections.push(Section {
                document: document.to_string(),
                title: sec.title,
                level: sec.level,
                page: sec.page.max(1),
                body: sec.body.trim().to_string(),
                position: 0, // assigned below
            });
        }
    };

    for page in pages {
        for line in &page.lines {
            match heading_level(&line.text, line.font_size, line.bold, body_size) {
                Some(level) => {
                    close(&mut open, &mut sections);
                    open = Some(Open {
                        title: line.text.trim().trim_end_matches(':').trim().to_string(),
                        level,
                        page: page.number,
                        body: String::new(),
                    });
                }
                None => match open.as_mut() {
                    Some(sec) => {
                        sec.body.push_str(&line.text);
                        sec.body.push('\n');
                    }
                    None => {
                        if preamble.is_empty() {
                            preamble_page = page.number;
                        }
                        preamble.push_str(&line.text);
                        preamble.push('\n');
                    }
                },
            }
        }
    }
    close(&mut open, &mut sections);

    let preamble = preamble.trim().to_string();
    if sections.is_empty() {
        // No headings anywhere: the whole document becomes one synthetic
        // section titled from the filename.
        if !preamble.is_empty() {
            sections.push(Section {
                document: document.to_string(),
                title: fallback_title(document),
                level: 1,
                page: preamble_page.max(1),
                body: preamble,
                position: 0,
            });
        }
    } else if preamble.len() >= MIN_PREAMBLE_CHARS {
        sections.insert(
            0,
            Section {
                document: document.to_string(),
                title: fallback_title(document),
                level: 1,
                page: preamble_page.max(1),
                body: preamble,
                position: 0,
            },
        );
    }

    for (i, section) in sections.iter_mut().enumerate() {
        section.position = i;
    }
    sections
}

/// Most common line font size in the document; ties go to the smaller size.
/// Returns 0.0 when there are no lines.
fn dominant_font_size(pages: &[Page]) -> f32 {
    use std::collections::BTreeMap;
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for page in pages {
        for line in &page.lines {
            if line.font_size > 0.0 {
                *counts.entry((line.font_size * 10.0).round() as i32).or_insert(0) += 1;
            }
        }
    }
    let mut best = (0i32, 0usize);
    for (key, count) in counts {
        if count > best.1 {
            best = (key, count);
        }
    }
    best.0 as f32 / 10.0
}

/// Decides whether a line is a heading and at which level.
///
/// Signals, in order of trust: font size relative to the document's body
/// size, bold emphasis on a short line, then the heading-pattern lexicon.
fn heading_level(raw: &str, font_size: f32, bold: bool, body_size: f32) -> Option<u8> {
    let line = raw.trim();
    let words = line.split_whitespace().count();
    if line.len() < 4 || line.len() > 100 || words == 0 || words > 12 {
        return None;
    }
    if line.ends_with('.') || line.ends_with(',') || line.ends_with(';') {
        return None;
    }

    if body_size > 0.0 && font_size > 0.0 {
        let ratio = font_size / body_size;
        if ratio >= 1.4 {
            return Some(1);
        }
        if ratio >= 1.25 {
            return Some(2);
        }
        if ratio >= 1.15 {
            return Some(3);
        }
    }

    if bold {
        return Some(2);
    }

    if words <= 8 {
        if let Some(level) = lexicon::numbered_heading_level(line) {
            return Some(level);
        }
        for (pattern, level) in lexicon::HEADING_PATTERNS.iter() {
            if pattern.is_match(line) {
                return Some(*level);
            }
        }
    }
    None
}

fn fallback_title(document: &str) -> String {
    let stem = Path::new(document)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if stem.trim().is_empty() {
        document.to_string()
    } else {
        stem
    }
}
