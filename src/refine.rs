//! Subsection refiner: produces a short, persona-appropriate excerpt from a
//! ranked section's body.
//!
//! Dispatch is a tagged-variant match on the persona category; every
//! strategy shares one contract: non-empty output whenever the body is
//! non-empty, bounded to a maximum character length, sentence boundaries
//! preserved unless a single sentence alone exceeds the bound.

use crate::persona::{PersonaCategory, PersonaProfile};
use crate::sections::Section;
use crate::text;

/// Sentence cues per persona category. The generic fallback has no cues and
/// relies on keyword hits plus information density alone.
fn category_cues(category: PersonaCategory) -> &'static [&'static str] {
    match category {
        PersonaCategory::Travel => &[
            "euro", "price", "cost", "night", "book", "open", "hours", "visit", "beach",
            "museum", "bar", "hotel", "restaurant", "station", "ticket", "tour",
        ],
        PersonaCategory::Hr => &[
            "select", "click", "choose", "open", "form", "field", "signature", "sign",
            "checkbox", "menu", "tool", "save", "enable", "step", "recipients",
        ],
        PersonaCategory::Food => &[
            "cup", "teaspoon", "tablespoon", "ounce", "gram", "mix", "stir", "bake", "cook",
            "serve", "heat", "blend", "ingredients", "preparation", "instructions",
        ],
        PersonaCategory::Researcher => &[
            "method", "result", "finding", "study", "data", "measure", "sample",
            "conclusion", "significant", "evidence",
        ],
        PersonaCategory::Student => &[
            "definition", "example", "concept", "key", "note", "remember", "means",
            "defined", "formula", "rule",
        ],
        PersonaCategory::Investment => &[
            "revenue", "growth", "profit", "margin", "percent", "increase", "decrease",
            "quarter", "year", "forecast", "risk", "market",
        ],
        PersonaCategory::Generic => &[],
    }
}

/// Categories whose excerpts favor number-bearing sentences (prices, times,
/// quantities, figures).
fn favors_numbers(category: PersonaCategory) -> bool {
    matches!(
        category,
        PersonaCategory::Travel | PersonaCategory::Food | PersonaCategory::Investment
    )
}

pub fn refine_section(section: &Section, profile: &PersonaProfile, max_chars: usize) -> String {
    let body = section.body.trim();
    if body.is_empty() {
        return String::new();
    }

    let sentences = text::split_sentences(body);
    if sentences.is_empty() {
        return truncate_at_word(body, max_chars);
    }

    let scores: Vec<f64> = sentences
        .iter()
        .map(|s| sentence_score(s, profile))
        .collect();
    let mut order: Vec<usize> = (0..sentences.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

    // Take the best sentences that still fit, then emit the chosen ones in
    // their original order so the excerpt reads naturally.
    let mut selected = Vec::new();
    let mut used = 0usize;
    for &i in &order {
        let sep = if selected.is_empty() { 0 } else { 1 };
        let len = sentences[i].len();
        if used + len + sep <= max_chars {
            selected.push(i);
            used += len + sep;
        }
    }
    if selected.is_empty() {
        return truncate_at_word(&sentences[order[0]], max_chars);
    }
    selected.sort_unstable();
    selected
        .iter()
        .map(|&i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn sentence_score(sentence: &str, profile: &PersonaProfile) -> f64 {
    let norm = text::normalize(sentence);
    if norm.is_empty() {
        return 0.0;
    }
    let stems = text::stem_set(sentence);

    let mut score = 0.0;
    for cue in category_cues(profile.category) {
        if text::contains_term(&norm, &stems, cue) {
            score += 1.0;
        }
    }
    for keyword in profile.keywords.keys() {
        if text::contains_term(&norm, &stems, keyword) {
            score += 0.5;
        }
    }
    if favors_numbers(profile.category) && norm.chars().any(|c| c.is_ascii_digit()) {
        score += 0.5;
    }

    // Information density keeps the generic path meaningful and breaks ties
    // between otherwise equal sentences.
    let words = norm.split_whitespace().count();
    if words > 0 {
        let content = norm
            .split_whitespace()
            .filter(|w| !text::is_stop_word(w))
            .count();
        score += content as f64 / words as f64;
    }
    score
}

/// Cuts at the last word boundary inside the bound; only used when a single
/// sentence alone exceeds the maximum length.
fn truncate_at_word(s: &str, max_chars: usize) -> String {
    if s.len() <= max_chars {
        return s.to_string();
    }
    let mut cut = 0;
    for (idx, c) in s.char_indices() {
        if idx >= max_chars {
            break;
        }
        if c.is_whitespace() {
            cut = idx;
        }
    }
    if cut == 0 {
        let mut end = max_chars.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        return s[..end].to_string();
    }
    s[..cut].trim_end().to_string()
}
