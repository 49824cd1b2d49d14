//! Small text helpers shared by the context builder, scorer and refiner:
//! normalization, tokenization, stemming and sentence splitting.

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can", "could", "did",
        "do", "does", "for", "from", "had", "has", "have", "he", "her", "his", "how", "i", "if",
        "in", "into", "is", "it", "its", "it's", "me", "my", "no", "not", "of", "on", "or",
        "our", "out", "she", "should", "so", "some", "than", "that", "the", "their", "them",
        "then", "there", "these", "they", "this", "to", "up", "was", "we", "were", "what",
        "when", "where", "which", "while", "who", "why", "will", "with", "would", "you", "your",
    ]
    .into_iter()
    .collect()
});

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Lowercases and replaces every non-alphanumeric run with a single space.
/// Hyphens are kept so compounds like "gluten-free" survive as one token.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for c in text.chars() {
        if c.is_alphanumeric() || c == '-' {
            out.extend(c.to_lowercase());
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    out.trim_end().to_string()
}

/// Normalized tokens with stop words removed. Short fragments are dropped
/// unless they are purely numeric ("4 days" must keep its "4").
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|t| !is_stop_word(t))
        .filter(|t| t.len() >= 3 || t.chars().all(|c| c.is_ascii_digit()))
        .map(|t| t.trim_matches('-').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn stem(word: &str) -> String {
    STEMMER.stem(word).into_owned()
}

/// Stemmed token set of a text, used for inflection-tolerant matching.
pub fn stem_set(text: &str) -> HashSet<String> {
    tokenize(text).iter().map(|t| stem(t)).collect()
}

/// True when `term` occurs in the normalized text, either verbatim or with
/// every word present after stemming ("accommodations" matches a profile
/// keyword "accommodation"). `stems` must be the stem set of the same text.
pub fn contains_term(norm: &str, stems: &HashSet<String>, term: &str) -> bool {
    if norm.contains(term) {
        return true;
    }
    let mut words = term.split_whitespace().peekable();
    words.peek().is_some() && words.all(|w| stems.contains(&stem(w)))
}

/// Splits body text into sentences on `.`, `!` or `?` followed by
/// whitespace (or end of text), and on blank lines. Decimal numbers like
/// "3.5" are not split because the terminator must be followed by a break.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();

    let mut flush = |buf: &mut String| {
        let trimmed = buf.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
        buf.clear();
    };

    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' && chars.get(i + 1) == Some(&'\n') {
            flush(&mut current);
            continue;
        }
        current.push(if c == '\n' { ' ' } else { c });
        if matches!(c, '.' | '!' | '?') && chars.get(i + 1).map_or(true, |n| n.is_whitespace()) {
            flush(&mut current);
        }
    }
    flush(&mut current);
    sentences
}
