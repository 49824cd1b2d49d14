//! Relevance scorer: rates every section against the persona profile with
//! four weighted factors.
//!
//! Every sub-score is normalized to [0,1] and the combined total is the
//! fixed-weight sum `0.40·keyword + 0.30·semantic + 0.20·quality +
//! 0.10·structural`. Scoring is total: a section that matches nothing
//! scores 0.0 on the corresponding factor, never an error.

use std::collections::HashSet;

use crate::lexicon;
use crate::persona::PersonaProfile;
use crate::sections::Section;
use crate::text;

pub const KEYWORD_WEIGHT: f64 = 0.40;
pub const SEMANTIC_WEIGHT: f64 = 0.30;
pub const QUALITY_WEIGHT: f64 = 0.20;
pub const STRUCTURAL_WEIGHT: f64 = 0.10;

/// A match found only in the body counts this much of a title match when
/// computing the semantic score.
const BODY_MATCH_VALUE: f64 = 0.5;

/// Target band for average sentence length, in words.
const SENTENCE_BAND: (f64, f64) = (8.0, 30.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub keyword: f64,
    pub semantic: f64,
    pub quality: f64,
    pub structural: f64,
    pub total: f64,
}

/// A section together with its score breakdown and the index of its
/// document in the input list (used by the ranker's tie-breaks).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSection {
    pub section: Section,
    pub doc_index: usize,
    pub breakdown: ScoreBreakdown,
}

pub fn score_section(section: &Section, profile: &PersonaProfile) -> ScoreBreakdown {
    let title_norm = text::normalize(&section.title);
    let body_norm = text::normalize(&section.body);
    let full_norm = format!("{title_norm} {body_norm}");
    let stems = text::stem_set(&full_norm);

    let keyword = keyword_score(&full_norm, &stems, profile);
    let semantic = semantic_score(&title_norm, &body_norm, profile);
    let quality = quality_score(&section.body);
    let structural = structural_score(section.level, section.position);

    let total = KEYWORD_WEIGHT * keyword
        + SEMANTIC_WEIGHT * semantic
        + QUALITY_WEIGHT * quality
        + STRUCTURAL_WEIGHT * structural;

    ScoreBreakdown {
        keyword,
        semantic,
        quality,
        structural,
        total,
    }
}

/// Sum of profile weights for every profile keyword present in title+body,
/// normalized against the maximum achievable weight sum for the profile.
fn keyword_score(full_norm: &str, stems: &HashSet<String>, profile: &PersonaProfile) -> f64 {
    let max_weight = profile.total_weight();
    if max_weight <= 0.0 {
        return 0.0;
    }
    let mut hit_weight = 0.0;
    for (keyword, weight) in &profile.keywords {
        if text::contains_term(full_norm, stems, keyword) {
            hit_weight += weight;
        }
    }
    (hit_weight / max_weight).min(1.0)
}

/// Proportion of focus-area and job-type terms found in the section,
/// weighted by proximity to the title: a title match counts 1.0, a
/// body-only match counts [`BODY_MATCH_VALUE`].
fn semantic_score(title_norm: &str, body_norm: &str, profile: &PersonaProfile) -> f64 {
    let title_stems = text::stem_set(title_norm);
    let body_stems = text::stem_set(body_norm);

    let job_terms = lexicon::job_type_terms(profile.job_type);
    let mut total = 0usize;
    let mut score = 0.0;
    for term in profile
        .focus_areas
        .iter()
        .map(String::as_str)
        .chain(job_terms.iter().copied())
    {
        total += 1;
        if text::contains_term(title_norm, &title_stems, term) {
            score += 1.0;
        } else if text::contains_term(body_norm, &body_stems, term) {
            score += BODY_MATCH_VALUE;
        }
    }
    if total == 0 {
        return 0.0;
    }
    (score / total as f64).min(1.0)
}

/// Information-density heuristics: content-word ratio, presence of concrete
/// specifics, and average sentence length inside the target band.
fn quality_score(body: &str) -> f64 {
    let words: Vec<&str> = body.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let content_words = words
        .iter()
        .filter(|w| {
            let norm = text::normalize(w);
            !norm.is_empty() && !text::is_stop_word(&norm)
        })
        .count();
    let content_ratio = content_words as f64 / words.len() as f64;

    let specifics = specifics_score(body);

    let sentences = text::split_sentences(body);
    let sentence_count = sentences.len().max(1);
    let mean_len = words.len() as f64 / sentence_count as f64;
    let (lo, hi) = SENTENCE_BAND;
    let band = if mean_len < lo {
        mean_len / lo
    } else if mean_len > hi {
        (1.0 - (mean_len - hi) / hi).max(0.0)
    } else {
        1.0
    };

    (content_ratio + specifics + band) / 3.0
}

/// Concrete specifics: numbers, list or step markers, and capitalized
/// mid-sentence words standing in for named entities.
fn specifics_score(body: &str) -> f64 {
    let mut score = 0.0;
    if lexicon::NUMBER_RE.is_match(body) {
        score += 0.4;
    }
    let has_list_marker = body.lines().any(|l| {
        let t = l.trim_start();
        t.starts_with('-')
            || t.starts_with('•')
            || t.starts_with('*')
            || lexicon::numbered_heading_level(t).is_some()
    });
    if has_list_marker {
        score += 0.3;
    }
    let mid_sentence_capitals = body
        .split_whitespace()
        .skip(1)
        .filter(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
        .count();
    if mid_sentence_capitals >= 2 {
        score += 0.3;
    }
    score
}

/// Heading level and position component: top-level headings beat nested
/// ones, earlier sections in a document score slightly higher.
fn structural_score(level: u8, position: usize) -> f64 {
    let level_component = match level {
        1 => 1.0,
        2 => 0.7,
        _ => 0.5,
    };
    let position_component = 1.0 / (1.0 + 0.15 * position as f64);
    0.7 * level_component + 0.3 * position_component
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonaProfile;

    fn travel_profile() -> PersonaProfile {
        PersonaProfile::build(
            "Travel Planner",
            "Plan a trip of 4 days for a group of 10 college friends",
        )
    }

    fn section(title: &str, body: &str) -> Section {
        Section {
            document: "guide.pdf".into(),
            title: title.into(),
            level: 1,
            page: 1,
            body: body.into(),
            position: 0,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        let sum = KEYWORD_WEIGHT + SEMANTIC_WEIGHT + QUALITY_WEIGHT + STRUCTURAL_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sub_scores_stay_in_unit_range() {
        let profile = travel_profile();
        let sec = section(
            "Budget Accommodations",
            "Hotels for a group on a budget. Rooms from 40 euros per night in Nice and Antibes.",
        );
        let b = score_section(&sec, &profile);
        for v in [b.keyword, b.semantic, b.quality, b.structural, b.total] {
            assert!((0.0..=1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn matching_nothing_scores_zero_keyword() {
        let profile = travel_profile();
        let sec = section("Zzz", "qqq www eee");
        let b = score_section(&sec, &profile);
        assert_eq!(b.keyword, 0.0);
        assert_eq!(b.semantic, 0.0);
    }

    #[test]
    fn extra_keyword_match_never_lowers_keyword_score() {
        let profile = travel_profile();
        let base = section("Notes", "Some general remarks about the region.");
        let more = section("Notes", "Some general remarks about the region and its hotels.");
        let without = score_section(&base, &profile);
        let with = score_section(&more, &profile);
        assert!(with.keyword >= without.keyword);
    }

    #[test]
    fn title_match_beats_body_only_match_semantically() {
        let profile = travel_profile();
        let in_title = section("Nightlife and Entertainment", "Plain text.");
        let in_body = section("Evenings", "Nightlife and entertainment options abound.");
        let t = score_section(&in_title, &profile);
        let b = score_section(&in_body, &profile);
        assert!(t.semantic > b.semantic);
    }

    #[test]
    fn top_level_early_sections_score_higher_structurally() {
        assert!(structural_score(1, 0) > structural_score(2, 0));
        assert!(structural_score(1, 0) > structural_score(1, 3));
        assert!(structural_score(2, 1) > structural_score(3, 5));
    }

    #[test]
    fn quality_rewards_specifics() {
        let vague = quality_score("It is nice. It is good. It is fine.");
        let concrete =
            quality_score("Rooms cost 40 euros per night in Nice, Antibes and Marseille during May.");
        assert!(concrete > vague);
    }

    #[test]
    fn empty_body_scores_zero_quality() {
        assert_eq!(quality_score(""), 0.0);
    }
}
