//! Section ranker: global ordering over every scored section, truncation
//! to the configured result count, dense 1-based importance ranks.

use std::cmp::Ordering;

use crate::scoring::ScoredSection;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedSection {
    pub scored: ScoredSection,
    /// Dense rank starting at 1, no gaps, lowest number = most relevant.
    pub importance_rank: u32,
}

/// Orders by total score descending. Ties break on (1) higher structural
/// score, (2) earlier document in the input list, (3) earlier position
/// within the document, which makes the ordering deterministic.
fn compare(a: &ScoredSection, b: &ScoredSection) -> Ordering {
    b.breakdown
        .total
        .total_cmp(&a.breakdown.total)
        .then(b.breakdown.structural.total_cmp(&a.breakdown.structural))
        .then(a.doc_index.cmp(&b.doc_index))
        .then(a.section.position.cmp(&b.section.position))
}

pub fn rank_sections(mut scored: Vec<ScoredSection>, max_sections: usize) -> Vec<RankedSection> {
    scored.sort_by(compare);
    scored.truncate(max_sections);
    scored
        .into_iter()
        .enumerate()
        .map(|(i, scored)| RankedSection {
            scored,
            importance_rank: (i + 1) as u32,
        })
        .collect()
}
