//! Result assembler: combines the ranked sections, the refined excerpts and
//! the run metadata into the output structure. Pure aggregation, no
//! scoring logic lives here.

use crate::error::AnalyzerError;
use crate::models::{ExtractedSection, Metadata, OutputJson, SubsectionAnalysis};
use crate::ranking::RankedSection;

/// Builds the final output. The two output arrays are parallel: same
/// length, same order, both indexed by `importance_rank`. A ranked section
/// without a corresponding refined excerpt is a broken internal contract
/// and fails assembly.
pub fn assemble(
    input_documents: Vec<String>,
    persona: String,
    job_to_be_done: String,
    processing_timestamp: String,
    ranked: &[RankedSection],
    refined: &[SubsectionAnalysis],
) -> Result<OutputJson, AnalyzerError> {
    if ranked.len() != refined.len() {
        return Err(AnalyzerError::InconsistentResult(format!(
            "{} ranked sections but {} refined excerpts",
            ranked.len(),
            refined.len()
        )));
    }

    let extracted_sections = ranked
        .iter()
        .map(|r| ExtractedSection {
            document: r.scored.section.document.clone(),
            section_title: r.scored.section.title.clone(),
            importance_rank: r.importance_rank,
            page_number: r.scored.section.page,
        })
        .collect();

    Ok(OutputJson {
        metadata: Metadata {
            input_documents,
            persona,
            job_to_be_done,
            processing_timestamp,
        },
        extracted_sections,
        subsection_analysis: refined.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ScoreBreakdown, ScoredSection};
    use crate::sections::Section;

    fn ranked(rank: u32) -> RankedSection {
        RankedSection {
            scored: ScoredSection {
                section: Section {
                    document: "guide.pdf".into(),
                    title: format!("Section {rank}"),
                    level: 1,
                    page: rank,
                    body: "body".into(),
                    position: rank as usize - 1,
                },
                doc_index: 0,
                breakdown: ScoreBreakdown {
                    keyword: 0.0,
                    semantic: 0.0,
                    quality: 0.0,
                    structural: 0.0,
                    total: 0.0,
                },
            },
            importance_rank: rank,
        }
    }

    fn refined(page: u32) -> SubsectionAnalysis {
        SubsectionAnalysis {
            document: "guide.pdf".into(),
            refined_text: "refined".into(),
            page_number: page,
        }
    }

    #[test]
    fn arrays_are_parallel_and_ordered() {
        let out = assemble(
            vec!["guide.pdf".into()],
            "Travel Planner".into(),
            "Plan a trip".into(),
            "2026-08-06T00:00:00+00:00".into(),
            &[ranked(1), ranked(2)],
            &[refined(1), refined(2)],
        )
        .unwrap();
        assert_eq!(out.extracted_sections.len(), out.subsection_analysis.len());
        assert_eq!(out.extracted_sections[0].importance_rank, 1);
        assert_eq!(out.extracted_sections[1].importance_rank, 2);
        assert_eq!(out.metadata.persona, "Travel Planner");
    }

    #[test]
    fn length_mismatch_is_a_contract_violation() {
        let err = assemble(
            vec!["guide.pdf".into()],
            "Travel Planner".into(),
            "Plan a trip".into(),
            "2026-08-06T00:00:00+00:00".into(),
            &[ranked(1), ranked(2)],
            &[refined(1)],
        )
        .unwrap_err();
        assert!(matches!(err, AnalyzerError::InconsistentResult(_)));
    }

    #[test]
    fn empty_results_still_assemble() {
        let out = assemble(
            vec!["guide.pdf".into()],
            "Travel Planner".into(),
            "Plan a trip".into(),
            "2026-08-06T00:00:00+00:00".into(),
            &[],
            &[],
        )
        .unwrap();
        assert!(out.extracted_sections.is_empty());
        assert!(out.subsection_analysis.is_empty());
    }
}
