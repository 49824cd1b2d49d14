//! Pipeline orchestration: fan out per-document extraction and scoring,
//! synchronize, rank globally, refine the winners, assemble the output.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;

use crate::config::{self, RunConfig};
use crate::error::{AnalyzerError, Result};
use crate::extract::{ExtractionBackend, PdfBackend};
use crate::models::{InputJson, OutputJson, SubsectionAnalysis};
use crate::output;
use crate::persona::PersonaProfile;
use crate::ranking::{rank_sections, RankedSection};
use crate::refine;
use crate::scoring::{score_section, ScoredSection};
use crate::sections;

pub struct DocumentAnalyzer<B> {
    backend: B,
    config: RunConfig,
}

/// Everything a run produces before metadata is attached.
pub struct AnalysisResult {
    pub profile: PersonaProfile,
    pub ranked: Vec<RankedSection>,
    pub refined: Vec<SubsectionAnalysis>,
}

impl<B: ExtractionBackend + Sync> DocumentAnalyzer<B> {
    pub fn new(backend: B, config: RunConfig) -> Self {
        Self { backend, config }
    }

    /// Processes one collection end to end.
    ///
    /// Per-document work is independent and runs on the rayon pool; the
    /// ordered `collect` is the barrier the global ranking needs. A
    /// document that fails extraction is skipped with a warning. The time
    /// budget is a soft cutoff checked per document: once the deadline has
    /// passed, remaining documents are skipped and ranking proceeds over
    /// the sections scored so far.
    pub fn analyze(
        &self,
        documents: &[(String, PathBuf)],
        role: &str,
        task: &str,
    ) -> AnalysisResult {
        let profile = PersonaProfile::build(role, task);
        let deadline = self.config.time_budget.map(|budget| Instant::now() + budget);

        let per_document: Vec<Vec<ScoredSection>> = documents
            .par_iter()
            .enumerate()
            .map(|(doc_index, (name, path))| {
                if deadline.is_some_and(|d| Instant::now() > d) {
                    log::warn!("time budget exceeded, skipping {name}");
                    return Vec::new();
                }
                match self.backend.pages(path) {
                    Ok(pages) => {
                        let extracted = sections::extract_sections(name, &pages);
                        log::info!("{name}: {} sections extracted", extracted.len());
                        extracted
                            .into_iter()
                            .map(|section| ScoredSection {
                                breakdown: score_section(&section, &profile),
                                doc_index,
                                section,
                            })
                            .collect()
                    }
                    Err(e) => {
                        log::warn!("skipping document: {e}");
                        Vec::new()
                    }
                }
            })
            .collect();

        let scored: Vec<ScoredSection> = per_document.into_iter().flatten().collect();
        if scored.is_empty() {
            log::warn!(
                "no sections found across {} document(s), output will be empty",
                documents.len()
            );
        }

        let ranked = rank_sections(scored, self.config.max_sections);
        let refined = ranked
            .iter()
            .map(|r| SubsectionAnalysis {
                document: r.scored.section.document.clone(),
                refined_text: refine::refine_section(
                    &r.scored.section,
                    &profile,
                    self.config.max_refined_chars,
                ),
                page_number: r.scored.section.page,
            })
            .collect();

        AnalysisResult {
            profile,
            ranked,
            refined,
        }
    }

    /// [`analyze`](Self::analyze) plus metadata assembly, for callers that
    /// want the final output structure with a pinned timestamp.
    pub fn analyze_to_output(
        &self,
        documents: &[(String, PathBuf)],
        input_documents: Vec<String>,
        role: &str,
        task: &str,
        timestamp: String,
    ) -> Result<OutputJson> {
        let result = self.analyze(documents, role, task);
        output::assemble(
            input_documents,
            role.to_string(),
            task.to_string(),
            timestamp,
            &result.ranked,
            &result.refined,
        )
    }
}

/// End-to-end run over one collection file: read and validate the input
/// JSON, resolve the PDFs, analyze, write the output JSON.
pub fn process_collection(input_path: &Path, output_path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(input_path)?;
    let input: InputJson = serde_json::from_str(&raw).map_err(|e| {
        AnalyzerError::InvalidInput(format!("failed to parse {}: {e}", input_path.display()))
    })?;
    input.validate()?;

    log::info!(
        "processing {} document(s) for persona '{}'",
        input.documents.len(),
        input.persona.role
    );

    let documents = config::resolve_documents(input_path, &input.documents);
    if documents.is_empty() {
        return Err(AnalyzerError::InvalidInput(
            "no PDF files resolved from `documents`".into(),
        ));
    }

    let analyzer = DocumentAnalyzer::new(PdfBackend, RunConfig::default());
    let out = analyzer.analyze_to_output(
        &documents,
        input.documents.iter().map(|d| d.filename.clone()).collect(),
        &input.persona.role,
        &input.job_to_be_done.task,
        Utc::now().to_rfc3339(),
    )?;

    std::fs::write(output_path, serde_json::to_string_pretty(&out)?)?;
    log::info!("output written to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::extract::{Line, Page};
    use std::time::Duration;

    struct OnePageBackend;

    impl ExtractionBackend for OnePageBackend {
        fn pages(&self, _path: &Path) -> std::result::Result<Vec<Page>, ExtractionError> {
            Ok(vec![Page {
                number: 1,
                lines: vec![
                    Line::new("Budget Accommodations", 18.0, true),
                    Line::new("Hotels for a group start at 40 euros per night.", 11.0, false),
                ],
            }])
        }
    }

    fn docs(names: &[&str]) -> Vec<(String, PathBuf)> {
        names
            .iter()
            .map(|n| ((*n).to_string(), PathBuf::from(n)))
            .collect()
    }

    #[test]
    fn exhausted_budget_degrades_to_partial_results() {
        let analyzer = DocumentAnalyzer::new(
            OnePageBackend,
            RunConfig {
                time_budget: Some(Duration::ZERO),
                ..RunConfig::default()
            },
        );
        let result = analyzer.analyze(&docs(&["a.pdf", "b.pdf"]), "Travel Planner", "Plan a trip");
        assert!(result.ranked.is_empty());
        assert!(result.refined.is_empty());
    }

    #[test]
    fn ranked_and_refined_stay_parallel() {
        let analyzer = DocumentAnalyzer::new(OnePageBackend, RunConfig::default());
        let result = analyzer.analyze(&docs(&["a.pdf", "b.pdf"]), "Travel Planner", "Plan a trip");
        assert_eq!(result.ranked.len(), result.refined.len());
        assert!(!result.ranked.is_empty());
    }
}
