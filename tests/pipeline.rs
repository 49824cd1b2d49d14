//! End-to-end pipeline tests over an in-memory extraction backend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use persona_analyzer::error::ExtractionError;
use persona_analyzer::extract::{ExtractionBackend, Line, Page};
use persona_analyzer::{DocumentAnalyzer, RunConfig};

struct FakeBackend {
    docs: HashMap<String, Vec<Page>>,
    broken: Vec<String>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            docs: HashMap::new(),
            broken: Vec::new(),
        }
    }

    fn with_doc(mut self, name: &str, pages: Vec<Page>) -> Self {
        self.docs.insert(name.to_string(), pages);
        self
    }

    fn with_broken(mut self, name: &str) -> Self {
        self.broken.push(name.to_string());
        self
    }
}

impl ExtractionBackend for FakeBackend {
    fn pages(&self, path: &Path) -> Result<Vec<Page>, ExtractionError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.broken.contains(&name) {
            return Err(ExtractionError::new(&name, "corrupt file"));
        }
        self.docs
            .get(&name)
            .cloned()
            .ok_or_else(|| ExtractionError::new(&name, "unknown document"))
    }
}

fn heading(text: &str) -> Line {
    Line::new(text, 18.0, true)
}

fn body(text: &str) -> Line {
    Line::new(text, 11.0, false)
}

fn docs(names: &[&str]) -> Vec<(String, PathBuf)> {
    names
        .iter()
        .map(|n| ((*n).to_string(), PathBuf::from(n)))
        .collect()
}

fn travel_guide() -> Vec<Page> {
    vec![
        Page {
            number: 1,
            lines: vec![
                heading("Museum History"),
                body("The collection spans three centuries of regional art and sculpture."),
                body("Its archive was assembled by generations of curators."),
            ],
        },
        Page {
            number: 2,
            lines: vec![
                heading("Budget Accommodations"),
                body("Budget rooms for a group of friends cost 40 euros per night."),
                body("Accommodation options include hostels, guesthouses and small hotels."),
            ],
        },
    ]
}

const ROLE: &str = "Travel Planner";
const TASK: &str = "Plan a trip of 4 days for a group of 10 college friends";

#[test]
fn budget_accommodations_outranks_museum_history() {
    let backend = FakeBackend::new().with_doc("South of France.pdf", travel_guide());
    let analyzer = DocumentAnalyzer::new(backend, RunConfig::default());
    let out = analyzer
        .analyze_to_output(
            &docs(&["South of France.pdf"]),
            vec!["South of France.pdf".into()],
            ROLE,
            TASK,
            "2026-08-06T00:00:00+00:00".into(),
        )
        .unwrap();

    assert_eq!(out.extracted_sections.len(), 2);
    let first = &out.extracted_sections[0];
    assert_eq!(first.section_title, "Budget Accommodations");
    assert_eq!(first.importance_rank, 1);
    // The reported page is the page the heading was detected on.
    assert_eq!(first.page_number, 2);
    assert_eq!(out.extracted_sections[1].section_title, "Museum History");
}

#[test]
fn one_unreadable_document_degrades_gracefully() {
    let backend = FakeBackend::new()
        .with_doc("good.pdf", travel_guide())
        .with_broken("bad.pdf");
    let analyzer = DocumentAnalyzer::new(backend, RunConfig::default());
    let out = analyzer
        .analyze_to_output(
            &docs(&["bad.pdf", "good.pdf"]),
            vec!["bad.pdf".into(), "good.pdf".into()],
            ROLE,
            TASK,
            "2026-08-06T00:00:00+00:00".into(),
        )
        .unwrap();

    assert!(!out.extracted_sections.is_empty());
    assert!(out
        .extracted_sections
        .iter()
        .all(|s| s.document == "good.pdf"));
    let ranks: Vec<u32> = out
        .extracted_sections
        .iter()
        .map(|s| s.importance_rank)
        .collect();
    assert_eq!(ranks, (1..=ranks.len() as u32).collect::<Vec<_>>());
}

#[test]
fn ranks_are_dense_across_documents_and_capped() {
    let mut backend = FakeBackend::new();
    for i in 0..4 {
        let pages = vec![Page {
            number: 1,
            lines: vec![
                heading("Coastal Adventures"),
                body("Beach hopping along the coast with boat tours and snorkeling."),
                heading("Packing Tips"),
                body("Pack layers and travel-sized toiletries for the trip."),
            ],
        }];
        backend = backend.with_doc(&format!("doc{i}.pdf"), pages);
    }
    let names: Vec<String> = (0..4).map(|i| format!("doc{i}.pdf")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

    let analyzer = DocumentAnalyzer::new(backend, RunConfig::default());
    let result = analyzer.analyze(&docs(&name_refs), ROLE, TASK);

    // 8 sections exist, K = 5 survive with dense ranks.
    assert_eq!(result.ranked.len(), 5);
    let ranks: Vec<u32> = result.ranked.iter().map(|r| r.importance_rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    assert_eq!(result.refined.len(), 5);
}

#[test]
fn identical_inputs_produce_identical_output() {
    let run = || {
        let backend = FakeBackend::new().with_doc("guide.pdf", travel_guide());
        let analyzer = DocumentAnalyzer::new(backend, RunConfig::default());
        let out = analyzer
            .analyze_to_output(
                &docs(&["guide.pdf"]),
                vec!["guide.pdf".into()],
                ROLE,
                TASK,
                "2026-08-06T00:00:00+00:00".into(),
            )
            .unwrap();
        serde_json::to_string_pretty(&out).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn all_documents_unreadable_yields_empty_arrays_not_an_error() {
    let backend = FakeBackend::new().with_broken("a.pdf").with_broken("b.pdf");
    let analyzer = DocumentAnalyzer::new(backend, RunConfig::default());
    let out = analyzer
        .analyze_to_output(
            &docs(&["a.pdf", "b.pdf"]),
            vec!["a.pdf".into(), "b.pdf".into()],
            ROLE,
            TASK,
            "2026-08-06T00:00:00+00:00".into(),
        )
        .unwrap();
    assert!(out.extracted_sections.is_empty());
    assert!(out.subsection_analysis.is_empty());
    assert_eq!(out.metadata.input_documents.len(), 2);
}

#[test]
fn refined_text_is_bounded_and_non_empty() {
    let config = RunConfig {
        max_refined_chars: 120,
        ..RunConfig::default()
    };
    let backend = FakeBackend::new().with_doc("guide.pdf", travel_guide());
    let analyzer = DocumentAnalyzer::new(backend, config);
    let result = analyzer.analyze(&docs(&["guide.pdf"]), ROLE, TASK);

    assert!(!result.refined.is_empty());
    for sub in &result.refined {
        assert!(!sub.refined_text.is_empty());
        assert!(sub.refined_text.len() <= 120);
        assert!(sub.page_number >= 1);
    }
}
