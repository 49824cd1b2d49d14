//! Input and output JSON shapes for a collection run.
//!
//! The input mirrors the challenge format: a document list, a persona role
//! and a job-to-be-done task. The output carries run metadata plus two
//! parallel arrays, both ordered by `importance_rank`.

use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_case_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_info: Option<ChallengeInfo>,
    pub documents: Vec<DocumentRef>,
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
}

impl InputJson {
    /// Checks the fields serde cannot: required strings must be non-blank
    /// and at least one document must be listed.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.documents.is_empty() {
            return Err(AnalyzerError::InvalidInput(
                "`documents` must list at least one file".into(),
            ));
        }
        if self.documents.iter().any(|d| d.filename.trim().is_empty()) {
            return Err(AnalyzerError::InvalidInput(
                "document entry has an empty filename".into(),
            ));
        }
        if self.persona.role.trim().is_empty() {
            return Err(AnalyzerError::InvalidInput(
                "`persona.role` must be a non-empty string".into(),
            ));
        }
        if self.job_to_be_done.task.trim().is_empty() {
            return Err(AnalyzerError::InvalidInput(
                "`job_to_be_done.task` must be a non-empty string".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: u32,
    pub page_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputJson {
    pub metadata: Metadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}
