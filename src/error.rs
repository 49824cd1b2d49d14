//! Error types for the analysis pipeline.

use thiserror::Error;

/// Errors that abort a run or signal a broken internal contract.
///
/// Per-document extraction failures are deliberately *not* represented
/// here: they are recoverable and handled inside the pipeline (the
/// document is skipped and a warning is logged). See [`ExtractionError`].
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The input JSON is missing a required field or a required field is
    /// empty. Fatal: nothing is written.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The ranked section set and the refined excerpt set disagree. This
    /// is a contract violation between ranker and refiner, not a runtime
    /// condition to tolerate.
    #[error("inconsistent result set: {0}")]
    InconsistentResult(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A single document could not be read by the extraction backend.
///
/// Recoverable: the pipeline excludes the document and continues with the
/// rest of the collection.
#[derive(Error, Debug)]
#[error("could not extract {document}: {reason}")]
pub struct ExtractionError {
    pub document: String,
    pub reason: String,
}

impl ExtractionError {
    pub fn new(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;
