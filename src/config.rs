//! Run configuration and input-file resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use walkdir::WalkDir;

use crate::models::DocumentRef;

/// Fixed engine knobs for one run. Not persona-dependent.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Maximum number of ranked sections in the output (K).
    pub max_sections: usize,
    /// Upper bound on `refined_text` length, in bytes.
    pub max_refined_chars: usize,
    /// Soft wall-clock budget. When exceeded, remaining documents are
    /// skipped and ranking proceeds over what was scored so far.
    pub time_budget: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_sections: 5,
            max_refined_chars: 1000,
            time_budget: Some(Duration::from_secs(60)),
        }
    }
}

/// Resolves each listed document to a file on disk. PDFs live in a `PDFs/`
/// (or `pdfs/`) directory next to the input JSON; as a fallback the input
/// directory tree is searched shallowly for the exact filename. Missing
/// files are logged and skipped, not fatal; the caller decides whether an
/// empty resolution set aborts the run.
pub fn resolve_documents(input_path: &Path, documents: &[DocumentRef]) -> Vec<(String, PathBuf)> {
    let input_dir = input_path.parent().unwrap_or_else(|| Path::new("."));
    let candidates = [input_dir.join("PDFs"), input_dir.join("pdfs")];

    let mut resolved = Vec::new();
    for doc in documents {
        let direct = candidates
            .iter()
            .map(|dir| dir.join(&doc.filename))
            .find(|p| p.is_file());
        let found = direct.or_else(|| find_by_name(input_dir, &doc.filename));
        match found {
            Some(path) => resolved.push((doc.filename.clone(), path)),
            None => log::warn!("PDF file not found, skipping: {}", doc.filename),
        }
    }
    resolved
}

/// Shallow search of the input directory for an exact filename match.
fn find_by_name(dir: &Path, filename: &str) -> Option<PathBuf> {
    WalkDir::new(dir)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| e.file_type().is_file() && e.file_name().to_string_lossy() == filename)
        .map(|e| e.into_path())
}
