//! Persona-driven document section ranking.
//!
//! Given a small collection of PDF documents, a persona role and a
//! job-to-be-done task, the pipeline extracts structural sections, scores
//! them against a weighted-keyword persona profile, ranks the winners and
//! produces short persona-tailored excerpts.
//!
//! The flow mirrors the module layout: [`extract`] provides pages,
//! [`sections`] turns them into sections, [`persona`] builds the profile,
//! [`scoring`] and [`ranking`] order the sections, [`refine`] excerpts
//! them and [`output`] assembles the final JSON. [`analyzer`] ties the
//! stages together.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod models;
pub mod output;
pub mod persona;
pub mod ranking;
pub mod refine;
pub mod scoring;
pub mod sections;
pub mod text;

pub use analyzer::{process_collection, AnalysisResult, DocumentAnalyzer};
pub use config::RunConfig;
pub use error::{AnalyzerError, ExtractionError};
pub use persona::{JobType, PersonaCategory, PersonaProfile};
