use std::path::PathBuf;

use thiserror::Error;

use crate::models::SectionKind;

/// Application-level error type.
///
/// Per-section failures (`RangeNotFound`, `TerminatorNotFound`, section-level `Llm`)
/// are caught by the pipeline and reported without aborting the run. The remaining
/// variants are fatal and surface from `main`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Source file not found: {}", .0.display())]
    SourceFileMissing(PathBuf),

    #[error("Invalid job posting URL: {0}")]
    SourceUrlInvalid(String),

    #[error("Job description is empty")]
    EmptyJobDescription,

    #[error("Scrape error: {0}")]
    Scrape(String),

    #[error("No recorded range for the {0} section")]
    RangeNotFound(SectionKind),

    #[error("Could not find the end of the {0} list block")]
    TerminatorNotFound(SectionKind),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the error only invalidates a single section update.
    pub fn is_section_local(&self) -> bool {
        matches!(
            self,
            AppError::RangeNotFound(_) | AppError::TerminatorNotFound(_)
        )
    }
}
