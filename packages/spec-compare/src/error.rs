//! Typed errors for spec extraction and comparison.
//!
//! Uses `thiserror` for library errors (not `anyhow`); only the binary
//! converts them into `anyhow::Error`.

use std::path::PathBuf;

use thiserror::Error;

/// Model output could not be decoded into the expected shape.
#[derive(Debug, Error)]
pub enum ParseFailure {
    /// Nothing left after stripping fences and whitespace
    #[error("empty response")]
    Empty,

    /// Not valid JSON, wrong shape, missing required key, or wrong value type
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from extracting a single spec sheet.
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    /// Document could not be transmitted to the collaborator
    #[error("upload failed: {0}")]
    Upload(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Inference call failed
    #[error("inference failed: {0}")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response was not the expected record
    #[error("could not parse spec record: {0}")]
    Parse(#[from] ParseFailure),
}

/// Errors from the cross-product comparison.
#[derive(Debug, Error)]
pub enum AnalysisFailure {
    /// Called with no records
    #[error("no records to compare")]
    NoRecords,

    /// Inference call failed
    #[error("inference failed: {0}")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response was not the expected verdict
    #[error("could not parse verdict: {0}")]
    Parse(#[from] ParseFailure),
}

/// Fatal errors that end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read input directory {path}: {source}")]
    ReadInputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cannot write results to {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write report: {0}")]
    Report(#[from] std::io::Error),
}

/// Result type for pipeline runs.
pub type Result<T> = std::result::Result<T, PipelineError>;
