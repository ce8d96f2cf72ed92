//! Typed errors for the pipeline crate.
//!
//! [`PipelineError`] aborts a request. [`StageError`] never does: the
//! orchestrator turns it into a degraded stage outcome.

use thiserror::Error;
use wiki_search::WikiSearchError;

/// Fatal request failure.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Rejected before any backend call.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Pre-search could not reach or use the vector store.
    #[error("search backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Pre-search returned an object without a required property.
    #[error("malformed candidate #{index}: missing or invalid `{field}`")]
    MalformedCandidate { index: usize, field: &'static str },

    /// Environment-driven defaults could not be parsed (startup only).
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<WikiSearchError> for PipelineError {
    fn from(err: WikiSearchError) -> Self {
        match err {
            WikiSearchError::InvalidQuery(msg) => PipelineError::InvalidQuery(msg),
            WikiSearchError::MalformedCandidate { index, field } => {
                PipelineError::MalformedCandidate { index, field }
            }
            other => PipelineError::BackendUnavailable(other.to_string()),
        }
    }
}

/// Recoverable failure of an optional stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("rerank unavailable: {0}")]
    RerankUnavailable(String),

    #[error("generation unavailable: {0}")]
    GenerationUnavailable(String),
}

impl StageError {
    /// Reason text without the stage prefix.
    pub fn reason(&self) -> &str {
        match self {
            StageError::RerankUnavailable(r) | StageError::GenerationUnavailable(r) => r,
        }
    }
}
