//! Unified error type for the wiki-search crate.

use std::time::Duration;

use thiserror::Error;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, WikiSearchError>;

/// Errors produced by the article query client.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WikiSearchError {
    // ── Request validation ──────────────────────────────────────────────────
    /// Query violated a precondition; no request was sent.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    // ── Vector store ────────────────────────────────────────────────────────
    /// Store unreachable, timed out, answered non-2xx or with GraphQL errors.
    #[error("vector store unavailable: {0}")]
    BackendUnavailable(String),

    /// A returned object lacks a required article property.
    #[error("malformed candidate #{index}: missing or invalid `{field}`")]
    MalformedCandidate { index: usize, field: &'static str },

    // ── Configuration / environment ─────────────────────────────────────────
    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: &'static str, value: String },

    /// Configuration combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WikiSearchError {
    /// Folds a transport failure into [`WikiSearchError::BackendUnavailable`].
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::BackendUnavailable(format!("request timed out after {timeout:?}"))
        } else if err.is_decode() {
            Self::BackendUnavailable(format!("invalid JSON response: {err}"))
        } else if err.is_connect() {
            Self::BackendUnavailable(format!("connection failed: {err}"))
        } else {
            Self::BackendUnavailable(format!("transport error: {err}"))
        }
    }
}
