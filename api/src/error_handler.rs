use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pipeline::PipelineError;
use thiserror::Error;
use tracing::error;

use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("configuration error: {0}")]
    Config(String),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    /// Request field could not be interpreted (language, strategy, bounds).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Fatal pipeline outcome.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::Pipeline(e) => match e {
                PipelineError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
                PipelineError::BackendUnavailable(_) | PipelineError::MalformedCandidate { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            // startup-only
            AppError::Config(_) | AppError::Bind { .. } | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::InvalidQuery(_) => "INVALID_QUERY",
            AppError::Pipeline(e) => match e {
                PipelineError::InvalidQuery(_) => "INVALID_QUERY",
                PipelineError::BackendUnavailable(_) => "BACKEND_UNAVAILABLE",
                PipelineError::MalformedCandidate { .. } => "MALFORMED_CANDIDATE",
                _ => "INTERNAL_ERROR",
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(target: "api::error", code = self.error_code(), error = %self, "request failed");
        }
        ApiResponse::<()>::error(self.error_code(), self.to_string(), Vec::new())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
