//! Unified error handling for `cohere-service`.
//!
//! This module exposes a single top-level error type [`CohereError`] for the whole
//! library, and groups configuration errors in the nested [`ConfigError`] enum.
//! Small helpers for reading/validating configuration values are provided and
//! return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[Cohere Service]` to simplify attribution in logs.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, CohereError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `cohere-service` crate.
///
/// Every variant except [`CohereError::Config`] and [`CohereError::InvalidRequest`]
/// means the upstream service could not produce a usable answer for this call.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CohereError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying HTTP transport error (connect, TLS, body read).
    #[error("[Cohere Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Upstream returned a non-successful HTTP status.
    #[error("[Cohere Service] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// Response payload could not be decoded as expected.
    #[error("[Cohere Service] decode error: {0}")]
    Decode(String),

    /// Operation exceeded the configured timeout.
    #[error("[Cohere Service] operation timed out after {0:?}")]
    Timeout(Duration),

    /// Caller passed arguments the API would reject.
    #[error("[Cohere Service] invalid request: {0}")]
    InvalidRequest(String),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[Cohere Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like timeouts, token limits).
    #[error("[Cohere Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `COHERE_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Cohere Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `COHERE_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[Cohere Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },

    /// Model name is not part of the supported catalogue.
    #[error("[Cohere Service] unknown model: {0}")]
    UnknownModel(String),
}

/* ------------------------------------------------------------------------- */
/* Transport helpers                                                         */
/* ------------------------------------------------------------------------- */

/// Maximum number of characters kept from an upstream error body.
pub const SNIPPET_MAX_CHARS: usize = 240;

/// Trims an upstream response body into a short single-line snippet.
pub fn make_snippet(body: &str) -> String {
    body.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(SNIPPET_MAX_CHARS)
        .collect()
}

/// Maps a `reqwest` error into [`CohereError`], folding timeouts into
/// [`CohereError::Timeout`] so callers can treat them uniformly.
pub fn map_transport(err: reqwest::Error, timeout: Duration) -> CohereError {
    if err.is_timeout() {
        CohereError::Timeout(timeout)
    } else {
        CohereError::HttpTransport(err)
    }
}

/* ------------------------------------------------------------------------- */
/* Config helpers (return unified `Result<T>`)                               */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty variable through `lookup`.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_var(lookup: &dyn Fn(&str) -> Option<String>, name: &'static str) -> Result<String> {
    match lookup(name) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Fetches an optional variable, treating empty values as unset.
pub fn opt_var(lookup: &dyn Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional `u32` (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u32`.
pub fn opt_u32(lookup: &dyn Fn(&str) -> Option<String>, name: &'static str) -> Result<Option<u32>> {
    parse_opt(lookup, name, "expected u32")
}

/// Parses an optional `u64` (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn opt_u64(lookup: &dyn Fn(&str) -> Option<String>, name: &'static str) -> Result<Option<u64>> {
    parse_opt(lookup, name, "expected u64")
}

/// Parses an optional `f32` (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `f32`.
pub fn opt_f32(lookup: &dyn Fn(&str) -> Option<String>, name: &'static str) -> Result<Option<f32>> {
    parse_opt(lookup, name, "expected f32")
}

fn parse_opt<T: std::str::FromStr>(
    lookup: &dyn Fn(&str) -> Option<String>,
    name: &'static str,
    reason: &'static str,
) -> Result<Option<T>> {
    match opt_var(lookup, name) {
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var: name, reason }.into()),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] if `value` is outside `[min, max]` or not finite.
pub fn validate_range_f32(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
    detail: &'static str,
) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, detail }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn must_var_rejects_blank_values() {
        let lookup = lookup_from(&[("COHERE_API_KEY", "   ")]);
        let err = must_var(&lookup, "COHERE_API_KEY").unwrap_err();
        assert!(matches!(
            err,
            CohereError::Config(ConfigError::MissingVar("COHERE_API_KEY"))
        ));
    }

    #[test]
    fn numeric_helpers_parse_or_report_the_variable() {
        let lookup = lookup_from(&[("A", "42"), ("B", "x"), ("C", "0.5")]);
        assert_eq!(opt_u32(&lookup, "A").unwrap(), Some(42));
        assert_eq!(opt_u32(&lookup, "MISSING").unwrap(), None);
        assert_eq!(opt_f32(&lookup, "C").unwrap(), Some(0.5));

        let err = opt_u64(&lookup, "B").unwrap_err();
        assert!(err.to_string().contains("B"));
    }

    #[test]
    fn endpoint_and_range_validation() {
        assert!(validate_http_endpoint("COHERE_URL", "https://api.cohere.ai").is_ok());
        assert!(validate_http_endpoint("COHERE_URL", "api.cohere.ai").is_err());

        assert!(validate_range_f32("temperature", 0.25, 0.0, 1.0, "0.0..=1.0").is_ok());
        assert!(validate_range_f32("temperature", 1.5, 0.0, 1.0, "0.0..=1.0").is_err());
        assert!(validate_range_f32("temperature", f32::NAN, 0.0, 1.0, "0.0..=1.0").is_err());
    }

    #[test]
    fn snippet_is_single_line_and_bounded() {
        let body = format!("line one\n  line two {}", "x".repeat(500));
        let s = make_snippet(&body);
        assert!(s.starts_with("line one line two"));
        assert_eq!(s.chars().count(), SNIPPET_MAX_CHARS);
    }
}
