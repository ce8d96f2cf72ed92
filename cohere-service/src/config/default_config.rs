//! Default Cohere config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `COHERE_API_KEY`          = API key (mandatory)
//! - `COHERE_URL`              = API base (default `https://api.cohere.ai`)
//! - `COHERE_TIMEOUT_SECS`     = per-request timeout (default 60)
//! - `COHERE_GENERATION_MODEL` = `command` | `command-light` | `command-nightly`
//! - `COHERE_RERANK_MODEL`     = `rerank-english-v2.0` | `rerank-multilingual-v2.0`
//! - `COHERE_TEMPERATURE`      = default temperature, 0.0..=1.0 (default 0.25)
//! - `COHERE_MAX_TOKENS`       = completion cap (default 512)

use crate::{
    config::{
        cohere_config::CohereConfig,
        cohere_models::{GenerationModel, RerankModel},
    },
    error_handler::{
        ConfigError, Result, must_var, opt_f32, opt_u32, opt_u64, opt_var,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_ENDPOINT: &str = "https://api.cohere.ai";
pub const DEFAULT_TEMPERATURE: f32 = 0.25;
pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Builds a [`CohereConfig`] from the process environment.
///
/// # Errors
/// See [`config_from_lookup`].
pub fn config_from_env() -> Result<CohereConfig> {
    config_from_lookup(&|k: &str| std::env::var(k).ok())
}

/// Builds a [`CohereConfig`] from an arbitrary key lookup.
///
/// # Errors
/// - [`ConfigError::MissingVar`] if `COHERE_API_KEY` is absent
/// - [`ConfigError::InvalidFormat`] if `COHERE_URL` is not http(s)
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::OutOfRange`] for bad numbers
/// - [`ConfigError::UnknownModel`] for model names outside the catalogue
pub fn config_from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<CohereConfig> {
    let api_key = must_var(lookup, "COHERE_API_KEY")?;

    let endpoint = opt_var(lookup, "COHERE_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    validate_http_endpoint("COHERE_URL", &endpoint)?;

    let generation_model = match opt_var(lookup, "COHERE_GENERATION_MODEL") {
        Some(v) => v.parse::<GenerationModel>()?,
        None => GenerationModel::default(),
    };
    let rerank_model = match opt_var(lookup, "COHERE_RERANK_MODEL") {
        Some(v) => v.parse::<RerankModel>()?,
        None => RerankModel::default(),
    };

    let temperature = opt_f32(lookup, "COHERE_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("COHERE_TEMPERATURE", temperature, 0.0, 1.0, "expected 0.0..=1.0")?;

    let max_tokens = opt_u32(lookup, "COHERE_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);
    if max_tokens == 0 {
        return Err(ConfigError::OutOfRange {
            field: "COHERE_MAX_TOKENS",
            detail: "must be > 0",
        }
        .into());
    }

    let timeout_secs = opt_u64(lookup, "COHERE_TIMEOUT_SECS")?.or(Some(DEFAULT_TIMEOUT_SECS));

    Ok(CohereConfig {
        endpoint,
        api_key,
        generation_model,
        rerank_model,
        temperature,
        max_tokens,
        timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::CohereError;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let cfg = config_from_lookup(&lookup_from(&[("COHERE_API_KEY", "k-123")])).unwrap();
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.generation_model, GenerationModel::Command);
        assert_eq!(cfg.rerank_model, RerankModel::EnglishV2);
        assert_eq!(cfg.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(cfg.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(cfg.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config_from_lookup(&lookup_from(&[
            ("COHERE_API_KEY", "k"),
            ("COHERE_URL", "http://localhost:9000"),
            ("COHERE_GENERATION_MODEL", "command-light"),
            ("COHERE_RERANK_MODEL", "rerank-multilingual-v2.0"),
            ("COHERE_TEMPERATURE", "0.6"),
            ("COHERE_MAX_TOKENS", "128"),
            ("COHERE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.endpoint, "http://localhost:9000");
        assert_eq!(cfg.generation_model, GenerationModel::CommandLight);
        assert_eq!(cfg.rerank_model, RerankModel::MultilingualV2);
        assert_eq!(cfg.temperature, 0.6);
        assert_eq!(cfg.max_tokens, 128);
        assert_eq!(cfg.timeout_secs, Some(5));
    }

    #[test]
    fn missing_key_and_bad_values_are_rejected() {
        assert!(matches!(
            config_from_lookup(&lookup_from(&[])),
            Err(CohereError::Config(ConfigError::MissingVar("COHERE_API_KEY")))
        ));
        assert!(
            config_from_lookup(&lookup_from(&[
                ("COHERE_API_KEY", "k"),
                ("COHERE_TEMPERATURE", "1.2"),
            ]))
            .is_err()
        );
        assert!(
            config_from_lookup(&lookup_from(&[
                ("COHERE_API_KEY", "k"),
                ("COHERE_URL", "ftp://x"),
            ]))
            .is_err()
        );
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let cfg = config_from_lookup(&lookup_from(&[("COHERE_API_KEY", "secret-value")])).unwrap();
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("secret-value"));
        assert!(printed.contains("<redacted>"));
    }
}
