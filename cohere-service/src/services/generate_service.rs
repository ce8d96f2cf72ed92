//! Cohere text generation client.
//!
//! Minimal, non-streaming client around `POST {endpoint}/v1/generate`.
//! The caller owns the prompt; this module only maps parameters onto the
//! wire format and normalizes errors via `error_handler`.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    config::{cohere_config::CohereConfig, cohere_models::GenerationModel},
    error_handler::{CohereError, Result, validate_range_f32},
    services::http_client::CohereHttp,
};

/// Per-call generation parameters.
#[derive(Debug, Clone)]
pub struct GenerateParams<'a> {
    /// Fully rendered prompt text.
    pub prompt: &'a str,
    pub model: GenerationModel,
    /// Sampling temperature, 0.0..=1.0.
    pub temperature: f32,
    pub max_tokens: u32,
    /// Number of completions to request (at least 1).
    pub num_generations: u32,
}

/// Thin client for `/v1/generate`.
///
/// Constructed once from a [`CohereConfig`] and shared (e.g. behind `Arc`).
/// Holds no mutable state, so concurrent calls are independent.
#[derive(Debug)]
pub struct GenerateService {
    http: CohereHttp,
    cfg: CohereConfig,
    url_generate: String,
}

impl GenerateService {
    /// Creates a new [`GenerateService`].
    ///
    /// # Errors
    /// Propagates endpoint/key validation and HTTP client construction errors.
    pub fn new(cfg: CohereConfig) -> Result<Self> {
        let http = CohereHttp::new(&cfg)?;
        let url_generate = http.url("/v1/generate");

        info!(
            model = %cfg.generation_model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "GenerateService initialized"
        );

        Ok(Self {
            http,
            cfg,
            url_generate,
        })
    }

    /// Default parameters from config for `prompt`: one completion, configured
    /// model/temperature/max_tokens.
    pub fn default_params<'a>(&self, prompt: &'a str) -> GenerateParams<'a> {
        GenerateParams {
            prompt,
            model: self.cfg.generation_model,
            temperature: self.cfg.temperature,
            max_tokens: self.cfg.max_tokens,
            num_generations: 1,
        }
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &CohereConfig {
        &self.cfg
    }

    /// Requests completions and returns their texts in API order.
    ///
    /// # Errors
    /// - [`CohereError::InvalidRequest`] for an empty prompt or zero generations
    /// - [`CohereError::Config`] if temperature is outside 0.0..=1.0
    /// - transport/status/decode/timeout errors from the HTTP layer
    /// - [`CohereError::Decode`] if the response carries no generations
    #[instrument(skip_all, fields(model = %params.model, prompt_len = params.prompt.len()))]
    pub async fn generate(&self, params: &GenerateParams<'_>) -> Result<Vec<String>> {
        if params.prompt.trim().is_empty() {
            return Err(CohereError::InvalidRequest("prompt must not be empty".into()));
        }
        if params.num_generations == 0 {
            return Err(CohereError::InvalidRequest(
                "num_generations must be >= 1".into(),
            ));
        }
        validate_range_f32("temperature", params.temperature, 0.0, 1.0, "expected 0.0..=1.0")?;

        let started = Instant::now();
        let body = GenerateRequest::from_params(params);
        let out: GenerateResponse = self.http.post_json(&self.url_generate, &body).await?;

        if out.generations.is_empty() {
            return Err(CohereError::Decode("empty `generations` in response".into()));
        }

        info!(
            generations = out.generations.len(),
            latency_ms = started.elapsed().as_millis(),
            "generation completed"
        );

        Ok(out.generations.into_iter().map(|g| g.text).collect())
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/v1/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'static str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
    num_generations: u32,
}

impl<'a> GenerateRequest<'a> {
    fn from_params(p: &GenerateParams<'a>) -> Self {
        Self {
            model: p.model.as_str(),
            prompt: p.prompt,
            temperature: p.temperature,
            max_tokens: p.max_tokens,
            num_generations: p.num_generations,
        }
    }
}

/// Response body for `/v1/generate`; only the texts are kept.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_wire_model_name() {
        let params = GenerateParams {
            prompt: "hello",
            model: GenerationModel::CommandNightly,
            temperature: 0.3,
            max_tokens: 64,
            num_generations: 1,
        };
        let json = serde_json::to_value(GenerateRequest::from_params(&params)).unwrap();
        assert_eq!(json["model"], "command-nightly");
        assert_eq!(json["prompt"], "hello");
        assert_eq!(json["max_tokens"], 64);
        assert_eq!(json["num_generations"], 1);
    }

    #[test]
    fn response_ignores_unknown_fields() {
        let raw = r#"{"id":"x","generations":[{"id":"g1","text":" Paris."}],"meta":{}}"#;
        let out: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(out.generations.len(), 1);
        assert_eq!(out.generations[0].text, " Paris.");
    }
}
