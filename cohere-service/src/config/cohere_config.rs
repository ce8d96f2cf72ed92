use std::fmt;

use crate::config::cohere_models::{GenerationModel, RerankModel};

/// Connection and default sampling parameters for the Cohere API.
///
/// One value is shared by both the generation and the rerank client.
/// Per-request overrides (model, temperature) are passed to the call itself.
///
/// # Fields
///
/// - `endpoint`: API base URL (e.g. `https://api.cohere.ai`).
/// - `api_key`: bearer token. Never printed by `Debug`.
/// - `generation_model`: default model for `/v1/generate`.
/// - `rerank_model`: default model for `/v1/rerank`.
/// - `temperature`: default sampling temperature (0.0..=1.0).
/// - `max_tokens`: completion length cap sent with every generation.
/// - `timeout_secs`: per-request timeout; `None` means 60 seconds.
#[derive(Clone, PartialEq)]
pub struct CohereConfig {
    pub endpoint: String,
    pub api_key: String,
    pub generation_model: GenerationModel,
    pub rerank_model: RerankModel,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for CohereConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CohereConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("generation_model", &self.generation_model)
            .field("rerank_model", &self.rerank_model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
