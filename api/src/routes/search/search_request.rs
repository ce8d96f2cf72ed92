use cohere_service::{GenerationModel, RerankModel};
use pipeline::{PipelineRequest, PipelineSettings};
use serde::{Deserialize, Serialize};
use wiki_search::{Language, SearchQuery, SearchStrategy};

use crate::error_handler::AppError;

/// Upper bound for `result_count`, matching the original "Max Results" slider.
pub const MAX_RESULT_COUNT: usize = 15;

/// Request payload for `POST /search`.
///
/// Text-typed enum fields are parsed here so that unknown values come back as
/// `INVALID_QUERY` with the offending value in the message.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Code or English name; defaults to English.
    #[serde(default)]
    pub language: Option<String>,
    /// `keyword` | `dense` | `hybrid`
    pub strategy: String,
    #[serde(default)]
    pub result_count: Option<usize>,
    #[serde(default)]
    pub rerank: Option<bool>,
    #[serde(default)]
    pub generate: Option<bool>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub generation_model: Option<String>,
    #[serde(default)]
    pub rerank_model: Option<String>,
}

impl SearchRequest {
    /// Resolves the body into a pipeline request, filling unset fields from
    /// `settings`.
    ///
    /// # Errors
    /// [`AppError::InvalidQuery`] for unknown enum values or a result count
    /// outside `1..=15`.
    pub fn into_pipeline_request(
        self,
        settings: &PipelineSettings,
    ) -> Result<PipelineRequest, AppError> {
        let language = match self.language.as_deref().map(str::trim) {
            Some(l) if !l.is_empty() => l
                .parse::<Language>()
                .map_err(|e| AppError::InvalidQuery(e.to_string()))?,
            _ => Language::default(),
        };
        let strategy = self
            .strategy
            .parse::<SearchStrategy>()
            .map_err(|e| AppError::InvalidQuery(e.to_string()))?;

        let result_count = self
            .result_count
            .unwrap_or_else(|| settings.defaults.result_count.min(MAX_RESULT_COUNT));
        if !(1..=MAX_RESULT_COUNT).contains(&result_count) {
            return Err(AppError::InvalidQuery(format!(
                "result_count must be within 1..={MAX_RESULT_COUNT}, got {result_count}"
            )));
        }

        let generation_model = self
            .generation_model
            .as_deref()
            .map(str::parse::<GenerationModel>)
            .transpose()
            .map_err(|e| AppError::InvalidQuery(e.to_string()))?;
        let rerank_model = self
            .rerank_model
            .as_deref()
            .map(str::parse::<RerankModel>)
            .transpose()
            .map_err(|e| AppError::InvalidQuery(e.to_string()))?;

        let query = SearchQuery::new(self.query, strategy)
            .with_language(language)
            .with_result_count(result_count);

        Ok(PipelineRequest {
            query,
            rerank: self.rerank,
            generate: self.generate,
            temperature: self.temperature,
            generation_model,
            rerank_model,
        })
    }
}
