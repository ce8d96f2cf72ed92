use std::sync::Arc;

use cohere_service::{
    GenerateService, RerankService, config::default_config::config_from_env,
};
use pipeline::{Pipeline, PipelineConfig, PipelineSettings};
use tracing::info;
use wiki_search::{WeaviateClient, WeaviateConfig};

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator with the production backends injected.
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Builds every backend client once from environment variables.
    ///
    /// # Errors
    /// [`AppError::Config`] when any client configuration is missing or invalid.
    pub fn from_env() -> Result<Self, AppError> {
        let cohere = config_from_env().map_err(|e| AppError::Config(e.to_string()))?;
        let weaviate = WeaviateConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;
        let defaults = PipelineConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;

        let search = WeaviateClient::new(weaviate).map_err(|e| AppError::Config(e.to_string()))?;
        let reranker =
            RerankService::new(cohere.clone()).map_err(|e| AppError::Config(e.to_string()))?;
        let generator =
            GenerateService::new(cohere.clone()).map_err(|e| AppError::Config(e.to_string()))?;

        let settings = PipelineSettings::new(defaults, &cohere);
        info!(
            target: "api::state",
            result_count = settings.defaults.result_count,
            rerank = settings.defaults.rerank,
            generate = settings.defaults.generate,
            context_max_chars = settings.defaults.context.max_chars,
            "pipeline ready"
        );

        Ok(Self::new(Pipeline::new(
            Arc::new(search),
            Arc::new(reranker),
            Arc::new(generator),
            settings,
        )))
    }
}
