//! Adapters from the Cohere clients to the stage traits. Every client error,
//! timeouts included, becomes the stage's `*Unavailable` error.

use cohere_service::{
    GenerateParams, GenerateService, GenerationModel, RerankHit, RerankModel, RerankService,
};

use super::{BackendFuture, Generator, Reranker};
use crate::error::StageError;

impl Reranker for RerankService {
    fn rerank<'a>(
        &'a self,
        query: &'a str,
        documents: &'a [String],
        top_n: usize,
        model: RerankModel,
    ) -> BackendFuture<'a, Vec<RerankHit>, StageError> {
        Box::pin(async move {
            RerankService::rerank(self, query, documents, top_n, model)
                .await
                .map_err(|e| StageError::RerankUnavailable(e.to_string()))
        })
    }
}

impl Generator for GenerateService {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        model: GenerationModel,
        temperature: f32,
    ) -> BackendFuture<'a, Vec<String>, StageError> {
        Box::pin(async move {
            let params = GenerateParams {
                prompt,
                model,
                temperature,
                max_tokens: self.config().max_tokens,
                num_generations: 1,
            };
            self.generate(&params)
                .await
                .map_err(|e| StageError::GenerationUnavailable(e.to_string()))
        })
    }
}
