//! Generation stage: prompt assembly plus one completion.

use std::sync::Arc;

use cohere_service::GenerationModel;
use serde::Serialize;
use tracing::debug;
use wiki_search::Language;

use crate::backend::Generator;
use crate::error::StageError;
use crate::prompt::{Context, build_prompt};

/// Generated answer and the question it answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub text: String,
    pub query: String,
}

/// Wraps a [`Generator`]; never returns an empty answer.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn Generator>,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn Generator>) -> Self {
        Self { backend }
    }

    /// Composes an answer for `query` from `context`.
    ///
    /// # Errors
    /// [`StageError::GenerationUnavailable`] for backend failures, zero
    /// completions or blank completion text.
    pub async fn generate(
        &self,
        context: &Context,
        query: &str,
        language: Language,
        temperature: f32,
        model: GenerationModel,
    ) -> Result<Answer, StageError> {
        let prompt = build_prompt(context, query, language);
        debug!(
            target: "pipeline::generate",
            passages = context.passages.len(),
            prompt_chars = prompt.chars().count(),
            %model,
            "prompt assembled"
        );

        let completions = self.backend.complete(&prompt, model, temperature).await?;
        let text = completions
            .into_iter()
            .next()
            .ok_or_else(|| StageError::GenerationUnavailable("no completions returned".into()))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(StageError::GenerationUnavailable(
                "completion text is empty".into(),
            ));
        }

        Ok(Answer {
            text: text.to_string(),
            query: query.to_string(),
        })
    }
}
