//! Request orchestration: PRESEARCH → [RERANK] → [GENERATE] → DONE.
//!
//! Only pre-search and request validation can fail a request. Rerank and
//! generation failures are reported through [`RankingOutcome`] and
//! [`AnswerOutcome`] and the request still completes.

use std::sync::Arc;
use std::time::Instant;

use cohere_service::{CohereConfig, GenerationModel, RerankModel};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use wiki_search::{Candidate, SearchQuery};

use crate::backend::{Generator, Reranker, SearchBackend};
use crate::cfg::PipelineConfig;
use crate::error::PipelineError;
use crate::generate::{Answer, GenerationClient};
use crate::prompt::{ContextBudget, build_context};
use crate::rerank::{RerankClient, RerankedCandidate};

/// Process-wide defaults applied to requests that leave a knob unset.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub defaults: PipelineConfig,
    pub temperature: f32,
    pub generation_model: GenerationModel,
    pub rerank_model: RerankModel,
}

impl PipelineSettings {
    pub fn new(defaults: PipelineConfig, cohere: &CohereConfig) -> Self {
        Self {
            defaults,
            temperature: cohere.temperature,
            generation_model: cohere.generation_model,
            rerank_model: cohere.rerank_model,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            defaults: PipelineConfig::default(),
            temperature: 0.25,
            generation_model: GenerationModel::default(),
            rerank_model: RerankModel::default(),
        }
    }
}

/// One request. `None` fields fall back to [`PipelineSettings`].
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRequest {
    pub query: SearchQuery,
    pub rerank: Option<bool>,
    pub generate: Option<bool>,
    pub temperature: Option<f32>,
    pub generation_model: Option<GenerationModel>,
    pub rerank_model: Option<RerankModel>,
}

impl PipelineRequest {
    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            rerank: None,
            generate: None,
            temperature: None,
            generation_model: None,
            rerank_model: None,
        }
    }
}

/// A candidate in final order, with its rerank score when one exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub relevance_score: Option<f32>,
    /// Zero-based index in the pre-search list.
    pub original_index: usize,
}

impl From<RerankedCandidate> for RankedCandidate {
    fn from(r: RerankedCandidate) -> Self {
        Self {
            candidate: r.candidate,
            relevance_score: Some(r.relevance_score),
            original_index: r.original_index,
        }
    }
}

/// Status of the rerank stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RankingOutcome {
    Reranked,
    /// Disabled for this request.
    Skipped,
    /// Pre-search returned nothing.
    NoCandidates,
    /// Backend failed; ranking is the pre-search order.
    Unavailable { reason: String },
}

/// Status of the generation stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnswerOutcome {
    Generated { answer: Answer },
    Skipped,
    NoCandidates,
    /// Backend failed; no answer is returned.
    Unavailable { reason: String },
}

impl AnswerOutcome {
    pub fn answer(&self) -> Option<&Answer> {
        match self {
            AnswerOutcome::Generated { answer } => Some(answer),
            _ => None,
        }
    }
}

/// A document that went into the generation context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
    pub relevance_score: Option<f32>,
}

/// Result of a completed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResponse {
    pub query: SearchQuery,
    /// Pre-search output, backend order.
    pub presearch: Vec<Candidate>,
    /// Final order: reranked when available, otherwise pre-search order.
    pub ranked: Vec<RankedCandidate>,
    pub ranking: RankingOutcome,
    pub answer: AnswerOutcome,
    pub references: Vec<Reference>,
}

impl PipelineResponse {
    /// `true` when pre-search matched nothing.
    pub fn is_empty_result(&self) -> bool {
        self.presearch.is_empty()
    }
}

/// Stateless orchestrator over injected backends. Share behind `Arc`.
#[derive(Clone)]
pub struct Pipeline {
    search: Arc<dyn SearchBackend>,
    reranker: RerankClient,
    generator: GenerationClient,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        search: Arc<dyn SearchBackend>,
        reranker: Arc<dyn Reranker>,
        generator: Arc<dyn Generator>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            search,
            reranker: RerankClient::new(reranker),
            generator: GenerationClient::new(generator),
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Runs one request end to end.
    ///
    /// # Errors
    /// - [`PipelineError::InvalidQuery`] before any backend call
    /// - [`PipelineError::BackendUnavailable`] / [`PipelineError::MalformedCandidate`]
    ///   from pre-search
    #[instrument(
        target = "pipeline::orchestrator",
        skip_all,
        fields(
            strategy = %request.query.strategy,
            lang = %request.query.language,
            result_count = request.query.result_count
        )
    )]
    pub async fn run(&self, request: PipelineRequest) -> Result<PipelineResponse, PipelineError> {
        let started = Instant::now();
        let plan = self.plan(&request)?;
        let query = request.query;
        debug!(target: "pipeline::orchestrator", text = %query.text, "request accepted");

        // PRESEARCH
        let mut presearch = self.search.search(&query).await.map_err(|e| {
            warn!(target: "pipeline::orchestrator", error = %e, "pre-search failed");
            PipelineError::from(e)
        })?;
        if presearch.len() > query.result_count {
            warn!(
                target: "pipeline::orchestrator",
                got = presearch.len(),
                limit = query.result_count,
                "pre-search exceeded limit, truncating"
            );
            presearch.truncate(query.result_count);
        }

        if presearch.is_empty() {
            info!(
                target: "pipeline::orchestrator",
                latency_ms = started.elapsed().as_millis(),
                "no candidates, skipping rerank and generation"
            );
            return Ok(PipelineResponse {
                query,
                presearch,
                ranked: Vec::new(),
                ranking: RankingOutcome::NoCandidates,
                answer: AnswerOutcome::NoCandidates,
                references: Vec::new(),
            });
        }

        // RERANK
        let (ranked, ranking) = if plan.rerank {
            match self
                .reranker
                .rerank(&query.text, &presearch, query.result_count, plan.rerank_model)
                .await
            {
                Ok(reranked) => (
                    reranked.into_iter().map(RankedCandidate::from).collect(),
                    RankingOutcome::Reranked,
                ),
                Err(e) => {
                    warn!(target: "pipeline::orchestrator", error = %e, "rerank unavailable, keeping pre-search order");
                    (
                        presearch_order(&presearch),
                        RankingOutcome::Unavailable {
                            reason: e.reason().to_string(),
                        },
                    )
                }
            }
        } else {
            (presearch_order(&presearch), RankingOutcome::Skipped)
        };

        // GENERATE
        let (answer, references) = if plan.generate {
            let context = build_context(ranked.iter().map(|r| &r.candidate), &plan.context);
            match self
                .generator
                .generate(
                    &context,
                    &query.text,
                    query.language,
                    plan.temperature,
                    plan.generation_model,
                )
                .await
            {
                Ok(answer) => {
                    let references = context
                        .passages
                        .iter()
                        .filter_map(|p| ranked.get(p.position))
                        .map(|r| Reference {
                            title: r.candidate.title.clone(),
                            url: r.candidate.url.clone(),
                            relevance_score: r.relevance_score,
                        })
                        .collect();
                    (AnswerOutcome::Generated { answer }, references)
                }
                Err(e) => {
                    warn!(target: "pipeline::orchestrator", error = %e, "generation unavailable, returning ranking only");
                    (
                        AnswerOutcome::Unavailable {
                            reason: e.reason().to_string(),
                        },
                        Vec::new(),
                    )
                }
            }
        } else {
            (AnswerOutcome::Skipped, Vec::new())
        };

        info!(
            target: "pipeline::orchestrator",
            presearch = presearch.len(),
            ranked = ranked.len(),
            reranked = matches!(ranking, RankingOutcome::Reranked),
            answered = answer.answer().is_some(),
            latency_ms = started.elapsed().as_millis(),
            "request finished"
        );

        Ok(PipelineResponse {
            query,
            presearch,
            ranked,
            ranking,
            answer,
            references,
        })
    }

    /// Resolves per-request knobs and validates them.
    fn plan(&self, request: &PipelineRequest) -> Result<Plan, PipelineError> {
        request.query.validate()?;

        let temperature = request.temperature.unwrap_or(self.settings.temperature);
        if !(temperature.is_finite() && (0.0..=1.0).contains(&temperature)) {
            return Err(PipelineError::InvalidQuery(format!(
                "temperature must be within 0.0..=1.0, got {temperature}"
            )));
        }

        Ok(Plan {
            rerank: request.rerank.unwrap_or(self.settings.defaults.rerank),
            generate: request.generate.unwrap_or(self.settings.defaults.generate),
            temperature,
            generation_model: request
                .generation_model
                .unwrap_or(self.settings.generation_model),
            rerank_model: request.rerank_model.unwrap_or(self.settings.rerank_model),
            context: self.settings.defaults.context,
        })
    }
}

struct Plan {
    rerank: bool,
    generate: bool,
    temperature: f32,
    generation_model: GenerationModel,
    rerank_model: RerankModel,
    context: ContextBudget,
}

fn presearch_order(presearch: &[Candidate]) -> Vec<RankedCandidate> {
    presearch
        .iter()
        .enumerate()
        .map(|(original_index, c)| RankedCandidate {
            candidate: c.clone(),
            relevance_score: None,
            original_index,
        })
        .collect()
}
