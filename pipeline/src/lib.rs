//! Retrieval-augmented answering over Wikipedia articles.
//!
//! Public API: [`Pipeline::run`]. It pre-searches the vector store with the
//! requested strategy, optionally reranks the candidates, optionally builds
//! a context from the best ordering and asks the generator for an answer.
//!
//! Backends are injected as trait objects (see [`backend`]); the real
//! Weaviate and Cohere clients implement those traits.

pub mod backend;
pub mod cfg;
mod error;
pub mod generate;
mod orchestrator;
pub mod prompt;
pub mod rerank;

pub use cfg::PipelineConfig;
pub use error::{PipelineError, StageError};
pub use generate::{Answer, GenerationClient};
pub use orchestrator::{
    AnswerOutcome, Pipeline, PipelineRequest, PipelineResponse, PipelineSettings,
    RankedCandidate, RankingOutcome, Reference,
};
pub use prompt::{Context, ContextBudget, ContextPassage, build_context, build_prompt};
pub use rerank::{RerankClient, RerankedCandidate};
