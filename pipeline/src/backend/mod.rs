//! Backend seams used by the orchestrator.
//!
//! Each trait is object safe so the orchestrator can hold `Arc<dyn ...>` and
//! tests can swap in doubles. Adapters for the real clients live in
//! [`cohere`] and [`weaviate`].

use std::future::Future;
use std::pin::Pin;

use cohere_service::{GenerationModel, RerankHit, RerankModel};
use wiki_search::{Candidate, SearchQuery, WikiSearchError};

use crate::error::StageError;

pub mod cohere;
pub mod weaviate;

/// Boxed future returned by every backend call.
pub type BackendFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Vector store pre-search.
pub trait SearchBackend: Send + Sync {
    /// Runs the strategy named in `query.strategy`.
    fn search<'a>(&'a self, query: &'a SearchQuery) -> BackendFuture<'a, Vec<Candidate>, WikiSearchError>;
}

/// Relevance scoring service.
pub trait Reranker: Send + Sync {
    /// Returns hits indexing into `documents`, at most `top_n`.
    fn rerank<'a>(
        &'a self,
        query: &'a str,
        documents: &'a [String],
        top_n: usize,
        model: RerankModel,
    ) -> BackendFuture<'a, Vec<RerankHit>, StageError>;
}

/// Text completion service.
pub trait Generator: Send + Sync {
    /// Returns the completions produced for `prompt`.
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        model: GenerationModel,
        temperature: f32,
    ) -> BackendFuture<'a, Vec<String>, StageError>;
}
