//! Rerank stage: scores pre-search candidates and reorders them.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use cohere_service::RerankModel;
use serde::Serialize;
use tracing::{debug, warn};
use wiki_search::Candidate;

use crate::backend::Reranker;
use crate::error::StageError;

/// A candidate with the score assigned by the reranker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RerankedCandidate {
    pub candidate: Candidate,
    pub relevance_score: f32,
    /// Zero-based index in the pre-search list.
    pub original_index: usize,
}

/// Wraps a [`Reranker`] with the ordering and bounds rules callers rely on.
#[derive(Clone)]
pub struct RerankClient {
    backend: Arc<dyn Reranker>,
}

impl RerankClient {
    pub fn new(backend: Arc<dyn Reranker>) -> Self {
        Self { backend }
    }

    /// Reorders `candidates` by relevance to `query_text`.
    ///
    /// - empty input or `top_n == 0` returns an empty list without calling
    ///   the backend
    /// - `top_n` is clamped to `candidates.len()`
    /// - output is sorted by descending score; ties keep pre-search order
    ///
    /// # Errors
    /// [`StageError::RerankUnavailable`] for backend failures and for hits
    /// pointing outside the input or repeating an index.
    pub async fn rerank(
        &self,
        query_text: &str,
        candidates: &[Candidate],
        top_n: usize,
        model: RerankModel,
    ) -> Result<Vec<RerankedCandidate>, StageError> {
        let top_n = top_n.min(candidates.len());
        if top_n == 0 {
            debug!(target: "pipeline::rerank", candidates = candidates.len(), "nothing to rerank");
            return Ok(Vec::new());
        }
        let documents: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();

        let hits = self
            .backend
            .rerank(query_text, &documents, top_n, model)
            .await?;

        let mut seen = HashSet::with_capacity(hits.len());
        let mut out = Vec::with_capacity(hits.len().min(top_n));
        for hit in hits {
            let Some(candidate) = candidates.get(hit.index) else {
                warn!(target: "pipeline::rerank", index = hit.index, len = candidates.len(), "rerank index out of range");
                return Err(StageError::RerankUnavailable(format!(
                    "index {} out of range for {} documents",
                    hit.index,
                    candidates.len()
                )));
            };
            if !seen.insert(hit.index) {
                return Err(StageError::RerankUnavailable(format!(
                    "index {} returned twice",
                    hit.index
                )));
            }
            out.push(RerankedCandidate {
                candidate: candidate.clone(),
                relevance_score: hit.relevance_score,
                original_index: hit.index,
            });
        }

        out.sort_by(by_relevance);
        out.truncate(top_n);
        Ok(out)
    }
}

/// Descending score, then ascending pre-search index.
fn by_relevance(a: &RerankedCandidate, b: &RerankedCandidate) -> Ordering {
    b.relevance_score
        .total_cmp(&a.relevance_score)
        .then_with(|| a.original_index.cmp(&b.original_index))
}
