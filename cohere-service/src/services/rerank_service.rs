//! Cohere rerank client around `POST {endpoint}/v1/rerank`.
//!
//! Returns `(index, relevance_score)` pairs pointing into the caller's
//! document slice. Indices are validated here so downstream code can index
//! without bounds surprises.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    config::{cohere_config::CohereConfig, cohere_models::RerankModel},
    error_handler::{CohereError, Result},
    services::http_client::CohereHttp,
};

/// One reranked document reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RerankHit {
    /// Zero-based position in the submitted `documents`.
    pub index: usize,
    pub relevance_score: f32,
}

/// Thin client for `/v1/rerank`.
#[derive(Debug)]
pub struct RerankService {
    http: CohereHttp,
    url_rerank: String,
}

impl RerankService {
    /// Creates a new [`RerankService`].
    ///
    /// # Errors
    /// Propagates endpoint/key validation and HTTP client construction errors.
    pub fn new(cfg: CohereConfig) -> Result<Self> {
        let http = CohereHttp::new(&cfg)?;
        let url_rerank = http.url("/v1/rerank");

        info!(
            model = %cfg.rerank_model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "RerankService initialized"
        );

        Ok(Self { http, url_rerank })
    }

    /// Scores `documents` against `query` and returns at most `top_n` hits in
    /// the order the API returned them.
    ///
    /// `top_n` is clamped to `documents.len()`; when that leaves nothing to
    /// return (no documents or `top_n == 0`) no request is made.
    ///
    /// # Errors
    /// - [`CohereError::InvalidRequest`] for an empty query
    /// - transport/status/decode/timeout errors from the HTTP layer
    /// - [`CohereError::Decode`] if a returned index is out of range
    #[instrument(skip_all, fields(model = %model, documents = documents.len(), top_n = top_n))]
    pub async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
        model: RerankModel,
    ) -> Result<Vec<RerankHit>> {
        let top_n = top_n.min(documents.len());
        if top_n == 0 {
            debug!("rerank: nothing to return, skipping request");
            return Ok(Vec::new());
        }
        if query.trim().is_empty() {
            return Err(CohereError::InvalidRequest("query must not be empty".into()));
        }

        let started = Instant::now();
        let body = RerankRequest {
            model: model.as_str(),
            query,
            documents,
            top_n,
            return_documents: false,
        };

        let out: RerankResponse = self.http.post_json(&self.url_rerank, &body).await?;

        if let Some(bad) = out.results.iter().find(|r| r.index >= documents.len()) {
            return Err(CohereError::Decode(format!(
                "rerank index {} out of range for {} documents",
                bad.index,
                documents.len()
            )));
        }

        info!(
            results = out.results.len(),
            latency_ms = started.elapsed().as_millis(),
            "rerank completed"
        );

        Ok(out.results.into_iter().take(top_n).collect())
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
struct RerankRequest<'a> {
    model: &'static str,
    query: &'a str,
    documents: &'a [String],
    top_n: usize,
    return_documents: bool,
}

#[derive(Debug, Deserialize)]
struct RerankResponse {
    #[serde(default)]
    results: Vec<RerankHit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_decodes_index_and_score() {
        let raw = r#"{"id":"r","results":[{"index":2,"relevance_score":0.91},{"index":0,"relevance_score":0.12}],"meta":{}}"#;
        let out: RerankResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            out.results,
            vec![
                RerankHit { index: 2, relevance_score: 0.91 },
                RerankHit { index: 0, relevance_score: 0.12 },
            ]
        );
    }

    #[test]
    fn request_serializes_documents_as_strings() {
        let docs = vec!["a".to_string(), "b".to_string()];
        let body = RerankRequest {
            model: RerankModel::MultilingualV2.as_str(),
            query: "q",
            documents: &docs,
            top_n: 2,
            return_documents: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "rerank-multilingual-v2.0");
        assert_eq!(json["documents"], serde_json::json!(["a", "b"]));
        assert_eq!(json["top_n"], 2);
    }
}
