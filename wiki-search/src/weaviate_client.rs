//! Weaviate query client: one `reqwest::Client` bound to the GraphQL
//! endpoint and the three pre-search operations.
//!
//! ## Contract shared by every strategy
//! - at most `query.result_count` candidates
//! - backend order preserved, never re-sorted here
//! - every candidate carries `title`, `text`, `url` and `lang`; otherwise the
//!   whole request fails with [`WikiSearchError::MalformedCandidate`]
//! - candidates whose `lang` differs from the filter are dropped with a warning
//! - no match is an empty list, not an error

use std::time::{Duration, Instant};

use reqwest::header;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::wiki_search_error::{Result, WikiSearchError};
use crate::graphql::{GraphqlRequest, build_get_query};
use crate::structs::candidate::Candidate;
use crate::structs::language::Language;
use crate::structs::search_query::{SearchQuery, SearchStrategy};
use crate::structs::weaviate_config::WeaviateConfig;

const SNIPPET_MAX_CHARS: usize = 240;

/// Stateless client; build once and share behind `Arc`.
#[derive(Debug, Clone)]
pub struct WeaviateClient {
    http: reqwest::Client,
    cfg: WeaviateConfig,
    url_graphql: String,
    timeout: Duration,
}

impl WeaviateClient {
    /// Installs auth headers and the per-request timeout.
    ///
    /// # Errors
    /// [`WikiSearchError::InvalidConfig`] for unusable keys or a client build failure.
    pub fn new(cfg: WeaviateConfig) -> Result<Self> {
        let timeout = Duration::from_secs(cfg.timeout_secs);

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(key) = cfg.api_key.as_deref() {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| WikiSearchError::InvalidConfig("WEAVIATE_API_KEY is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }
        if let Some(key) = cfg.cohere_api_key.as_deref() {
            let mut value = header::HeaderValue::from_str(key)
                .map_err(|_| WikiSearchError::InvalidConfig("COHERE_API_KEY is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert("X-Cohere-Api-Key", value);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| WikiSearchError::InvalidConfig(format!("http client build: {e}")))?;

        let url_graphql = format!("{}/v1/graphql", cfg.url.trim_end_matches('/'));

        info!(
            target: "wiki_search::client",
            url = %cfg.url,
            class = %cfg.class_name,
            timeout_secs = cfg.timeout_secs,
            hybrid_alpha = ?cfg.hybrid_alpha,
            "WeaviateClient initialized"
        );

        Ok(Self {
            http,
            cfg,
            url_graphql,
            timeout,
        })
    }

    pub fn config(&self) -> &WeaviateConfig {
        &self.cfg
    }

    /// Runs the strategy selected in `query.strategy`.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Candidate>> {
        match query.strategy {
            SearchStrategy::Keyword => self.search_keyword(query).await,
            SearchStrategy::Dense => self.search_dense(query).await,
            SearchStrategy::Hybrid => self.search_hybrid(query).await,
        }
    }

    /// BM25 match restricted to `query.language`.
    pub async fn search_keyword(&self, query: &SearchQuery) -> Result<Vec<Candidate>> {
        self.run(query, SearchStrategy::Keyword).await
    }

    /// `nearText` match against `query.text`.
    pub async fn search_dense(&self, query: &SearchQuery) -> Result<Vec<Candidate>> {
        self.run(query, SearchStrategy::Dense).await
    }

    /// Hybrid match; `alpha` is only sent when configured.
    pub async fn search_hybrid(&self, query: &SearchQuery) -> Result<Vec<Candidate>> {
        self.run(query, SearchStrategy::Hybrid).await
    }

    #[instrument(
        target = "wiki_search::query",
        skip_all,
        fields(strategy = %strategy, lang = %query.language, limit = query.result_count)
    )]
    async fn run(&self, query: &SearchQuery, strategy: SearchStrategy) -> Result<Vec<Candidate>> {
        query.validate()?;
        debug!(target: "wiki_search::query", text = %query.text, "pre-search");

        let started = Instant::now();
        let body = GraphqlRequest {
            query: build_get_query(&self.cfg.class_name, query, strategy, self.cfg.hybrid_alpha),
        };

        let resp = self
            .http
            .post(&self.url_graphql)
            .json(&body)
            .send()
            .await
            .map_err(|e| WikiSearchError::from_transport(e, self.timeout))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
            let snippet: String = snippet.chars().take(SNIPPET_MAX_CHARS).collect();
            warn!(
                target: "wiki_search::query",
                %status,
                %snippet,
                "vector store returned non-success status"
            );
            return Err(WikiSearchError::BackendUnavailable(format!(
                "HTTP {status}: {snippet}"
            )));
        }

        let payload: Value = resp
            .json()
            .await
            .map_err(|e| WikiSearchError::from_transport(e, self.timeout))?;

        let candidates = parse_get_response(&payload, &self.cfg.class_name, query)?;

        info!(
            target: "wiki_search::query",
            candidates = candidates.len(),
            latency_ms = started.elapsed().as_millis(),
            "pre-search finished"
        );
        Ok(candidates)
    }
}

/// Turns a GraphQL response into the candidate list for `query`.
///
/// # Errors
/// - [`WikiSearchError::BackendUnavailable`] for a non-empty `errors` array or
///   a response without `data.Get.<class>`
/// - [`WikiSearchError::MalformedCandidate`] when a required property is absent
pub fn parse_get_response(
    payload: &Value,
    class_name: &str,
    query: &SearchQuery,
) -> Result<Vec<Candidate>> {
    if let Some(errors) = payload.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages: Vec<&str> = errors
                .iter()
                .map(|e| e.get("message").and_then(Value::as_str).unwrap_or("unknown error"))
                .collect();
            return Err(WikiSearchError::BackendUnavailable(format!(
                "graphql: {}",
                messages.join("; ")
            )));
        }
    }

    let objects = match payload
        .get("data")
        .and_then(|d| d.get("Get"))
        .and_then(|g| g.get(class_name))
    {
        Some(Value::Array(items)) => items,
        Some(Value::Null) => return Ok(Vec::new()),
        _ => {
            return Err(WikiSearchError::BackendUnavailable(format!(
                "response has no data.Get.{class_name}"
            )));
        }
    };

    let mut out = Vec::with_capacity(objects.len().min(query.result_count));
    for (index, obj) in objects.iter().enumerate() {
        let candidate = parse_candidate(index, obj)?;
        match candidate {
            Parsed::Ok(c) if c.language == query.language => out.push(c),
            Parsed::Ok(c) => warn!(
                target: "wiki_search::query",
                index,
                expected = %query.language,
                got = %c.language,
                "dropping candidate with mismatched language"
            ),
            Parsed::UnknownLanguage(code) => warn!(
                target: "wiki_search::query",
                index,
                expected = %query.language,
                got = %code,
                "dropping candidate with unsupported language"
            ),
        }
        if out.len() == query.result_count {
            break;
        }
    }
    Ok(out)
}

enum Parsed {
    Ok(Candidate),
    UnknownLanguage(String),
}

fn parse_candidate(index: usize, obj: &Value) -> Result<Parsed> {
    let required = |field: &'static str| -> Result<String> {
        obj.get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(WikiSearchError::MalformedCandidate { index, field })
    };

    let title = required("title")?;
    let text = required("text")?;
    let url = required("url")?;
    let lang = required("lang")?;

    let Ok(language) = lang.parse::<Language>() else {
        return Ok(Parsed::UnknownLanguage(lang));
    };

    let views = obj.get("views").and_then(|v| {
        v.as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
    });
    let additional = obj.get("_additional");
    let score = additional.and_then(|a| a.get("score")).and_then(as_f32);
    let distance = additional.and_then(|a| a.get("distance")).and_then(as_f32);

    Ok(Parsed::Ok(Candidate {
        title,
        text,
        url,
        language,
        views,
        score,
        distance,
    }))
}

/// Weaviate reports `score` as a string and `distance` as a number.
fn as_f32(v: &Value) -> Option<f32> {
    match v {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    }
}
