//! Real Cohere clients behind the pipeline, talking to an axum server that
//! answers too slowly for one of the two stages.

use std::sync::Arc;
use std::time::Duration;

use axum::{Json, Router, routing::post};
use cohere_service::{
    CohereConfig, GenerateService, GenerationModel, RerankModel, RerankService,
};
use pipeline::backend::{BackendFuture, SearchBackend};
use pipeline::{AnswerOutcome, Pipeline, PipelineRequest, PipelineSettings, RankingOutcome};
use serde_json::{Value, json};
use wiki_search::{Candidate, Language, SearchQuery, SearchStrategy, WikiSearchError};

struct FixedSearch(Vec<Candidate>);

impl SearchBackend for FixedSearch {
    fn search<'a>(&'a self, query: &'a SearchQuery) -> BackendFuture<'a, Vec<Candidate>, WikiSearchError> {
        Box::pin(async move { Ok(self.0.iter().take(query.result_count).cloned().collect()) })
    }
}

fn doc(title: &str, text: &str) -> Candidate {
    Candidate {
        title: title.into(),
        text: text.into(),
        url: format!("https://en.wikipedia.org/wiki/{title}"),
        language: Language::En,
        views: None,
        score: Some(1.0),
        distance: None,
    }
}

fn docs() -> Vec<Candidate> {
    vec![
        doc("France", "France is a country in Western Europe."),
        doc("Lyon", "Lyon is a city in France."),
        doc("Paris", "Paris is the capital of France."),
    ]
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({}))
}

async fn rerank_reversed() -> Json<Value> {
    Json(json!({
        "results": [
            { "index": 2, "relevance_score": 0.97 },
            { "index": 1, "relevance_score": 0.40 },
            { "index": 0, "relevance_score": 0.11 }
        ]
    }))
}

async fn generate_ok() -> Json<Value> {
    Json(json!({ "generations": [ { "text": "Paris." } ] }))
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn pipeline_against(app: Router) -> Pipeline {
    let base = serve(app).await;
    let cfg = CohereConfig {
        endpoint: base,
        api_key: "test-key".to_string(),
        generation_model: GenerationModel::Command,
        rerank_model: RerankModel::EnglishV2,
        temperature: 0.25,
        max_tokens: 32,
        timeout_secs: Some(1),
    };
    Pipeline::new(
        Arc::new(FixedSearch(docs())),
        Arc::new(RerankService::new(cfg.clone()).unwrap()),
        Arc::new(GenerateService::new(cfg).unwrap()),
        PipelineSettings::default(),
    )
}

fn request() -> PipelineRequest {
    PipelineRequest::new(
        SearchQuery::new("capital of France", SearchStrategy::Hybrid).with_result_count(3),
    )
}

#[tokio::test]
async fn rerank_timeout_keeps_presearch_order() {
    let pipeline = pipeline_against(
        Router::new()
            .route("/v1/rerank", post(slow))
            .route("/v1/generate", post(generate_ok)),
    )
    .await;

    let out = pipeline.run(request()).await.unwrap();

    match &out.ranking {
        RankingOutcome::Unavailable { reason } => assert!(reason.contains("timed out"), "{reason}"),
        other => panic!("expected unavailable ranking, got {other:?}"),
    }
    let pre: Vec<&str> = out.presearch.iter().map(|c| c.title.as_str()).collect();
    let ranked: Vec<&str> = out.ranked.iter().map(|r| r.candidate.title.as_str()).collect();
    assert_eq!(pre, ranked);
    assert!(out.answer.answer().is_some());
}

#[tokio::test]
async fn generation_timeout_keeps_ranking() {
    let pipeline = pipeline_against(
        Router::new()
            .route("/v1/rerank", post(rerank_reversed))
            .route("/v1/generate", post(slow)),
    )
    .await;

    let out = pipeline.run(request()).await.unwrap();

    assert_eq!(out.ranking, RankingOutcome::Reranked);
    let ranked: Vec<&str> = out.ranked.iter().map(|r| r.candidate.title.as_str()).collect();
    assert_eq!(ranked, ["Paris", "Lyon", "France"]);
    match &out.answer {
        AnswerOutcome::Unavailable { reason } => assert!(reason.contains("timed out"), "{reason}"),
        other => panic!("expected unavailable answer, got {other:?}"),
    }
    assert!(out.references.is_empty());
}
