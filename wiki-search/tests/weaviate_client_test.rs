//! `WeaviateClient` against an in-process axum stand-in for `/v1/graphql`.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use wiki_search::{
    Language, SearchQuery, SearchStrategy, WeaviateClient, WeaviateConfig, WikiSearchError,
};

#[derive(Clone)]
struct FakeStore {
    calls: Arc<AtomicUsize>,
    last_query: Arc<Mutex<String>>,
    last_headers: Arc<Mutex<HeaderMap>>,
    status: StatusCode,
    reply: Value,
}

impl FakeStore {
    fn new(status: StatusCode, reply: Value) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            last_query: Arc::new(Mutex::new(String::new())),
            last_headers: Arc::new(Mutex::new(HeaderMap::new())),
            status,
            reply,
        }
    }
}

async fn graphql(State(store): State<FakeStore>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    store.calls.fetch_add(1, Ordering::SeqCst);
    *store.last_query.lock().unwrap() = body["query"].as_str().unwrap_or_default().to_string();
    *store.last_headers.lock().unwrap() = headers;
    (store.status, Json(store.reply.clone())).into_response()
}

async fn start(store: FakeStore, cfg: WeaviateConfig) -> WeaviateClient {
    let app = Router::new()
        .route("/v1/graphql", post(graphql))
        .with_state(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    WeaviateClient::new(WeaviateConfig {
        url: format!("http://{addr}"),
        ..cfg
    })
    .unwrap()
}

fn article(title: &str, text: &str, lang: &str, score: &str) -> Value {
    json!({
        "title": title,
        "text": text,
        "url": format!("https://{lang}.wikipedia.org/wiki/{title}"),
        "views": 5000,
        "lang": lang,
        "_additional": { "score": score, "distance": null }
    })
}

fn articles(items: Vec<Value>) -> Value {
    json!({ "data": { "Get": { "Articles": items } } })
}

#[tokio::test]
async fn every_strategy_respects_limit_and_language() {
    let reply = articles(vec![
        article("Paris", "Paris is the capital of France.", "en", "2.1"),
        article("Lyon", "Lyon is a city in France.", "en", "1.4"),
        article("Paris", "Paris est la capitale.", "fr", "1.3"),
        article("France", "France is a country.", "en", "1.1"),
        article("Marseille", "Marseille is a port.", "en", "0.9"),
    ]);
    let store = FakeStore::new(StatusCode::OK, reply);
    let client = start(store.clone(), WeaviateConfig::default()).await;

    for strategy in SearchStrategy::ALL {
        let q = SearchQuery::new("capital of France", strategy).with_result_count(3);
        let out = client.search(&q).await.unwrap();

        assert!(out.len() <= 3);
        assert!(out.iter().all(|c| c.language == Language::En));
        assert_eq!(
            out.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
            ["Paris", "Lyon", "France"]
        );

        let sent = store.last_query.lock().unwrap().clone();
        assert!(sent.contains("limit: 3"));
        assert!(sent.contains("valueString: \"en\""));
        let operator = match strategy {
            SearchStrategy::Keyword => "bm25:",
            SearchStrategy::Dense => "nearText:",
            SearchStrategy::Hybrid => "hybrid:",
        };
        assert!(sent.contains(operator), "{strategy}: {sent}");
    }
    assert_eq!(store.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn forwards_api_keys_as_headers() {
    let store = FakeStore::new(StatusCode::OK, articles(vec![]));
    let cfg = WeaviateConfig {
        api_key: Some("wv-key".into()),
        cohere_api_key: Some("co-key".into()),
        hybrid_alpha: Some(0.5),
        ..WeaviateConfig::default()
    };
    let client = start(store.clone(), cfg).await;

    let out = client
        .search_hybrid(&SearchQuery::new("anything", SearchStrategy::Hybrid))
        .await
        .unwrap();
    assert!(out.is_empty());

    let headers = store.last_headers.lock().unwrap().clone();
    assert_eq!(headers["authorization"], "Bearer wv-key");
    assert_eq!(headers["x-cohere-api-key"], "co-key");
    assert!(store.last_query.lock().unwrap().contains("alpha: 0.5"));
}

#[tokio::test]
async fn blank_query_never_reaches_the_store() {
    let store = FakeStore::new(StatusCode::OK, articles(vec![]));
    let client = start(store.clone(), WeaviateConfig::default()).await;

    let err = client
        .search_keyword(&SearchQuery::new("  ", SearchStrategy::Keyword))
        .await
        .unwrap_err();

    assert!(matches!(err, WikiSearchError::InvalidQuery(_)));
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn server_error_maps_to_backend_unavailable() {
    let store = FakeStore::new(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" }));
    let client = start(store, WeaviateConfig::default()).await;

    let err = client
        .search_dense(&SearchQuery::new("q", SearchStrategy::Dense))
        .await
        .unwrap_err();
    match err {
        WikiSearchError::BackendUnavailable(msg) => assert!(msg.contains("500")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn graphql_errors_map_to_backend_unavailable() {
    let reply = json!({
        "data": { "Get": { "Articles": null } },
        "errors": [ { "message": "explorer: get class: vectorize params" } ]
    });
    let client = start(FakeStore::new(StatusCode::OK, reply), WeaviateConfig::default()).await;

    let err = client
        .search(&SearchQuery::new("q", SearchStrategy::Dense))
        .await
        .unwrap_err();
    assert!(matches!(err, WikiSearchError::BackendUnavailable(_)));
}

#[tokio::test]
async fn missing_title_aborts_with_malformed_candidate() {
    let reply = articles(vec![json!({
        "text": "no title here",
        "url": "https://en.wikipedia.org/wiki/X",
        "lang": "en",
        "_additional": { "score": "1.0" }
    })]);
    let client = start(FakeStore::new(StatusCode::OK, reply), WeaviateConfig::default()).await;

    let err = client
        .search(&SearchQuery::new("q", SearchStrategy::Keyword))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WikiSearchError::MalformedCandidate { index: 0, field: "title" }
    ));
}

#[tokio::test]
async fn unreachable_store_is_backend_unavailable() {
    // Bind then drop to get a port nobody listens on.
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let client = WeaviateClient::new(WeaviateConfig {
        url: format!("http://127.0.0.1:{port}"),
        timeout_secs: 2,
        ..WeaviateConfig::default()
    })
    .unwrap();

    let err = client
        .search(&SearchQuery::new("q", SearchStrategy::Hybrid))
        .await
        .unwrap_err();
    assert!(matches!(err, WikiSearchError::BackendUnavailable(_)));
}
