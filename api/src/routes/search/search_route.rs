//! POST /search: pre-search, optional rerank, optional generated answer.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::{debug, info};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    middleware_layer::json_extractor::REQUEST_ID_HEADER,
    routes::search::{search_request::SearchRequest, search_response::SearchResponse},
};

/// Handler: POST /search
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/search \
///   -H 'content-type: application/json' \
///   -d '{"query":"capital of France","language":"en","strategy":"hybrid","result_count":5}'
/// ```
pub async fn search_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SearchRequest>,
) -> AppResult<Response> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let request = body.into_pipeline_request(state.pipeline.settings())?;
    debug!(
        target: "api::search",
        request_id = %request_id,
        strategy = %request.query.strategy,
        lang = %request.query.language,
        result_count = request.query.result_count,
        "search_route: start"
    );

    let response = state.pipeline.run(request).await?;

    info!(
        target: "api::search",
        request_id = %request_id,
        presearch = response.presearch.len(),
        ranked = response.ranked.len(),
        answered = response.answer.answer().is_some(),
        "search_route: success"
    );

    Ok(ApiResponse::success(SearchResponse::from(response)).into_response_with_status(StatusCode::OK))
}
