use axum::response::{IntoResponse, Response};
use serde::Serialize;
use wiki_search::Language;

use crate::core::http::response_envelope::ApiResponse;

#[derive(Debug, Serialize)]
pub struct LanguageItem {
    pub code: &'static str,
    pub name: &'static str,
}

/// Handler: GET /languages
pub async fn languages_route() -> Response {
    let items: Vec<LanguageItem> = Language::ALL
        .into_iter()
        .map(|l| LanguageItem {
            code: l.code(),
            name: l.display_name(),
        })
        .collect();
    ApiResponse::success(items).into_response()
}
