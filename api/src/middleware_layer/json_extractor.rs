//! Rewrites axum's plain-text extractor rejections into the JSON envelope
//! and tags every response with `X-Request-Id`.

use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Fields of the search request body, used to point at the failing one.
const KNOWN_FIELDS: [&str; 9] = [
    "query",
    "language",
    "strategy",
    "result_count",
    "rerank",
    "generate",
    "temperature",
    "generation_model",
    "rerank_model",
];

/// Rejections are short; anything larger is not one.
const MAX_REJECTION_BYTES: usize = 64 * 1024;

fn guess_path_from_serde_msg(msg: &str) -> Option<String> {
    KNOWN_FIELDS
        .iter()
        .find(|key| msg.contains(&format!("`{key}`")) || msg.contains(&format!("{key}:")))
        .map(|key| key.to_string())
}

fn hint_for(msg: &str) -> Option<String> {
    if msg.contains("missing field") {
        Some("Add the missing field to the JSON body.".into())
    } else if msg.contains("invalid type") {
        Some("Check the JSON type of this field (string, number or boolean).".into())
    } else if msg.contains("Content-Type") {
        Some("Send the body with `Content-Type: application/json`.".into())
    } else if msg.contains("EOF") || msg.contains("syntax") {
        Some("The body is not valid JSON.".into())
    } else {
        None
    }
}

fn new_request_id() -> String {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    format!("req-{nanos}")
}

fn request_id_of(req: &Request<Body>) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_request_id)
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

pub async fn json_error_mapper(mut req: Request<Body>, next: Next) -> Response {
    let request_id = request_id_of(&req);
    if let Ok(v) = HeaderValue::from_str(&request_id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, v);
    }
    let res = next.run(req).await;
    let status = res.status();

    let (mut parts, body) = res.into_parts();
    if let Ok(v) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(REQUEST_ID_HEADER, v);
    }

    let rejection = matches!(
        status,
        StatusCode::BAD_REQUEST
            | StatusCode::UNPROCESSABLE_ENTITY
            | StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
    // Handler errors are already enveloped.
    if !rejection || is_json(&parts) {
        return Response::from_parts(parts, body);
    }

    let bytes: Bytes = axum::body::to_bytes(body, MAX_REJECTION_BYTES)
        .await
        .unwrap_or_default();
    let original = String::from_utf8_lossy(&bytes);

    let detail = ApiErrorDetail {
        path: guess_path_from_serde_msg(&original),
        hint: hint_for(&original),
    };
    let details = if detail.path.is_none() && detail.hint.is_none() {
        Vec::new()
    } else {
        vec![detail]
    };

    let code = match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        _ => "UNPROCESSABLE_ENTITY",
    };
    let envelope = ApiResponse::<()>::error(code, original.trim(), details);

    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, body.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_field_from_serde_messages() {
        assert_eq!(
            guess_path_from_serde_msg("Failed to deserialize the JSON body into the target type: missing field `strategy` at line 1 column 20"),
            Some("strategy".into())
        );
        assert_eq!(
            guess_path_from_serde_msg("result_count: invalid type: string \"x\", expected usize at line 1 column 40"),
            Some("result_count".into())
        );
        assert_eq!(guess_path_from_serde_msg("EOF while parsing an object"), None);
    }

    #[test]
    fn hints_follow_the_failure_kind() {
        assert!(hint_for("missing field `query`").unwrap().contains("missing field"));
        assert!(hint_for("Expected request with `Content-Type: application/json`").is_some());
        assert!(hint_for("something else").is_none());
    }
}
