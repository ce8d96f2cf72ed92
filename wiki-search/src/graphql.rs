//! GraphQL `Get` query construction for the three pre-search strategies.
//!
//! Pure string building, no I/O. Every shape shares the same `where` filter on
//! `lang`, the same `limit` and the same property selection; only the search
//! operator differs.

use serde::Serialize;

use crate::structs::search_query::{SearchQuery, SearchStrategy};

/// Properties requested for every candidate.
pub const PROPERTIES: &str = "text title url views lang _additional { score distance }";

/// Body of `POST /v1/graphql`.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
}

/// Builds the complete `{ Get { ... } }` document for `query`, using
/// `strategy` as the search operator.
pub fn build_get_query(
    class_name: &str,
    query: &SearchQuery,
    strategy: SearchStrategy,
    hybrid_alpha: Option<f32>,
) -> String {
    let text = quote(&query.text);
    let operator = match strategy {
        SearchStrategy::Keyword => format!("bm25: {{ query: {text} }}"),
        SearchStrategy::Dense => format!("nearText: {{ concepts: [{text}] }}"),
        SearchStrategy::Hybrid => match hybrid_alpha {
            Some(alpha) => format!("hybrid: {{ query: {text}, alpha: {alpha} }}"),
            None => format!("hybrid: {{ query: {text} }}"),
        },
    };

    format!(
        "{{ Get {{ {class}( {operator} where: {{ path: [\"lang\"], operator: Equal, valueString: {lang} }} limit: {limit} ) {{ {PROPERTIES} }} }} }}",
        class = class_name,
        lang = quote(query.language.code()),
        limit = query.result_count,
    )
}

/// GraphQL string literal with escaping.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
