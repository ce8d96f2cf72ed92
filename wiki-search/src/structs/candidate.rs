use serde::{Deserialize, Serialize};

use crate::structs::language::Language;

/// A single article returned by pre-search, in backend relevance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub text: String,
    pub url: String,
    pub language: Language,
    /// Page view count, when the object carries one.
    pub views: Option<u64>,
    /// Keyword/hybrid score reported by the store.
    pub score: Option<f32>,
    /// Vector distance reported by dense search.
    pub distance: Option<f32>,
}
