//! Query parameters shared by the three pre-search strategies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::wiki_search_error::{Result, WikiSearchError};
use crate::structs::language::Language;

/// Pre-search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// BM25 keyword match.
    Keyword,
    /// `nearText` vector match, vectorized on the store side.
    Dense,
    /// Store-side fusion of keyword and vector scores.
    Hybrid,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::Keyword,
        SearchStrategy::Dense,
        SearchStrategy::Hybrid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchStrategy::Keyword => "keyword",
            SearchStrategy::Dense => "dense",
            SearchStrategy::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStrategy {
    type Err = WikiSearchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" | "bm25" | "lexical" => Ok(SearchStrategy::Keyword),
            "dense" | "neartext" | "semantic" => Ok(SearchStrategy::Dense),
            "hybrid" => Ok(SearchStrategy::Hybrid),
            other => Err(WikiSearchError::InvalidQuery(format!(
                "unknown search strategy: '{other}'"
            ))),
        }
    }
}

/// One user query. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub language: Language,
    /// Upper bound on returned candidates.
    pub result_count: usize,
    pub strategy: SearchStrategy,
}

impl SearchQuery {
    pub const DEFAULT_RESULT_COUNT: usize = 10;

    /// Query with the default language and result count. Surrounding
    /// whitespace is stripped from `text`.
    pub fn new(text: impl Into<String>, strategy: SearchStrategy) -> Self {
        let text: String = text.into();
        Self {
            text: text.trim().to_string(),
            language: Language::default(),
            result_count: Self::DEFAULT_RESULT_COUNT,
            strategy,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_result_count(mut self, result_count: usize) -> Self {
        self.result_count = result_count;
        self
    }

    /// Checks preconditions every strategy relies on.
    ///
    /// # Errors
    /// [`WikiSearchError::InvalidQuery`] for blank text or a zero result count.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(WikiSearchError::InvalidQuery(
                "query text must not be empty".into(),
            ));
        }
        if self.result_count == 0 {
            return Err(WikiSearchError::InvalidQuery(
                "result_count must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let q = SearchQuery::new("capital of France", SearchStrategy::Hybrid);
        assert_eq!(q.language, Language::En);
        assert_eq!(q.result_count, 10);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn text_is_trimmed_once_at_construction() {
        let q = SearchQuery::new("  capital of France \n", SearchStrategy::Dense);
        assert_eq!(q.text, "capital of France");
    }

    #[test]
    fn blank_text_and_zero_count_are_rejected() {
        let blank = SearchQuery::new("   ", SearchStrategy::Keyword);
        assert!(matches!(
            blank.validate(),
            Err(WikiSearchError::InvalidQuery(_))
        ));

        let zero = SearchQuery::new("x", SearchStrategy::Keyword).with_result_count(0);
        assert!(matches!(zero.validate(), Err(WikiSearchError::InvalidQuery(_))));
    }

    #[test]
    fn strategy_aliases() {
        assert_eq!("BM25".parse::<SearchStrategy>().unwrap(), SearchStrategy::Keyword);
        assert_eq!("nearText".parse::<SearchStrategy>().unwrap(), SearchStrategy::Dense);
        assert_eq!("hybrid".parse::<SearchStrategy>().unwrap(), SearchStrategy::Hybrid);
        assert!("fuzzy".parse::<SearchStrategy>().is_err());
    }
}
