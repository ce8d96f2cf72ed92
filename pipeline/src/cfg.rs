//! Runtime defaults for the orchestrator, loaded from environment variables.

use crate::error::PipelineError;
use crate::prompt::ContextBudget;

/// Per-request defaults. Callers may override each one in a request.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Pre-search `limit` when the request does not carry one.
    pub result_count: usize,
    pub rerank: bool,
    pub generate: bool,
    pub context: ContextBudget,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            result_count: 10,
            rerank: true,
            generate: true,
            context: ContextBudget::default(),
        }
    }
}

impl PipelineConfig {
    /// Build from the process environment.
    ///
    /// - `RAG_RESULT_COUNT` (default 10)
    /// - `RAG_RERANK` (default true)
    /// - `RAG_GENERATE` (default true)
    /// - `RAG_CONTEXT_MAX_CHARS` (default 6000)
    /// - `RAG_CONTEXT_MAX_DOCS` (optional)
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(&|k: &str| std::env::var(k).ok())
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, PipelineError> {
        let dflt = Self::default();

        let result_count = parse(lookup, "RAG_RESULT_COUNT")?.unwrap_or(dflt.result_count);
        if result_count == 0 {
            return Err(invalid("RAG_RESULT_COUNT must be > 0"));
        }
        let max_chars =
            parse(lookup, "RAG_CONTEXT_MAX_CHARS")?.unwrap_or(dflt.context.max_chars);
        if max_chars == 0 {
            return Err(invalid("RAG_CONTEXT_MAX_CHARS must be > 0"));
        }
        let max_documents = parse::<usize>(lookup, "RAG_CONTEXT_MAX_DOCS")?;
        if max_documents == Some(0) {
            return Err(invalid("RAG_CONTEXT_MAX_DOCS must be > 0 when set"));
        }

        Ok(Self {
            result_count,
            rerank: parse_bool(lookup, "RAG_RERANK")?.unwrap_or(dflt.rerank),
            generate: parse_bool(lookup, "RAG_GENERATE")?.unwrap_or(dflt.generate),
            context: ContextBudget {
                max_chars,
                max_documents,
            },
        })
    }
}

fn get(lookup: &dyn Fn(&str) -> Option<String>, k: &str) -> Option<String> {
    lookup(k)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse<T: std::str::FromStr>(
    lookup: &dyn Fn(&str) -> Option<String>,
    k: &str,
) -> Result<Option<T>, PipelineError> {
    match get(lookup, k) {
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| invalid(&format!("{k} has an invalid value: '{v}'"))),
        None => Ok(None),
    }
}

fn parse_bool(
    lookup: &dyn Fn(&str) -> Option<String>,
    k: &str,
) -> Result<Option<bool>, PipelineError> {
    match get(lookup, k).map(|v| v.to_ascii_lowercase()) {
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(invalid(&format!("{k} must be a boolean, got '{v}'"))),
        },
        None => Ok(None),
    }
}

fn invalid(msg: &str) -> PipelineError {
    PipelineError::Config(msg.to_string())
}
