//! Configuration layer: reads Weaviate connection settings from environment
//! variables.

use std::fmt;

use crate::errors::wiki_search_error::{Result, WikiSearchError};

pub const DEFAULT_URL: &str = "https://cohere-demo.weaviate.network";
pub const DEFAULT_CLASS: &str = "Articles";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Weaviate connectivity and query parameters.
#[derive(Clone, PartialEq)]
pub struct WeaviateConfig {
    /// Base URL, e.g. `https://cohere-demo.weaviate.network`.
    pub url: String,
    /// Sent as `Authorization: Bearer` when present.
    pub api_key: Option<String>,
    /// Collection class queried under `Get`.
    pub class_name: String,
    pub timeout_secs: u64,
    /// Hybrid weighting; left to the store default when unset.
    pub hybrid_alpha: Option<f32>,
    /// Forwarded as `X-Cohere-Api-Key` for the store-side vectorizer.
    pub cohere_api_key: Option<String>,
}

impl Default for WeaviateConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            api_key: None,
            class_name: DEFAULT_CLASS.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            hybrid_alpha: None,
            cohere_api_key: None,
        }
    }
}

impl fmt::Debug for WeaviateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeaviateConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("class_name", &self.class_name)
            .field("timeout_secs", &self.timeout_secs)
            .field("hybrid_alpha", &self.hybrid_alpha)
            .field(
                "cohere_api_key",
                &self.cohere_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl WeaviateConfig {
    /// Build configuration from the process environment.
    ///
    /// Environment variables used:
    /// - `WEAVIATE_URL` (default: `https://cohere-demo.weaviate.network`)
    /// - `WEAVIATE_API_KEY` (optional)
    /// - `WEAVIATE_CLASS` (default: `Articles`)
    /// - `WEAVIATE_TIMEOUT_SECS` (default: 30)
    /// - `WEAVIATE_HYBRID_ALPHA` (optional, `0.0..=1.0`)
    /// - `COHERE_API_KEY` (optional here, forwarded to the vectorizer)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|k: &str| std::env::var(k).ok())
    }

    /// Same as [`WeaviateConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let url = get("WEAVIATE_URL").unwrap_or_else(|| DEFAULT_URL.to_string());
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(WikiSearchError::InvalidConfig(
                "WEAVIATE_URL must start with http:// or https://".into(),
            ));
        }

        let class_name = get("WEAVIATE_CLASS").unwrap_or_else(|| DEFAULT_CLASS.to_string());
        if !is_graphql_name(&class_name) {
            return Err(WikiSearchError::InvalidConfig(format!(
                "WEAVIATE_CLASS '{class_name}' is not a valid GraphQL name"
            )));
        }

        let timeout_secs = match get("WEAVIATE_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|_| WikiSearchError::EnvParse {
                key: "WEAVIATE_TIMEOUT_SECS",
                value: v.clone(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(WikiSearchError::InvalidConfig(
                "WEAVIATE_TIMEOUT_SECS must be > 0".into(),
            ));
        }

        let hybrid_alpha = match get("WEAVIATE_HYBRID_ALPHA") {
            Some(v) => {
                let alpha = v.parse::<f32>().map_err(|_| WikiSearchError::EnvParse {
                    key: "WEAVIATE_HYBRID_ALPHA",
                    value: v.clone(),
                })?;
                if !(0.0..=1.0).contains(&alpha) {
                    return Err(WikiSearchError::InvalidConfig(
                        "WEAVIATE_HYBRID_ALPHA must be within 0.0..=1.0".into(),
                    ));
                }
                Some(alpha)
            }
            None => None,
        };

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            api_key: get("WEAVIATE_API_KEY"),
            class_name,
            timeout_secs,
            hybrid_alpha,
            cohere_api_key: get("COHERE_API_KEY"),
        })
    }
}

/// `[_A-Za-z][_0-9A-Za-z]*`
fn is_graphql_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = WeaviateConfig::from_lookup(&lookup_from(&[])).unwrap();
        assert_eq!(cfg, WeaviateConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = WeaviateConfig::from_lookup(&lookup_from(&[
            ("WEAVIATE_URL", "http://localhost:8080/"),
            ("WEAVIATE_API_KEY", "wv"),
            ("WEAVIATE_CLASS", "Wiki_2023"),
            ("WEAVIATE_TIMEOUT_SECS", "5"),
            ("WEAVIATE_HYBRID_ALPHA", "0.75"),
            ("COHERE_API_KEY", "co"),
        ]))
        .unwrap();

        assert_eq!(cfg.url, "http://localhost:8080");
        assert_eq!(cfg.api_key.as_deref(), Some("wv"));
        assert_eq!(cfg.class_name, "Wiki_2023");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.hybrid_alpha, Some(0.75));
        assert_eq!(cfg.cohere_api_key.as_deref(), Some("co"));
    }

    #[test]
    fn rejects_bad_values() {
        for pairs in [
            [("WEAVIATE_URL", "localhost:8080")],
            [("WEAVIATE_CLASS", "Articles{ }")],
            [("WEAVIATE_TIMEOUT_SECS", "0")],
            [("WEAVIATE_HYBRID_ALPHA", "1.5")],
        ] {
            assert!(
                WeaviateConfig::from_lookup(&lookup_from(&pairs)).is_err(),
                "{pairs:?} should be rejected"
            );
        }

        let err = WeaviateConfig::from_lookup(&lookup_from(&[("WEAVIATE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            WikiSearchError::EnvParse { key: "WEAVIATE_TIMEOUT_SECS", .. }
        ));
    }

    #[test]
    fn debug_hides_keys() {
        let cfg = WeaviateConfig {
            api_key: Some("secret-1".into()),
            cohere_api_key: Some("secret-2".into()),
            ..WeaviateConfig::default()
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret"));
    }
}
