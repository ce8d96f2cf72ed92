//! Shared HTTP plumbing for the Cohere clients: one preconfigured
//! `reqwest::Client` per service and a JSON `POST` helper with uniform
//! status/decode/timeout handling.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};

use crate::config::cohere_config::CohereConfig;
use crate::error_handler::{
    CohereError, ConfigError, Result, make_snippet, map_transport, validate_http_endpoint,
};

/// A configured client bound to one API base URL.
#[derive(Debug, Clone)]
pub(crate) struct CohereHttp {
    client: reqwest::Client,
    base: String,
    timeout: Duration,
}

impl CohereHttp {
    /// Validates the endpoint, installs auth headers and the timeout.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if the endpoint is not http(s)
    /// - [`ConfigError::MissingVar`] if the API key is empty
    /// - [`CohereError::HttpTransport`] if the client cannot be built
    pub(crate) fn new(cfg: &CohereConfig) -> Result<Self> {
        let endpoint = cfg.endpoint.trim();
        validate_http_endpoint("COHERE_URL", endpoint)?;
        if cfg.api_key.trim().is_empty() {
            return Err(ConfigError::MissingVar("COHERE_API_KEY").into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key.trim()))
            .map_err(|_| ConfigError::InvalidFormat {
                var: "COHERE_API_KEY",
                reason: "must be a valid header value",
            })?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base: endpoint.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Absolute URL for an API path such as `/v1/rerank`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// POSTs `body` as JSON and decodes a JSON response of type `R`.
    ///
    /// # Errors
    /// - [`CohereError::Timeout`] when the client timeout elapses
    /// - [`CohereError::HttpTransport`] for other client/network failures
    /// - [`CohereError::HttpStatus`] for non-2xx responses
    /// - [`CohereError::Decode`] if the payload does not match `R`
    pub(crate) async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let started = Instant::now();
        debug!("POST {url}");

        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| map_transport(e, self.timeout))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "Cohere returned non-success status"
            );
            return Err(CohereError::HttpStatus {
                status,
                url: url.to_string(),
                snippet,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| map_transport(e, self.timeout))?;

        serde_json::from_slice::<R>(&bytes).map_err(|e| {
            error!(
                error = %e,
                %url,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode Cohere response"
            );
            CohereError::Decode(format!("serde error: {e}"))
        })
    }
}
