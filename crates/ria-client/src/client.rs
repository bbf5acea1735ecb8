//! HTTP client for the answer backend

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default backend endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Default timeout for a whole request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Leading text of the answer shown when the backend cannot be used
pub const BACKEND_UNAVAILABLE: &str =
    "The backend could not be reached, so no grounded answer is available.";

/// Longest error body kept in [`ClientError::Status`], in characters
const MAX_ERROR_BODY: usize = 512;

/// Request body for the ask endpoint
#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

/// Response from the health endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Whether the backend reports itself usable
    #[serde(default)]
    pub ok: bool,
    /// Service name, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

/// Client for the question answering backend
///
/// Every call is bounded by one timeout covering connect, send and body.
#[derive(Debug, Clone)]
pub struct AskClient {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl AskClient {
    /// Create a client for `endpoint` (an `http://` or `https://` base URL)
    ///
    /// # Examples
    ///
    /// ```
    /// use ria_client::AskClient;
    /// use std::time::Duration;
    ///
    /// let client = AskClient::new("http://127.0.0.1:8000/", Duration::from_secs(5)).unwrap();
    /// assert_eq!(client.endpoint(), "http://127.0.0.1:8000");
    /// ```
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into().trim().trim_end_matches('/').to_string();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ClientError::InvalidEndpoint(endpoint));
        }

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            endpoint,
            client,
            timeout,
        })
    }

    /// Create a client for [`DEFAULT_ENDPOINT`] with the default timeout
    pub fn default_endpoint() -> Result<Self> {
        Self::new(DEFAULT_ENDPOINT, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Base URL, without a trailing slash
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a question and return the raw answer payload.
    ///
    /// A JSON body is returned as parsed; any other body comes back as a
    /// string value and an empty body as `null`, so the result always fits
    /// the normalizer's input domain.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The backend cannot be reached
    /// - The timeout elapses first
    /// - The backend answers with a non-success status
    pub async fn ask(&self, question: &str) -> Result<Value> {
        let url = format!("{}/ask", self.endpoint);
        info!("Asking backend at {}", url);

        tokio::time::timeout(self.timeout, self.post_question(&url, question))
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))?
    }

    /// Like [`ask`](Self::ask), but any failure yields [`fallback_payload`]
    pub async fn ask_or_fallback(&self, question: &str) -> Value {
        match self.ask(question).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Backend request failed, using fallback answer: {}", e);
                fallback_payload(&e)
            }
        }
    }

    /// Query the backend's health endpoint
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.endpoint);
        debug!("Checking backend health at {}", url);

        tokio::time::timeout(self.timeout, self.get_health(&url))
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))?
    }

    async fn post_question(&self, url: &str, question: &str) -> Result<Value> {
        let response = self
            .client
            .post(url)
            .json(&AskRequest { question })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        debug!("Backend answered with {} bytes", body.len());
        Ok(parse_body(&body))
    }

    async fn get_health(&self, url: &str) -> Result<HealthStatus> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Backend-native payload standing in for an answer that never arrived.
///
/// Metrics are null and both retrieval rounds are empty. The same error
/// always produces the same payload.
pub fn fallback_payload(error: &ClientError) -> Value {
    json!({
        "answer_markdown": format!("{}\n\n{}", BACKEND_UNAVAILABLE, error),
        "verification": {
            "citation_coverage": null,
            "unsupported_claims": null
        },
        "round1": [],
        "round2": []
    })
}

fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY).collect()
}
