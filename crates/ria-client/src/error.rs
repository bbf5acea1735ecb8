//! Error types for the backend client.

use std::time::Duration;
use thiserror::Error;

/// Transport failures talking to the answer backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint is not a usable http(s) URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Connection error (refused, DNS, TLS)
    #[error("Connection error: {0}")]
    Connection(String),

    /// No complete response within the configured timeout
    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Backend answered with a non-success status
    #[error("Backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Response could not be read or had the wrong shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            ClientError::Connection(e.to_string())
        } else if e.is_builder() {
            ClientError::InvalidEndpoint(e.to_string())
        } else if e.is_decode() || e.is_body() {
            ClientError::InvalidResponse(e.to_string())
        } else {
            ClientError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ClientError::Timeout(Duration::from_millis(1500)).to_string(),
            "Request timed out after 1.5s"
        );
        let status = ClientError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(status.to_string(), "Backend returned HTTP 502: bad gateway");
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(ClientError::from(err), ClientError::InvalidResponse(_)));
    }
}
