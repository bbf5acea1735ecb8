//! RIA Client
//!
//! HTTP transport to the answer backend.
//!
//! The client never hands partial data to the caller: a request either yields
//! the backend's complete body or fails as a whole. [`AskClient::ask_or_fallback`]
//! turns every failure into a deterministic backend-shaped payload, so the
//! normalizer always has something to render.
//!
//! # Example Usage
//!
//! ```no_run
//! use ria_client::AskClient;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), ria_client::ClientError> {
//! let client = AskClient::new("http://127.0.0.1:8000", Duration::from_secs(60))?;
//! let payload = client.ask_or_fallback("How do I stop RPD?").await;
//! println!("{}", payload);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;

pub use client::{
    fallback_payload, AskClient, HealthStatus, BACKEND_UNAVAILABLE, DEFAULT_ENDPOINT,
    DEFAULT_TIMEOUT_SECS,
};
pub use error::{ClientError, Result};
