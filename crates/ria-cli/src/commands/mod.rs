//! Command implementations.

pub mod ask;
pub mod cite;
pub mod config;
pub mod health;
pub mod render;

pub use self::ask::execute_ask;
pub use self::cite::execute_cite;
pub use self::config::execute_config;
pub use self::health::execute_health;
pub use self::render::execute_render;

use crate::config::Config;
use crate::error::{CliError, Result};
use ria_client::AskClient;
use ria_extractor::PatternExtractor;
use ria_normalizer::Normalizer;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Normalizer using the configured command whitelist.
pub fn normalizer(config: &Config) -> Result<Normalizer> {
    let extractor = PatternExtractor::new(config.extractor.clone())?;
    Ok(Normalizer::new(extractor))
}

/// Backend client for the configured endpoint.
pub fn client(config: &Config, timeout: Option<Duration>) -> Result<AskClient> {
    let timeout = timeout.unwrap_or_else(|| config.timeout());
    Ok(AskClient::new(&config.backend.endpoint, timeout)?)
}

/// Read a payload body from `file`, or from stdin when absent or "-".
pub fn read_payload(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|e| {
                CliError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
            })
        }
        _ => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}
