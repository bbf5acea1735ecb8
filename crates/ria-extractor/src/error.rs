//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while building an extractor
///
/// Extraction itself never fails; only configuration can be rejected.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The command whitelist could not be compiled into a pattern
    #[error("Invalid command pattern: {0}")]
    InvalidPattern(String),
}

impl From<regex::Error> for ExtractorError {
    fn from(e: regex::Error) -> Self {
        ExtractorError::InvalidPattern(e.to_string())
    }
}
