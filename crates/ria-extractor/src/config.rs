//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Leading tokens recognized as executable instructions by default
pub const DEFAULT_COMMAND_TOKENS: &[&str] = &[
    "stopaiw",
    "startaiw",
    "systemctl",
    "service",
    "sudo",
    "ps",
    "kill",
    "pkill",
    "killall",
    "shutdown",
    "reboot",
    "halt",
    "poweroff",
];

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// A trimmed line is a command when it starts with one of these tokens
    /// followed by whitespace or end of line. Matching is case-sensitive.
    #[serde(default = "default_command_tokens")]
    pub command_tokens: Vec<String>,
}

impl ExtractorConfig {
    /// Configuration with an explicit token whitelist
    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command_tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.command_tokens.is_empty() {
            return Err("command_tokens must not be empty".to_string());
        }
        for token in &self.command_tokens {
            if token.is_empty() {
                return Err("command_tokens must not contain empty tokens".to_string());
            }
            if token.chars().any(char::is_whitespace) {
                return Err(format!("command token '{}' contains whitespace", token));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::with_tokens(DEFAULT_COMMAND_TOKENS.iter().copied())
    }
}

fn default_command_tokens() -> Vec<String> {
    DEFAULT_COMMAND_TOKENS.iter().map(|t| t.to_string()).collect()
}
