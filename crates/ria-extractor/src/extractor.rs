//! Core PatternExtractor implementation

use crate::citations::scan_citations;
use crate::commands::CommandMatcher;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use ria_domain::Citation;
use std::sync::LazyLock;
use tracing::debug;

static DEFAULT_EXTRACTOR: LazyLock<PatternExtractor> = LazyLock::new(|| {
    PatternExtractor::new(ExtractorConfig::default()).expect("default whitelist compiles")
});

/// Stateless scanner for citation markers and command lines
///
/// Holds only compiled patterns, so one instance can be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    commands: CommandMatcher,
    config: ExtractorConfig,
}

impl PatternExtractor {
    /// Create an extractor for the given command whitelist
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let commands = CommandMatcher::new(&config.command_tokens)?;
        Ok(Self { commands, config })
    }

    /// The extractor used by the free functions (default whitelist)
    pub fn shared() -> &'static PatternExtractor {
        &DEFAULT_EXTRACTOR
    }

    /// Configuration this extractor was built from
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Scan markdown for citation markers
    pub fn extract_citations(&self, markdown: &str) -> Vec<Citation> {
        let citations = scan_citations(markdown);
        debug!("Extracted {} citations", citations.len());
        citations
    }

    /// Scan markdown for whitelisted command lines
    pub fn extract_commands(&self, markdown: &str) -> Vec<String> {
        let commands = self.commands.scan(markdown);
        debug!("Extracted {} commands", commands.len());
        commands
    }
}

/// Scan markdown for `[source | p.pages | chunk: id]` markers.
///
/// Returns citations in order of first occurrence, de-duplicated by
/// `(source, page, evidence_id)`. Never fails.
pub fn extract_citations(markdown: &str) -> Vec<Citation> {
    PatternExtractor::shared().extract_citations(markdown)
}

/// Collect trimmed lines starting with a default-whitelisted command token.
///
/// Returns lines in order of first occurrence, de-duplicated by exact match.
pub fn extract_commands(markdown: &str) -> Vec<String> {
    PatternExtractor::shared().extract_commands(markdown)
}
