//! RIA Extractor
//!
//! Pattern matching over answer markdown.
//!
//! # Overview
//!
//! Backend answers are free-form markdown with two kinds of embedded
//! structure this crate recovers:
//!
//! - **Citation markers** of the form `[doc.pdf | p.1-2 | chunk: c42]`
//! - **Command lines** starting with a whitelisted operational verb
//!   (`systemctl`, `stopaiw`, `ps`, ...)
//!
//! Both scans are pure and total: any input, including the empty string,
//! yields a (possibly empty) list.
//!
//! # Example Usage
//!
//! ```
//! use ria_extractor::{extract_citations, extract_commands};
//!
//! let markdown = "Stop the server first [admin.pdf | p.4 | chunk: s1]\n\nstopaiw\n";
//!
//! let citations = extract_citations(markdown);
//! assert_eq!(citations[0].evidence_id, "s1");
//!
//! let commands = extract_commands(markdown);
//! assert_eq!(commands, vec!["stopaiw".to_string()]);
//! ```
//!
//! A custom whitelist is a configuration change:
//!
//! ```
//! use ria_extractor::{ExtractorConfig, PatternExtractor};
//!
//! let config = ExtractorConfig::with_tokens(["docker"]);
//! let extractor = PatternExtractor::new(config).unwrap();
//! assert_eq!(extractor.extract_commands("docker ps\nps aux"), vec!["docker ps".to_string()]);
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod citations;
mod commands;
mod extractor;

pub use error::ExtractorError;
pub use config::{ExtractorConfig, DEFAULT_COMMAND_TOKENS};
pub use extractor::{extract_citations, extract_commands, PatternExtractor};
