//! RIA CLI library.
//!
//! Configuration, command execution and terminal rendering for the `ria`
//! binary. The rendering mirrors the answer view: metrics, answer steps with
//! citation chips, extracted commands and the evidence table.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
