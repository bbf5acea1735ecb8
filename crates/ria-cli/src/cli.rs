//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// RIA - Ask the documentation backend and trace every answer to its evidence.
#[derive(Debug, Parser)]
#[command(name = "ria")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend endpoint, overriding the configuration file
    #[arg(long, global = true, env = "RIA_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format (the normalized answer)
    Json,
    /// Quiet format (answer text only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask the backend a question and render the answer
    Ask(AskArgs),

    /// Render a saved payload from a file or stdin
    Render(RenderArgs),

    /// Follow a citation to its evidence card
    Cite(CiteArgs),

    /// Check that the backend is up
    Health,

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Question to ask
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Request timeout in seconds, overriding the configuration file
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

impl AskArgs {
    /// The question words joined into one question
    pub fn question(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for the render command.
#[derive(Debug, Parser)]
pub struct RenderArgs {
    /// Payload file; reads stdin when absent or "-"
    pub file: Option<PathBuf>,
}

/// Arguments for the cite command.
#[derive(Debug, Parser)]
pub struct CiteArgs {
    /// Evidence id from a citation marker (the part after "chunk:")
    pub evidence_id: String,

    /// Payload file; reads stdin when absent or "-"
    pub file: Option<PathBuf>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write the effective configuration to the config path
    #[arg(long)]
    pub init: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
