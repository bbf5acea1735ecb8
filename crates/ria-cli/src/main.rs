//! RIA CLI - Ask the documentation backend from the terminal.

use clap::Parser;
use ria_cli::commands;
use ria_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> ria_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(endpoint) = cli.endpoint {
        config.backend.endpoint = endpoint;
        config.validate()?;
    }

    let format = cli.format.map(Into::into).unwrap_or(config.display.format);
    let color_enabled = !cli.no_color && config.display.color;
    let formatter =
        Formatter::new(format, color_enabled).with_snippet_width(config.display.snippet_width);

    match cli.command {
        Command::Ask(args) => commands::execute_ask(args, &config, &formatter).await?,
        Command::Render(args) => commands::execute_render(args, &config, &formatter).await?,
        Command::Cite(args) => commands::execute_cite(args, &config, &formatter).await?,
        Command::Health => commands::execute_health(&config, &formatter).await?,
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await?
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
