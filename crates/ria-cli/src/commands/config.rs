//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    if args.init {
        config.save_to(path)?;
        println!("{}", formatter.success(&format!("Wrote {}", path.display())));
        return Ok(());
    }

    println!("{}", formatter.info(&format!("Configuration file: {}", path.display())));
    if !path.exists() {
        println!("{}", formatter.info("File not found, showing defaults"));
    }
    println!("{}", config.to_toml()?);
    Ok(())
}
