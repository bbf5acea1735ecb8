//! Health command implementation.

use super::client;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the health command.
pub async fn execute_health(config: &Config, formatter: &Formatter) -> Result<()> {
    let client = client(config, None)?;
    let health = client.health().await?;

    println!("{}", formatter.format_health(client.endpoint(), &health)?);
    if health.ok {
        Ok(())
    } else {
        Err(CliError::Unhealthy(client.endpoint().to_string()))
    }
}
