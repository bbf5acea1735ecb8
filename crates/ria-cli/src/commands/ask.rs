//! Ask command implementation.

use super::{client, normalizer};
use crate::cli::AskArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::time::Duration;
use tracing::info;

/// Execute the ask command.
///
/// Transport failures are rendered as the fallback answer rather than
/// returned as errors.
pub async fn execute_ask(args: AskArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let question = args.question();
    let client = client(config, args.timeout.map(Duration::from_secs))?;
    let normalizer = normalizer(config)?;

    info!("Question: {}", question);
    let payload = client.ask_or_fallback(&question).await;
    let answer = normalizer.normalize(&payload);

    println!("{}", formatter.format_answer(&answer)?);
    Ok(())
}
