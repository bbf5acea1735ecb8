//! Render command implementation.

use super::{normalizer, read_payload};
use crate::cli::RenderArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the render command.
pub async fn execute_render(args: RenderArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let body = read_payload(args.file.as_deref())?;
    println!("{}", render_body(&body, config, formatter)?);
    Ok(())
}

/// Normalize a response body and format it.
pub fn render_body(body: &str, config: &Config, formatter: &Formatter) -> Result<String> {
    let answer = normalizer(config)?.normalize_body(body);
    formatter.format_answer(&answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_render_plain_text_body() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = render_body("not json at all", &Config::default(), &formatter).unwrap();
        assert_eq!(output, "not json at all");
    }

    #[test]
    fn test_render_empty_body() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = render_body("", &Config::default(), &formatter).unwrap();
        assert_eq!(output, "No response returned.");
    }
}
