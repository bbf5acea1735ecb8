//! Cite command implementation.

use super::{normalizer, read_payload};
use crate::cli::CiteArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use ria_linker::{citing_steps, AnswerSession};

/// Execute the cite command.
pub async fn execute_cite(args: CiteArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let body = read_payload(args.file.as_deref())?;
    println!("{}", cite_body(&body, &args.evidence_id, config, formatter)?);
    Ok(())
}

/// Follow `evidence_id` within a response body and format the card.
///
/// An id with no evidence is reported, not treated as an error.
pub fn cite_body(
    body: &str,
    evidence_id: &str,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let normalizer = normalizer(config)?;
    let answer = normalizer.normalize_body(body);
    let cited_by = citing_steps(&answer, evidence_id);

    let mut session = AnswerSession::new(normalizer, config.highlight());
    session.load(answer);

    match session.navigate(evidence_id) {
        Some(navigation) => formatter.format_evidence_card(&navigation, &cited_by),
        None => Ok(formatter.warning(&format!(
            "No evidence with id '{}' in this answer",
            evidence_id
        ))),
    }
}
