//! Citation marker scanning

use regex::Regex;
use ria_domain::Citation;
use std::collections::HashSet;
use std::sync::LazyLock;

/// `[source | p.pages | chunk: id]`, tolerant of spacing and a missing `p.`
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*([^\]|]+?)\s*\|\s*(?:p\.\s*)?([0-9-]+)\s*\|\s*(?i:chunk)\s*:\s*([^\]]+?)\s*\]")
        .expect("citation pattern compiles")
});

/// Scan markdown for citation markers.
///
/// Results keep first-occurrence order and drop repeats of the same
/// `(source, page, evidence_id)` triple.
pub(crate) fn scan_citations(markdown: &str) -> Vec<Citation> {
    let mut seen = HashSet::new();
    let mut citations = Vec::new();

    for caps in CITATION_RE.captures_iter(markdown) {
        let citation = Citation::new(
            caps[1].trim(),
            caps[2].trim(),
            caps[3].trim(),
        );
        if seen.insert(citation.dedup_key()) {
            citations.push(citation);
        }
    }

    citations
}
