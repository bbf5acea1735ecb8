//! Citation → evidence linking over normalized backend answers

use ria_linker::{citing_steps, resolve, AnswerSession, EvidenceIndex};
use ria_normalizer::normalize;
use serde_json::json;
use std::time::Duration;

#[test]
fn test_every_citation_resolves_or_is_reported_dangling() {
    let answer = normalize(&json!({
        "answer_markdown": "- Red Hat 8 [os.pdf | p.3 | chunk: os1]\n\
                            - Windows Server 2019 [os.pdf | p.4 | chunk: os2]\n\
                            - SLES 15 [os.pdf | p.5 | chunk: os9]",
        "round1": [
            {"chunk_id": "os1", "doc_name": "os.pdf", "page_start": 3, "page_end": 3},
            {"chunk_id": "os2", "doc_name": "os.pdf", "page_start": 4, "page_end": 4}
        ]
    }));
    let index = EvidenceIndex::new(&answer.evidence);

    let resolved: Vec<_> = answer.answer.steps[0]
        .citations
        .iter()
        .filter_map(|c| resolve(&c.evidence_id, &answer.evidence))
        .map(|e| e.id.clone().unwrap())
        .collect();
    assert_eq!(resolved, vec!["os1", "os2"]);

    let dangling: Vec<_> = index.dangling(&answer).iter().map(|c| c.evidence_id.as_str()).collect();
    assert_eq!(dangling, vec!["os9"]);
    assert_eq!(citing_steps(&answer, "os2"), vec![0]);
}

#[test]
fn test_duplicate_ids_first_match_wins() {
    let answer = normalize(&json!({
        "round1": [{"chunk_id": "dup", "doc_name": "first.pdf"}],
        "round2": [{"chunk_id": "dup", "doc_name": "second.pdf"}]
    }));
    assert_eq!(resolve("dup", &answer.evidence).unwrap().title, "first.pdf");

    let index = EvidenceIndex::new(&answer.evidence);
    assert_eq!(index.position("dup"), Some(0));
    assert_eq!(index.duplicate_ids(), ["dup".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_navigation_keeps_one_pending_clear_per_entry() {
    let mut session = AnswerSession::default();
    session.submit(&json!({
        "answer_markdown": "[a.pdf | p.1 | chunk: a] [b.pdf | p.2 | chunk: b]",
        "round1": [{"chunk_id": "a"}, {"chunk_id": "b"}]
    }));

    for _ in 0..5 {
        session.navigate("a");
        session.navigate("b");
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    assert_eq!(session.highlighter().pending_clears(), 2);
    assert!(session.is_highlighted("a"));

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(session.highlighter().highlighted().is_empty());
    assert_eq!(session.highlighter().pending_clears(), 0);
}
