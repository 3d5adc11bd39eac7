use std::time::Duration;

use promptbuddy::backend::ScoreTag;
use promptbuddy::state::ScoredPromptRecord;

use super::pipeline_harness::{Call, Harness, QUIET};

#[tokio::test(start_paused = true)]
async fn typing_burst_scores_last_content_once() {
    let h = Harness::start().await;

    h.field.type_text("a");
    tokio::time::sleep(Duration::from_millis(200)).await;
    h.field.type_text("ab");
    tokio::time::sleep(Duration::from_millis(200)).await;
    h.field.type_text("abc");

    // Still inside the quiet window measured from the last edit.
    tokio::time::sleep(QUIET - Duration::from_millis(100)).await;
    assert!(h.backend.calls().is_empty());

    tokio::time::sleep(Duration::from_millis(200)).await;
    let calls = h.backend.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.contains(&Call::Score("abc".into())));
    assert!(calls.contains(&Call::Detect("abc".into())));
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stabilized_prompt_lands_in_score_history() {
    let h = Harness::start().await;
    h.backend.score_as("Write a poem", ScoreTag::High);

    h.type_and_settle("Write a poem").await;

    let state = h.ui.last();
    assert_eq!(state.current_score, Some(ScoreTag::High));
    assert_eq!(
        state.score_history.first(),
        Some(&ScoredPromptRecord {
            text: "Write a poem".into(),
            score: ScoreTag::High,
        })
    );
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn unchanged_text_issues_no_requests() {
    let h = Harness::start().await;

    h.type_and_settle("hello").await;
    h.type_and_settle("hello  ").await;
    h.type_and_settle("  hello").await;

    assert_eq!(h.backend.score_calls(), vec!["hello".to_string()]);
    assert_eq!(h.backend.calls().len(), 2);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn clearing_the_field_hides_indicators_without_requests() {
    let h = Harness::start().await;

    h.type_and_settle("my ssn is 123-45-6789").await;
    let state = h.ui.last();
    assert!(state.pii_alert);
    assert!(state.current_score.is_some());

    h.type_and_settle("   ").await;
    let state = h.ui.last();
    assert!(!state.pii_alert);
    assert_eq!(state.current_score, None);
    assert_eq!(h.backend.calls().len(), 2);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn score_history_keeps_five_most_recent() {
    let h = Harness::start().await;

    for i in 1..=6 {
        h.type_and_settle(&format!("prompt {i}")).await;
    }

    let texts: Vec<String> = h
        .ui
        .last()
        .score_history
        .into_iter()
        .map(|r| r.text)
        .collect();
    assert_eq!(
        texts,
        vec!["prompt 6", "prompt 5", "prompt 4", "prompt 3", "prompt 2"]
    );
    h.stop().await;
}
