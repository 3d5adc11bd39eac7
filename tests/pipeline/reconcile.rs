use std::time::Duration;

use promptbuddy::backend::ScoreTag;
use promptbuddy::pipeline::AgentCommand;

use super::pipeline_harness::Harness;

#[tokio::test(start_paused = true)]
async fn older_response_arriving_last_is_discarded() {
    let h = Harness::start().await;
    h.backend.score_as("first", ScoreTag::Low);
    h.backend.score_as("second", ScoreTag::High);
    h.backend.delay("first", Duration::from_secs(3));

    h.type_and_settle("first").await;
    h.type_and_settle("second").await;
    assert_eq!(h.ui.last().current_score, Some(ScoreTag::High));

    // Let the slow response for "first" come back.
    tokio::time::sleep(Duration::from_secs(4)).await;

    let state = h.ui.last();
    assert_eq!(state.current_score, Some(ScoreTag::High));
    let texts: Vec<&str> = state.score_history.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["second"]);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stale_sensitive_flag_never_raises_alert() {
    let h = Harness::start().await;
    h.backend
        .delay("my ssn is 123-45-6789", Duration::from_secs(3));

    h.type_and_settle("my ssn is 123-45-6789").await;
    h.type_and_settle("never mind").await;
    tokio::time::sleep(Duration::from_secs(4)).await;

    assert!(h.ui.renders().iter().all(|s| !s.pii_alert));
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn disabling_pii_clears_alert_and_stops_detection() {
    let h = Harness::start().await;

    h.type_and_settle("my ssn is 123-45-6789").await;
    assert!(h.ui.last().pii_alert);

    h.command(AgentCommand::SetPiiDetection(false)).await;
    let state = h.ui.last();
    assert!(!state.pii_alert);
    assert!(!state.settings.pii_detection_enabled);

    let before = h.backend.calls().len();
    h.type_and_settle("ssn again").await;
    let new_calls = h.backend.calls().split_off(before);
    assert_eq!(new_calls.len(), 1, "only scoring runs: {new_calls:?}");
    assert!(!h.ui.last().pii_alert);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn disabling_scoring_hides_badge_but_keeps_history() {
    let h = Harness::start().await;

    h.type_and_settle("draft").await;
    h.command(AgentCommand::SetScoreDetection(false)).await;

    let state = h.ui.last();
    assert_eq!(state.current_score, None);
    assert_eq!(state.score_history.len(), 1);

    h.type_and_settle("draft two").await;
    assert_eq!(h.backend.score_calls(), vec!["draft".to_string()]);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn identical_state_is_rendered_once() {
    let h = Harness::start().await;
    h.type_and_settle("hello").await;
    let renders = h.ui.renders().len();

    h.command(AgentCommand::SetScoreDetection(true)).await;
    h.command(AgentCommand::SetPiiDetection(true)).await;
    h.type_and_settle("hello").await;

    assert_eq!(h.ui.renders().len(), renders);
    h.stop().await;
}
