use std::time::Duration;

use promptbuddy::error::InputError;
use promptbuddy::host::{ElementKind, HostElement};
use promptbuddy::pipeline::AgentCommand;
use promptbuddy::ui::Notice;

use super::pipeline_harness::{Harness, POLL, QUIET, settle};

async fn next_poll() {
    tokio::time::sleep(POLL + Duration::from_millis(50)).await;
}

#[tokio::test(start_paused = true)]
async fn attaches_to_field_on_start() {
    let h = Harness::start().await;
    assert_eq!(h.field.live_listeners(), 1);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn swap_moves_subscription_without_leaking() {
    let h = Harness::start().await;
    h.type_and_settle("old page prompt").await;
    assert!(h.ui.last().current_score.is_some());

    h.page.remove(h.field.id());
    let replacement = h
        .page
        .add_with_selector("#prompt-textarea", ElementKind::ContentEditable);
    next_poll().await;

    assert_eq!(h.field.live_listeners(), 0);
    assert_eq!(replacement.live_listeners(), 1);

    let state = h.ui.last();
    assert_eq!(state.current_score, None, "indicators tied to the old field");
    assert_eq!(state.score_history.len(), 1, "history survives the swap");

    // The old field is deaf now; the new one drives the pipeline.
    let before = h.backend.calls().len();
    h.type_and_settle("typed into the old field").await;
    assert_eq!(h.backend.calls().len(), before);

    replacement.type_text("new page prompt");
    tokio::time::sleep(QUIET + Duration::from_millis(50)).await;
    assert_eq!(
        h.backend.score_calls().last().map(String::as_str),
        Some("new page prompt")
    );
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn repeated_polls_keep_a_single_subscription() {
    let h = Harness::start().await;
    for _ in 0..5 {
        next_poll().await;
    }
    assert_eq!(h.field.live_listeners(), 1);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn in_flight_score_for_old_field_is_dropped() {
    let h = Harness::start().await;
    h.backend.delay("slow prompt", Duration::from_secs(3));

    h.type_and_settle("slow prompt").await;
    h.page.remove(h.field.id());
    h.page
        .add_with_selector("#prompt-textarea", ElementKind::ValueBearing);
    next_poll().await;
    tokio::time::sleep(Duration::from_secs(3)).await;

    let state = h.ui.last();
    assert_eq!(state.current_score, None);
    assert!(state.score_history.is_empty());
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn suggestion_for_old_field_is_not_written_anywhere() {
    let h = Harness::start().await;
    h.backend.answer_templates(&["Better prompt"]);
    h.backend.delay("draft", Duration::from_secs(3));

    h.field.type_text("draft");
    h.command(AgentCommand::SuggestNow).await;
    h.page.remove(h.field.id());
    let replacement = h
        .page
        .add_with_selector("#prompt-textarea", ElementKind::ValueBearing);
    next_poll().await;
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(h.field.current_text(), "draft");
    assert_eq!(h.field.native_writes(), 0);
    assert_eq!(replacement.current_text(), "");
    assert_eq!(replacement.native_writes(), 0);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn hidden_field_detaches_and_suggest_reports_missing_field() {
    let h = Harness::start().await;

    h.field.set_visible(false);
    next_poll().await;
    assert_eq!(h.field.live_listeners(), 0);

    h.command(AgentCommand::SuggestNow).await;
    assert_eq!(h.ui.notices(), vec![Notice::Input(InputError::NoField)]);
    assert!(h.backend.calls().is_empty());

    h.field.set_visible(true);
    next_poll().await;
    settle().await;
    assert_eq!(h.field.live_listeners(), 1);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn falls_back_to_first_visible_editable() {
    let h = Harness::start().await;

    h.page.remove(h.field.id());
    let generic = h.page.add_element(ElementKind::ContentEditable);
    next_poll().await;

    assert_eq!(generic.live_listeners(), 1);
    h.stop().await;
}
