use std::time::Duration;

use promptbuddy::backend::Destination;
use promptbuddy::error::InputError;
use promptbuddy::host::Modifiers;
use promptbuddy::pipeline::AgentCommand;
use promptbuddy::state::{Settings, SuggestionStyle};
use promptbuddy::ui::Notice;

use super::pipeline_harness::{Call, Harness, QUIET, settle};

#[tokio::test(start_paused = true)]
async fn enter_submits_and_classifies_full_history() {
    let h = Harness::start().await;
    h.backend.answer_destination("Claude", "summarization");

    h.field.type_text("Write a poem");
    h.field.press_enter();
    settle().await;
    h.field.type_text("Summarize this");
    h.field.press_enter();
    settle().await;

    assert_eq!(
        h.backend.classify_calls(),
        vec![
            vec!["Write a poem".to_string()],
            vec!["Summarize this".to_string(), "Write a poem".to_string()],
        ]
    );
    let state = h.ui.last();
    let submitted: Vec<&str> = state
        .submitted_history
        .iter()
        .map(|r| r.text.as_str())
        .collect();
    assert_eq!(submitted, vec!["Summarize this", "Write a poem"]);
    assert_eq!(
        state.suggestion,
        Some(Destination {
            suggested: "Claude".into(),
            reason: "summarization".into(),
        })
    );
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn modified_or_repeated_enter_does_not_classify_again() {
    let h = Harness::start().await;

    h.field.type_text("line one");
    h.field.press_key(
        "Enter",
        Modifiers {
            shift: true,
            ..Modifiers::NONE
        },
    );
    settle().await;
    assert!(h.backend.classify_calls().is_empty());

    h.field.press_enter();
    h.field.press_enter();
    settle().await;
    assert_eq!(h.backend.classify_calls().len(), 1);
    assert_eq!(h.ui.last().submitted_history.len(), 1);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn enter_on_empty_field_is_ignored() {
    let h = Harness::start().await;
    h.field.press_enter();
    settle().await;
    assert!(h.backend.calls().is_empty());
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn suggest_now_with_empty_field_shows_notice_only() {
    let h = Harness::start().await;

    h.command(AgentCommand::SuggestNow).await;

    assert_eq!(h.ui.notices(), vec![Notice::Input(InputError::EmptyField)]);
    assert!(h.backend.calls().is_empty());
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn suggestion_replaces_field_and_is_scored_immediately() {
    let h = Harness::start().await;
    let template = "Write a haiku about autumn leaves";
    h.backend.answer_templates(&[template, "Write a limerick"]);

    h.type_and_settle("poem").await;
    h.command(AgentCommand::SuggestNow).await;

    assert!(
        h.backend
            .calls()
            .contains(&Call::Suggest("poem".into(), SuggestionStyle::Short))
    );
    assert_eq!(h.field.current_text(), template);
    assert_eq!(h.field.native_writes(), 1);
    assert_eq!(h.field.input_events(), 1);
    assert_eq!(
        h.backend.score_calls(),
        vec!["poem".to_string(), template.to_string()]
    );

    // The synthetic input event settles to the same text: nothing new.
    tokio::time::sleep(QUIET * 2).await;
    assert_eq!(h.backend.score_calls().len(), 2);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn descriptive_style_combines_templates() {
    let h = Harness::start().await;
    h.backend.answer_templates(&["First variant", "Second variant"]);

    h.command(AgentCommand::SetSuggestionStyle(SuggestionStyle::Descriptive))
        .await;
    h.field.type_text("draft");
    h.command(AgentCommand::SuggestNow).await;

    assert_eq!(h.field.current_text(), "First variant\n\nSecond variant");
    assert!(
        h.backend
            .calls()
            .contains(&Call::Suggest("draft".into(), SuggestionStyle::Descriptive))
    );
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn empty_suggestion_leaves_field_alone() {
    let h = Harness::start().await;

    h.field.type_text("draft");
    h.command(AgentCommand::SuggestNow).await;

    assert_eq!(h.field.current_text(), "draft");
    assert_eq!(h.field.native_writes(), 0);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn copy_puts_history_entry_on_clipboard() {
    let h = Harness::start().await;

    h.field.type_text("Summarize this");
    h.field.press_enter();
    settle().await;

    h.command(AgentCommand::CopySubmitted(1)).await;
    h.command(AgentCommand::CopyScored(3)).await;

    assert_eq!(h.page.clipboard(), vec!["Summarize this".to_string()]);
    assert_eq!(
        h.ui.notices(),
        vec![
            Notice::Info("Copied to clipboard.".into()),
            Notice::Input(InputError::MissingHistoryEntry {
                history: "score",
                index: 3,
            }),
        ]
    );
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn clear_history_keeps_settings() {
    let h = Harness::start().await;

    h.type_and_settle("scored").await;
    h.field.press_enter();
    h.command(AgentCommand::SetSuggestionStyle(SuggestionStyle::Descriptive))
        .await;
    h.command(AgentCommand::ClearHistory).await;

    let state = h.ui.last();
    assert!(state.score_history.is_empty());
    assert!(state.submitted_history.is_empty());
    assert_eq!(state.settings.suggestion_style, SuggestionStyle::Descriptive);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn reset_context_restores_initial_state() {
    let h = Harness::start().await;
    h.backend.answer_destination("Gemini", "research");

    h.type_and_settle("scored").await;
    h.field.press_enter();
    h.command(AgentCommand::SetPiiDetection(false)).await;
    h.command(AgentCommand::ResetContext).await;

    let state = h.ui.last();
    assert_eq!(state.settings, Settings::default());
    assert!(state.score_history.is_empty());
    assert!(state.submitted_history.is_empty());
    assert_eq!(state.suggestion, None);
    assert_eq!(state.current_score, None);

    // Same text counts as new after a reset.
    h.field.type_text("scored ");
    tokio::time::sleep(QUIET + Duration::from_millis(50)).await;
    assert_eq!(h.backend.score_calls().len(), 2);
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_loop() {
    let h = Harness::start().await;
    let handle = h.handle.clone();
    let ui = h.stop().await;

    assert!(!ui.renders().is_empty());
    assert!(!handle.send(AgentCommand::SuggestNow));
}
