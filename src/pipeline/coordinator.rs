use super::requests::{Completion, Epoch, Outbound};
use crate::backend::{Destination, ScoreTag};
use crate::error::InputError;
use crate::state::{
    HistoryStore, ScoredPromptRecord, Settings, SubmittedPromptRecord, SuggestionStyle,
};
use crate::ui::UiState;

/// What applying a completion did to state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Superseded by a newer event; nothing was touched.
    Discarded,
    /// Current, but nothing visible changed (failure, empty answer, same value).
    Unchanged,
    Changed,
    /// A suggestion arrived: write this text into the field, then feed it
    /// back through [`Coordinator::on_stabilized_text`].
    ReplaceField(String),
}

/// Owned pipeline state: histories, settings, visible indicators and the
/// generation counters that decide which responses may still apply.
///
/// Pure state machine. It never performs I/O; every entry point returns the
/// requests to issue and the caller runs them.
#[derive(Debug)]
pub struct Coordinator {
    defaults: Settings,
    settings: Settings,
    history: HistoryStore,
    epoch: Epoch,
    last_text: Option<String>,
    submit_ticket: u64,
    attachment: u64,
    current_score: Option<ScoreTag>,
    pii_alert: bool,
    suggestion: Option<Destination>,
}

impl Coordinator {
    pub fn new(settings: Settings, history_capacity: usize) -> Self {
        Self {
            defaults: settings,
            settings,
            history: HistoryStore::new(history_capacity),
            epoch: 0,
            last_text: None,
            submit_ticket: 0,
            attachment: 0,
            current_score: None,
            pii_alert: false,
            suggestion: None,
        }
    }

    // ── Debounced path ──────────────────────────────────────────────────

    /// A new stabilized text. Repeats of the last processed text issue
    /// nothing; otherwise the epoch advances and the enabled detectors run.
    pub fn on_stabilized_text(&mut self, text: &str) -> Vec<Outbound> {
        let text = text.trim();
        if text.is_empty() {
            self.on_cleared();
            return Vec::new();
        }
        if self.last_text.as_deref() == Some(text) {
            tracing::debug!(epoch = self.epoch, "coordinator.duplicate_suppressed");
            return Vec::new();
        }

        self.epoch += 1;
        self.last_text = Some(text.to_string());

        let mut outbound = Vec::with_capacity(2);
        if self.settings.score_detection_enabled {
            outbound.push(Outbound::Score {
                epoch: self.epoch,
                prompt: text.to_string(),
            });
        }
        if self.settings.pii_detection_enabled {
            outbound.push(Outbound::DetectSensitive {
                epoch: self.epoch,
                text: text.to_string(),
            });
        }
        outbound
    }

    /// The field was emptied. In-flight results for the old text must not
    /// resurface, so the epoch advances as well.
    pub fn on_cleared(&mut self) -> bool {
        self.epoch += 1;
        self.last_text = None;
        self.clear_indicators()
    }

    // ── Explicit actions ────────────────────────────────────────────────

    /// Explicit submission. Returns the classification request when the
    /// entry was actually inserted.
    pub fn on_submit(&mut self, text: &str) -> Option<Outbound> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let inserted = self.history.submitted.push_distinct(SubmittedPromptRecord {
            text: text.to_string(),
        });
        if !inserted {
            tracing::debug!("coordinator.submit_duplicate");
            return None;
        }
        self.submit_ticket += 1;
        Some(Outbound::Classify {
            ticket: self.submit_ticket,
            prompts: self.history.submitted_texts(),
        })
    }

    /// "Suggest now" over the field's current content.
    pub fn suggest_now(&self, field_text: &str) -> Result<Outbound, InputError> {
        let prompt = field_text.trim();
        if prompt.is_empty() {
            return Err(InputError::EmptyField);
        }
        Ok(Outbound::Suggest {
            attachment: self.attachment,
            style: self.settings.suggestion_style,
            prompt: prompt.to_string(),
        })
    }

    // ── Completions ─────────────────────────────────────────────────────

    pub fn on_completion(&mut self, completion: Completion) -> Reaction {
        match completion {
            Completion::Score {
                epoch,
                prompt,
                result,
            } => {
                if epoch != self.epoch {
                    return self.discard("score", epoch);
                }
                match result {
                    Ok(Some(score)) => {
                        self.history.scored.push(ScoredPromptRecord {
                            text: prompt,
                            score,
                        });
                        if self.settings.score_detection_enabled {
                            self.current_score = Some(score);
                        }
                        Reaction::Changed
                    }
                    Ok(None) => changed_if(self.current_score.take().is_some()),
                    Err(e) => {
                        tracing::warn!(operation = "score", error = %e, "coordinator.request_failed");
                        Reaction::Unchanged
                    }
                }
            }
            Completion::Sensitive { epoch, result } => {
                if epoch != self.epoch {
                    return self.discard("detect", epoch);
                }
                match result {
                    Ok(flag) => {
                        let alert = flag && self.settings.pii_detection_enabled;
                        let changed = self.pii_alert != alert;
                        self.pii_alert = alert;
                        changed_if(changed)
                    }
                    Err(e) => {
                        tracing::warn!(operation = "detect", error = %e, "coordinator.request_failed");
                        Reaction::Unchanged
                    }
                }
            }
            Completion::Classified { ticket, result } => {
                if ticket != self.submit_ticket {
                    return self.discard("classify", ticket);
                }
                match result {
                    Ok(destination) => {
                        let changed = self.suggestion != destination;
                        self.suggestion = destination;
                        changed_if(changed)
                    }
                    Err(e) => {
                        tracing::warn!(operation = "classify", error = %e, "coordinator.request_failed");
                        Reaction::Unchanged
                    }
                }
            }
            Completion::Suggested {
                attachment,
                style,
                result,
            } => {
                if attachment != self.attachment {
                    return self.discard("suggest", attachment);
                }
                match result {
                    Ok(templates) => match combine_templates(&templates, style) {
                        Some(text) => Reaction::ReplaceField(text),
                        None => {
                            tracing::info!("coordinator.no_suggestions");
                            Reaction::Unchanged
                        }
                    },
                    Err(e) => {
                        tracing::warn!(operation = "suggest", error = %e, "coordinator.request_failed");
                        Reaction::Unchanged
                    }
                }
            }
        }
    }

    // ── Settings ────────────────────────────────────────────────────────

    /// Affects later events only. Disabling clears the visible score.
    pub fn set_score_detection(&mut self, enabled: bool) -> bool {
        let mut changed = self.settings.score_detection_enabled != enabled;
        self.settings.score_detection_enabled = enabled;
        if !enabled {
            changed |= self.current_score.take().is_some();
        }
        changed
    }

    /// Affects later events only. Disabling clears the alert synchronously.
    pub fn set_pii_detection(&mut self, enabled: bool) -> bool {
        let mut changed = self.settings.pii_detection_enabled != enabled;
        self.settings.pii_detection_enabled = enabled;
        if !enabled {
            changed |= std::mem::take(&mut self.pii_alert);
        }
        changed
    }

    pub fn set_suggestion_style(&mut self, style: SuggestionStyle) -> bool {
        let changed = self.settings.suggestion_style != style;
        self.settings.suggestion_style = style;
        changed
    }

    // ── Resets ──────────────────────────────────────────────────────────

    /// A different element was attached (or the old one vanished). Everything
    /// tied to the previous field is invalidated; histories and settings stay.
    pub fn reset_transient(&mut self) {
        self.epoch += 1;
        self.attachment += 1;
        self.last_text = None;
        self.clear_indicators();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Full page-context reset: histories, destination hint and settings go
    /// back to their initial state.
    pub fn reset_context(&mut self) {
        self.reset_transient();
        self.history.clear();
        self.submit_ticket += 1;
        self.suggestion = None;
        self.settings = self.defaults;
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub const fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub const fn current_score(&self) -> Option<ScoreTag> {
        self.current_score
    }

    pub const fn pii_alert(&self) -> bool {
        self.pii_alert
    }

    pub const fn suggestion(&self) -> Option<&Destination> {
        self.suggestion.as_ref()
    }

    pub fn ui_state(&self) -> UiState {
        UiState {
            settings: self.settings,
            score_history: self.history.scored.iter().cloned().collect(),
            submitted_history: self.history.submitted.iter().cloned().collect(),
            current_score: self.current_score,
            pii_alert: self.pii_alert,
            suggestion: self.suggestion.clone(),
        }
    }

    fn clear_indicators(&mut self) -> bool {
        let had_score = self.current_score.take().is_some();
        let had_alert = std::mem::take(&mut self.pii_alert);
        had_score || had_alert
    }

    fn discard(&self, operation: &'static str, token: u64) -> Reaction {
        tracing::debug!(operation, token, current = self.epoch, "coordinator.stale_response");
        Reaction::Discarded
    }
}

const fn changed_if(changed: bool) -> Reaction {
    if changed {
        Reaction::Changed
    } else {
        Reaction::Unchanged
    }
}

/// Text to place in the field: the first template for the short style, all
/// of them for the descriptive one.
fn combine_templates(templates: &[String], style: SuggestionStyle) -> Option<String> {
    let first = templates.first()?;
    Some(match style {
        SuggestionStyle::Short => first.clone(),
        SuggestionStyle::Descriptive => templates.join("\n\n"),
    })
}
