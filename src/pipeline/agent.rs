//! The agent loop.
//!
//! One task owns every piece of mutable state and multiplexes host events,
//! the debounce deadline, the locator poll, backend completions and user
//! commands with `tokio::select!`. Backend calls run as spawned tasks and
//! report back over a channel; nothing outside the loop mutates state.

use super::coordinator::{Coordinator, Reaction};
use super::detector::{ChangeDetector, DetectorEvent};
use super::requests::{Completion, Outbound};
use crate::backend::PromptBackend;
use crate::config::Config;
use crate::error::InputError;
use crate::host::{EditableHandle, EventStream, HostPage, InputLocator, RawEvent};
use crate::observability::{Observer, ObserverEvent, ObserverMetric};
use crate::state::{Settings, SuggestionStyle};
use crate::ui::{Notice, UiSink, UiSynchronizer};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// User-initiated actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentCommand {
    SetScoreDetection(bool),
    SetPiiDetection(bool),
    SetSuggestionStyle(SuggestionStyle),
    SuggestNow,
    /// 1-based position, most recent first.
    CopyScored(usize),
    /// 1-based position, most recent first.
    CopySubmitted(usize),
    ClearHistory,
    ResetContext,
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub debounce: Duration,
    pub locator_poll: Duration,
    pub history_capacity: usize,
    pub settings: Settings,
    pub selectors: Vec<String>,
}

impl AgentOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: config.pipeline.debounce(),
            locator_poll: config.pipeline.locator_poll(),
            history_capacity: config.pipeline.history_capacity,
            settings: config.settings,
            selectors: config.host.selectors.clone(),
        }
    }
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Control surface for a running [`Agent`].
#[derive(Clone)]
pub struct AgentHandle {
    commands: mpsc::UnboundedSender<AgentCommand>,
    cancel: CancellationToken,
}

impl AgentHandle {
    /// Queue a command. Returns `false` once the loop has stopped.
    pub fn send(&self, command: AgentCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled() || self.commands.is_closed()
    }
}

struct Attachment {
    handle: EditableHandle,
    events: EventStream,
}

type Finished = (Completion, Duration);

pub struct Agent<U: UiSink> {
    page: Arc<dyn HostPage>,
    backend: Arc<dyn PromptBackend>,
    observer: Arc<dyn Observer>,
    locator: InputLocator,
    detector: ChangeDetector,
    coordinator: Coordinator,
    ui: UiSynchronizer<U>,
    locator_poll: Duration,
    attached: Option<Attachment>,
    commands: mpsc::UnboundedReceiver<AgentCommand>,
    completions_tx: mpsc::UnboundedSender<Finished>,
    completions_rx: mpsc::UnboundedReceiver<Finished>,
    cancel: CancellationToken,
    in_flight: u64,
}

impl<U: UiSink> Agent<U> {
    pub fn new(
        page: Arc<dyn HostPage>,
        backend: Arc<dyn PromptBackend>,
        observer: Arc<dyn Observer>,
        ui: U,
        options: AgentOptions,
    ) -> (Self, AgentHandle) {
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let agent = Self {
            page,
            backend,
            observer,
            locator: InputLocator::new(options.selectors),
            detector: ChangeDetector::new(options.debounce),
            coordinator: Coordinator::new(options.settings, options.history_capacity),
            ui: UiSynchronizer::new(ui),
            locator_poll: options.locator_poll,
            attached: None,
            commands,
            completions_tx,
            completions_rx,
            cancel: cancel.clone(),
            in_flight: 0,
        };
        let handle = AgentHandle {
            commands: commands_tx,
            cancel,
        };
        (agent, handle)
    }

    /// Drive the pipeline until shutdown. Returns the UI sink.
    pub async fn run(mut self) -> U {
        let mut poll = time::interval(self.locator_poll);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let cancel = self.cancel.clone();

        self.ui.sync(self.coordinator.ui_state());
        tracing::info!(backend = self.backend.name(), "agent.started");

        loop {
            let deadline = self.detector.deadline();

            tokio::select! {
                biased;

                () = cancel.cancelled() => break,
                cmd = self.commands.recv() => match cmd {
                    None | Some(AgentCommand::Shutdown) => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                Some(finished) = self.completions_rx.recv() => self.handle_completion(finished),
                event = next_event(&mut self.attached) => self.handle_raw_event(event),
                () = async {
                    if let Some(deadline) = deadline {
                        time::sleep_until(deadline).await;
                    }
                }, if deadline.is_some() => self.handle_quiet_window(),
                _ = poll.tick() => self.relocate(),
            }
        }

        self.detach();
        cancel.cancel();
        self.observer.flush();
        tracing::info!("agent.stopped");
        self.ui.into_sink()
    }

    // ── Host side ───────────────────────────────────────────────────────

    fn relocate(&mut self) {
        let found = self.locator.locate(self.page.as_ref());
        let current = self.attached.as_ref().map(|a| a.handle.id());
        if found.as_ref().map(EditableHandle::id) == current {
            return;
        }

        self.detach();
        if let Some(handle) = found {
            self.observer.record_event(&ObserverEvent::ElementAttached {
                element: handle.id().to_string(),
                kind: handle.kind().to_string(),
            });
            let events = handle.subscribe();
            self.attached = Some(Attachment { handle, events });
        }
        self.sync_ui();
    }

    /// Tear down the subscription and everything tied to the old field.
    fn detach(&mut self) {
        if let Some(old) = self.attached.take() {
            self.observer.record_event(&ObserverEvent::ElementDetached {
                element: old.handle.id().to_string(),
            });
        }
        self.detector.cancel();
        self.coordinator.reset_transient();
    }

    fn handle_raw_event(&mut self, event: Option<RawEvent>) {
        let Some(attached) = self.attached.as_ref() else {
            return;
        };
        match event {
            Some(RawEvent::Edit) => {
                self.detector.record_edit(attached.handle.read(), Instant::now());
            }
            Some(RawEvent::Key(key)) => {
                let handle = &attached.handle;
                if let Some(DetectorEvent::Submitted(text)) =
                    ChangeDetector::on_key(&key, || handle.read())
                {
                    self.handle_submit(&text);
                }
            }
            None => {
                tracing::debug!(element = %attached.handle.id(), "agent.subscription_closed");
                self.detach();
                self.sync_ui();
            }
        }
    }

    fn handle_quiet_window(&mut self) {
        match self.detector.fire(Instant::now()) {
            Some(DetectorEvent::Stabilized(text)) => self.handle_stabilized(&text),
            Some(DetectorEvent::Cleared) => {
                if self.coordinator.on_cleared() {
                    self.sync_ui();
                }
            }
            Some(DetectorEvent::Submitted(text)) => self.handle_submit(&text),
            None => {}
        }
    }

    fn handle_stabilized(&mut self, text: &str) {
        let requests = self.coordinator.on_stabilized_text(text);
        if !requests.is_empty() {
            self.observer.record_event(&ObserverEvent::PromptStabilized {
                epoch: self.coordinator.epoch(),
                chars: text.chars().count(),
            });
        }
        for request in requests {
            self.dispatch(request);
        }
        self.sync_ui();
    }

    fn handle_submit(&mut self, text: &str) {
        if let Some(request) = self.coordinator.on_submit(text) {
            self.observer.record_event(&ObserverEvent::PromptSubmitted {
                history_len: self.coordinator.history().submitted.len(),
            });
            self.dispatch(request);
            self.sync_ui();
        }
    }

    // ── Backend side ────────────────────────────────────────────────────

    fn dispatch(&mut self, request: Outbound) {
        self.observer.record_event(&ObserverEvent::RequestIssued {
            operation: request.operation(),
            token: request.token(),
        });
        self.in_flight += 1;
        self.observer
            .record_metric(&ObserverMetric::InFlightRequests(self.in_flight));

        let backend = Arc::clone(&self.backend);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let completion = request.execute(backend.as_ref()).await;
            // Receiver gone means the loop stopped; the result is moot.
            let _ = tx.send((completion, started.elapsed()));
        });
    }

    fn handle_completion(&mut self, (completion, elapsed): Finished) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let operation = completion.operation();
        let token = completion.token();
        self.observer.record_metric(&ObserverMetric::RequestLatency {
            operation,
            duration: elapsed,
        });
        if let Some(err) = completion.error() {
            self.observer.record_event(&ObserverEvent::RequestFailed {
                operation,
                error: err.to_string(),
            });
        }

        match self.coordinator.on_completion(completion) {
            Reaction::Discarded => {
                self.observer
                    .record_event(&ObserverEvent::ResponseDiscarded { operation, token });
            }
            Reaction::Unchanged => {}
            Reaction::Changed => {
                self.observer
                    .record_event(&ObserverEvent::ResponseApplied { operation, token });
                self.sync_ui();
            }
            Reaction::ReplaceField(text) => {
                self.observer
                    .record_event(&ObserverEvent::ResponseApplied { operation, token });
                self.write_back(&text);
            }
        }
    }

    /// Put a suggestion into the field and score it right away.
    fn write_back(&mut self, text: &str) {
        let Some(attached) = self.attached.as_ref() else {
            return;
        };
        attached.handle.write(text);
        self.handle_stabilized(text);
    }

    // ── Commands ────────────────────────────────────────────────────────

    fn handle_command(&mut self, command: AgentCommand) {
        tracing::debug!(?command, "agent.command");
        match command {
            AgentCommand::SetScoreDetection(enabled) => {
                self.coordinator.set_score_detection(enabled);
            }
            AgentCommand::SetPiiDetection(enabled) => {
                self.coordinator.set_pii_detection(enabled);
            }
            AgentCommand::SetSuggestionStyle(style) => {
                self.coordinator.set_suggestion_style(style);
            }
            AgentCommand::SuggestNow => self.suggest_now(),
            AgentCommand::CopyScored(position) => {
                let text = position
                    .checked_sub(1)
                    .and_then(|i| self.coordinator.history().scored.get(i))
                    .map(|r| r.text.clone());
                self.copy_to_clipboard("score", position, text);
            }
            AgentCommand::CopySubmitted(position) => {
                let text = position
                    .checked_sub(1)
                    .and_then(|i| self.coordinator.history().submitted.get(i))
                    .map(|r| r.text.clone());
                self.copy_to_clipboard("submitted", position, text);
            }
            AgentCommand::ClearHistory => self.coordinator.clear_history(),
            AgentCommand::ResetContext => {
                self.detector.cancel();
                self.coordinator.reset_context();
            }
            AgentCommand::Shutdown => {}
        }
        self.sync_ui();
    }

    fn suggest_now(&mut self) {
        let Some(attached) = self.attached.as_ref() else {
            self.ui.notify(&Notice::Input(InputError::NoField));
            return;
        };
        match self.coordinator.suggest_now(&attached.handle.read()) {
            Ok(request) => self.dispatch(request),
            Err(e) => self.ui.notify(&Notice::Input(e)),
        }
    }

    fn copy_to_clipboard(&mut self, history: &'static str, position: usize, text: Option<String>) {
        let Some(text) = text else {
            self.ui.notify(&Notice::Input(InputError::MissingHistoryEntry {
                history,
                index: position,
            }));
            return;
        };
        match self.page.write_clipboard(&text) {
            Ok(()) => self.ui.notify(&Notice::Info("Copied to clipboard.".into())),
            Err(e) => tracing::warn!(error = %e, "agent.clipboard_failed"),
        }
    }

    fn sync_ui(&mut self) {
        self.ui.sync(self.coordinator.ui_state());
    }
}

/// Next raw event of the attached element; never resolves while detached.
async fn next_event(attached: &mut Option<Attachment>) -> Option<RawEvent> {
    match attached {
        Some(attachment) => attachment.events.recv().await,
        None => std::future::pending().await,
    }
}
