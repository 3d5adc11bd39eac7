#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use promptbuddy::backend::{Destination, PromptBackend, ScoreTag};
use promptbuddy::error::BackendError;
use promptbuddy::host::{ElementKind, MemoryElement, MemoryPage};
use promptbuddy::observability::NoopObserver;
use promptbuddy::pipeline::{Agent, AgentCommand, AgentHandle, AgentOptions};
use promptbuddy::state::{Settings, SuggestionStyle};
use promptbuddy::ui::{Notice, UiSink, UiState};

pub const QUIET: Duration = Duration::from_millis(700);
pub const POLL: Duration = Duration::from_millis(1_000);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Score(String),
    Detect(String),
    Classify(Vec<String>),
    Suggest(String, SuggestionStyle),
}

/// Scripted backend. Scores are looked up by prompt (default `medium`),
/// text containing "ssn" is sensitive, and per-prompt delays let tests force
/// responses to arrive out of order.
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    scores: Mutex<HashMap<String, ScoreTag>>,
    delays: Mutex<HashMap<String, Duration>>,
    destination: Mutex<Option<Destination>>,
    templates: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn score_as(&self, prompt: &str, tag: ScoreTag) {
        lock(&self.scores).insert(prompt.to_string(), tag);
    }

    pub fn delay(&self, prompt: &str, delay: Duration) {
        lock(&self.delays).insert(prompt.to_string(), delay);
    }

    pub fn answer_destination(&self, suggested: &str, reason: &str) {
        *lock(&self.destination) = Some(Destination {
            suggested: suggested.into(),
            reason: reason.into(),
        });
    }

    pub fn answer_templates(&self, templates: &[&str]) {
        *lock(&self.templates) = templates.iter().map(ToString::to_string).collect();
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn score_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Score(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn classify_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Classify(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    async fn pause_for(&self, key: &str) {
        let delay = lock(&self.delays).get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl PromptBackend for FakeBackend {
    async fn score(&self, prompt: &str) -> Result<Option<ScoreTag>, BackendError> {
        lock(&self.calls).push(Call::Score(prompt.to_string()));
        self.pause_for(prompt).await;
        let tag = lock(&self.scores)
            .get(prompt)
            .copied()
            .unwrap_or(ScoreTag::Medium);
        Ok(Some(tag))
    }

    async fn detect_sensitive(&self, text: &str) -> Result<bool, BackendError> {
        lock(&self.calls).push(Call::Detect(text.to_string()));
        self.pause_for(text).await;
        Ok(text.to_lowercase().contains("ssn"))
    }

    async fn classify(&self, prompts: &[String]) -> Result<Option<Destination>, BackendError> {
        lock(&self.calls).push(Call::Classify(prompts.to_vec()));
        Ok(lock(&self.destination).clone())
    }

    async fn suggest(
        &self,
        prompt: &str,
        style: SuggestionStyle,
    ) -> Result<Vec<String>, BackendError> {
        lock(&self.calls).push(Call::Suggest(prompt.to_string(), style));
        self.pause_for(prompt).await;
        Ok(lock(&self.templates).clone())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// UI sink that keeps every rendered snapshot and notice.
#[derive(Clone, Default)]
pub struct RecordingUi {
    renders: Arc<Mutex<Vec<UiState>>>,
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingUi {
    pub fn renders(&self) -> Vec<UiState> {
        lock(&self.renders).clone()
    }

    pub fn last(&self) -> UiState {
        lock(&self.renders)
            .last()
            .cloned()
            .expect("agent renders on start")
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }
}

impl UiSink for RecordingUi {
    fn render(&mut self, state: &UiState) {
        lock(&self.renders).push(state.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        lock(&self.notices).push(notice.clone());
    }
}

pub struct Harness {
    pub page: Arc<MemoryPage>,
    pub field: Arc<MemoryElement>,
    pub backend: Arc<FakeBackend>,
    pub ui: RecordingUi,
    pub handle: AgentHandle,
    task: JoinHandle<RecordingUi>,
}

impl Harness {
    /// Page with one `#prompt-textarea`, agent started and attached.
    pub async fn start() -> Self {
        Self::start_with(Settings::default()).await
    }

    pub async fn start_with(settings: Settings) -> Self {
        let page = Arc::new(MemoryPage::new());
        let field = page.add_with_selector("#prompt-textarea", ElementKind::ValueBearing);
        let backend = FakeBackend::new();
        let ui = RecordingUi::default();

        let options = AgentOptions {
            debounce: QUIET,
            locator_poll: POLL,
            history_capacity: 5,
            settings,
            selectors: vec!["#prompt-textarea".into()],
        };
        let (agent, handle) = Agent::new(
            page.clone(),
            backend.clone(),
            Arc::new(NoopObserver),
            ui.clone(),
            options,
        );
        let task = tokio::spawn(agent.run());
        settle().await;

        Self {
            page,
            field,
            backend,
            ui,
            handle,
            task,
        }
    }

    /// Type `text` and wait past the quiet window.
    pub async fn type_and_settle(&self, text: &str) {
        self.field.type_text(text);
        tokio::time::sleep(QUIET + Duration::from_millis(50)).await;
    }

    pub async fn command(&self, command: AgentCommand) {
        assert!(self.handle.send(command), "agent stopped unexpectedly");
        settle().await;
    }

    pub async fn stop(self) -> RecordingUi {
        self.handle.send(AgentCommand::Shutdown);
        self.task.await.expect("agent task panicked")
    }
}

/// Let the agent drain everything that is ready without moving past the
/// next timer by much.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}
