use super::types::{Destination, ScoreTag};
use crate::error::BackendError;
use crate::state::SuggestionStyle;
use async_trait::async_trait;

/// Request/response contract of the prompt-analysis service.
///
/// Implementations only translate to and from the wire; callers own the
/// best-effort policy (log and drop on error, never retry).
#[async_trait]
pub trait PromptBackend: Send + Sync {
    /// Rate a prompt. `Ok(None)` means the service answered with a value
    /// outside the known tags.
    async fn score(&self, prompt: &str) -> Result<Option<ScoreTag>, BackendError>;

    /// Whether `text` looks like it carries sensitive personal data.
    async fn detect_sensitive(&self, text: &str) -> Result<bool, BackendError>;

    /// Suggest a destination model for the recent submitted prompts
    /// (most recent first). `Ok(None)` is the no-signal state.
    async fn classify(&self, prompts: &[String]) -> Result<Option<Destination>, BackendError>;

    /// Rewritten variants of `prompt`. An empty list means nothing to apply.
    async fn suggest(
        &self,
        prompt: &str,
        style: SuggestionStyle,
    ) -> Result<Vec<String>, BackendError>;

    /// Human-readable name of this backend.
    fn name(&self) -> &str;
}
