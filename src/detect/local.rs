use super::scanner::{SensitiveScanner, shared_scanner};
use crate::backend::{Destination, PromptBackend, ScoreTag};
use crate::error::BackendError;
use crate::state::SuggestionStyle;
use async_trait::async_trait;

/// Wraps a backend and answers sensitive-content detection in-process.
/// Every other operation is delegated unchanged.
pub struct LocalDetectBackend<B> {
    inner: B,
    scanner: &'static SensitiveScanner,
}

impl<B: PromptBackend> LocalDetectBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            scanner: shared_scanner(),
        }
    }
}

#[async_trait]
impl<B: PromptBackend> PromptBackend for LocalDetectBackend<B> {
    async fn score(&self, prompt: &str) -> Result<Option<ScoreTag>, BackendError> {
        self.inner.score(prompt).await
    }

    async fn detect_sensitive(&self, text: &str) -> Result<bool, BackendError> {
        let category = self.scanner.first_category(text);
        if let Some(category) = category {
            tracing::debug!(category, "detect.local_match");
        }
        Ok(category.is_some())
    }

    async fn classify(&self, prompts: &[String]) -> Result<Option<Destination>, BackendError> {
        self.inner.classify(prompts).await
    }

    async fn suggest(
        &self,
        prompt: &str,
        style: SuggestionStyle,
    ) -> Result<Vec<String>, BackendError> {
        self.inner.suggest(prompt, style).await
    }

    fn name(&self) -> &str {
        "local-detect"
    }
}
