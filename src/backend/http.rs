use super::http_client::build_backend_client;
use super::scrub::sanitize_error_body;
use super::traits::PromptBackend;
use super::types::{
    ClassifyResponse, DetectResponse, Destination, PromptBody, PromptsBody, ScoreResponse,
    ScoreTag, SuggestResponse, TextBody,
};
use crate::config::{BackendConfig, EndpointsConfig};
use crate::error::BackendError;
use crate::state::SuggestionStyle;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// JSON-over-HTTP client for the prompt-analysis service.
pub struct HttpBackend {
    base_url: String,
    endpoints: EndpointsConfig,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&BackendConfig {
            base_url: base_url.to_string(),
            ..BackendConfig::default()
        })
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            endpoints: config.endpoints.clone(),
            client: build_backend_client(config),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, operation: &str, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Default,
    {
        let url = self.url(path);
        tracing::debug!(operation, url = %url, "backend.request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Request {
                operation: operation.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| BackendError::Request {
            operation: operation.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(BackendError::Status {
                operation: operation.to_string(),
                status: status.as_u16(),
                body: sanitize_error_body(&text),
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| BackendError::Decode {
                operation: operation.to_string(),
                message: e.to_string(),
            })?;

        // Valid JSON of an unexpected shape carries no signal.
        Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!(operation, error = %e, "backend.unexpected_shape");
            R::default()
        }))
    }
}

#[async_trait]
impl PromptBackend for HttpBackend {
    async fn score(&self, prompt: &str) -> Result<Option<ScoreTag>, BackendError> {
        let response: ScoreResponse = self
            .post_json("score", &self.endpoints.score, &PromptBody { prompt })
            .await?;
        Ok(response.tag())
    }

    async fn detect_sensitive(&self, text: &str) -> Result<bool, BackendError> {
        let response: DetectResponse = self
            .post_json("detect", &self.endpoints.detect, &TextBody { text })
            .await?;
        Ok(response.is_flagged())
    }

    async fn classify(&self, prompts: &[String]) -> Result<Option<Destination>, BackendError> {
        let response: ClassifyResponse = self
            .post_json("classify", &self.endpoints.classify, &PromptsBody { prompts })
            .await?;
        Ok(response.into_destination())
    }

    async fn suggest(
        &self,
        prompt: &str,
        style: SuggestionStyle,
    ) -> Result<Vec<String>, BackendError> {
        let path = match style {
            SuggestionStyle::Short => &self.endpoints.suggest_short,
            SuggestionStyle::Descriptive => &self.endpoints.suggest_descriptive,
        };
        let response: SuggestResponse = self
            .post_json("suggest", path, &PromptBody { prompt })
            .await?;
        Ok(response.into_templates())
    }

    fn name(&self) -> &str {
        "http"
    }
}
