use crate::error::ConfigError;
use crate::state::Settings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub host: HostConfig,

    /// Initial toggle values; also what a page-context reset restores.
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            backend: BackendConfig::default(),
            pipeline: PipelineConfig::default(),
            host: HostConfig::default(),
            settings: Settings::default(),
            detection: DetectionConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.backend.base_url).map_err(|e| {
            ConfigError::Validation(format!(
                "backend.base_url {:?} is not a valid URL: {e}",
                self.backend.base_url
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "backend.base_url must use http or https, got {}",
                parsed.scheme()
            )));
        }
        if self.pipeline.debounce_ms == 0 {
            return Err(ConfigError::Validation(
                "pipeline.debounce_ms must be greater than zero".into(),
            ));
        }
        if self.pipeline.locator_poll_ms == 0 {
            return Err(ConfigError::Validation(
                "pipeline.locator_poll_ms must be greater than zero".into(),
            ));
        }
        if self.pipeline.history_capacity == 0 {
            return Err(ConfigError::Validation(
                "pipeline.history_capacity must be at least 1".into(),
            ));
        }
        for (name, path) in self.backend.endpoints.iter() {
            if !path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "backend.endpoints.{name} must start with '/', got {path:?}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// No overall request timeout unless set; a response that never arrives
    /// simply never updates state.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_score_path")]
    pub score: String,
    #[serde(default = "default_detect_path")]
    pub detect: String,
    #[serde(default = "default_classify_path")]
    pub classify: String,
    #[serde(default = "default_suggest_short_path")]
    pub suggest_short: String,
    #[serde(default = "default_suggest_descriptive_path")]
    pub suggest_descriptive: String,
}

fn default_score_path() -> String {
    "/prompt-score".into()
}

fn default_detect_path() -> String {
    "/detect-pii".into()
}

fn default_classify_path() -> String {
    "/classify-llm".into()
}

fn default_suggest_short_path() -> String {
    "/suggest-templates".into()
}

fn default_suggest_descriptive_path() -> String {
    "/suggest-templates-descriptive".into()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            score: default_score_path(),
            detect: default_detect_path(),
            classify: default_classify_path(),
            suggest_short: default_suggest_short_path(),
            suggest_descriptive: default_suggest_descriptive_path(),
        }
    }
}

impl EndpointsConfig {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("score", self.score.as_str()),
            ("detect", self.detect.as_str()),
            ("classify", self.classify.as_str()),
            ("suggest_short", self.suggest_short.as_str()),
            ("suggest_descriptive", self.suggest_descriptive.as_str()),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Quiet window before an edit burst is reported as stabilized text.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How often the active input element is re-resolved.
    #[serde(default = "default_locator_poll_ms")]
    pub locator_poll_ms: u64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_debounce_ms() -> u64 {
    700
}

fn default_locator_poll_ms() -> u64 {
    1_000
}

fn default_history_capacity() -> usize {
    crate::state::HISTORY_CAPACITY
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            locator_poll_ms: default_locator_poll_ms(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl PipelineConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn locator_poll(&self) -> Duration {
        Duration::from_millis(self.locator_poll_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Host-specific element identifiers tried, in order, before the generic
    /// first-visible-editable fallback.
    #[serde(default = "default_selectors")]
    pub selectors: Vec<String>,
}

fn default_selectors() -> Vec<String> {
    vec![
        "#prompt-textarea".into(),
        "div[contenteditable=\"true\"].ProseMirror".into(),
        "rich-textarea .ql-editor".into(),
        "textarea#chat-input".into(),
    ]
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            selectors: default_selectors(),
        }
    }
}

/// Where sensitive-content detection runs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DetectionMode {
    /// Ask the backend's detect endpoint.
    #[default]
    Remote,
    /// Scan in-process with the built-in pattern set.
    Local,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    #[serde(default)]
    pub mode: DetectionMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// "none" | "log"
    pub backend: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            backend: "log".into(),
        }
    }
}
