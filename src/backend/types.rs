use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Quality rating returned by the scoring endpoint.
///
/// Anything the backend sends outside these three values is "unknown" and is
/// represented as `None` at the call sites, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ScoreTag {
    Low,
    Medium,
    High,
}

impl ScoreTag {
    /// Map a raw backend value to a known tag.
    pub fn from_response(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

/// Destination model suggested for the recent submitted prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub suggested: String,
    pub reason: String,
}

// ─── Wire types ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct PromptBody<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextBody<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PromptsBody<'a> {
    pub prompts: &'a [String],
}

/// `score` is kept as raw JSON: a number, `null` or any other non-string
/// value is an unknown rating, not a decode failure.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScoreResponse {
    #[serde(default)]
    pub score: Value,
}

impl ScoreResponse {
    pub fn tag(&self) -> Option<ScoreTag> {
        self.score.as_str().and_then(ScoreTag::from_response)
    }
}

/// Only a JSON `true` raises the flag.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DetectResponse {
    #[serde(default)]
    pub flag: Value,
}

impl DetectResponse {
    pub fn is_flagged(&self) -> bool {
        self.flag.as_bool().unwrap_or(false)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClassifyResponse {
    #[serde(default, alias = "suggested_llm")]
    pub suggested: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

const NO_SIGNAL_DESTINATIONS: [&str; 2] = ["unknown", "error"];

impl ClassifyResponse {
    pub fn into_destination(self) -> Option<Destination> {
        let suggested = self.suggested?.trim().to_string();
        if suggested.is_empty()
            || NO_SIGNAL_DESTINATIONS
                .iter()
                .any(|marker| suggested.eq_ignore_ascii_case(marker))
        {
            return None;
        }
        Some(Destination {
            suggested,
            reason: self.reason.unwrap_or_default().trim().to_string(),
        })
    }
}

/// The descriptive endpoint answers with a single string; the short one with
/// a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Templates {
    Many(Vec<String>),
    One(String),
}

impl Default for Templates {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SuggestResponse {
    #[serde(default)]
    pub templates: Templates,
}

impl SuggestResponse {
    pub fn into_templates(self) -> Vec<String> {
        let raw = match self.templates {
            Templates::Many(list) => list,
            Templates::One(single) => vec![single],
        };
        raw.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}
