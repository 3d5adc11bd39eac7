use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which template-suggestion endpoint "suggest now" uses.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SuggestionStyle {
    #[default]
    Short,
    Descriptive,
}

/// User-controlled toggles gating which requests the coordinator may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub score_detection_enabled: bool,
    #[serde(default = "default_true")]
    pub pii_detection_enabled: bool,
    #[serde(default)]
    pub suggestion_style: SuggestionStyle,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            score_detection_enabled: true,
            pii_detection_enabled: true,
            suggestion_style: SuggestionStyle::Short,
        }
    }
}
