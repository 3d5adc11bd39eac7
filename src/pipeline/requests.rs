use crate::backend::{Destination, PromptBackend, ScoreTag};
use crate::error::BackendError;
use crate::state::SuggestionStyle;

/// Generation token of the most recent stabilized text.
pub type Epoch = u64;

/// A backend call the coordinator decided to make. Each variant carries the
/// token its completion is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Score {
        epoch: Epoch,
        prompt: String,
    },
    DetectSensitive {
        epoch: Epoch,
        text: String,
    },
    Classify {
        ticket: u64,
        prompts: Vec<String>,
    },
    Suggest {
        attachment: u64,
        style: SuggestionStyle,
        prompt: String,
    },
}

impl Outbound {
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Score { .. } => "score",
            Self::DetectSensitive { .. } => "detect",
            Self::Classify { .. } => "classify",
            Self::Suggest { .. } => "suggest",
        }
    }

    /// The generation token the completion will be checked against.
    pub const fn token(&self) -> u64 {
        match self {
            Self::Score { epoch, .. } | Self::DetectSensitive { epoch, .. } => *epoch,
            Self::Classify { ticket, .. } => *ticket,
            Self::Suggest { attachment, .. } => *attachment,
        }
    }

    /// Perform the call and tag the result for reconciliation.
    pub async fn execute(self, backend: &dyn PromptBackend) -> Completion {
        match self {
            Self::Score { epoch, prompt } => {
                let result = backend.score(&prompt).await;
                Completion::Score {
                    epoch,
                    prompt,
                    result,
                }
            }
            Self::DetectSensitive { epoch, text } => Completion::Sensitive {
                epoch,
                result: backend.detect_sensitive(&text).await,
            },
            Self::Classify { ticket, prompts } => Completion::Classified {
                ticket,
                result: backend.classify(&prompts).await,
            },
            Self::Suggest {
                attachment,
                style,
                prompt,
            } => Completion::Suggested {
                attachment,
                style,
                result: backend.suggest(&prompt, style).await,
            },
        }
    }
}

/// A finished backend call on its way back into the pipeline.
#[derive(Debug)]
pub enum Completion {
    Score {
        epoch: Epoch,
        prompt: String,
        result: Result<Option<ScoreTag>, BackendError>,
    },
    Sensitive {
        epoch: Epoch,
        result: Result<bool, BackendError>,
    },
    Classified {
        ticket: u64,
        result: Result<Option<Destination>, BackendError>,
    },
    Suggested {
        attachment: u64,
        style: SuggestionStyle,
        result: Result<Vec<String>, BackendError>,
    },
}

impl Completion {
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Score { .. } => "score",
            Self::Sensitive { .. } => "detect",
            Self::Classified { .. } => "classify",
            Self::Suggested { .. } => "suggest",
        }
    }

    pub const fn token(&self) -> u64 {
        match self {
            Self::Score { epoch, .. } | Self::Sensitive { epoch, .. } => *epoch,
            Self::Classified { ticket, .. } => *ticket,
            Self::Suggested { attachment, .. } => *attachment,
        }
    }

    pub fn error(&self) -> Option<&BackendError> {
        match self {
            Self::Score { result, .. } => result.as_ref().err(),
            Self::Sensitive { result, .. } => result.as_ref().err(),
            Self::Classified { result, .. } => result.as_ref().err(),
            Self::Suggested { result, .. } => result.as_ref().err(),
        }
    }
}
