pub mod history;
pub mod settings;

pub use history::{
    BoundedHistory, HISTORY_CAPACITY, HistoryStore, ScoredPromptRecord, SubmittedPromptRecord,
};
pub use settings::{Settings, SuggestionStyle};
