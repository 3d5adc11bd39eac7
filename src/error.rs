use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `promptbuddy`.
///
/// Each subsystem defines its own error variant. The pipeline absorbs backend
/// failures locally; these types exist so library callers (and the one-shot
/// CLI commands) can still match on what went wrong.
#[derive(Debug, Error)]
pub enum BuddyError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Backend ──────────────────────────────────────────────────────────
    #[error("backend: {0}")]
    Backend(#[from] BackendError),

    // ── Host page ────────────────────────────────────────────────────────
    #[error("host: {0}")]
    Host(#[from] HostError),

    // ── User input preconditions ─────────────────────────────────────────
    #[error("input: {0}")]
    Input(#[from] InputError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Backend errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{operation} request failed: {message}")]
    Request { operation: String, message: String },

    #[error("{operation} returned status {status}: {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("{operation} response could not be decoded: {message}")]
    Decode { operation: String, message: String },
}

impl BackendError {
    /// Operation name the failure belongs to (for structured logs).
    pub fn operation(&self) -> &str {
        match self {
            Self::Request { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => operation,
        }
    }
}

// ─── Host errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum HostError {
    #[error("clipboard write failed: {0}")]
    Clipboard(String),
}

// ─── User input errors ──────────────────────────────────────────────────────

/// Preconditions the user can fix immediately. These are the only failures
/// surfaced as an interruptive notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please type something into the prompt field first.")]
    EmptyField,

    #[error("No editable prompt field was found on this page.")]
    NoField,

    #[error("No {history} history entry at position {index}.")]
    MissingHistoryEntry { history: &'static str, index: usize },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, BuddyError>;
