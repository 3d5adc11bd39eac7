//! In-process sensitive-content detection.
//!
//! Mirrors the service-side detector so it can run without a backend round
//! trip (`detection.mode = "local"`).

pub mod local;
pub mod patterns;
pub mod scanner;

pub use local::LocalDetectBackend;
pub use scanner::{SensitiveScanner, shared_scanner};
