pub mod http;
pub mod http_client;
pub mod scrub;
pub mod traits;
pub mod types;

use std::sync::Arc;

use crate::config::{Config, DetectionMode};
use crate::detect::LocalDetectBackend;

pub use http::HttpBackend;
pub use http_client::{build_backend_client, build_backend_client_with_timeouts};
pub use scrub::{sanitize_error_body, scrub_secret_patterns};
pub use traits::PromptBackend;
pub use types::{Destination, ScoreTag};

/// Build the backend selected by `config`.
pub fn create_backend(config: &Config) -> Arc<dyn PromptBackend> {
    let http = HttpBackend::from_config(&config.backend);
    match config.detection.mode {
        DetectionMode::Remote => Arc::new(http),
        DetectionMode::Local => Arc::new(LocalDetectBackend::new(http)),
    }
}
