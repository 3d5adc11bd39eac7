use super::{Config, DetectionMode};

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PROMPTBUDDY_BASE_URL")
            && !url.is_empty()
        {
            self.backend.base_url = url;
        }

        if let Ok(ms) = std::env::var("PROMPTBUDDY_DEBOUNCE_MS")
            && let Ok(ms) = ms.parse::<u64>()
            && ms > 0
        {
            self.pipeline.debounce_ms = ms;
        }

        if let Ok(mode) = std::env::var("PROMPTBUDDY_DETECTION_MODE")
            && let Ok(mode) = mode.parse::<DetectionMode>()
        {
            self.detection.mode = mode;
        }
    }
}
