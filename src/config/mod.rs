mod env_overrides;
mod loader;
mod types;

pub use types::{
    BackendConfig, Config, DetectionConfig, DetectionMode, EndpointsConfig, HostConfig,
    ObservabilityConfig, PipelineConfig,
};
