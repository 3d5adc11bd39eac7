use reqwest::Client;
use std::time::Duration;

use crate::config::BackendConfig;

pub fn build_backend_client(config: &BackendConfig) -> Client {
    build_backend_client_with_timeouts(config.request_timeout_secs, config.connect_timeout_secs)
}

pub fn build_backend_client_with_timeouts(
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: u64,
) -> Client {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60));
    if let Some(secs) = request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().unwrap_or_else(|_| Client::new())
}
