use std::time::Duration;

use crate::infra::config::UpstreamConfig;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);

/// Build a reqwest client with bounded timeouts. Every outbound call made
/// through this client is cut off rather than suspending indefinitely.
pub fn make_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("reqwest client")
}

/// Same, with limits taken from config where present.
pub fn make_http_client_with(cfg: &UpstreamConfig) -> reqwest::Client {
    let connect = cfg
        .connect_timeout_secs
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_CONNECT_TIMEOUT);
    let total = cfg
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);
    reqwest::Client::builder()
        .connect_timeout(connect)
        .timeout(total)
        .build()
        .expect("reqwest client")
}
