use serde::Deserialize;

/// Default Open-Meteo endpoints (no API key required).
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

pub struct Config {
    pub mode: String, // "server" or "stdio"
    pub port: u16,
    pub deprecate_rest: bool,
    pub upstream: UpstreamConfig,
}

/// Upstream endpoints and outbound-call limits. Every field is optional so a
/// partial TOML file or a single env override works; accessors fill defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub forecast_url: Option<String>,
    pub geocoding_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

impl UpstreamConfig {
    pub fn forecast_url(&self) -> &str {
        self.forecast_url.as_deref().unwrap_or(DEFAULT_FORECAST_URL)
    }
    pub fn geocoding_url(&self) -> &str {
        self.geocoding_url.as_deref().unwrap_or(DEFAULT_GEOCODING_URL)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    upstream: UpstreamConfig,
}

impl Config {
    /// Layered config: optional TOML file (`CONFIG_PATH`), env overrides on top.
    pub fn from_env_and_toml() -> Self {
        let file = std::env::var("CONFIG_PATH")
            .ok()
            .and_then(|path| match std::fs::read_to_string(&path) {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "CONFIG_PATH unreadable; ignoring");
                    None
                }
            })
            .and_then(|s| match toml::from_str::<FileConfig>(&s) {
                Ok(f) => Some(f),
                Err(e) => {
                    tracing::warn!(error = %e, "config file malformed; ignoring");
                    None
                }
            })
            .unwrap_or_default();

        let mode = std::env::var("MODE").unwrap_or_else(|_| "server".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let deprecate_rest = std::env::var("DEPRECATE_REST")
            .map(|v| !v.is_empty())
            .unwrap_or(false);

        let mut upstream = file.upstream;
        if let Some(v) = non_empty_env("FORECAST_BASE_URL") {
            upstream.forecast_url = Some(v);
        }
        if let Some(v) = non_empty_env("GEOCODING_BASE_URL") {
            upstream.geocoding_url = Some(v);
        }
        if let Some(v) = non_empty_env("UPSTREAM_TIMEOUT_SECS") {
            upstream.timeout_secs = v.parse::<u64>().ok();
        }

        Self { mode, port, deprecate_rest, upstream }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
