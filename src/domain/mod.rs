use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Loosely-typed argument mapping as it arrives from the host runtime.
/// Each tool parses this into its own typed query before doing any work.
pub type Arguments = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
}

/// Current conditions for one coordinate pair. Fields are optional because
/// the upstream API may omit any of them; absent values render as "N/A".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_celsius: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub relative_humidity_pct: Option<f64>,
    pub weather_code: Option<i64>,
}

/// First geocoding match for a free-text place name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationMatch {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;
    /// Run the tool and return the text blob handed back to the host.
    async fn call(&self, arguments: &Arguments) -> Result<String, ToolError>;
}
