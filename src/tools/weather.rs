use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::clients::open_meteo::{OpenMeteoClient, WeatherError};
use crate::domain::{Arguments, Tool, ToolError, WeatherReading};

use super::parse_arguments;

#[derive(Debug, Deserialize)]
struct CoordinatesQuery {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct CityQuery {
    city: String,
}

/// Current weather by coordinate pair.
#[derive(Clone)]
pub struct GetWeatherTool {
    client: OpenMeteoClient,
}

impl GetWeatherTool {
    pub fn new(client: OpenMeteoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetWeatherTool {
    fn name(&self) -> &'static str {
        "get_weather"
    }
    fn description(&self) -> &'static str {
        "Get current weather for a location by latitude and longitude"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "latitude": { "type": "number", "description": "Latitude of the location" },
                "longitude": { "type": "number", "description": "Longitude of the location" }
            },
            "required": ["latitude", "longitude"]
        })
    }
    async fn call(&self, arguments: &Arguments) -> Result<String, ToolError> {
        let q: CoordinatesQuery = parse_arguments(arguments)?;
        Ok(fetch_and_render(&self.client, q.latitude, q.longitude).await)
    }
}

/// Current weather by city name: geocode first, then the coordinate path.
#[derive(Clone)]
pub struct GetWeatherByCityTool {
    client: OpenMeteoClient,
}

impl GetWeatherByCityTool {
    pub fn new(client: OpenMeteoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetWeatherByCityTool {
    fn name(&self) -> &'static str {
        "get_weather_by_city"
    }
    fn description(&self) -> &'static str {
        "Get current weather for a city name"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "city": { "type": "string", "description": "Name of the city" }
            },
            "required": ["city"]
        })
    }
    async fn call(&self, arguments: &Arguments) -> Result<String, ToolError> {
        let q: CityQuery = parse_arguments(arguments)?;
        let text = match self.client.geocode(&q.city).await {
            Ok(Some(loc)) => {
                let weather = fetch_and_render(&self.client, loc.latitude, loc.longitude).await;
                format!(
                    "Location: {}, {} ({}, {})\n\n{}",
                    loc.name, loc.country, loc.latitude, loc.longitude, weather
                )
            }
            Ok(None) => format!("City not found: {}", q.city),
            Err(WeatherError::Status(code)) => format!("Error finding city: {code}"),
            Err(e) => format!("Error finding city: {e}"),
        };
        Ok(text)
    }
}

/// Upstream failures are normalized into text results across the board; the
/// host never sees a protocol fault for a broken weather lookup.
async fn fetch_and_render(client: &OpenMeteoClient, latitude: f64, longitude: f64) -> String {
    match client.current_weather(latitude, longitude).await {
        Ok(reading) => render_current(&reading),
        Err(WeatherError::Status(code)) => format!("Error fetching weather: {code}"),
        Err(e) => format!("Error fetching weather: {e}"),
    }
}

fn render_current(reading: &WeatherReading) -> String {
    format!(
        "Current Weather:\n- Temperature: {}°C\n- Wind Speed: {} km/h\n- Humidity: {}%\n- Weather Code: {}",
        or_na(reading.temperature_celsius),
        or_na(reading.wind_speed_kmh),
        or_na(reading.relative_humidity_pct),
        or_na(reading.weather_code),
    )
}

fn or_na<T: fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}
