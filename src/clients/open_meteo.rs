use std::time::Instant;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{LocationMatch, WeatherReading};
use crate::infra::config::UpstreamConfig;
use crate::infra::http::headers::with_standard_headers;
use crate::infra::runtime::limits::{make_http_client, make_http_client_with};

/// Current-conditions fields requested from the forecast endpoint.
const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m,relative_humidity_2m,weather_code";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("upstream status {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct OpenMeteoClient {
    forecast_url: String,
    geocoding_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(forecast_url: impl Into<String>, geocoding_url: impl Into<String>) -> Self {
        Self {
            forecast_url: forecast_url.into(),
            geocoding_url: geocoding_url.into(),
            http: make_http_client(),
        }
    }

    pub fn from_config(cfg: &UpstreamConfig) -> Self {
        Self {
            forecast_url: cfg.forecast_url().to_string(),
            geocoding_url: cfg.geocoding_url().to_string(),
            http: make_http_client_with(cfg),
        }
    }

    /// Fetch current conditions for a coordinate pair.
    pub async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReading, WeatherError> {
        tracing::debug!(endpoint = %self.forecast_url, latitude, longitude, "forecast request");
        let start = Instant::now();
        let builder = with_standard_headers(self.http.get(&self.forecast_url));
        let res = async {
            let resp = builder
                .query(&[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("current", CURRENT_FIELDS.to_string()),
                    ("temperature_unit", "celsius".to_string()),
                ])
                .send()
                .await?;
            let status = resp.status();
            // Anything but a plain 200 is reported by code; a 204/206 has no
            // usable body either.
            if status != StatusCode::OK {
                return Err(WeatherError::Status(status.as_u16()));
            }
            let wire = resp.json::<ForecastWire>().await?;
            Ok(wire.current.map(WeatherReading::from).unwrap_or_default())
        }
        .await;
        observe("forecast", start, res.is_err());
        res
    }

    /// Resolve a free-text place name to its best match, if any.
    pub async fn geocode(&self, city: &str) -> Result<Option<LocationMatch>, WeatherError> {
        tracing::debug!(endpoint = %self.geocoding_url, city, "geocoding request");
        let start = Instant::now();
        let builder = with_standard_headers(self.http.get(&self.geocoding_url));
        let res = async {
            let resp = builder
                .query(&[("name", city.to_string()), ("count", "1".to_string())])
                .send()
                .await?;
            let status = resp.status();
            if status != StatusCode::OK {
                return Err(WeatherError::Status(status.as_u16()));
            }
            let wire = resp.json::<GeocodingWire>().await?;
            Ok(wire.results.into_iter().next().map(|m| LocationMatch {
                name: m.name.unwrap_or_else(|| city.to_string()),
                country: m.country.unwrap_or_default(),
                latitude: m.latitude,
                longitude: m.longitude,
            }))
        }
        .await;
        observe("geocoding", start, res.is_err());
        res
    }
}

fn observe(endpoint: &'static str, start: Instant, failed: bool) {
    let elapsed_ms = start.elapsed().as_millis() as f64;
    metrics::histogram!("upstream_latency_ms", "endpoint" => endpoint).record(elapsed_ms);
    if failed {
        metrics::counter!("upstream_error_total", "endpoint" => endpoint).increment(1);
    }
}

#[derive(Deserialize)]
struct ForecastWire {
    current: Option<CurrentWire>,
}

#[derive(Deserialize)]
struct CurrentWire {
    temperature_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    weather_code: Option<i64>,
}

impl From<CurrentWire> for WeatherReading {
    fn from(w: CurrentWire) -> Self {
        WeatherReading {
            temperature_celsius: w.temperature_2m,
            wind_speed_kmh: w.wind_speed_10m,
            relative_humidity_pct: w.relative_humidity_2m,
            weather_code: w.weather_code,
        }
    }
}

#[derive(Deserialize)]
struct GeocodingWire {
    #[serde(default)]
    results: Vec<GeocodingMatchWire>,
}

#[derive(Deserialize)]
struct GeocodingMatchWire {
    latitude: f64,
    longitude: f64,
    name: Option<String>,
    country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> OpenMeteoClient {
        OpenMeteoClient::new(
            format!("{}/v1/forecast", server.base_url()),
            format!("{}/v1/search", server.base_url()),
        )
    }

    #[tokio::test]
    async fn it_maps_current_conditions_from_forecast_body() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/forecast")
                .query_param("latitude", "52.52")
                .query_param("longitude", "13.41")
                .query_param("current", CURRENT_FIELDS)
                .query_param("temperature_unit", "celsius");
            then.status(200).json_body(json!({
                "current": {
                    "temperature_2m": 18.3,
                    "wind_speed_10m": 10.1,
                    "relative_humidity_2m": 55,
                    "weather_code": 2
                }
            }));
        });

        let cli = client_for(&server);
        let reading = cli.current_weather(52.52, 13.41).await.unwrap();
        m.assert();

        assert_eq!(reading.temperature_celsius, Some(18.3));
        assert_eq!(reading.wind_speed_kmh, Some(10.1));
        assert_eq!(reading.relative_humidity_pct, Some(55.0));
        assert_eq!(reading.weather_code, Some(2));
    }

    #[tokio::test]
    async fn it_tolerates_missing_current_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/forecast");
            then.status(200).json_body(json!({"current": {"temperature_2m": 7.0}}));
        });

        let cli = client_for(&server);
        let reading = cli.current_weather(0.0, 0.0).await.unwrap();
        assert_eq!(reading.temperature_celsius, Some(7.0));
        assert!(reading.wind_speed_kmh.is_none());
        assert!(reading.relative_humidity_pct.is_none());
        assert!(reading.weather_code.is_none());
    }

    #[tokio::test]
    async fn it_returns_status_error_on_non_success() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/forecast");
            then.status(503).body("unavailable");
        });

        let cli = client_for(&server);
        let err = cli.current_weather(1.0, 2.0).await.unwrap_err();
        match err {
            WeatherError::Status(code) => assert_eq!(code, 503),
            other => panic!("expected status error, got {other}"),
        }
    }

    #[tokio::test]
    async fn it_treats_bodyless_2xx_as_a_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/forecast");
            then.status(204);
        });

        let cli = client_for(&server);
        let err = cli.current_weather(1.0, 2.0).await.unwrap_err();
        match err {
            WeatherError::Status(code) => assert_eq!(code, 204),
            other => panic!("expected status error, got {other}"),
        }
    }

    #[tokio::test]
    async fn it_takes_the_first_geocoding_match() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/search")
                .query_param("name", "Berlin")
                .query_param("count", "1");
            then.status(200).json_body(json!({
                "results": [
                    {"latitude": 52.52, "longitude": 13.41, "name": "Berlin", "country": "Germany"}
                ]
            }));
        });

        let cli = client_for(&server);
        let loc = cli.geocode("Berlin").await.unwrap().unwrap();
        m.assert();

        assert_eq!(loc.name, "Berlin");
        assert_eq!(loc.country, "Germany");
        assert_eq!(loc.latitude, 52.52);
        assert_eq!(loc.longitude, 13.41);
    }

    #[tokio::test]
    async fn it_defaults_name_and_country_when_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/search");
            then.status(200)
                .json_body(json!({"results": [{"latitude": 1.5, "longitude": 2.5}]}));
        });

        let cli = client_for(&server);
        let loc = cli.geocode("Somewhere").await.unwrap().unwrap();
        assert_eq!(loc.name, "Somewhere");
        assert_eq!(loc.country, "");
    }

    #[tokio::test]
    async fn it_returns_none_for_empty_result_set() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/search");
            then.status(200).json_body(json!({}));
        });

        let cli = client_for(&server);
        assert!(cli.geocode("Nowhereville").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn it_sets_request_id_and_user_agent_headers() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/forecast")
                .header_exists("x-request-id")
                .header_exists("user-agent");
            then.status(200).json_body(json!({"current": {}}));
        });

        let cli = client_for(&server);
        let _ = cli.current_weather(0.0, 0.0).await.unwrap();
        m.assert();
    }
}
