use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::clients::open_meteo::OpenMeteoClient;
use crate::infra::config::Config;

#[derive(Parser)]
#[command(name = "weather-mcp-gateway")]
#[command(about = "Weather MCP Gateway - Admin CLI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Health check the service
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration
    Config,
    /// Show service status
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// One-shot weather lookup against the configured upstreams
    TestWeather {
        /// City to look up
        #[arg(short, long, default_value = "Berlin")]
        city: String,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    run_commands(cli.command).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("health check failed: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::Config => match validate_config() {
            Ok(_) => {
                println!("configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("configuration validation failed: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("status check failed: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::TestWeather { city } => match test_weather(&city).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("weather lookup failed: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{url}/healthz"))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_env_and_toml();

    if !matches!(cfg.mode.as_str(), "server" | "stdio") {
        return Err(format!("Invalid MODE: {}. Must be 'server' or 'stdio'", cfg.mode).into());
    }
    if cfg.mode == "server" && cfg.port == 0 {
        return Err("PORT cannot be 0".into());
    }
    reqwest::Url::parse(cfg.upstream.forecast_url())
        .map_err(|e| format!("invalid forecast URL: {e}"))?;
    reqwest::Url::parse(cfg.upstream.geocoding_url())
        .map_err(|e| format!("invalid geocoding URL: {e}"))?;
    Ok(())
}

async fn show_status(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let health_response = client
        .get(format!("{url}/healthz"))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "health: {}",
        if health_response.status().is_success() {
            "healthy"
        } else {
            "unhealthy"
        }
    );

    let cfg = Config::from_env_and_toml();
    println!("mode: {}", cfg.mode);
    println!("port: {}", cfg.port);
    println!("forecast url: {}", cfg.upstream.forecast_url());
    println!("geocoding url: {}", cfg.upstream.geocoding_url());
    Ok(())
}

async fn test_weather(city: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_env_and_toml();
    let client = OpenMeteoClient::from_config(&cfg.upstream);

    let loc = client
        .geocode(city)
        .await?
        .ok_or_else(|| format!("City not found: {city}"))?;
    println!(
        "Location: {}, {} ({}, {})",
        loc.name, loc.country, loc.latitude, loc.longitude
    );

    let reading = client.current_weather(loc.latitude, loc.longitude).await?;
    println!("{reading:?}");
    Ok(())
}
