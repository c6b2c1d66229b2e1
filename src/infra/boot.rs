use std::net::SocketAddr;

use crate::infra::config::Config;
use crate::infra::mcp::{self, WeatherSvc};

pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::from_env_and_toml();
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        deprecate_rest = cfg.deprecate_rest,
        forecast_url = %cfg.upstream.forecast_url(),
        geocoding_url = %cfg.upstream.geocoding_url(),
        "BOOT weather-mcp-gateway"
    );

    // Stdio mode: speak MCP over stdin/stdout ONLY (no HTTP).
    if cfg.mode == "stdio" {
        let svc = WeatherSvc::from_config(&cfg.upstream);
        mcp::serve_stdio(svc).await.map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = if cfg.deprecate_rest {
        crate::infra::http_app::build_app_default(&cfg)
    } else {
        let registry = crate::tools::registry::build_registry_from_config(&cfg.upstream);
        crate::infra::http_app::build_app_with_deprecated_api(&cfg, registry)
    };

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
