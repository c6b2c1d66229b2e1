use axum::{
    routing::{any_service, get, post},
    Router,
};
use std::sync::Arc;

use crate::infra::config::Config;
use crate::infra::mcp::{self, LocalSessionManager, WeatherSvc};
use crate::tools::registry::Registry;

/// Default app: `/healthz` + streamable MCP at `/mcp`.
pub fn build_app_default(cfg: &Config) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let upstream = cfg.upstream.clone();
    let mcp_service =
        mcp::make_streamable_http_service(move || WeatherSvc::from_config(&upstream), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}

/// Default app **plus** the deprecated JSON-RPC shim at `/v1/mcp`.
pub fn build_app_with_deprecated_api(cfg: &Config, registry: Registry) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let upstream = cfg.upstream.clone();
    let mcp_service =
        mcp::make_streamable_http_service(move || WeatherSvc::from_config(&upstream), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
        .route("/v1/mcp", post(crate::api::mcp::http))
        .with_state(registry)
}
