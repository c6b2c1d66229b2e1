//! MCP server integration (stdio + Streamable HTTP) for weather-mcp-gateway.
//!
//! The handler is a thin shell over the tool registry: `tools/list` mirrors
//! the catalog, `tools/call` goes through `Registry::dispatch`, and every
//! result is a single text content item.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, ServerInfo, Tool as ToolDescriptor,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::transport::streamable_http_server::tower::{
    StreamableHttpServerConfig, StreamableHttpService,
};
use rmcp::{serve_server, ErrorData as McpError, ServerHandler};

pub use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;

use crate::domain::ToolError;
use crate::infra::config::UpstreamConfig;
use crate::tools::registry::{build_registry_from_config, Registry};

#[derive(Clone)]
pub struct WeatherSvc {
    registry: Registry,
}

impl WeatherSvc {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn from_config(cfg: &UpstreamConfig) -> Self {
        Self::new(build_registry_from_config(cfg))
    }
}

impl ServerHandler for WeatherSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Weather lookups backed by the Open-Meteo forecast and geocoding APIs.".into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self
            .registry
            .tools()
            .iter()
            .map(|t| {
                let schema = t.input_schema().as_object().cloned().unwrap_or_default();
                ToolDescriptor::new(t.name(), t.description(), Arc::new(schema))
            })
            .collect();
        Ok(ListToolsResult { next_cursor: None, tools })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = %request.name, "tools/call");
        let arguments = request.arguments.unwrap_or_default();
        let text = self
            .registry
            .dispatch(request.name.as_ref(), &arguments)
            .await
            .map_err(|e| match e {
                ToolError::InvalidParams(msg) => McpError::invalid_params(msg, None),
            })?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

/// Run the MCP server over stdin/stdout until the transport closes.
pub async fn serve_stdio(svc: WeatherSvc) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let running = serve_server(svc, (stdin, stdout)).await?;
    running.waiting().await?;
    Ok(())
}

pub fn make_streamable_http_service(
    factory: impl Fn() -> WeatherSvc + Send + Sync + 'static,
    session_mgr: Arc<LocalSessionManager>,
) -> StreamableHttpService<WeatherSvc, LocalSessionManager> {
    let cfg = StreamableHttpServerConfig::default();
    StreamableHttpService::new(move || Ok(factory()), session_mgr, cfg)
}
