//! Deprecated JSON-RPC REST shim over the tool registry. The first-class
//! surface is the rmcp transport in `infra::mcp`; this route exists for
//! clients that still speak plain JSON-RPC over POST.

use axum::Json;
use serde_json::{json, Value as J};

use crate::core::mcp::{RpcReq, RpcResp};
use crate::domain::ToolError;
use crate::infra::http::json as http_json;
use crate::tools::registry::Registry;

fn tools_list(reg: &Registry) -> J {
    let tools: Vec<J> = reg
        .tools()
        .iter()
        .map(|t| {
            json!({ "name": t.name(), "description": t.description(), "inputSchema": t.input_schema() })
        })
        .collect();
    json!({ "tools": tools })
}

async fn call_tool(reg: &Registry, params: &J) -> Result<J, ToolError> {
    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidParams("missing tool name".into()))?;
    let arguments = params
        .get("arguments")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();
    let text = reg.dispatch(name, &arguments).await?;
    Ok(json!({ "content": [{ "type": "text", "text": text }] }))
}

pub async fn http(
    axum::extract::State(reg): axum::extract::State<Registry>,
    Json(req): Json<RpcReq>,
) -> Json<RpcResp> {
    tracing::debug!(method = %req.method, id = ?req.id, "REST shim request");
    let id = req.id.clone();
    match req.method.as_str() {
        "initialize" => http_json::ok(
            id,
            json!({ "serverInfo": { "name": "weather-mcp-gateway", "version": env!("CARGO_PKG_VERSION") }, "capabilities": {} }),
        ),
        "shutdown" => http_json::ok(id, J::Null),
        "tools.list" | "tools/list" => http_json::ok(id, tools_list(&reg)),
        "tools.call" | "tools/call" => match call_tool(&reg, &req.params).await {
            Ok(out) => http_json::ok(id, out),
            Err(e) => {
                tracing::warn!(error = %e, "tools.call rejected");
                http_json::error(id, -32602, e.to_string())
            }
        },
        _ => http_json::error(id, -32601, format!("unknown method: {}", req.method)),
    }
}
