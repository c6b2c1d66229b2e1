use std::sync::Arc;

use crate::clients::open_meteo::OpenMeteoClient;
use crate::domain::{Arguments, Tool, ToolError};
use crate::infra::config::UpstreamConfig;

use super::weather::{GetWeatherByCityTool, GetWeatherTool};

/// Immutable, ordered tool catalog plus the name-to-handler dispatch over it.
/// Built once at startup; no ambient registration.
#[derive(Clone)]
pub struct Registry(Arc<Vec<Arc<dyn Tool>>>);

impl Registry {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Registry(Arc::new(tools))
    }

    /// Catalog in declaration order, as advertised to the host runtime.
    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.0.iter().find(|t| t.name() == name)
    }

    /// Route one invocation. An unrecognized tool name is a normal outcome
    /// reported as text, not a fault to the caller.
    pub async fn dispatch(&self, name: &str, arguments: &Arguments) -> Result<String, ToolError> {
        match self.get(name) {
            Some(tool) => tool.call(arguments).await,
            None => {
                tracing::warn!(tool = name, "dispatch of unknown tool");
                Ok(format!("Unknown tool: {name}"))
            }
        }
    }
}

pub fn build_registry(client: OpenMeteoClient) -> Registry {
    Registry::new(vec![
        Arc::new(GetWeatherTool::new(client.clone())),
        Arc::new(GetWeatherByCityTool::new(client)),
    ])
}

pub fn build_registry_from_config(cfg: &UpstreamConfig) -> Registry {
    build_registry(OpenMeteoClient::from_config(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> Registry {
        build_registry(OpenMeteoClient::new(
            "http://localhost:9/v1/forecast",
            "http://localhost:9/v1/search",
        ))
    }

    #[test]
    fn catalog_is_ordered_and_complete() {
        let reg = registry();
        let names: Vec<&str> = reg.tools().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["get_weather", "get_weather_by_city"]);
    }

    #[test]
    fn schemas_declare_required_fields() {
        let reg = registry();
        let by_coords = reg.get("get_weather").unwrap().input_schema();
        assert_eq!(by_coords["required"], json!(["latitude", "longitude"]));
        let by_city = reg.get("get_weather_by_city").unwrap().input_schema();
        assert_eq!(by_city["required"], json!(["city"]));
    }

    #[tokio::test]
    async fn unknown_tool_dispatch_is_a_text_result() {
        let reg = registry();
        let text = reg
            .dispatch("does.not.exist", &serde_json::Map::new())
            .await
            .unwrap();
        assert_eq!(text, "Unknown tool: does.not.exist");
    }

    #[tokio::test]
    async fn known_tool_with_bad_arguments_is_invalid_params() {
        let reg = registry();
        let res = reg.dispatch("get_weather", &serde_json::Map::new()).await;
        assert!(res.is_err());
    }
}
