use serde::de::DeserializeOwned;

use crate::domain::{Arguments, ToolError};

pub mod registry;
pub mod weather;

/// Parse the loose argument mapping into a tool's typed query. Fails fast
/// with a validation error before any outbound call is made.
pub fn parse_arguments<T: DeserializeOwned>(arguments: &Arguments) -> Result<T, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments.clone()))
        .map_err(|e| ToolError::InvalidParams(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        latitude: f64,
    }

    #[test]
    fn parses_typed_arguments() {
        let args = json!({"latitude": 52.52}).as_object().unwrap().clone();
        let p: Probe = parse_arguments(&args).unwrap();
        assert_eq!(p.latitude, 52.52);
    }

    #[test]
    fn rejects_wrong_types_with_invalid_params() {
        let args = json!({"latitude": "north"}).as_object().unwrap().clone();
        let err = parse_arguments::<Probe>(&args).unwrap_err();
        let ToolError::InvalidParams(msg) = err;
        assert!(msg.contains("latitude") || msg.contains("invalid type"));
    }

    #[test]
    fn rejects_missing_fields() {
        let args = serde_json::Map::new();
        assert!(parse_arguments::<Probe>(&args).is_err());
    }
}
