//! Tool registry and dispatch.
//!
//! Tools are plain synchronous capabilities. Each one declares its input
//! and output contract in the catalog form that is rendered verbatim into
//! the prompt, so the names the model sees are exactly the dispatch keys.

mod time;
mod weather;

pub use time::{CurrentTime, TIME_FORMAT};
pub use weather::LocationWeather;

use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::agent::ActionInput;

/// A capability the model can request by name.
pub trait Tool: Send + Sync {
    /// Dispatch key, also the catalog name.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Field map: `{ field: { type, description, required } }`.
    fn input_schema(&self) -> Value;

    fn output_schema(&self) -> Value;

    /// Run the tool. Input has already been checked against
    /// [`Tool::input_schema`]. Failures are reported in the returned text.
    fn invoke(&self, input: &ActionInput) -> String;
}

/// Static description of a registered tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub output_schema: Value,
}

#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid input for {tool}: {reason}")]
    InvalidInput { tool: String, reason: String },
}

/// Fixed mapping from tool name to tool.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Registry holding the built-in tools.
    pub fn new() -> Self {
        Self {
            tools: vec![Box::new(CurrentTime), Box::new(LocationWeather)],
        }
    }

    /// Registry holding exactly `tools`.
    pub fn with_tools(tools: Vec<Box<dyn Tool>>) -> Self {
        Self { tools }
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|t| ToolDescriptor {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
                output_schema: t.output_schema(),
            })
            .collect()
    }

    /// The catalog as rendered into the prompt.
    pub fn catalog_json(&self) -> String {
        let entries: Vec<Value> = self
            .tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {
                        "name": t.name(),
                        "description": t.description(),
                        "input_schema": t.input_schema(),
                        "out_schema": t.output_schema(),
                    }
                })
            })
            .collect();
        serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Quoted, comma separated tool names.
    pub fn tool_names(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("\"{}\"", t.name()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Look up `name`, validate `input` against its schema and invoke it.
    pub fn dispatch(&self, name: &str, input: &ActionInput) -> Result<String, DispatchError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        validate_input(&tool.input_schema(), input).map_err(|reason| {
            DispatchError::InvalidInput {
                tool: name.to_string(),
                reason,
            }
        })?;

        debug!(tool = name, "Dispatching tool");
        Ok(tool.invoke(input))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_input(schema: &Value, input: &ActionInput) -> Result<(), String> {
    let Some(fields) = schema.as_object() else {
        return Ok(());
    };

    let empty = Map::new();
    let provided = match input {
        ActionInput::Object(map) => map,
        // Tools without declared fields ignore whatever text they are given.
        ActionInput::Text(_) if fields.is_empty() => return Ok(()),
        ActionInput::Text(_) => &empty,
    };

    for (field, spec) in fields {
        let required = spec.get("required").and_then(Value::as_bool).unwrap_or(false);
        match provided.get(field) {
            None | Some(Value::Null) if required => {
                return Err(format!("missing required field '{}'", field));
            }
            Some(value)
                if !value.is_null() && spec.get("type").and_then(Value::as_str) == Some("string") =>
            {
                if !value.is_string() {
                    return Err(format!("field '{}' must be a string", field));
                }
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: Value) -> ActionInput {
        match value {
            Value::Object(map) => ActionInput::Object(map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn catalog_names_match_dispatch_keys() {
        let registry = ToolRegistry::new();
        let catalog: Value = serde_json::from_str(&registry.catalog_json()).unwrap();
        let names: Vec<&str> = catalog
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["function"]["name"].as_str().unwrap())
            .collect();

        assert_eq!(names, vec!["get_current_time", "get_location_weather"]);
        for entry in catalog.as_array().unwrap() {
            assert_eq!(entry["type"], "function");
            assert!(entry["function"].get("out_schema").is_some());
        }
        assert_eq!(
            registry.tool_names(),
            "\"get_current_time\", \"get_location_weather\""
        );
    }

    #[test]
    fn dispatch_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry
            .dispatch("get_stock_price", &ActionInput::Text(String::new()))
            .unwrap_err();
        assert_eq!(err, DispatchError::UnknownTool("get_stock_price".into()));
    }

    #[test]
    fn dispatch_is_case_sensitive() {
        let registry = ToolRegistry::new();
        assert!(matches!(
            registry.dispatch("Get_Current_Time", &ActionInput::Text(String::new())),
            Err(DispatchError::UnknownTool(_))
        ));
    }

    #[test]
    fn weather_requires_city() {
        let registry = ToolRegistry::new();
        let err = registry
            .dispatch("get_location_weather", &object(json!({})))
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidInput { ref tool, .. } if tool == "get_location_weather"));

        let err = registry
            .dispatch("get_location_weather", &object(json!({"city": 42})))
            .unwrap_err();
        assert!(err.to_string().contains("must be a string"));

        let err = registry
            .dispatch("get_location_weather", &ActionInput::Text("北京".into()))
            .unwrap_err();
        assert!(err.to_string().contains("city"));
    }

    #[test]
    fn weather_dispatches_with_city() {
        let registry = ToolRegistry::new();
        let observation = registry
            .dispatch("get_location_weather", &object(json!({"city": "杭州"})))
            .unwrap();
        assert_eq!(observation, "杭州今日暴雨，气温23℃。");
    }

    #[test]
    fn time_accepts_any_input() {
        let registry = ToolRegistry::new();
        assert!(registry
            .dispatch("get_current_time", &ActionInput::Text(String::new()))
            .is_ok());
        assert!(registry
            .dispatch("get_current_time", &object(json!({})))
            .is_ok());
    }

    #[test]
    fn list_tools_exposes_schemas() {
        let tools = ToolRegistry::new().list_tools();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[1].input_schema["city"]["required"], true);
        assert_eq!(tools[0].input_schema, json!({}));
    }
}
