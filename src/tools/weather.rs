//! Canned city weather lookup.

use serde_json::{json, Value};

use super::Tool;
use crate::agent::ActionInput;

pub struct LocationWeather;

impl Tool for LocationWeather {
    fn name(&self) -> &str {
        "get_location_weather"
    }

    fn description(&self) -> &str {
        "当你想查询指定城市的天气时非常有用。"
    }

    fn input_schema(&self) -> Value {
        json!({
            "city": {
                "type": "string",
                "description": "城市名称",
                "required": true
            }
        })
    }

    fn output_schema(&self) -> Value {
        json!({
            "weather_describe": {
                "type": "string",
                "description": "城市当天的天气描述"
            }
        })
    }

    fn invoke(&self, input: &ActionInput) -> String {
        let city = input.field_str("city").unwrap_or_default();
        format!("{}今日暴雨，气温23℃。", city)
    }
}
