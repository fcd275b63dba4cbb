//! Wall clock tool.

use serde_json::{json, Value};

use super::Tool;
use crate::agent::ActionInput;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns the local time as `YYYY-mm-dd HH:MM:SS`.
pub struct CurrentTime;

impl Tool for CurrentTime {
    fn name(&self) -> &str {
        "get_current_time"
    }

    fn description(&self) -> &str {
        "当你想知道现在的时间时非常有用。"
    }

    fn input_schema(&self) -> Value {
        json!({})
    }

    fn output_schema(&self) -> Value {
        json!({
            "time": {
                "type": "string",
                "description": "格式为: YYYY-mm-dd HH:MM:SS"
            }
        })
    }

    fn invoke(&self, _input: &ActionInput) -> String {
        chrono::Local::now().format(TIME_FORMAT).to_string()
    }
}
