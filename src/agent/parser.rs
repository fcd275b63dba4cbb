//! Response parsing: split the raw model text on the action delimiter, then
//! strictly decode the fenced JSON action.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Marks the start of the fenced action block.
pub const ACTION_DELIMITER: &str = "Action:\n```";

const FENCE: &str = "```";

/// Reserved action name that ends the loop.
pub const FINAL_ANSWER: &str = "Final Answer";

#[derive(Debug, Error)]
pub enum ParseError {
    /// Zero or more than one action delimiter.
    #[error("expected exactly one action block, found {segments} segment(s)")]
    MalformedStructure { segments: usize },

    #[error("invalid action JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Input attached to an action. Tools declare which shape they accept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ActionInput {
    Text(String),
    Object(Map<String, Value>),
}

impl ActionInput {
    /// String field lookup on object inputs.
    pub fn field_str(&self, field: &str) -> Option<&str> {
        match self {
            ActionInput::Object(map) => map.get(field).and_then(Value::as_str),
            ActionInput::Text(_) => None,
        }
    }

    /// Plain text for strings, compact JSON for objects.
    pub fn to_text(&self) -> String {
        match self {
            ActionInput::Text(text) => text.clone(),
            ActionInput::Object(map) => serde_json::to_string(map).unwrap_or_default(),
        }
    }
}

/// One decoded action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionRecord {
    pub action: String,
    pub action_input: ActionInput,
}

impl ActionRecord {
    pub fn is_final(&self) -> bool {
        self.action == FINAL_ANSWER
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub thought: String,
    /// Fence-stripped action text, exactly as appended to the scratchpad.
    pub action_json: String,
    pub action: ActionRecord,
}

pub fn parse_response(content: &str) -> Result<ParsedResponse, ParseError> {
    let segments: Vec<&str> = content.split(ACTION_DELIMITER).collect();
    let [thought, action_block] = segments.as_slice() else {
        return Err(ParseError::MalformedStructure {
            segments: segments.len(),
        });
    };

    let action_json = action_block.replace(FENCE, "").trim().to_string();
    let action: ActionRecord = serde_json::from_str(&action_json)?;

    Ok(ParsedResponse {
        thought: thought.trim().to_string(),
        action_json,
        action,
    })
}
