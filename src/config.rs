//! Configuration management for the agent.
//!
//! Configuration can be set via environment variables:
//! - `QWEN_LLM_API_KEY` - Required. Bearer token for the model backend.
//! - `LLM_MODEL` - Optional. Model identifier. Defaults to `qwen-max`.
//! - `LLM_API_URL` - Optional. Text-generation endpoint. Defaults to DashScope.
//! - `LLM_TIMEOUT_SECS` - Optional. Per-request timeout. Defaults to `60`.
//! - `LLM_STOP_SEQUENCE` - Optional. Stop sequence sent with every request. Defaults to `"\nObservation"`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations. Defaults to `10`.
//! - `AGENT_INSTRUCTION` - Optional. Role instruction placed in the prompt.

use thiserror::Error;

use crate::agent::DEFAULT_INSTRUCTION;

pub const DEFAULT_API_URL: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation";
pub const DEFAULT_MODEL: &str = "qwen-max";
pub const DEFAULT_STOP_SEQUENCE: &str = "\nObservation";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model backend API key
    pub api_key: String,

    pub model: String,

    pub api_url: String,

    /// Timeout for a single model call, in seconds
    pub request_timeout_secs: u64,

    /// Sent to the backend so generation halts before a made-up observation
    pub stop_sequence: String,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,

    /// Role instruction rendered at the top of the prompt
    pub instruction: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `QWEN_LLM_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = var("QWEN_LLM_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("QWEN_LLM_API_KEY".to_string()))?;

        let request_timeout_secs = var("LLM_TIMEOUT_SECS")
            .map(|v| parse_number::<u64>("LLM_TIMEOUT_SECS", &v))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let max_iterations = var("MAX_ITERATIONS")
            .map(|v| parse_number::<usize>("MAX_ITERATIONS", &v))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_ITERATIONS);
        if max_iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "MAX_ITERATIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let mut config = Self::new(api_key);
        if let Some(model) = var("LLM_MODEL") {
            config.model = model;
        }
        if let Some(url) = var("LLM_API_URL") {
            config.api_url = url;
        }
        if let Some(stop) = var("LLM_STOP_SEQUENCE") {
            config.stop_sequence = stop;
        }
        if let Some(instruction) = var("AGENT_INSTRUCTION") {
            config.instruction = instruction;
        }
        config.request_timeout_secs = request_timeout_secs;
        config.max_iterations = max_iterations;

        Ok(config)
    }

    /// Create a config with default values (useful for testing).
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            stop_sequence: DEFAULT_STOP_SEQUENCE.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            instruction: DEFAULT_INSTRUCTION.to_string(),
        }
    }
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::InvalidValue(key.to_string(), format!("{}", e)))
}
