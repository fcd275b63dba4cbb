//! Language model gateway.
//!
//! The agent loop only needs `query(prompt) -> text`. Transport errors are
//! logged and collapse to an empty string; callers treat "" as no response.

mod dashscope;

pub use dashscope::DashScopeClient;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed backend response: {0}")]
    Decode(String),
}

/// Token accounting reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: Option<Usage>,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError>;

    /// Soft-failing variant used by the agent loop.
    async fn query(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            Ok(completion) => completion.text,
            Err(e) => {
                tracing::warn!("LLM request failed: {}", e);
                String::new()
            }
        }
    }
}
