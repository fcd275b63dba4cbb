//! DashScope text-generation backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Completion, LlmClient, LlmError, Usage};
use crate::config::Config;

pub struct DashScopeClient {
    client: reqwest::Client,
    api_key: String,
    url: String,
    model: String,
    stop: String,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    input: GenerationInput<'a>,
    stream: bool,
    stop: &'a str,
    extra_body: ExtraBody,
}

#[derive(Debug, Serialize)]
struct GenerationInput<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
struct ExtraBody {
    enable_search: bool,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    usage: Option<Usage>,
    output: GenerationOutput,
}

#[derive(Debug, Deserialize)]
struct GenerationOutput {
    text: String,
}

impl DashScopeClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            url: config.api_url.clone(),
            model: config.model.clone(),
            stop: config.stop_sequence.clone(),
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> GenerationRequest<'a> {
        GenerationRequest {
            model: &self.model,
            input: GenerationInput { prompt },
            stream: false,
            stop: &self.stop,
            extra_body: ExtraBody {
                enable_search: false,
            },
        }
    }
}

#[async_trait]
impl LlmClient for DashScopeClient {
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        tracing::debug!("Prompt:\n{}", prompt);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion = parse_generation(&body)?;
        tracing::debug!("LLM response:\n{}", completion.text);
        if let Some(usage) = completion.usage {
            tracing::info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                total_tokens = usage.total_tokens,
                "LLM usage"
            );
        }

        Ok(completion)
    }
}

fn parse_generation(body: &str) -> Result<Completion, LlmError> {
    let parsed: GenerationResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Decode(e.to_string()))?;
    Ok(Completion {
        text: parsed.output.text,
        usage: parsed.usage,
    })
}
