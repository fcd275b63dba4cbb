//! Core agent loop implementation.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::llm::{DashScopeClient, LlmClient, LlmError};
use crate::tools::{DispatchError, ToolRegistry};

use super::parser::{parse_response, ActionInput, ParseError};
use super::prompt::{build_prompt, PromptContext};
use super::transcript::Transcript;

/// Why a query stopped without an answer.
#[derive(Debug, Error)]
pub enum AgentFailure {
    #[error("model returned an empty response")]
    EmptyModelResponse,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[derive(Debug)]
pub enum Outcome {
    Answered(String),
    Failed(AgentFailure),
    /// Iteration budget spent without a final answer.
    Exhausted,
}

/// One completed tool step.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentStep {
    pub thought: String,
    pub action: String,
    pub input: ActionInput,
    pub observation: String,
}

/// Result of one [`Agent::run`] invocation.
#[derive(Debug)]
pub struct AgentRun {
    pub outcome: Outcome,
    /// Number of model gateway calls made.
    pub model_calls: usize,
    /// Scratchpad as it stood when the loop ended.
    pub scratchpad: String,
    pub steps: Vec<AgentStep>,
}

impl AgentRun {
    /// The final answer, or "" for every non-answer outcome.
    pub fn answer(&self) -> &str {
        match &self.outcome {
            Outcome::Answered(answer) => answer,
            Outcome::Failed(_) | Outcome::Exhausted => "",
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.outcome, Outcome::Answered(_))
    }
}

/// The ReAct agent.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create an agent backed by DashScope and the built-in tools.
    pub fn new(config: Config) -> Result<Self, LlmError> {
        let llm = Arc::new(DashScopeClient::new(&config)?);
        Ok(Self::with_client(config, llm, ToolRegistry::new()))
    }

    pub fn with_client(config: Config, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { config, llm, tools }
    }

    /// Answer `query`, reading prior turns from `transcript`.
    ///
    /// Each iteration makes exactly one model call and at most one tool call.
    /// The loop stops on a final answer, on the first hard failure, or after
    /// `max_iterations` completed tool steps.
    pub async fn run(&self, query: &str, transcript: &Transcript) -> AgentRun {
        let history = transcript.render();
        let tool_catalog = self.tools.catalog_json();
        let tool_names = self.tools.tool_names();

        let mut run = AgentRun {
            outcome: Outcome::Exhausted,
            model_calls: 0,
            scratchpad: String::new(),
            steps: Vec::new(),
        };

        info!(query = %query, "Agent run started");

        for iteration in 0..self.config.max_iterations {
            debug!("Agent iteration {}", iteration + 1);

            let prompt = build_prompt(&PromptContext {
                instruction: &self.config.instruction,
                tool_catalog: &tool_catalog,
                tool_names: &tool_names,
                history: &history,
                query,
                scratchpad: &run.scratchpad,
            });

            let content = self.llm.query(&prompt).await;
            run.model_calls += 1;

            if content.trim().is_empty() {
                return fail(run, AgentFailure::EmptyModelResponse, iteration);
            }

            let parsed = match parse_response(&content) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!(content = %truncate_for_log(&content, 500), "Unparseable model output");
                    return fail(run, e.into(), iteration);
                }
            };

            if parsed.action.is_final() {
                let answer = parsed.action.action_input.to_text();
                info!(model_calls = run.model_calls, "Agent produced final answer");
                run.outcome = Outcome::Answered(answer);
                return run;
            }

            let observation = match self
                .tools
                .dispatch(&parsed.action.action, &parsed.action.action_input)
            {
                Ok(observation) => observation,
                Err(e) => return fail(run, e.into(), iteration),
            };
            debug!(
                tool = %parsed.action.action,
                observation = %truncate_for_log(&observation, 200),
                "Tool result"
            );

            run.scratchpad.push_str(&parsed.thought);
            run.scratchpad.push('\n');
            run.scratchpad.push_str(&parsed.action_json);
            run.scratchpad.push_str("\nObservation: ");
            run.scratchpad.push_str(&observation);
            run.scratchpad.push_str("\nThought: ");

            run.steps.push(AgentStep {
                thought: parsed.thought,
                action: parsed.action.action,
                input: parsed.action.action_input,
                observation,
            });
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached without a final answer"
        );
        run
    }
}

fn fail(mut run: AgentRun, reason: AgentFailure, iteration: usize) -> AgentRun {
    warn!(iteration = iteration + 1, "Agent run failed: {}", reason);
    run.outcome = Outcome::Failed(reason);
    run
}

/// Truncate a string for logging purposes.
fn truncate_for_log(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}... [truncated]", &s[..idx]),
    }
}
