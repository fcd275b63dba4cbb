//! Agent module - the ReAct control loop.
//!
//! The agent follows a "thought / action / observation" pattern:
//! 1. Render the prompt with tools, history, the query and the scratchpad
//! 2. Call the model once
//! 3. Parse exactly one fenced JSON action from the response
//! 4. Return on "Final Answer", otherwise run the tool and append the
//!    observation to the scratchpad
//! 5. Repeat until answered, a hard failure, or the iteration budget is spent

mod agent_loop;
mod parser;
mod prompt;
mod transcript;

pub use agent_loop::{Agent, AgentFailure, AgentRun, AgentStep, Outcome};
pub use parser::{
    parse_response, ActionInput, ActionRecord, ParseError, ParsedResponse, ACTION_DELIMITER,
    FINAL_ANSWER,
};
pub use prompt::{build_prompt, PromptContext, DEFAULT_INSTRUCTION};
pub use transcript::Transcript;
