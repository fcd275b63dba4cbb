//! # React Agent
//!
//! A minimal ReAct-pattern agent loop.
//!
//! This library provides:
//! - A prompt builder for the thought/action/observation format
//! - A strict parser for the single fenced JSON action per model turn
//! - A fixed registry of synchronous tools
//! - A DashScope-backed model gateway that soft-fails to an empty response
//!
//! ## Architecture
//!
//! The agent loop is the sole driver:
//! 1. Build the prompt from the query, tool catalog, history and scratchpad
//! 2. Call the model, parse the action
//! 3. Return the final answer, or dispatch the tool and append the observation
//! 4. Repeat until answered, failed, or out of iterations
//!
//! ## Example
//!
//! ```rust,ignore
//! use react_agent::{agent::{Agent, Transcript}, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config)?;
//! let mut transcript = Transcript::new();
//! let run = agent.run("现在几点了？", &transcript).await;
//! transcript.record("现在几点了？", run.answer());
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;
