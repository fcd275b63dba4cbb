//! React Agent - interactive entry point.
//!
//! Reads one query per line, runs the agent, prints the answer.

use std::io::Write;

use react_agent::agent::{Agent, Transcript};
use react_agent::config::Config;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "react_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: model={}, max_iterations={}",
        config.model, config.max_iterations
    );

    let agent = Agent::new(config)?;
    let mut transcript = Transcript::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("Query: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let run = agent.run(query, &transcript).await;
        transcript.record(query, run.answer());
        println!("{}", run.answer());
    }

    Ok(())
}
