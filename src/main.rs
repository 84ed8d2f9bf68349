// ABOUTME: Entry point for the venturesynapse binary.
// ABOUTME: Loads .env, initializes tracing, resolves the provider, loads artifacts, and runs the pipeline.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use venturesynapse_agent::{Pipeline, ProviderConfig, create_runtime};
use venturesynapse_core::{DEFAULT_INPUT_DIR, load_inputs};

/// Screen a venture deal with the Discovery, Scoring, and Memo agents.
#[derive(Debug, Parser)]
#[command(name = "venturesynapse", version, about)]
struct Cli {
    /// Directory holding dynamics.json, pitch_deck.txt, and research_notes.txt.
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    inputs: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment may already be configured.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "venturesynapse=info,venturesynapse_agent=info,venturesynapse_core=info",
                )
            }),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ProviderConfig::from_env().context("failed to resolve completion provider")?;
    tracing::info!(provider = config.provider_name(), "venturesynapse starting up");
    let runtime = create_runtime(&config);

    let inputs = load_inputs(&cli.inputs)
        .with_context(|| format!("failed to load artifacts from {}", cli.inputs.display()))?;

    let pipeline = Pipeline::new(runtime);
    let mut stdout = io::stdout().lock();
    let outcome = pipeline.run(&inputs, &mut stdout).await?;

    tracing::info!(run_id = %outcome.run_id, "pipeline complete");
    Ok(())
}
