// ABOUTME: Agent layer for venturesynapse: chat-completion adapters and the screening pipeline.
// ABOUTME: Resolves the provider from the environment and runs the three agents in sequence.

pub mod agent;
pub mod client;
pub mod config;
pub mod pipeline;
pub mod providers;
pub mod report;
pub mod runtime;
pub mod testing;

pub use agent::Agent;
pub use client::create_runtime;
pub use config::{ConfigError, ProviderConfig};
pub use pipeline::{Pipeline, PipelineError, PipelineOutcome};
pub use runtime::{CompletionError, CompletionRuntime};
