// ABOUTME: Core domain types for venturesynapse, independent of any LLM provider.
// ABOUTME: Covers input artifacts, agent definitions, stage ordering, conversation history, and scorecards.

pub mod agent;
pub mod bundle;
pub mod conversation;
pub mod scorecard;
pub mod stage;

pub use agent::AgentSpec;
pub use bundle::{BundleError, DEFAULT_INPUT_DIR, InputBundle, load_inputs};
pub use conversation::{ChatMessage, Conversation, Role};
pub use scorecard::{Decision, Scorecard, Scores};
pub use stage::{Stage, StageOutput};
