// ABOUTME: Binds a static AgentSpec to a completion runtime so it can answer a conversation.
// ABOUTME: All three screening agents share this one mechanism and differ only in their prompt.

use std::sync::Arc;

use venturesynapse_core::{AgentSpec, Conversation};

use crate::runtime::{CompletionError, CompletionRuntime};

/// A prompt agent ready to run against a runtime.
pub struct Agent {
    spec: AgentSpec,
    runtime: Arc<dyn CompletionRuntime>,
}

impl Agent {
    pub fn new(spec: AgentSpec, runtime: Arc<dyn CompletionRuntime>) -> Self {
        Self { spec, runtime }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Produce this agent's reply to the conversation so far.
    pub async fn respond(&self, conversation: &Conversation) -> Result<String, CompletionError> {
        self.runtime
            .complete(self.spec.system_prompt, conversation.messages())
            .await
    }
}
