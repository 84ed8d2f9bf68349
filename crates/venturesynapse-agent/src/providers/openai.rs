// ABOUTME: OpenAI adapter implementing the CompletionRuntime trait.
// ABOUTME: Sends the system prompt and conversation to the Chat Completions API with bearer auth.

use async_trait::async_trait;
use serde_json::{Value, json};

use venturesynapse_core::ChatMessage;

use crate::providers::{MAX_TOKENS, build_messages, parse_response, send};
use crate::runtime::{CompletionError, CompletionRuntime};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// OpenAI runtime adapter.
pub struct OpenAIRuntime {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIRuntime {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    /// Build the JSON request body for the Chat Completions API.
    pub fn build_request_body(&self, system_prompt: &str, history: &[ChatMessage]) -> Value {
        json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": build_messages(system_prompt, history),
        })
    }

    pub fn endpoint_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionRuntime for OpenAIRuntime {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        let body = self.build_request_body(system_prompt, history);

        let request = self
            .client
            .post(self.endpoint_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body);

        let response_body = send(request, "OPENAI_API_KEY").await?;
        parse_response(&response_body)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
