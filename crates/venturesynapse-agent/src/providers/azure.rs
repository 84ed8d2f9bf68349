// ABOUTME: Azure OpenAI adapter implementing the CompletionRuntime trait.
// ABOUTME: Targets a named deployment on an Azure endpoint, authenticating with the api-key header.

use async_trait::async_trait;
use serde_json::{Value, json};

use venturesynapse_core::ChatMessage;

use crate::providers::{MAX_TOKENS, build_messages, parse_response, send};
use crate::runtime::{CompletionError, CompletionRuntime};

pub const DEFAULT_API_VERSION: &str = "2024-06-01";

/// Azure OpenAI runtime adapter. The model is fixed by the deployment, so
/// the request body carries no model field.
pub struct AzureRuntime {
    client: reqwest::Client,
    endpoint: String,
    deployment: String,
    api_key: String,
    api_version: String,
}

impl AzureRuntime {
    pub fn new(endpoint: String, deployment: String, api_key: String, api_version: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            deployment,
            api_key,
            api_version,
        }
    }

    pub fn build_request_body(&self, system_prompt: &str, history: &[ChatMessage]) -> Value {
        json!({
            "max_tokens": MAX_TOKENS,
            "messages": build_messages(system_prompt, history),
        })
    }

    /// `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}`
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

#[async_trait]
impl CompletionRuntime for AzureRuntime {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        let body = self.build_request_body(system_prompt, history);

        let request = self
            .client
            .post(self.endpoint_url())
            .header("api-key", self.api_key.as_str())
            .header("Content-Type", "application/json")
            .json(&body);

        let response_body = send(request, "AZURE_OPENAI_API_KEY").await?;
        parse_response(&response_body)
    }

    fn provider_name(&self) -> &str {
        "azure"
    }

    fn model_name(&self) -> &str {
        &self.deployment
    }
}
