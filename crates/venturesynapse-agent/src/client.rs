// ABOUTME: Factory turning a resolved ProviderConfig into a shared CompletionRuntime.
// ABOUTME: The returned handle is what the pipeline uses for every stage.

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::providers::azure::AzureRuntime;
use crate::providers::openai::OpenAIRuntime;
use crate::runtime::CompletionRuntime;

/// Create the completion runtime for the given provider configuration.
pub fn create_runtime(config: &ProviderConfig) -> Arc<dyn CompletionRuntime> {
    let runtime: Arc<dyn CompletionRuntime> = match config.clone() {
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            model,
        } => Arc::new(OpenAIRuntime::new(api_key, base_url, model)),
        ProviderConfig::Azure {
            endpoint,
            deployment,
            api_key,
            api_version,
        } => Arc::new(AzureRuntime::new(endpoint, deployment, api_key, api_version)),
    };

    tracing::debug!(
        provider = runtime.provider_name(),
        model = runtime.model_name(),
        "completion runtime created"
    );

    runtime
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_openai_runtime() {
        let runtime = create_runtime(&ProviderConfig::OpenAI {
            api_key: "sk-test".to_string(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
        });

        assert_eq!(runtime.provider_name(), "openai");
        assert_eq!(runtime.model_name(), "gpt-4o-mini");
    }

    #[test]
    fn creates_azure_runtime() {
        let runtime = create_runtime(&ProviderConfig::Azure {
            endpoint: "https://m12.openai.azure.com".to_string(),
            deployment: "screening".to_string(),
            api_key: "azure-key".to_string(),
            api_version: "2024-06-01".to_string(),
        });

        assert_eq!(runtime.provider_name(), "azure");
        assert_eq!(runtime.model_name(), "screening");
    }
}
