// ABOUTME: Resolves which chat-completion provider to use and its credentials from environment variables.
// ABOUTME: Fails before any client is built when a required credential is missing.

use std::fmt;

use thiserror::Error;

use crate::providers::{azure, openai};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set; it is required for the selected provider")]
    MissingVar(&'static str),
}

/// Fully resolved provider settings.
#[derive(Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    OpenAI {
        api_key: String,
        base_url: String,
        model: String,
    },
    Azure {
        endpoint: String,
        deployment: String,
        api_key: String,
        api_version: String,
    },
}

impl ProviderConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - VXC_PROVIDER: `openai` or `azure` (default: openai)
    /// - VXC_MODEL: model id for OpenAI (default: gpt-4o-mini)
    /// - OPENAI_API_KEY: required for openai
    /// - OPENAI_BASE_URL: optional, for proxies and compatible servers
    /// - AZURE_OPENAI_ENDPOINT, AZURE_OPENAI_DEPLOYMENT, AZURE_OPENAI_API_KEY: required for azure
    /// - AZURE_OPENAI_API_VERSION: optional (default: 2024-06-01)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup. Empty
    /// values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| var(key).ok_or(ConfigError::MissingVar(key));

        let provider = var("VXC_PROVIDER")
            .unwrap_or_else(|| "openai".to_string())
            .to_lowercase();

        if provider == "azure" {
            return Ok(Self::Azure {
                endpoint: require("AZURE_OPENAI_ENDPOINT")?,
                deployment: require("AZURE_OPENAI_DEPLOYMENT")?,
                api_key: require("AZURE_OPENAI_API_KEY")?,
                api_version: var("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|| azure::DEFAULT_API_VERSION.to_string()),
            });
        }

        if provider != "openai" {
            tracing::warn!(provider = %provider, "unknown VXC_PROVIDER, falling back to openai");
        }

        Ok(Self::OpenAI {
            api_key: require("OPENAI_API_KEY")?,
            base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| openai::DEFAULT_BASE_URL.to_string()),
            model: var("VXC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::OpenAI { .. } => "openai",
            Self::Azure { .. } => "azure",
        }
    }
}

// Keys stay out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAI {
                base_url, model, ..
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"<redacted>")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
            Self::Azure {
                endpoint,
                deployment,
                api_version,
                ..
            } => f
                .debug_struct("Azure")
                .field("endpoint", endpoint)
                .field("deployment", deployment)
                .field("api_key", &"<redacted>")
                .field("api_version", api_version)
                .finish(),
        }
    }
}
