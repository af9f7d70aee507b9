//! Completion service backends for KubeClaw.
//!
//! Each backend adapts one provider's response shape to the plain-text
//! [`CompletionService`] contract used by `kc-core`:
//! - **Bedrock** (default): AWS Bedrock Converse API.
//! - **Ollama**: a local Ollama server.

pub mod bedrock;
pub mod ollama;

use std::sync::Arc;

use serde::Deserialize;

use kc_core::CompletionService;

pub use bedrock::{BedrockCompletion, BedrockConfig};
pub use ollama::{OllamaCompletion, OllamaConfig};

/// Which backend to use, with its settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum CompletionConfig {
    Bedrock(BedrockConfig),
    Ollama(OllamaConfig),
}

impl Default for CompletionConfig {
    fn default() -> Self {
        CompletionConfig::Bedrock(BedrockConfig::default())
    }
}

impl CompletionConfig {
    pub fn backend_name(&self) -> &'static str {
        match self {
            CompletionConfig::Bedrock(_) => "bedrock",
            CompletionConfig::Ollama(_) => "ollama",
        }
    }
}

/// Build the configured backend.
pub async fn connect(config: &CompletionConfig) -> anyhow::Result<Arc<dyn CompletionService>> {
    match config {
        CompletionConfig::Bedrock(cfg) => {
            let cfg = cfg.clone().with_env_overrides();
            tracing::info!(
                model_id = %cfg.model_id,
                region = %cfg.region,
                "bedrock completion backend enabled"
            );
            Ok(Arc::new(BedrockCompletion::from_config(cfg).await))
        }
        CompletionConfig::Ollama(cfg) => {
            tracing::info!(
                host = %cfg.host,
                model = %cfg.model,
                "ollama completion backend enabled"
            );
            Ok(Arc::new(OllamaCompletion::new(cfg.clone())?))
        }
    }
}
