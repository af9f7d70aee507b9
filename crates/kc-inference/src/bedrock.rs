//! AWS Bedrock completion backend (Converse API).
//!
//! Sends the rendered prompt as a single user message and returns the first
//! text block of the reply. Uses the model-agnostic Converse API, so any
//! Bedrock text model (Claude, Nova, ...) works.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, ConverseOutput, Message};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;

use kc_core::{CompletionError, CompletionService};

/// Configuration for the Bedrock backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BedrockConfig {
    /// Bedrock model ID.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// AWS region hosting the model.
    #[serde(default = "default_region")]
    pub region: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model_id() -> String {
    "anthropic.claude-3-haiku-20240307-v1:0".into()
}
fn default_region() -> String {
    "us-east-1".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            region: default_region(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BedrockConfig {
    /// Override fields from `BEDROCK_*` environment variables where set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model_id) = std::env::var("BEDROCK_MODEL_ID") {
            self.model_id = model_id;
        }
        if let Ok(region) = std::env::var("BEDROCK_REGION") {
            self.region = region;
        }
        if let Some(secs) = std::env::var("BEDROCK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Bedrock Converse API completion service.
pub struct BedrockCompletion {
    client: BedrockClient,
    config: BedrockConfig,
}

impl BedrockCompletion {
    /// Create a backend with a pre-built Bedrock client.
    pub fn new(client: BedrockClient, config: BedrockConfig) -> Self {
        Self { client, config }
    }

    /// Load AWS credentials from the default chain and build a client for
    /// `config.region`.
    pub async fn from_config(config: BedrockConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;
        Self::new(BedrockClient::new(&sdk_config), config)
    }

    async fn call_converse(&self, prompt: &str) -> anyhow::Result<Option<String>> {
        let user_message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt.to_string()))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build message: {e}"))?;

        let response = self
            .client
            .converse()
            .model_id(&self.config.model_id)
            .messages(user_message)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("bedrock converse error: {e}"))?;

        let output = response
            .output()
            .ok_or_else(|| anyhow::anyhow!("no output in bedrock response"))?;

        Ok(first_text(output))
    }
}

#[async_trait]
impl CompletionService for BedrockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        match timeout(self.config.timeout(), self.call_converse(prompt)).await {
            Ok(Ok(Some(text))) => Ok(text),
            Ok(Ok(None)) => {
                tracing::warn!(model_id = %self.config.model_id, "bedrock reply had no text block");
                Err(CompletionError::Empty)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "bedrock completion failed");
                Err(CompletionError::Request(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.config.timeout_secs,
                    "bedrock completion timed out"
                );
                Err(CompletionError::Timeout {
                    secs: self.config.timeout_secs,
                })
            }
        }
    }

    fn backend_name(&self) -> &str {
        "bedrock"
    }
}

/// First text block of a Converse reply.
fn first_text(output: &ConverseOutput) -> Option<String> {
    match output {
        ConverseOutput::Message(msg) => msg.content().iter().find_map(|block| {
            if let ContentBlock::Text(t) = block {
                Some(t.clone())
            } else {
                None
            }
        }),
        _ => None,
    }
}
