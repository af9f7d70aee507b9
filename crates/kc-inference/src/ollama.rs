//! Ollama completion backend for local models.
//!
//! Calls the Ollama HTTP API (`/api/chat`) with the rendered prompt as a
//! single user message, non-streaming, and returns the message content.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use kc_core::{CompletionError, CompletionService};

/// Configuration for a local Ollama endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OllamaConfig {
    /// Ollama HTTP API base URL.
    #[serde(default = "default_host")]
    pub host: String,
    /// Model to use for completion.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "llama3.1:8b".into()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Ollama chat API request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Ollama chat API response (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Completion service backed by a local Ollama server.
pub struct OllamaCompletion {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaCompletion {
    pub fn new(config: OllamaConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CompletionService for OllamaCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = format!("{}/api/chat", self.config.host.trim_end_matches('/'));

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "ollama request failed");
                if e.is_timeout() {
                    CompletionError::Timeout {
                        secs: self.config.timeout_secs,
                    }
                } else {
                    CompletionError::Request(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "ollama returned non-200");
            return Err(CompletionError::Status(response.status().as_u16()));
        }

        let chat_resp: ChatResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to parse ollama response body");
            if e.is_timeout() {
                CompletionError::Timeout {
                    secs: self.config.timeout_secs,
                }
            } else {
                CompletionError::Malformed(e.to_string())
            }
        })?;

        chat_resp
            .message
            .map(|m| m.content)
            .ok_or(CompletionError::Empty)
    }

    fn backend_name(&self) -> &str {
        "ollama"
    }
}
