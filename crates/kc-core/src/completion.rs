//! Text-completion service seam.
//!
//! The pipeline treats the language model as an opaque text-in/text-out
//! function. Backends (Bedrock, Ollama, test doubles) adapt their own
//! response shapes and hand back plain text.

use async_trait::async_trait;

use crate::error::CompletionError;

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Complete `prompt`, returning the model's raw text.
    ///
    /// The text may be arbitrary; callers must validate it.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Backend name (for logging).
    fn backend_name(&self) -> &str;
}
