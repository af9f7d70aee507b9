//! Command synthesizer. Turns a free-text request into one tool command.

use std::sync::Arc;

use crate::completion::CompletionService;
use crate::error::SynthesisError;
use crate::prompts::PromptTemplates;
use crate::types::{Command, Request};

pub struct CommandSynthesizer {
    completion: Arc<dyn CompletionService>,
    prompts: Arc<PromptTemplates>,
    tool: String,
}

impl CommandSynthesizer {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        prompts: Arc<PromptTemplates>,
        tool: impl Into<String>,
    ) -> Self {
        Self {
            completion,
            prompts,
            tool: tool.into(),
        }
    }

    /// Ask the completion service for a command and extract it.
    ///
    /// Never guesses: if no completion line starts with the tool token the
    /// request fails.
    pub async fn synthesize(&self, request: &Request) -> Result<Command, SynthesisError> {
        let prompt = self.prompts.render_command(request.as_str());
        let completion = self.completion.complete(&prompt).await?;

        match extract_command(&completion, &self.tool) {
            Some(command) => {
                tracing::debug!(
                    backend = self.completion.backend_name(),
                    command = %command,
                    "command synthesized"
                );
                Ok(command)
            }
            None => {
                tracing::warn!(completion = %completion, "completion contained no command");
                Err(SynthesisError::NoCommand {
                    tool: self.tool.clone(),
                    completion,
                })
            }
        }
    }
}

/// First line (trimmed) that starts with `tool`.
pub fn extract_command(completion: &str, tool: &str) -> Option<Command> {
    completion.lines().find_map(|line| Command::new(line, tool))
}
