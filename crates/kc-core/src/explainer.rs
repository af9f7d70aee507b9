//! Result explainer.
//!
//! Creation results are summarized locally from kubectl's `kind/name verb`
//! lines. Everything else goes to the completion service together with any
//! collected diagnostics.

use std::sync::Arc;

use crate::completion::CompletionService;
use crate::error::ExplanationError;
use crate::heuristics;
use crate::prompts::PromptTemplates;
use crate::types::{DiagnosticBundle, ExecutionResult, Explanation, ExplanationSource, ResultTag};

/// Message used when a creation command printed no recognizable resource lines.
pub const GENERIC_CREATION: &str = "Resource created successfully.";

pub struct ResultExplainer {
    completion: Arc<dyn CompletionService>,
    prompts: Arc<PromptTemplates>,
}

impl ResultExplainer {
    pub fn new(completion: Arc<dyn CompletionService>, prompts: Arc<PromptTemplates>) -> Self {
        Self {
            completion,
            prompts,
        }
    }

    pub async fn explain(
        &self,
        result: &ExecutionResult,
        diagnostics: &DiagnosticBundle,
    ) -> Result<Explanation, ExplanationError> {
        if result.tag == ResultTag::Creation {
            return Ok(Explanation {
                text: summarize_creation(&result.output),
                source: ExplanationSource::CreationSummary,
            });
        }

        let mut combined = result.output.clone();
        if result.tag == ResultTag::Diagnosed {
            combined.push_str(&diagnostics.render());
        }

        let prompt = self.prompts.render_explain(&combined);
        let text = self.completion.complete(&prompt).await?;
        tracing::debug!(
            backend = self.completion.backend_name(),
            tag = result.tag.as_str(),
            "explanation received"
        );

        Ok(Explanation {
            text: text.trim().to_string(),
            source: ExplanationSource::Completion,
        })
    }
}

/// `Created: a, b` from the resource lines in `output`, or a generic message.
pub fn summarize_creation(output: &str) -> String {
    let created: Vec<&str> = output
        .lines()
        .filter(|line| heuristics::is_creation_line(line))
        .collect();

    if created.is_empty() {
        GENERIC_CREATION.to_string()
    } else {
        format!("Created: {}", created.join(", "))
    }
}
