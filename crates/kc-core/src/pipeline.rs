//! Pipeline controller: synthesize, execute, explain.
//!
//! Stages run strictly in sequence and the first failure ends the run.
//! Each call to [`Pipeline::run`] is independent; the pipeline keeps no
//! state between requests.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Deserialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::completion::CompletionService;
use crate::diagnostics::{DEFAULT_LOG_TAIL, DiagnosticCollector};
use crate::error::PipelineError;
use crate::executor::CommandExecutor;
use crate::explainer::ResultExplainer;
use crate::prompts::PromptTemplates;
use crate::runner::CommandRunner;
use crate::synthesizer::CommandSynthesizer;
use crate::types::{PipelineOutcome, Request};

/// Settings shared by the pipeline stages.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Command-line tool token; synthesized commands must start with it.
    #[serde(default = "default_tool")]
    pub tool: String,
    /// Trailing log lines fetched per degraded resource.
    #[serde(default = "default_log_tail_lines")]
    pub log_tail_lines: usize,
    #[serde(default)]
    pub prompts: PromptTemplates,
}

fn default_tool() -> String {
    "kubectl".into()
}

fn default_log_tail_lines() -> usize {
    DEFAULT_LOG_TAIL
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            log_tail_lines: default_log_tail_lines(),
            prompts: PromptTemplates::default(),
        }
    }
}

pub struct Pipeline {
    synthesizer: CommandSynthesizer,
    executor: CommandExecutor,
    explainer: ResultExplainer,
}

impl Pipeline {
    /// Wire all stages to the given completion service and runner.
    pub fn new(
        completion: Arc<dyn CompletionService>,
        runner: Arc<dyn CommandRunner>,
        config: PipelineConfig,
    ) -> Self {
        let prompts = Arc::new(config.prompts);
        let collector = DiagnosticCollector::new(runner.clone(), &config.tool, config.log_tail_lines);
        Self {
            synthesizer: CommandSynthesizer::new(completion.clone(), prompts.clone(), &config.tool),
            executor: CommandExecutor::new(runner, collector),
            explainer: ResultExplainer::new(completion, prompts),
        }
    }

    /// Assemble a pipeline from individually built stages.
    pub fn from_stages(
        synthesizer: CommandSynthesizer,
        executor: CommandExecutor,
        explainer: ResultExplainer,
    ) -> Self {
        Self {
            synthesizer,
            executor,
            explainer,
        }
    }

    /// Process one request end to end.
    pub async fn run(&self, request: Request) -> Result<PipelineOutcome, PipelineError> {
        let run_id = Uuid::now_v7();
        let span = tracing::info_span!("pipeline", %run_id);
        self.run_inner(run_id, request).instrument(span).await
    }

    async fn run_inner(
        &self,
        run_id: Uuid,
        request: Request,
    ) -> Result<PipelineOutcome, PipelineError> {
        let start = Instant::now();
        tracing::info!(request = %request, "pipeline started");

        let command = self.synthesizer.synthesize(&request).await?;

        let execution = match self.executor.execute(&command).await {
            Ok(execution) => execution,
            Err(source) => return Err(PipelineError::Execution { command, source }),
        };
        tracing::info!(
            tag = execution.result.tag.as_str(),
            resources = execution.resource_statuses.len(),
            exit_code = ?execution.result.exit_code,
            "command executed"
        );

        let explanation = match self
            .explainer
            .explain(&execution.result, &execution.diagnostics)
            .await
        {
            Ok(explanation) => explanation,
            Err(source) => {
                return Err(PipelineError::Explanation {
                    command,
                    result: Box::new(execution.result),
                    diagnostics: Box::new(execution.diagnostics),
                    source,
                });
            }
        };

        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::info!(latency_ms, "pipeline completed");

        Ok(PipelineOutcome {
            run_id,
            request,
            command,
            result: execution.result,
            resource_statuses: execution.resource_statuses,
            diagnostics: execution.diagnostics,
            explanation,
            latency_ms,
            completed_at: Utc::now(),
        })
    }
}
