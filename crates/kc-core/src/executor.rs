//! Command executor. Runs the synthesized command and classifies its output.
//!
//! Creation/apply commands are tagged immediately. Anything else is read as
//! a resource table; if any row is degraded, diagnostics are collected for
//! every degraded row before returning.

use std::sync::Arc;

use crate::diagnostics::DiagnosticCollector;
use crate::error::ExecutionError;
use crate::heuristics;
use crate::runner::{CommandRunner, split_command};
use crate::types::{Command, DiagnosticBundle, ExecutionResult, ResourceStatus, ResultTag};

/// What the executor stage hands to the explainer.
#[derive(Debug, Clone)]
pub struct Execution {
    pub result: ExecutionResult,
    /// One entry per resource row, in output order. Empty for creation commands.
    pub resource_statuses: Vec<ResourceStatus>,
    pub diagnostics: DiagnosticBundle,
}

pub struct CommandExecutor {
    runner: Arc<dyn CommandRunner>,
    collector: DiagnosticCollector,
}

impl CommandExecutor {
    pub fn new(runner: Arc<dyn CommandRunner>, collector: DiagnosticCollector) -> Self {
        Self { runner, collector }
    }

    /// Run `command` and classify the result.
    ///
    /// Errors only if the tool cannot be invoked; a non-zero exit is a
    /// normal result.
    pub async fn execute(&self, command: &Command) -> Result<Execution, ExecutionError> {
        tracing::info!(command = %command, "Executing: {command}");
        let output = self.runner.run(&split_command(command.as_str())).await?;

        if heuristics::is_creation(command) {
            return Ok(Execution {
                result: ExecutionResult {
                    output: output.text,
                    tag: ResultTag::Creation,
                    exit_code: output.exit_code,
                    truncated: output.truncated,
                },
                resource_statuses: Vec::new(),
                diagnostics: DiagnosticBundle::default(),
            });
        }

        let rows = heuristics::parse_resource_rows(output.body());
        let degraded: Vec<&str> = rows
            .iter()
            .filter(|row| row.is_degraded())
            .map(|row| row.status.name.as_str())
            .collect();

        let (tag, diagnostics) = if degraded.is_empty() {
            (ResultTag::Clean, DiagnosticBundle::default())
        } else {
            let namespace = heuristics::extract_namespace(command);
            tracing::info!(
                degraded = degraded.len(),
                namespace = namespace.as_deref().unwrap_or("<none>"),
                "degraded resources found, collecting diagnostics"
            );
            let bundle = self
                .collector
                .collect_all(degraded.iter().copied(), namespace.as_deref())
                .await;
            (ResultTag::Diagnosed, bundle)
        };

        let resource_statuses = rows.into_iter().map(|row| row.status).collect();

        Ok(Execution {
            result: ExecutionResult {
                output: output.text,
                tag,
                exit_code: output.exit_code,
                truncated: output.truncated,
            },
            resource_statuses,
            diagnostics,
        })
    }
}
