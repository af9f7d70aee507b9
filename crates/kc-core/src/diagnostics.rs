//! Best-effort diagnostics for degraded resources.
//!
//! For each resource: one `describe` and one bounded `logs` invocation,
//! scoped to the command's namespace. Nothing here fails; a sub-invocation
//! that cannot run is recorded as text in its section.

use std::sync::Arc;

use crate::runner::CommandRunner;
use crate::types::{DiagnosticBundle, DiagnosticKind};

/// Default number of trailing log lines to fetch.
pub const DEFAULT_LOG_TAIL: usize = 50;

/// Gathers describe/log text through a [`CommandRunner`].
pub struct DiagnosticCollector {
    runner: Arc<dyn CommandRunner>,
    tool: String,
    log_tail: usize,
}

impl DiagnosticCollector {
    pub fn new(runner: Arc<dyn CommandRunner>, tool: impl Into<String>, log_tail: usize) -> Self {
        Self {
            runner,
            tool: tool.into(),
            log_tail,
        }
    }

    /// Collect diagnostics for one resource.
    pub async fn collect(&self, resource: &str, namespace: Option<&str>) -> DiagnosticBundle {
        let mut bundle = DiagnosticBundle::default();

        let describe = self.invoke(self.describe_argv(resource, namespace)).await;
        bundle.push(resource, DiagnosticKind::Describe, describe);

        let logs = self.invoke(self.logs_argv(resource, namespace)).await;
        bundle.push(resource, DiagnosticKind::Logs, logs);

        bundle
    }

    /// Collect diagnostics for each resource in order into one bundle.
    pub async fn collect_all<'a, I>(&self, resources: I, namespace: Option<&str>) -> DiagnosticBundle
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut bundle = DiagnosticBundle::default();
        for resource in resources {
            tracing::debug!(resource, namespace = ?namespace, "collecting diagnostics");
            bundle.extend(self.collect(resource, namespace).await);
        }
        bundle
    }

    fn describe_argv(&self, resource: &str, namespace: Option<&str>) -> Vec<String> {
        let mut argv = vec![
            self.tool.clone(),
            "describe".into(),
            "pod".into(),
            resource.into(),
        ];
        push_namespace(&mut argv, namespace);
        argv
    }

    fn logs_argv(&self, resource: &str, namespace: Option<&str>) -> Vec<String> {
        let mut argv = vec![self.tool.clone(), "logs".into(), resource.into()];
        push_namespace(&mut argv, namespace);
        argv.push(format!("--tail={}", self.log_tail));
        argv
    }

    async fn invoke(&self, argv: Vec<String>) -> String {
        match self.runner.run(&argv).await {
            Ok(output) => output.text,
            Err(e) => {
                tracing::warn!(error = %e, command = %argv.join(" "), "diagnostic invocation failed");
                format!("error: {e}")
            }
        }
    }
}

fn push_namespace(argv: &mut Vec<String>, namespace: Option<&str>) {
    if let Some(ns) = namespace {
        argv.push("-n".into());
        argv.push(ns.into());
    }
}
