//! Shared test harness for E2E integration tests.
//!
//! Wires the real pipeline stages to a scripted completion service and a
//! scripted kubectl, so every path runs without a model or a cluster.

#![allow(dead_code)]

use std::sync::Arc;

use kc_core::{MockCompletion, MockRunner, Pipeline, PipelineConfig, RunOutput};

/// `kubectl get pods` output with every pod healthy.
pub const HEALTHY_PODS: &str = "\
NAME                   READY   STATUS    RESTARTS   AGE
web-7d9f8c6b5-abcde    1/1     Running   0          2d
web-7d9f8c6b5-fghij    1/1     Running   0          2d
redis-0                1/1     Running   0          5d";

/// `kubectl get pods -n staging` output with two degraded pods.
pub const DEGRADED_PODS: &str = "\
NAME                   READY   STATUS             RESTARTS   AGE
api-5c8d7f9b4-k2j3h    0/1     CrashLoopBackOff   7          14m
api-5c8d7f9b4-m9n8b    1/1     Running            0          14m
worker-0               0/1     Pending            0          3m";

pub const DESCRIBE_API: &str = "\
Name:         api-5c8d7f9b4-k2j3h
Namespace:    staging
Status:       Running
    State:          Waiting
      Reason:       CrashLoopBackOff
    Last State:     Terminated
      Reason:       Error
      Exit Code:    1";

pub const LOGS_API: &str = "panic: DATABASE_URL not set";

pub const DESCRIBE_WORKER: &str = "\
Name:         worker-0
Namespace:    staging
Status:       Pending
Events:
  Warning  FailedScheduling  0/3 nodes are available: 3 Insufficient memory.";

pub const LOGS_WORKER: &str =
    "Error from server (BadRequest): container \"worker\" in pod \"worker-0\" is waiting to start: ContainerCreating";

/// Pipeline plus handles on its test doubles.
pub struct TestHarness {
    pub completion: Arc<MockCompletion>,
    pub runner: Arc<MockRunner>,
    pub pipeline: Pipeline,
}

impl TestHarness {
    /// Harness whose completion service answers `replies` in order.
    pub fn with_replies<const N: usize>(replies: [&str; N]) -> Self {
        let completion = Arc::new(MockCompletion::with_replies(replies));
        let runner = Arc::new(MockRunner::new());
        let pipeline = Pipeline::new(completion.clone(), runner.clone(), PipelineConfig::default());
        Self {
            completion,
            runner,
            pipeline,
        }
    }

    /// Script `kubectl` output for an exact command line.
    pub fn kubectl(&self, command: &str, output: &str) {
        self.runner.respond(command, RunOutput::new(output));
    }

    /// Script the staging namespace with two degraded pods and their diagnostics.
    pub fn with_degraded_staging(self) -> Self {
        self.kubectl("kubectl get pods -n staging", DEGRADED_PODS);
        self.kubectl(
            "kubectl describe pod api-5c8d7f9b4-k2j3h -n staging",
            DESCRIBE_API,
        );
        self.kubectl(
            "kubectl logs api-5c8d7f9b4-k2j3h -n staging --tail=50",
            LOGS_API,
        );
        self.kubectl("kubectl describe pod worker-0 -n staging", DESCRIBE_WORKER);
        self.runner.respond(
            "kubectl logs worker-0 -n staging --tail=50",
            RunOutput {
                text: LOGS_WORKER.into(),
                exit_code: Some(1),
                truncated: false,
            },
        );
        self
    }
}
