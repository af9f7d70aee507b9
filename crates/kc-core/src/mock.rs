//! Scripted test doubles for the completion service and command runner.
//!
//! Both record every call so tests can assert on prompts, invocation
//! order, and call counts without a model or a cluster.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use crate::completion::CompletionService;
use crate::error::{CompletionError, ExecutionError};
use crate::runner::{CommandRunner, RunOutput};

/// Completion service with a FIFO queue of scripted replies.
pub struct MockCompletion {
    /// Replies returned in order by `complete`.
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    /// Returned once the queue is drained, if set.
    fallback: Option<String>,
    /// Every prompt passed to `complete`.
    prompts: Mutex<Vec<String>>,
}

impl MockCompletion {
    /// Create a mock with no scripted replies.
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that answers with `replies` in order.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::new();
        for reply in replies {
            mock.queue(reply);
        }
        mock
    }

    /// Create a mock that answers every prompt with `reply`.
    pub fn always(reply: impl Into<String>) -> Self {
        Self {
            fallback: Some(reply.into()),
            ..Self::new()
        }
    }

    /// Queue an additional reply.
    pub fn queue(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    /// Queue a failure.
    pub fn queue_error(&self, err: CompletionError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    /// Number of `complete` calls so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Copies of all prompts received.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return reply;
        }
        match &self.fallback {
            Some(reply) => Ok(reply.clone()),
            None => Err(CompletionError::Request("no scripted reply".into())),
        }
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// Command runner with scripted outputs keyed by the joined argv.
///
/// Unscripted commands succeed with empty output.
pub struct MockRunner {
    outputs: Mutex<HashMap<String, RunOutput>>,
    failures: Mutex<HashSet<String>>,
    invocations: Mutex<Vec<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            outputs: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashSet::new()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Script the output for `command` (argv joined by single spaces).
    pub fn respond(&self, command: impl Into<String>, output: RunOutput) {
        self.outputs.lock().unwrap().insert(command.into(), output);
    }

    /// Make `command` fail as if its program could not be spawned.
    pub fn fail_on(&self, command: impl Into<String>) {
        self.failures.lock().unwrap().insert(command.into());
    }

    /// Every command run so far, argv joined by single spaces.
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, argv: &[String]) -> Result<RunOutput, ExecutionError> {
        let Some(program) = argv.first() else {
            return Err(ExecutionError::EmptyCommand);
        };
        let key = argv.join(" ");
        self.invocations.lock().unwrap().push(key.clone());

        if self.failures.lock().unwrap().contains(&key) {
            return Err(ExecutionError::Spawn {
                program: program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted failure"),
            });
        }
        Ok(self
            .outputs
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}
