//! Error kinds for each pipeline stage.
//!
//! A non-zero exit from the managed command is *not* an error: it is
//! captured as text and flows through the normal result path. The errors
//! here are reserved for a stage that cannot do its job at all.

use thiserror::Error;

use crate::types::{Command, DiagnosticBundle, ExecutionResult};

/// Failures of the text-completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion service returned status {0}")]
    Status(u16),

    #[error("completion timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("malformed completion response: {0}")]
    Malformed(String),

    #[error("completion response contained no text")]
    Empty,
}

/// The request could not be turned into a command.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("could not derive a {tool} command from the completion:\n{completion}")]
    NoCommand { tool: String, completion: String },

    #[error("completion service unavailable: {0}")]
    Completion(#[from] CompletionError),
}

/// The command-line tool could not be invoked.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("empty command")]
    EmptyCommand,

    #[error("failed to invoke {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// The execution result could not be explained.
#[derive(Debug, Error)]
pub enum ExplanationError {
    #[error("completion service unavailable: {0}")]
    Completion(#[from] CompletionError),
}

/// First failing stage of a pipeline run, with whatever artifacts were
/// produced before it failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("`{command}` could not be executed: {source}")]
    Execution {
        command: Command,
        #[source]
        source: ExecutionError,
    },

    #[error("explanation unavailable for `{command}`: {source}")]
    Explanation {
        command: Command,
        result: Box<ExecutionResult>,
        diagnostics: Box<DiagnosticBundle>,
        #[source]
        source: ExplanationError,
    },
}

impl PipelineError {
    /// Command synthesized before the failure, if any.
    pub fn command(&self) -> Option<&Command> {
        match self {
            PipelineError::Synthesis(_) => None,
            PipelineError::Execution { command, .. } => Some(command),
            PipelineError::Explanation { command, .. } => Some(command),
        }
    }

    /// Raw execution output captured before the failure, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            PipelineError::Explanation { result, .. } => Some(result.output.as_str()),
            _ => None,
        }
    }
}
