//! Subprocess execution for the managed cluster tool.
//!
//! Commands are split on whitespace and handed straight to
//! `tokio::process::Command` (no shell interpretation). A non-zero exit is
//! a normal result; only a failure to spawn the program is an error.
//!
//! The combined stdout/stderr text is capped at 64 KB on a line boundary
//! and ends with [`TRUNCATION_MARKER`] when cut.

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ExecutionError;

/// Maximum captured output in bytes (64 KB), stdout and stderr combined.
pub const MAX_OUTPUT_BYTES: usize = 64 * 1024;

/// Last line of output that was cut at [`MAX_OUTPUT_BYTES`].
pub const TRUNCATION_MARKER: &str = "... [output truncated at 64KB]";

/// Captured output of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Stdout followed by stderr, trimmed and capped.
    pub text: String,
    pub exit_code: Option<i32>,
    pub truncated: bool,
}

impl RunOutput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit_code: Some(0),
            truncated: false,
        }
    }

    /// The captured text without the truncation marker.
    pub fn body(&self) -> &str {
        if !self.truncated {
            return &self.text;
        }
        self.text
            .strip_suffix(TRUNCATION_MARKER)
            .map_or(self.text.as_str(), str::trim_end)
    }
}

/// Runs an argument vector and captures its combined output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, argv: &[String]) -> Result<RunOutput, ExecutionError>;
}

/// Naive whitespace split. Quoted arguments with embedded spaces are not
/// supported.
pub fn split_command(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, argv: &[String]) -> Result<RunOutput, ExecutionError> {
        let Some((program, args)) = argv.split_first() else {
            return Err(ExecutionError::EmptyCommand);
        };

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| ExecutionError::Spawn {
                program: program.clone(),
                source,
            })?;

        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        let (text, truncated) = cap_output(&combined);
        if truncated {
            tracing::info!(program = %program, "command output was truncated");
        }

        Ok(RunOutput {
            text,
            exit_code: output.status.code(),
            truncated,
        })
    }
}

/// Trim `combined` and cut it to [`MAX_OUTPUT_BYTES`], dropping any partial
/// last line and appending [`TRUNCATION_MARKER`].
fn cap_output(combined: &str) -> (String, bool) {
    let combined = combined.trim();
    if combined.len() <= MAX_OUTPUT_BYTES {
        return (combined.to_string(), false);
    }

    let mut cut = MAX_OUTPUT_BYTES;
    while !combined.is_char_boundary(cut) {
        cut -= 1;
    }
    let mut kept = &combined[..cut];
    if let Some(pos) = kept.rfind('\n') {
        kept = &kept[..pos];
    }
    let kept = kept.trim_end();

    let text = if kept.is_empty() {
        TRUNCATION_MARKER.to_string()
    } else {
        format!("{kept}\n{TRUNCATION_MARKER}")
    };
    (text, true)
}
