//! Data carried through a single pipeline run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-text user intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Request(String);

impl Request {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single command line for the managed cluster tool.
///
/// Always non-empty and always starts with the tool token it was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Command(String);

impl Command {
    /// Accept `line` as a command for `tool`, trimming surrounding whitespace.
    ///
    /// Returns `None` if the trimmed line does not begin with `tool`.
    pub fn new(line: &str, tool: &str) -> Option<Self> {
        let line = line.trim();
        if tool.is_empty() || !line.starts_with(tool) {
            return None;
        }
        Some(Self(line.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-delimited tokens. Quoted arguments are not recognized.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the executor classified a command's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTag {
    /// Resource creation or declarative apply; summarized without the model.
    Creation,
    /// Degraded resources were found and diagnostics collected.
    Diagnosed,
    /// Nothing degraded, no diagnostics.
    Clean,
}

impl ResultTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultTag::Creation => "creation",
            ResultTag::Diagnosed => "diagnosed",
            ResultTag::Clean => "clean",
        }
    }
}

/// Combined stdout/stderr of the executed command plus its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(rename = "rawOutput")]
    pub output: String,
    pub tag: ResultTag,
    /// Exit status of the command; recorded, never used to gate success.
    pub exit_code: Option<i32>,
    pub truncated: bool,
}

/// A `(name, status)` pair parsed from one row of tabular output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStatus {
    pub name: String,
    pub status: String,
}

impl ResourceStatus {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Describe,
    Logs,
}

impl DiagnosticKind {
    fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::Describe => "Describe",
            DiagnosticKind::Logs => "Logs",
        }
    }
}

/// Output of one describe or logs invocation for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticSection {
    pub resource: String,
    pub kind: DiagnosticKind,
    pub text: String,
}

/// Sentinel shown when no resource needed diagnostics.
pub const NO_DIAGNOSTICS: &str = "No degraded resources detected.";

/// Describe and log text for every degraded resource, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticBundle {
    pub sections: Vec<DiagnosticSection>,
}

impl DiagnosticBundle {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn push(&mut self, resource: &str, kind: DiagnosticKind, text: String) {
        self.sections.push(DiagnosticSection {
            resource: resource.to_string(),
            kind,
            text,
        });
    }

    /// Append another bundle's sections after this one's.
    pub fn extend(&mut self, other: DiagnosticBundle) {
        self.sections.extend(other.sections);
    }

    /// Resources with at least one section, first-seen order, no repeats.
    pub fn resources(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for section in &self.sections {
            if !seen.contains(&section.resource.as_str()) {
                seen.push(&section.resource);
            }
        }
        seen
    }

    /// Concatenated text with a labeled header per section.
    ///
    /// Empty string for an empty bundle; see [`NO_DIAGNOSTICS`] for display.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&format!(
                "\n\n--- {} {} ---\n",
                section.kind.label(),
                section.resource
            ));
            out.push_str(&section.text);
        }
        out
    }
}

impl fmt::Display for DiagnosticBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str(NO_DIAGNOSTICS)
        } else {
            f.write_str(self.render().trim_start())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    /// Deterministic listing of created resources.
    CreationSummary,
    /// Narrative produced by the completion service.
    Completion,
}

/// Final human-readable text for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    pub source: ExplanationSource,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Everything one pipeline run produced, for presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutcome {
    pub run_id: Uuid,
    pub request: Request,
    pub command: Command,
    #[serde(flatten)]
    pub result: ExecutionResult,
    pub resource_statuses: Vec<ResourceStatus>,
    pub diagnostics: DiagnosticBundle,
    pub explanation: Explanation,
    pub latency_ms: u64,
    pub completed_at: DateTime<Utc>,
}
