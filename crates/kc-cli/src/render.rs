//! Text and JSON rendering of pipeline results.

use serde_json::json;

use kc_core::{PipelineError, PipelineOutcome};

use crate::config::OutputFormat;

pub fn outcome(outcome: &PipelineOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "Executing: {}\n\n--- Explanation ---\n{}\n",
            outcome.command, outcome.explanation
        ),
        OutputFormat::Json => match serde_json::to_string(outcome) {
            Ok(json) => format!("{json}\n"),
            Err(e) => format!("{}\n", json!({ "error": format!("serialization failed: {e}") })),
        },
    }
}

pub fn error(err: &PipelineError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = format!("Error: {err}\n");
            if let Some(raw) = err.raw_output() {
                out.push_str("\n--- Output ---\n");
                out.push_str(raw);
                out.push('\n');
            }
            out
        }
        OutputFormat::Json => {
            let body = json!({
                "error": err.to_string(),
                "command": err.command().map(|c| c.as_str()),
                "rawOutput": err.raw_output(),
            });
            format!("{body}\n")
        }
    }
}
