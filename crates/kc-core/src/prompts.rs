//! Prompt templates for command synthesis and result explanation.

use serde::Deserialize;

/// Placeholder replaced with the user's request.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Placeholder replaced with command output plus diagnostics.
pub const OUTPUT_PLACEHOLDER: &str = "{command_output}";

const COMMAND_TEMPLATE: &str = r#"
You are a Kubernetes assistant.
Convert the user request into the correct 'kubectl' command ONLY.
Return exactly one kubectl command without any explanation.

User request: {query}
Command:
"#;

const EXPLAIN_TEMPLATE: &str = r#"
You are a Kubernetes troubleshooter.

Analyze the following Kubernetes command output.
1. If pods are failing (Pending, CrashLoopBackOff, Error), explain the exact reason and suggest fixes.
2. If there are no pods, give a concise explanation of what the command did successfully.

Output:
{command_output}

Explanation:
"#;

/// Templates handed to each component at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromptTemplates {
    /// Synthesis prompt; must contain `{query}`.
    #[serde(default = "default_command")]
    pub command: String,
    /// Explanation prompt; must contain `{command_output}`.
    #[serde(default = "default_explain")]
    pub explain: String,
}

fn default_command() -> String {
    COMMAND_TEMPLATE.to_string()
}

fn default_explain() -> String {
    EXPLAIN_TEMPLATE.to_string()
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            command: default_command(),
            explain: default_explain(),
        }
    }
}

impl PromptTemplates {
    /// Synthesis prompt with the request embedded verbatim.
    pub fn render_command(&self, query: &str) -> String {
        self.command.replace(QUERY_PLACEHOLDER, query)
    }

    pub fn render_explain(&self, command_output: &str) -> String {
        self.explain.replace(OUTPUT_PLACEHOLDER, command_output)
    }
}
