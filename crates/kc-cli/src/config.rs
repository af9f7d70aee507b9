//! CLI configuration, loadable from TOML.

use serde::Deserialize;

use kc_core::PipelineConfig;
use kc_inference::CompletionConfig;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Top-level configuration for the `kubeclaw` binary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Completion backend. Defaults to Bedrock.
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Tool token, log tail length, and prompt templates.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub output: OutputFormat,
}

impl AppConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
