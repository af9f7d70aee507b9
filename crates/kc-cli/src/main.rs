//! KubeClaw: ask for Kubernetes operations in plain language.
//!
//! Usage: `kubeclaw [config.toml]`. Requests are read one per line from
//! stdin; results go to stdout and logs to stderr.

use std::sync::Arc;

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use kc_cli::config::{AppConfig, OutputFormat};
use kc_cli::repl;
use kc_core::{Pipeline, ProcessRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args().nth(1);
    let config = AppConfig::load(config_path.as_deref())?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    match config.output {
        OutputFormat::Json => subscriber.json().init(),
        OutputFormat::Text => subscriber.compact().init(),
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "kubeclaw starting");
    tracing::info!(
        backend = config.completion.backend_name(),
        tool = %config.pipeline.tool,
        path = config_path.as_deref().unwrap_or("<defaults>"),
        "config loaded"
    );

    // ── Completion backend + pipeline ───────────────────────────
    let completion = kc_inference::connect(&config.completion).await?;
    let pipeline = Pipeline::new(completion, Arc::new(ProcessRunner), config.pipeline);

    repl::run(
        &pipeline,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        config.output,
    )
    .await?;

    tracing::info!("kubeclaw stopped");
    Ok(())
}
