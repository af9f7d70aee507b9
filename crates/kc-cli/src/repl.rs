//! Prompt loop: read one request per line, run it, print the result.
//!
//! `exit` or `quit` (any case) ends the session, as does end of input. A
//! failed request is reported and the loop moves on to the next one.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use kc_core::{Pipeline, Request};

use crate::config::OutputFormat;
use crate::render;

const PROMPT: &str = "\nEnter your Kubernetes request: ";

/// Drive `pipeline` from `input` until exit or EOF, writing results to `output`.
///
/// Prompts and banners are only written in text mode so JSON output stays
/// one object per line.
pub async fn run<R, W>(
    pipeline: &Pipeline,
    input: R,
    mut output: W,
    format: OutputFormat,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let text_mode = format == OutputFormat::Text;
    let mut lines = input.lines();

    if text_mode {
        output
            .write_all(b"Kubernetes Assistant (type 'exit' to quit)\n")
            .await?;
    }

    loop {
        if text_mode {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit(line) {
            if text_mode {
                output.write_all(b"Goodbye!\n").await?;
            }
            break;
        }

        let rendered = match pipeline.run(Request::new(line)).await {
            Ok(outcome) => render::outcome(&outcome, format),
            Err(err) => {
                tracing::warn!(error = %err, "request failed");
                render::error(&err, format)
            }
        };
        output.write_all(rendered.as_bytes()).await?;
        output.flush().await?;
    }

    Ok(())
}

fn is_exit(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}
