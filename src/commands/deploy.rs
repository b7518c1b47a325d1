// ABOUTME: Deploy command implementation.
// ABOUTME: Builds the release job, wires Ctrl-C to cancellation, and runs the pipeline.

use super::{load_config, overrides};
use crate::cli::ReleaseArgs;
use helmflow::error::Result;
use helmflow::exec::{CancelToken, ProcessExecutor};
use helmflow::output::Output;
use std::path::Path;
use std::sync::Arc;

/// Run the release pipeline for the discovered config.
pub async fn deploy(
    cwd: &Path,
    config: Option<&Path>,
    args: ReleaseArgs,
    mut output: Output,
) -> Result<()> {
    let config = load_config(cwd, config)?;
    let job = config
        .to_builder(&overrides(args))?
        .executor(Arc::new(ProcessExecutor::new()))
        .build()?;

    output.start_timer();
    output.progress(&format!(
        "Releasing {} from {}",
        job.descriptor().release(),
        job.descriptor().chart()
    ));

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling release");
            on_interrupt.cancel();
        }
    });

    let result = job.run(&cancel).await;
    signal.abort();

    let summary = result?;
    output.summary(&summary);
    Ok(())
}
