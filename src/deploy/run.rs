// ABOUTME: Drives one release through every pipeline stage, stopping at the first failure.
// ABOUTME: Owns the rollback decision and produces the RunSummary on success.

use std::time::Duration;

use serde::Serialize;
use tracing::Instrument;

use crate::exec::{CancelToken, Executor};
use crate::release::ReleaseDescriptor;
use crate::types::ReleaseName;

use super::error::ReleaseError;
use super::pipeline::Pipeline;

/// What a successful run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub release: ReleaseName,
    /// The release was uninstalled before deploying.
    pub replaced: bool,
    /// Release tests ran and passed.
    pub verified: bool,
    pub pre_ops: usize,
    pub post_ops: usize,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
}

/// Run the full pipeline for `release`.
///
/// Stages run strictly in order: pre-hooks, replace decision, optional
/// removal, deploy, optional verify (with rollback), post-hooks. The first
/// failure ends the run; no later command is issued, except that a failed
/// verify may be followed by a rollback.
///
/// # Errors
///
/// Returns the `ReleaseError` of the stage that failed.
pub async fn execute(
    release: &ReleaseDescriptor,
    executor: &dyn Executor,
    cancel: &CancelToken,
) -> Result<RunSummary, ReleaseError> {
    let span = tracing::info_span!("release", release = %release.release());
    run_stages(release, executor, cancel).instrument(span).await
}

async fn run_stages(
    release: &ReleaseDescriptor,
    executor: &dyn Executor,
    cancel: &CancelToken,
) -> Result<RunSummary, ReleaseError> {
    let pipeline = Pipeline::new(release, executor, cancel)
        .run_pre_hooks()
        .await?
        .decide_replace()
        .await
        .remove_if_replacing()
        .await?
        .deploy()
        .await?;

    let pipeline = match pipeline.verify().await {
        Ok(verified) => verified,
        Err((deployed, cause)) => {
            let rollback = deployed.release().rollback_on_failure()
                && !cause.is_cancelled()
                && !deployed.is_cancelled();
            if !rollback {
                return Err(deployed.fail_verification(cause));
            }
            return Err(deployed.rollback(cause).await);
        }
    };

    let summary = pipeline.run_post_hooks().await?.finish();
    tracing::info!(
        replaced = summary.replaced,
        verified = summary.verified,
        elapsed = ?summary.elapsed,
        "release complete"
    );
    Ok(summary)
}
