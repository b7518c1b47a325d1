// ABOUTME: State transition methods for the orchestration pipeline.
// ABOUTME: Each method consumes self, issues at most one stage's commands, and returns the next state.

use crate::exec::{CancelToken, ExecError, invoke};
use crate::hooks::{self, HookPoint};

use super::error::ReleaseError;
use super::pipeline::Pipeline;
use super::resolver::ArtifactResolver;
use super::state::{Cleared, Completed, Decided, Deployed, Pending, Prepared, Verified};
use super::{RunSummary, Stage};

/// Result type for transitions whose failure the caller may still act on.
pub type TransitionResult<'a, T, S> = Result<Pipeline<'a, T>, (Pipeline<'a, S>, ExecError)>;

// =============================================================================
// Internal Helpers
// =============================================================================

impl<'a, S> Pipeline<'a, S> {
    /// Internal helper to move to the next state.
    fn transition<T>(self, state: T) -> Pipeline<'a, T> {
        Pipeline {
            release: self.release,
            executor: self.executor,
            cancel: self.cancel,
            started: self.started,
            state,
        }
    }

    /// Invoke the package tool with `args` under the run's cancel token.
    async fn invoke_tool(&self, args: &[String]) -> Result<(), ExecError> {
        invoke(self.executor, self.cancel, &self.release.tool, args).await
    }
}

fn enter(stage: Stage) {
    tracing::info!(%stage, "entering stage");
}

// =============================================================================
// Pending -> Prepared
// =============================================================================

impl<'a> Pipeline<'a, Pending> {
    /// Run every pre-operation hook in order.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::PreHookFailed` for the first failing hook.
    #[must_use = "pipeline state must be used"]
    pub async fn run_pre_hooks(self) -> Result<Pipeline<'a, Prepared>, ReleaseError> {
        enter(Stage::PreHooks);
        hooks::run_sequence(
            self.executor,
            self.cancel,
            &self.release.pre_ops,
            HookPoint::Pre,
        )
        .await?;
        Ok(self.transition(Prepared))
    }
}

// =============================================================================
// Prepared -> Decided
// =============================================================================

impl<'a> Pipeline<'a, Prepared> {
    /// Decide whether the release must be uninstalled before deploying.
    /// Never fails: lookup problems count as "do not replace".
    pub async fn decide_replace(self) -> Pipeline<'a, Decided> {
        enter(Stage::ReplaceDecision);
        let replace = ArtifactResolver::new(self.executor, self.cancel, &self.release.tool)
            .should_replace(&self.release.manifest_args(), &self.release.artifact)
            .await;
        self.transition(Decided { replace })
    }
}

// =============================================================================
// Decided -> Cleared
// =============================================================================

impl<'a> Pipeline<'a, Decided> {
    /// Uninstall the release when the decision asked for a replace.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::RemovalFailed` if the uninstall fails. The deploy
    /// must not be attempted afterwards.
    #[must_use = "pipeline state must be used"]
    pub async fn remove_if_replacing(self) -> Result<Pipeline<'a, Cleared>, ReleaseError> {
        if !self.state.replace {
            return Ok(self.transition(Cleared { replaced: false }));
        }

        enter(Stage::Removal);
        if let Err(source) = self.invoke_tool(&self.release.removal_command_args()).await {
            tracing::error!(error = %source, "uninstall failed");
            return Err(ReleaseError::RemovalFailed {
                release: self.release.release.clone(),
                source,
            });
        }
        Ok(self.transition(Cleared { replaced: true }))
    }
}

// =============================================================================
// Cleared -> Deployed
// =============================================================================

impl<'a> Pipeline<'a, Cleared> {
    /// Issue the install/upgrade command.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::DeployFailed` if the command fails.
    #[must_use = "pipeline state must be used"]
    pub async fn deploy(self) -> Result<Pipeline<'a, Deployed>, ReleaseError> {
        enter(Stage::Deploy);
        if let Err(source) = self.invoke_tool(&self.release.deploy_args).await {
            tracing::error!(error = %source, "deploy failed");
            return Err(ReleaseError::DeployFailed {
                release: self.release.release.clone(),
                source,
            });
        }
        let replaced = self.state.replaced;
        Ok(self.transition(Deployed { replaced }))
    }
}

// =============================================================================
// Deployed -> Verified
// =============================================================================

impl<'a> Pipeline<'a, Deployed> {
    /// Run the release tests, if requested.
    ///
    /// # Errors
    ///
    /// Returns `(self, cause)` on failure so the caller can roll back.
    #[must_use = "pipeline state must be used"]
    pub async fn verify(self) -> TransitionResult<'a, Verified, Deployed> {
        let replaced = self.state.replaced;
        if !self.release.verify {
            return Ok(self.transition(Verified {
                replaced,
                verified: false,
            }));
        }

        enter(Stage::Verify);
        match self.invoke_tool(&self.release.verify_args()).await {
            Ok(()) => Ok(self.transition(Verified {
                replaced,
                verified: true,
            })),
            Err(e) => {
                tracing::warn!(error = %e, "release tests failed");
                Err((self, e))
            }
        }
    }

    /// Report a test failure without rolling back.
    pub fn fail_verification(self, cause: ExecError) -> ReleaseError {
        ReleaseError::VerifyFailedNoRollback {
            release: self.release.release.clone(),
            source: cause,
        }
    }

    /// Roll the release back to its previous revision after a test failure.
    ///
    /// The rollback command runs under a detached token, so cancelling the
    /// run while it is in flight does not interrupt it. The run always ends
    /// in an error: the test failure if rollback succeeded, the rollback
    /// failure otherwise.
    pub async fn rollback(self, cause: ExecError) -> ReleaseError {
        enter(Stage::Rollback);
        let detached = CancelToken::new();
        let release = self.release.release.clone();

        match invoke(
            self.executor,
            &detached,
            &self.release.tool,
            &self.release.rollback_args(),
        )
        .await
        {
            Ok(()) => {
                tracing::warn!("rolled back to previous revision");
                ReleaseError::VerifyFailedRollbackSucceeded {
                    release,
                    source: cause,
                }
            }
            Err(source) => {
                tracing::error!(error = %source, "rollback failed, release state is unknown");
                ReleaseError::VerifyFailedRollbackFailed {
                    release,
                    verify: cause,
                    source,
                }
            }
        }
    }
}

// =============================================================================
// Verified -> Completed
// =============================================================================

impl<'a> Pipeline<'a, Verified> {
    /// Run every post-operation hook in order.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::PostHookFailed` for the first failing hook.
    #[must_use = "pipeline state must be used"]
    pub async fn run_post_hooks(self) -> Result<Pipeline<'a, Completed>, ReleaseError> {
        enter(Stage::PostHooks);
        hooks::run_sequence(
            self.executor,
            self.cancel,
            &self.release.post_ops,
            HookPoint::Post,
        )
        .await?;
        let Verified { replaced, verified } = self.state;
        Ok(self.transition(Completed { replaced, verified }))
    }
}

// =============================================================================
// Completed - Terminal State
// =============================================================================

impl Pipeline<'_, Completed> {
    /// Consume the pipeline and summarize the run.
    pub fn finish(self) -> RunSummary {
        enter(Stage::Done);
        RunSummary {
            release: self.release.release.clone(),
            replaced: self.state.replaced,
            verified: self.state.verified,
            pre_ops: self.release.pre_ops.len(),
            post_ops: self.release.post_ops.len(),
            elapsed: self.started.elapsed(),
        }
    }
}
