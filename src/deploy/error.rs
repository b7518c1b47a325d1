// ABOUTME: Error taxonomy for orchestration runs.
// ABOUTME: Every failure is tagged with the stage it came from and keeps its cause.

use crate::exec::ExecError;
use crate::types::ReleaseName;

use super::Stage;

/// Terminal failure of an orchestration run.
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    /// A pre-operation hook failed; nothing else ran.
    #[error("pre-hook #{index} `{command}` failed: {source}")]
    PreHookFailed {
        index: usize,
        command: String,
        #[source]
        source: ExecError,
    },

    /// Uninstalling the release ahead of a forced recreate failed.
    #[error("uninstall of release {release} failed: {source}")]
    RemovalFailed {
        release: ReleaseName,
        #[source]
        source: ExecError,
    },

    /// The install/upgrade command failed.
    #[error("deploy of release {release} failed: {source}")]
    DeployFailed {
        release: ReleaseName,
        #[source]
        source: ExecError,
    },

    /// Release tests failed and rollback was not requested.
    #[error("tests for release {release} failed: {source}")]
    VerifyFailedNoRollback {
        release: ReleaseName,
        #[source]
        source: ExecError,
    },

    /// Release tests failed; the release was rolled back to its previous revision.
    #[error("tests for release {release} failed, rolled back to previous revision: {source}")]
    VerifyFailedRollbackSucceeded {
        release: ReleaseName,
        #[source]
        source: ExecError,
    },

    /// Release tests failed and so did the rollback. Cluster state is unknown.
    #[error(
        "tests for release {release} failed ({verify}) and rollback failed: {source}; manual intervention required"
    )]
    VerifyFailedRollbackFailed {
        release: ReleaseName,
        verify: ExecError,
        #[source]
        source: ExecError,
    },

    /// A post-operation hook failed after a successful deploy.
    #[error("post-hook #{index} `{command}` failed: {source}")]
    PostHookFailed {
        index: usize,
        command: String,
        #[source]
        source: ExecError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseErrorKind {
    PreHookFailed,
    RemovalFailed,
    DeployFailed,
    VerifyFailedNoRollback,
    VerifyFailedRollbackSucceeded,
    VerifyFailedRollbackFailed,
    PostHookFailed,
}

impl ReleaseErrorKind {
    /// Stage the failure originated in.
    pub fn stage(&self) -> Stage {
        match self {
            ReleaseErrorKind::PreHookFailed => Stage::PreHooks,
            ReleaseErrorKind::RemovalFailed => Stage::Removal,
            ReleaseErrorKind::DeployFailed => Stage::Deploy,
            ReleaseErrorKind::VerifyFailedNoRollback
            | ReleaseErrorKind::VerifyFailedRollbackSucceeded => Stage::Verify,
            ReleaseErrorKind::VerifyFailedRollbackFailed => Stage::Rollback,
            ReleaseErrorKind::PostHookFailed => Stage::PostHooks,
        }
    }

    /// The cluster may be left in a state that needs a human.
    pub fn requires_intervention(&self) -> bool {
        matches!(self, ReleaseErrorKind::VerifyFailedRollbackFailed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseErrorKind::PreHookFailed => "pre_hook_failed",
            ReleaseErrorKind::RemovalFailed => "removal_failed",
            ReleaseErrorKind::DeployFailed => "deploy_failed",
            ReleaseErrorKind::VerifyFailedNoRollback => "verify_failed_no_rollback",
            ReleaseErrorKind::VerifyFailedRollbackSucceeded => "verify_failed_rollback_succeeded",
            ReleaseErrorKind::VerifyFailedRollbackFailed => "verify_failed_rollback_failed",
            ReleaseErrorKind::PostHookFailed => "post_hook_failed",
        }
    }

    /// Process exit code the binary reports for this kind. Each kind is distinct.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseErrorKind::PreHookFailed => 10,
            ReleaseErrorKind::RemovalFailed => 11,
            ReleaseErrorKind::DeployFailed => 12,
            ReleaseErrorKind::VerifyFailedNoRollback => 13,
            ReleaseErrorKind::VerifyFailedRollbackSucceeded => 14,
            ReleaseErrorKind::VerifyFailedRollbackFailed => 15,
            ReleaseErrorKind::PostHookFailed => 16,
        }
    }
}

impl std::fmt::Display for ReleaseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ReleaseError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ReleaseErrorKind {
        match self {
            ReleaseError::PreHookFailed { .. } => ReleaseErrorKind::PreHookFailed,
            ReleaseError::RemovalFailed { .. } => ReleaseErrorKind::RemovalFailed,
            ReleaseError::DeployFailed { .. } => ReleaseErrorKind::DeployFailed,
            ReleaseError::VerifyFailedNoRollback { .. } => ReleaseErrorKind::VerifyFailedNoRollback,
            ReleaseError::VerifyFailedRollbackSucceeded { .. } => {
                ReleaseErrorKind::VerifyFailedRollbackSucceeded
            }
            ReleaseError::VerifyFailedRollbackFailed { .. } => {
                ReleaseErrorKind::VerifyFailedRollbackFailed
            }
            ReleaseError::PostHookFailed { .. } => ReleaseErrorKind::PostHookFailed,
        }
    }

    pub fn stage(&self) -> Stage {
        self.kind().stage()
    }

    /// The underlying command failure. For a failed rollback this is the
    /// rollback's failure; see [`ReleaseError::verify_cause`] for the test's.
    pub fn cause(&self) -> &ExecError {
        match self {
            ReleaseError::PreHookFailed { source, .. }
            | ReleaseError::RemovalFailed { source, .. }
            | ReleaseError::DeployFailed { source, .. }
            | ReleaseError::VerifyFailedNoRollback { source, .. }
            | ReleaseError::VerifyFailedRollbackSucceeded { source, .. }
            | ReleaseError::VerifyFailedRollbackFailed { source, .. }
            | ReleaseError::PostHookFailed { source, .. } => source,
        }
    }

    /// The release test failure behind any verify-stage error.
    pub fn verify_cause(&self) -> Option<&ExecError> {
        match self {
            ReleaseError::VerifyFailedNoRollback { source, .. }
            | ReleaseError::VerifyFailedRollbackSucceeded { source, .. } => Some(source),
            ReleaseError::VerifyFailedRollbackFailed { verify, .. } => Some(verify),
            _ => None,
        }
    }

    /// The run stopped because it was cancelled rather than because a command failed.
    pub fn is_cancelled(&self) -> bool {
        self.cause().is_cancelled()
    }
}
