// ABOUTME: Hook runner for pre- and post-deploy command sequences.
// ABOUTME: Runs commands in order through the Executor and stops at the first failure.

use crate::deploy::ReleaseError;
use crate::exec::{CancelToken, ExecError, Executor, invoke};
use crate::types::HookCommand;

/// Hook execution points around the deploy command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoint {
    /// Before anything touches the release. Failure aborts the run.
    Pre,
    /// After a successful (and, if enabled, verified) deploy.
    Post,
}

impl HookPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookPoint::Pre => "pre",
            HookPoint::Post => "post",
        }
    }

    /// Tag a hook failure with this point's error kind.
    pub fn failure(&self, index: usize, command: &HookCommand, source: ExecError) -> ReleaseError {
        let command = command.to_string();
        match self {
            HookPoint::Pre => ReleaseError::PreHookFailed {
                index,
                command,
                source,
            },
            HookPoint::Post => ReleaseError::PostHookFailed {
                index,
                command,
                source,
            },
        }
    }
}

/// Run `ops` in order. The first failure is returned tagged with `point` and
/// the remaining commands are skipped. An empty list succeeds.
pub async fn run_sequence(
    executor: &dyn Executor,
    cancel: &CancelToken,
    ops: &[HookCommand],
    point: HookPoint,
) -> Result<(), ReleaseError> {
    for (index, op) in ops.iter().enumerate() {
        tracing::info!(hook = point.as_str(), index, command = %op, "running hook");

        if let Err(e) = invoke(executor, cancel, op.program(), op.args()).await {
            tracing::warn!(hook = point.as_str(), index, error = %e, "hook failed");
            return Err(point.failure(index, op, e));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::ReleaseErrorKind;

    #[test]
    fn failure_tags_kind_by_point() {
        let cmd = HookCommand::new(["false"]).unwrap();
        let pre = HookPoint::Pre.failure(2, &cmd, ExecError::cancelled("false"));
        assert_eq!(pre.kind(), ReleaseErrorKind::PreHookFailed);

        let post = HookPoint::Post.failure(0, &cmd, ExecError::cancelled("false"));
        assert_eq!(post.kind(), ReleaseErrorKind::PostHookFailed);
        assert!(post.to_string().contains("#0"));
    }
}
