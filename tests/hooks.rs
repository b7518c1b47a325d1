// ABOUTME: Integration tests for the hook runner.
// ABOUTME: Tests ordering, fail-fast behavior, and failure tagging by hook point.

mod support;

use helmflow::deploy::ReleaseErrorKind;
use helmflow::exec::CancelToken;
use helmflow::hooks::{HookPoint, run_sequence};
use helmflow::types::HookCommand;
use support::RecordingExecutor;

fn ops(lines: &[&[&str]]) -> Vec<HookCommand> {
    lines
        .iter()
        .map(|parts| HookCommand::new(parts.iter().copied()).unwrap())
        .collect()
}

/// Test: an empty sequence succeeds without invoking anything.
#[tokio::test]
async fn empty_sequence_succeeds() {
    let executor = RecordingExecutor::new();
    run_sequence(&executor, &CancelToken::new(), &[], HookPoint::Pre)
        .await
        .unwrap();
    assert!(executor.calls().is_empty());
}

/// Test: commands run in list order with their arguments intact.
#[tokio::test]
async fn runs_in_order() {
    let executor = RecordingExecutor::new();
    let hooks = ops(&[
        &["kubectl", "apply", "-f", "crds/"],
        &["./scripts/migrate.sh", "--env", "prod"],
    ]);

    run_sequence(&executor, &CancelToken::new(), &hooks, HookPoint::Pre)
        .await
        .unwrap();

    assert_eq!(
        executor.commands(),
        ["kubectl apply -f crds/", "./scripts/migrate.sh --env prod"]
    );
}

/// Test: the first failure stops the sequence and is tagged with the point.
#[tokio::test]
async fn stops_at_first_failure() {
    let executor = RecordingExecutor::new().fail_on("b");
    let hooks = ops(&[&["a"], &["b"], &["c"]]);

    let err = run_sequence(&executor, &CancelToken::new(), &hooks, HookPoint::Post)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ReleaseErrorKind::PostHookFailed);
    assert_eq!(err.cause().exit_code(), Some(1));
    assert_eq!(executor.commands(), ["a", "b"]);
}

/// Test: a cancelled run invokes no further hooks.
#[tokio::test]
async fn cancelled_run_invokes_nothing() {
    let executor = RecordingExecutor::new();
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = run_sequence(&executor, &cancel, &ops(&[&["a"]]), HookPoint::Pre)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ReleaseErrorKind::PreHookFailed);
    assert!(err.is_cancelled());
    assert!(executor.calls().is_empty());
}
