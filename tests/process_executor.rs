// ABOUTME: Integration tests for the process-backed Executor.
// ABOUTME: Spawns real shell commands to check exit mapping, capture, and cancellation.
#![cfg(unix)]

use helmflow::exec::{CancelToken, ExecError, Executor, ProcessExecutor};
use std::time::{Duration, Instant};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn zero_exit_succeeds() {
    ProcessExecutor::new()
        .run(&CancelToken::new(), "true", &[])
        .await
        .unwrap();
}

#[tokio::test]
async fn non_zero_exit_reports_code() {
    let err = ProcessExecutor::new()
        .run(&CancelToken::new(), "sh", &args(&["-c", "exit 3"]))
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), Some(3));
}

#[tokio::test]
async fn missing_program_is_spawn_error() {
    let err = ProcessExecutor::new()
        .run(&CancelToken::new(), "helmflow-no-such-program", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ExecError::Spawn { .. }));
}

#[tokio::test]
async fn capture_returns_stdout() {
    let out = ProcessExecutor::new()
        .capture(
            &CancelToken::new(),
            "sh",
            &args(&["-c", "printf '  image: \"myimg:v1\"\\n'"]),
        )
        .await
        .unwrap();
    assert_eq!(out, "  image: \"myimg:v1\"\n");
}

#[tokio::test]
async fn capture_keeps_stderr_on_failure() {
    let err = ProcessExecutor::new()
        .capture(
            &CancelToken::new(),
            "sh",
            &args(&["-c", "echo 'release: not found' >&2; exit 1"]),
        )
        .await
        .unwrap_err();
    match err {
        ExecError::Exit { code, stderr, .. } => {
            assert_eq!(code, Some(1));
            assert!(stderr.contains("not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn env_is_passed_to_children() {
    let out = ProcessExecutor::new()
        .env("HELMFLOW_TEST_VALUE", "42")
        .capture(&CancelToken::new(), "sh", &args(&["-c", "printf %s \"$HELMFLOW_TEST_VALUE\""]))
        .await
        .unwrap();
    assert_eq!(out, "42");
}

#[tokio::test]
async fn cancel_stops_running_command() {
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = ProcessExecutor::new()
        .run(&cancel, "sleep", &args(&["30"]))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn already_cancelled_does_not_spawn() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let err = ProcessExecutor::new()
        .run(&cancel, "helmflow-no-such-program", &[])
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn children_lead_their_own_process_group() {
    let out = ProcessExecutor::new()
        .capture(
            &CancelToken::new(),
            "sh",
            &args(&["-c", "echo $$; cut -d' ' -f5 /proc/$$/stat"]),
        )
        .await
        .unwrap();
    let mut lines = out.lines();
    let pid = lines.next().unwrap();
    let pgid = lines.next().unwrap();
    assert_eq!(pid, pgid);

    let own = std::fs::read_to_string("/proc/self/stat").unwrap();
    let own_pgid = own.rsplit(')').next().unwrap().split_whitespace().nth(2).unwrap();
    assert_ne!(own_pgid, pgid);
}
