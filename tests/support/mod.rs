// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted, recording Executor and tracing setup for integration tests.

use async_trait::async_trait;
use helmflow::exec::{CancelToken, ExecError, Executor, format_command};
use parking_lot::Mutex;
use std::io;
use std::sync::{Arc, Once};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("helmflow=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Log sink shared with a thread-local subscriber.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Capture every event at debug and above on the current thread until the
/// guard drops. Pair with the default current-thread `#[tokio::test]`.
#[allow(dead_code)]
pub fn capture_logs() -> (tracing::subscriber::DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Run,
    Capture,
}

/// Executor that records every invocation and answers from a script.
///
/// Commands are matched by prefix of their rendered command line, so
/// `fail_on("helm test")` fails `helm test --logs myapp`.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<(CallKind, String)>>,
    failures: Mutex<Vec<(String, i32)>>,
    manifest: Mutex<Option<String>>,
    cancel_on: Mutex<Option<(String, CancelToken)>>,
}

#[allow(dead_code)]
impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command starting with `prefix` exit with code 1.
    pub fn fail_on(self, prefix: &str) -> Self {
        self.fail_with(prefix, 1)
    }

    /// Make every command starting with `prefix` exit with `code`.
    pub fn fail_with(self, prefix: &str, code: i32) -> Self {
        self.failures.lock().push((prefix.to_string(), code));
        self
    }

    /// Output returned by `capture` (the manifest query). Without one, the
    /// query fails as it does for a release that does not exist.
    pub fn manifest(self, manifest: &str) -> Self {
        *self.manifest.lock() = Some(manifest.to_string());
        self
    }

    /// Cancel `token` when a command starting with `prefix` runs; that
    /// command then still completes successfully.
    pub fn cancel_on(self, prefix: &str, token: &CancelToken) -> Self {
        *self.cancel_on.lock() = Some((prefix.to_string(), token.clone()));
        self
    }

    /// Command lines passed to `run`, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(kind, _)| *kind == CallKind::Run)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Command lines passed to `capture`, in order.
    pub fn captures(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(kind, _)| *kind == CallKind::Capture)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Every invocation, in order.
    pub fn calls(&self) -> Vec<(CallKind, String)> {
        self.calls.lock().clone()
    }

    fn record(&self, kind: CallKind, program: &str, args: &[String]) -> String {
        let line = format_command(program, args);
        self.calls.lock().push((kind, line.clone()));
        line
    }

    fn scripted_failure(&self, program: &str, line: &str) -> Option<ExecError> {
        self.failures
            .lock()
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, code)| ExecError::Exit {
                program: program.to_string(),
                code: Some(*code),
                stderr: format!("scripted failure: {line}"),
            })
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn run(
        &self,
        _cancel: &CancelToken,
        program: &str,
        args: &[String],
    ) -> Result<(), ExecError> {
        let line = self.record(CallKind::Run, program, args);

        if let Some((prefix, token)) = self.cancel_on.lock().as_ref()
            && line.starts_with(prefix.as_str())
        {
            token.cancel();
        }

        match self.scripted_failure(program, &line) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn capture(
        &self,
        _cancel: &CancelToken,
        program: &str,
        args: &[String],
    ) -> Result<String, ExecError> {
        let line = self.record(CallKind::Capture, program, args);

        if let Some(e) = self.scripted_failure(program, &line) {
            return Err(e);
        }
        self.manifest.lock().clone().ok_or_else(|| ExecError::Exit {
            program: program.to_string(),
            code: Some(1),
            stderr: "Error: release: not found".to_string(),
        })
    }
}

/// A rendered manifest whose first container runs `image`.
#[allow(dead_code)]
pub fn manifest_with_image(image: &str) -> String {
    format!(
        r#"---
# Source: myapp/templates/deployment.yaml
apiVersion: apps/v1
kind: Deployment
metadata:
  name: myapp
spec:
  template:
    spec:
      containers:
        - name: myapp
          image: "{image}"
          imagePullPolicy: IfNotPresent
"#
    )
}
