// ABOUTME: The Executor capability the pipeline drives external commands through.
// ABOUTME: Callers supply the implementation; the engine only sees success or failure.

use async_trait::async_trait;

use super::CancelToken;

/// Runs external programs on behalf of the pipeline.
///
/// Implementations must be safe to call repeatedly and must report a
/// non-zero exit or a launch failure as an error. They should stop the
/// underlying process promptly once `cancel` fires.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `program` with `args` and wait for it to exit.
    async fn run(&self, cancel: &CancelToken, program: &str, args: &[String])
    -> Result<(), ExecError>;

    /// Run `program` with `args` and return what it wrote to stdout.
    async fn capture(
        &self,
        cancel: &CancelToken,
        program: &str,
        args: &[String],
    ) -> Result<String, ExecError>;
}

/// Run a command unless the run has already been cancelled, logging the
/// full command line first.
pub async fn invoke(
    executor: &dyn Executor,
    cancel: &CancelToken,
    program: &str,
    args: &[String],
) -> Result<(), ExecError> {
    if cancel.is_cancelled() {
        return Err(ExecError::cancelled(program));
    }
    tracing::debug!(command = %format_command(program, args), "invoking");
    executor.run(cancel, program, args).await
}

/// Flags whose following argument is a credential.
const SECRET_FLAGS: &[&str] = &["--password"];

/// Shown in place of a credential.
pub const REDACTED: &str = "********";

/// Render a command line for logs, errors and plans. Credentials passed
/// as `--password <p>` or `--password=<p>` are masked.
pub fn format_command(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    let mut mask_next = false;
    for arg in args {
        line.push(' ');
        if mask_next {
            line.push_str(REDACTED);
            mask_next = false;
            continue;
        }
        match arg.split_once('=') {
            Some((flag, _)) if SECRET_FLAGS.contains(&flag) => {
                line.push_str(flag);
                line.push('=');
                line.push_str(REDACTED);
            }
            _ => {
                mask_next = SECRET_FLAGS.contains(&arg.as_str());
                line.push_str(arg);
            }
        }
    }
    line
}

/// Errors from running an external command.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}", exit_description(.code))]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{program} was cancelled")]
    Cancelled { program: String },

    #[error("I/O error while running {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExecError {
    pub fn cancelled(program: impl Into<String>) -> Self {
        ExecError::Cancelled {
            program: program.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExecError::Cancelled { .. })
    }

    /// What the failed process wrote to stderr, when it was captured.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ExecError::Exit { stderr, .. } if !stderr.trim().is_empty() => Some(stderr.trim()),
            _ => None,
        }
    }

    /// Exit code of the failed process, if it exited at all.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_error_mentions_code() {
        let err = ExecError::Exit {
            program: "helm".to_string(),
            code: Some(1),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "helm exited with exit code 1");
        assert_eq!(err.exit_code(), Some(1));
    }

    #[test]
    fn signal_exit_has_no_code() {
        let err = ExecError::Exit {
            program: "helm".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("signal"));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn format_command_joins_with_spaces() {
        let args = vec!["uninstall".to_string(), "myapp".to_string()];
        assert_eq!(format_command("helm", &args), "helm uninstall myapp");
        assert_eq!(format_command("true", &[]), "true");
    }

    #[test]
    fn cancelled_is_detectable() {
        assert!(ExecError::cancelled("helm").is_cancelled());
        let exit = ExecError::Exit {
            program: "helm".to_string(),
            code: Some(1),
            stderr: String::new(),
        };
        assert!(!exit.is_cancelled());
    }

    #[test]
    fn format_command_masks_passwords() {
        let args: Vec<String> = ["repo", "add", "--password", "hunter2", "--password=hunter3", "x"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let line = format_command("helm", &args);
        assert_eq!(line, "helm repo add --password ******** --password=******** x");
        assert!(!line.contains("hunter"));
    }

    #[test]
    fn stderr_is_trimmed_and_optional() {
        let err = ExecError::Exit {
            program: "helm".to_string(),
            code: Some(1),
            stderr: "Error: release: not found\n".to_string(),
        };
        assert_eq!(err.stderr(), Some("Error: release: not found"));
        assert_eq!(ExecError::cancelled("helm").stderr(), None);
    }
}
