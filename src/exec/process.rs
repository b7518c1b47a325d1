// ABOUTME: Executor backed by local child processes via tokio.
// ABOUTME: Streams hook/helm output to the terminal and kills children on cancel.

use async_trait::async_trait;
use std::collections::HashMap;
use std::process::Stdio;
use tokio::process::Command;

use super::{CancelToken, ExecError, Executor, format_command};

/// Runs commands as child processes of the current process.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    env: HashMap<String, String>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable for every spawned command.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Children get their own process group so a terminal Ctrl-C reaches
    /// only helmflow. They are stopped through the `CancelToken` instead,
    /// which lets a rollback finish after an interrupt.
    fn command(&self, program: &str, args: &[String]) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .envs(&self.env)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);
        cmd
    }
}

#[async_trait]
impl Executor for ProcessExecutor {
    async fn run(
        &self,
        cancel: &CancelToken,
        program: &str,
        args: &[String],
    ) -> Result<(), ExecError> {
        if cancel.is_cancelled() {
            return Err(ExecError::cancelled(program));
        }

        tracing::debug!(command = %format_command(program, args), "spawning");

        let mut child = self
            .command(program, args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let status = tokio::select! {
            status = child.wait() => Some(status),
            _ = cancel.cancelled() => None,
        };

        let Some(status) = status else {
            tracing::warn!(program, "cancelling running command");
            if let Err(error) = child.kill().await {
                tracing::warn!(program, %error, "failed to kill cancelled command");
            }
            return Err(ExecError::cancelled(program));
        };

        let status = status.map_err(|source| ExecError::Io {
            program: program.to_string(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Exit {
                program: program.to_string(),
                code: status.code(),
                stderr: String::new(),
            })
        }
    }

    async fn capture(
        &self,
        cancel: &CancelToken,
        program: &str,
        args: &[String],
    ) -> Result<String, ExecError> {
        if cancel.is_cancelled() {
            return Err(ExecError::cancelled(program));
        }

        tracing::debug!(command = %format_command(program, args), "spawning with captured output");

        let child = self
            .command(program, args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Dropping the output future drops the child, which kills it.
        tokio::select! {
            output = child.wait_with_output() => {
                let output = output.map_err(|source| ExecError::Io {
                    program: program.to_string(),
                    source,
                })?;
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
                } else {
                    Err(ExecError::Exit {
                        program: program.to_string(),
                        code: output.status.code(),
                        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    })
                }
            }
            _ = cancel.cancelled() => Err(ExecError::cancelled(program)),
        }
    }
}
