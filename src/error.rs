// ABOUTME: Application-wide error types for helmflow.
// ABOUTME: Wraps config, build and release failures and maps them to process exit codes.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::ReleaseError;
use crate::release::BuildError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Release(#[from] ReleaseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Exit code for failures that happen before any command is issued.
pub const EXIT_USAGE: i32 = 2;

impl Error {
    /// Process exit code: release failures carry a per-kind code, everything
    /// else is a setup problem.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Release(e) => e.kind().exit_code(),
            Error::Io(_) => 1,
            _ => EXIT_USAGE,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::ExecError;
    use crate::types::ReleaseName;

    #[test]
    fn release_errors_keep_their_exit_code() {
        let err = Error::from(ReleaseError::DeployFailed {
            release: ReleaseName::new("myapp").unwrap(),
            source: ExecError::Exit {
                program: "helm".into(),
                code: Some(1),
                stderr: String::new(),
            },
        });
        assert_eq!(
            err.exit_code(),
            crate::deploy::ReleaseErrorKind::DeployFailed.exit_code()
        );
    }

    #[test]
    fn config_errors_are_usage_errors() {
        assert_eq!(
            Error::MissingEnvVar("TOKEN".into()).exit_code(),
            EXIT_USAGE
        );
    }
}
