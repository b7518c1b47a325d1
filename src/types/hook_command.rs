// ABOUTME: A single external command invocation: program plus arguments.
// ABOUTME: Non-empty by construction so a hook always names a program.

use nonempty::NonEmpty;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::exec::format_command;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HookCommandError {
    #[error("command cannot be empty")]
    Empty,

    #[error("command program cannot be blank")]
    BlankProgram,
}

/// Program followed by its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookCommand(NonEmpty<String>);

impl HookCommand {
    pub fn new<I, S>(parts: I) -> Result<Self, HookCommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        let parts = NonEmpty::from_vec(parts).ok_or(HookCommandError::Empty)?;
        if parts.head.trim().is_empty() {
            return Err(HookCommandError::BlankProgram);
        }
        Ok(Self(parts))
    }

    /// Build from a program name and its arguments.
    pub fn with_program(program: impl Into<String>, args: Vec<String>) -> Self {
        Self(NonEmpty {
            head: program.into(),
            tail: args,
        })
    }

    pub fn program(&self) -> &str {
        &self.0.head
    }

    pub fn args(&self) -> &[String] {
        &self.0.tail
    }
}

/// Space-joined command line with credentials masked. Use `program()` and
/// `args()` for the real invocation.
impl fmt::Display for HookCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_command(self.program(), self.args()))
    }
}

impl<'de> Deserialize<'de> for HookCommand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let parts: Vec<String> = Vec::deserialize(deserializer)?;
        HookCommand::new(parts).map_err(serde::de::Error::custom)
    }
}
