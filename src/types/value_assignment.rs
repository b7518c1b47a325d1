// ABOUTME: Chart value overrides in key=value form.
// ABOUTME: Parsed from config and CLI before they become --set flags.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not in key=value format: {0}")]
pub struct ValueAssignmentError(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueAssignment {
    key: String,
    value: String,
}

impl ValueAssignment {
    pub fn parse(input: &str) -> Result<Self, ValueAssignmentError> {
        let (key, value) = input
            .split_once('=')
            .ok_or_else(|| ValueAssignmentError(input.to_string()))?;
        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for ValueAssignment {
    type Err = ValueAssignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ValueAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
