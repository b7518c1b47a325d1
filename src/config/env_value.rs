// ABOUTME: Config values that may be read from the environment instead of the file.
// ABOUTME: Used for repository credentials so secrets stay out of helmflow.yml.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Either a literal string or `{ env: VAR, default: ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    /// Resolve to a concrete value. An unset variable without a default is
    /// an error.
    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) => Ok(val),
                Err(_) => default
                    .clone()
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }
}

/// Resolve an optional value, treating an empty result as absent.
pub fn resolve_optional(value: Option<&EnvValue>) -> Result<Option<String>> {
    Ok(value
        .map(EnvValue::resolve)
        .transpose()?
        .filter(|v| !v.is_empty()))
}
