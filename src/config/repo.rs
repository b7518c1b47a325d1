// ABOUTME: Chart repository entries as written in helmflow.yml.
// ABOUTME: Accepts the compact name=url=user=pass=yes|no string or a structured mapping.

use serde::Deserialize;

use super::env_value::{EnvValue, resolve_optional};
use crate::error::{Error, Result};
use crate::release::RepoSpec;

#[derive(Debug, Clone, Deserialize)]
pub struct RepoConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub username: Option<EnvValue>,
    #[serde(default)]
    pub password: Option<EnvValue>,
    #[serde(default)]
    pub insecure: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepoEntry {
    Compact(String),
    Detailed(RepoConfig),
}

impl RepoEntry {
    /// Resolve credentials and validate into a [`RepoSpec`].
    pub fn to_spec(&self) -> Result<RepoSpec> {
        let invalid = |e: crate::release::RepoSpecError| Error::InvalidConfig(e.to_string());
        match self {
            RepoEntry::Compact(s) => RepoSpec::parse(s).map_err(invalid),
            RepoEntry::Detailed(c) => {
                let mut spec = RepoSpec::new(c.name.as_str(), c.url.as_str()).map_err(invalid)?;
                spec.username = resolve_optional(c.username.as_ref())?;
                spec.password = resolve_optional(c.password.as_ref())?;
                spec.insecure = c.insecure;
                Ok(spec)
            }
        }
    }
}
