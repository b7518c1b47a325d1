// ABOUTME: Chart repository registration performed as pre-deploy commands.
// ABOUTME: Parses the compact name=url=user=pass=yes|no form and builds `repo add` commands.

use thiserror::Error;

use crate::types::HookCommand;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoSpecError {
    #[error("repository must be name=url=username=password=yes|no, got: {0}")]
    Format(String),

    #[error("repository name cannot be empty")]
    EmptyName,

    #[error("repository url cannot be empty")]
    EmptyUrl,
}

/// A chart repository to register before deploying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub name: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Skip TLS verification for this repository.
    pub insecure: bool,
}

impl RepoSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self, RepoSpecError> {
        let name = name.into();
        let url = url.into();
        if name.is_empty() {
            return Err(RepoSpecError::EmptyName);
        }
        if url.is_empty() {
            return Err(RepoSpecError::EmptyUrl);
        }
        Ok(Self {
            name,
            url,
            username: None,
            password: None,
            insecure: false,
        })
    }

    /// Parse `name=url=username=password=insecure`, where insecure is `yes`
    /// or anything else for no. Empty credentials are treated as absent.
    pub fn parse(input: &str) -> Result<Self, RepoSpecError> {
        let parts: Vec<&str> = input.splitn(5, '=').collect();
        let [name, url, username, password, insecure] = parts.as_slice() else {
            return Err(RepoSpecError::Format(input.to_string()));
        };

        let mut spec = Self::new(*name, *url)?;
        spec.username = non_empty(username);
        spec.password = non_empty(password);
        spec.insecure = *insecure == "yes";
        Ok(spec)
    }

    /// `<tool> repo add [--username u --password p] <name> <url> [--insecure-skip-tls-verify]`
    pub fn add_command(&self, tool: &str) -> HookCommand {
        let mut parts = vec!["repo".to_string(), "add".to_string()];
        if let Some(ref username) = self.username {
            parts.push("--username".to_string());
            parts.push(username.clone());
        }
        if let Some(ref password) = self.password {
            parts.push("--password".to_string());
            parts.push(password.clone());
        }
        parts.push(self.name.clone());
        parts.push(self.url.clone());
        if self.insecure {
            parts.push("--insecure-skip-tls-verify".to_string());
        }
        HookCommand::with_program(tool, parts)
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
