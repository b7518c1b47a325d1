// ABOUTME: Immutable description of a single release request.
// ABOUTME: Holds the assembled helm argument vectors, hook lists and verification flags.

use crate::types::{Artifact, HookCommand, ReleaseName};

/// Everything the pipeline needs to know about one release request.
///
/// Built once by [`super::ReleaseBuilder`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    pub(crate) tool: String,
    pub(crate) release: ReleaseName,
    pub(crate) chart: String,
    pub(crate) artifact: Artifact,
    pub(crate) deploy_args: Vec<String>,
    pub(crate) removal_args: Vec<String>,
    pub(crate) pre_ops: Vec<HookCommand>,
    pub(crate) post_ops: Vec<HookCommand>,
    pub(crate) verify: bool,
    pub(crate) rollback_on_failure: bool,
}

impl ReleaseDescriptor {
    /// The package tool binary, `helm` unless overridden.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn release(&self) -> &ReleaseName {
        &self.release
    }

    pub fn chart(&self) -> &str {
        &self.chart
    }

    /// The pinned `{image, tag}`; empty if the request pins nothing.
    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Full deploy argument vector, mode prefix first, release and chart last.
    pub fn deploy_args(&self) -> &[String] {
        &self.deploy_args
    }

    /// Connection arguments (namespace, kubeconfig) shared by uninstall and
    /// manifest queries.
    pub fn removal_args(&self) -> &[String] {
        &self.removal_args
    }

    pub fn pre_ops(&self) -> &[HookCommand] {
        &self.pre_ops
    }

    pub fn post_ops(&self) -> &[HookCommand] {
        &self.post_ops
    }

    pub fn verify(&self) -> bool {
        self.verify
    }

    pub fn rollback_on_failure(&self) -> bool {
        self.rollback_on_failure
    }

    /// `get manifest <release> <removal args...>`
    pub fn manifest_args(&self) -> Vec<String> {
        let mut args = vec![
            "get".to_string(),
            "manifest".to_string(),
            self.release.to_string(),
        ];
        args.extend(self.removal_args.iter().cloned());
        args
    }

    /// `uninstall <release> <removal args...>`
    pub fn removal_command_args(&self) -> Vec<String> {
        let mut args = vec!["uninstall".to_string(), self.release.to_string()];
        args.extend(self.removal_args.iter().cloned());
        args
    }

    /// `test --logs <release>`
    pub fn verify_args(&self) -> Vec<String> {
        vec![
            "test".to_string(),
            "--logs".to_string(),
            self.release.to_string(),
        ]
    }

    /// `rollback <release>`
    pub fn rollback_args(&self) -> Vec<String> {
        vec!["rollback".to_string(), self.release.to_string()]
    }
}
