// ABOUTME: Configuration types and parsing for helmflow.yml.
// ABOUTME: Handles discovery, YAML parsing, and translation into a ReleaseBuilder.

mod deserialize;
mod env_value;
mod init;
mod repo;

pub use env_value::{EnvValue, resolve_optional};
pub use init::init_config;
pub use repo::{RepoConfig, RepoEntry};

use crate::error::{Error, Result};
use crate::release::{DeployMode, ReleaseBuilder};
use crate::types::{HookCommand, ReleaseName, ValueAssignment};
use deserialize::{deserialize_assignments, deserialize_release_name};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "helmflow.yml";
pub const CONFIG_FILENAME_ALT: &str = "helmflow.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".helmflow/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default, deserialize_with = "deserialize_release_name")]
    pub release: Option<ReleaseName>,

    #[serde(default)]
    pub chart: Option<String>,

    /// Package tool binary.
    #[serde(default = "default_helm")]
    pub helm: String,

    #[serde(default)]
    pub mode: DeployMode,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub kubeconfig: Option<String>,

    #[serde(default, deserialize_with = "deserialize_assignments")]
    pub values: Vec<ValueAssignment>,

    #[serde(default, deserialize_with = "deserialize_assignments")]
    pub values_string: Vec<ValueAssignment>,

    #[serde(default)]
    pub values_files: Vec<String>,

    #[serde(default)]
    pub atomic: bool,

    #[serde(default)]
    pub wait: bool,

    #[serde(default)]
    pub force: bool,

    #[serde(default)]
    pub cleanup_on_fail: bool,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub debug: bool,

    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,

    #[serde(default)]
    pub lint: bool,

    #[serde(default)]
    pub repos: Vec<RepoEntry>,

    #[serde(default)]
    pub dependencies: DependenciesConfig,

    #[serde(default)]
    pub test: TestConfig,

    #[serde(default)]
    pub pre_commands: Vec<HookCommand>,

    #[serde(default)]
    pub post_commands: Vec<HookCommand>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependenciesConfig {
    #[serde(default)]
    pub update: bool,
    #[serde(default)]
    pub build: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub rollback_on_failure: bool,
}

fn default_helm() -> String {
    "helm".to_string()
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub release: Option<String>,
    pub chart: Option<String>,
    pub namespace: Option<String>,
    /// Appended after the file's `values`.
    pub values: Vec<ValueAssignment>,
    pub dry_run: bool,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// First existing config file in `dir`.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let path = Self::find(dir).ok_or_else(|| Error::ConfigNotFound(dir.to_path_buf()))?;
        tracing::debug!(path = %path.display(), "loading config");
        Self::load(&path)
    }

    /// Translate the file plus command-line overrides into a builder.
    ///
    /// Repository credentials are resolved here, so a missing environment
    /// variable fails before anything runs. The executor is left unset.
    pub fn to_builder(&self, overrides: &Overrides) -> Result<ReleaseBuilder> {
        let mut builder = ReleaseBuilder::new(self.mode).tool(self.helm.as_str());

        if let Some(release) = overrides
            .release
            .clone()
            .or_else(|| self.release.as_ref().map(ReleaseName::to_string))
        {
            builder = builder.release(release);
        }
        if let Some(chart) = overrides.chart.clone().or_else(|| self.chart.clone()) {
            builder = builder.chart(chart);
        }
        if let Some(namespace) = overrides.namespace.clone().or_else(|| self.namespace.clone()) {
            builder = builder.namespace(namespace);
        }
        if let Some(ref kubeconfig) = self.kubeconfig {
            builder = builder.kubeconfig(kubeconfig.as_str());
        }

        builder = builder
            .atomic(self.atomic)
            .wait(self.wait)
            .force(self.force)
            .cleanup_on_fail(self.cleanup_on_fail)
            .dry_run(self.dry_run || overrides.dry_run)
            .debug(self.debug);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder = builder.values(
            self.values
                .iter()
                .chain(overrides.values.iter())
                .cloned(),
        );
        for value in &self.values_string {
            builder = builder.value_string(value.clone());
        }
        for file in &self.values_files {
            builder = builder.values_file(file.as_str());
        }

        for entry in &self.repos {
            builder = builder.repo(entry.to_spec()?);
        }

        builder = builder
            .update_dependencies(self.dependencies.update)
            .build_dependencies(self.dependencies.build)
            .lint(self.lint)
            .test(self.test.enabled)
            .rollback_on_test_failure(self.test.rollback_on_failure);

        for command in &self.pre_commands {
            builder = builder.pre_command(command.clone());
        }
        for command in &self.post_commands {
            builder = builder.post_command(command.clone());
        }

        Ok(builder)
    }
}
