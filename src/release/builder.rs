// ABOUTME: Validating builder that assembles a ReleaseDescriptor from options.
// ABOUTME: Translates deploy options into helm flags and pre-deploy commands.

use snafu::{OptionExt, ResultExt, Snafu, ensure};
use std::sync::Arc;
use std::time::Duration;

use crate::exec::Executor;
use crate::types::{Artifact, HookCommand, ReleaseName, ReleaseNameError, ValueAssignment};

use super::{DeployMode, ReleaseDescriptor, ReleaseJob, RepoSpec};

/// Chart value keys that pin the desired artifact.
const IMAGE_REPOSITORY_KEY: &str = "image.repository";
const IMAGE_TAG_KEY: &str = "image.tag";

/// Why a release could not be assembled.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum BuildError {
    #[snafu(display("release name is required"))]
    MissingRelease,

    #[snafu(display("invalid release name: {source}"))]
    InvalidRelease { source: ReleaseNameError },

    #[snafu(display("chart path is required"))]
    MissingChart,

    #[snafu(display("executor is required"))]
    MissingExecutor,

    #[snafu(display("tool binary cannot be empty"))]
    EmptyTool,
}

/// Collects deploy options and produces a validated [`ReleaseJob`].
///
/// Flags are appended to the deploy argument vector in the order the
/// setters are called. Pre-deploy commands are assembled at build time in a
/// fixed order: repository registration, dependency update, dependency build,
/// lint, then explicit pre-commands.
pub struct ReleaseBuilder {
    tool: String,
    mode: DeployMode,
    release: Option<String>,
    chart: Option<String>,
    artifact: Artifact,
    flags: Vec<String>,
    removal_args: Vec<String>,
    repos: Vec<RepoSpec>,
    update_dependencies: bool,
    build_dependencies: bool,
    lint: bool,
    pre_commands: Vec<HookCommand>,
    post_commands: Vec<HookCommand>,
    verify: bool,
    rollback_on_failure: bool,
    executor: Option<Arc<dyn Executor>>,
}

impl Default for ReleaseBuilder {
    fn default() -> Self {
        Self::new(DeployMode::default())
    }
}

impl std::fmt::Debug for ReleaseBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseBuilder")
            .field("tool", &self.tool)
            .field("mode", &self.mode)
            .field("release", &self.release)
            .field("chart", &self.chart)
            .field("flags", &self.flags)
            .field("has_executor", &self.executor.is_some())
            .finish_non_exhaustive()
    }
}

impl ReleaseBuilder {
    pub fn new(mode: DeployMode) -> Self {
        Self {
            tool: "helm".to_string(),
            mode,
            release: None,
            chart: None,
            artifact: Artifact::default(),
            flags: Vec::new(),
            removal_args: Vec::new(),
            repos: Vec::new(),
            update_dependencies: false,
            build_dependencies: false,
            lint: false,
            pre_commands: Vec::new(),
            post_commands: Vec::new(),
            verify: false,
            rollback_on_failure: false,
            executor: None,
        }
    }

    /// Override the package tool binary (default `helm`).
    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    pub fn chart(mut self, chart: impl Into<String>) -> Self {
        self.chart = Some(chart.into());
        self
    }

    /// `-n <namespace>` on deploy, uninstall and manifest queries.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.flags.extend(["-n".to_string(), namespace.clone()]);
        self.removal_args.extend(["-n".to_string(), namespace]);
        self
    }

    /// `--kubeconfig <path>` on deploy, uninstall and manifest queries.
    /// An empty path is ignored.
    pub fn kubeconfig(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !path.is_empty() {
            self.flags.extend(["--kubeconfig".to_string(), path.clone()]);
            self.removal_args.extend(["--kubeconfig".to_string(), path]);
        }
        self
    }

    pub fn atomic(self, enabled: bool) -> Self {
        self.flag_if(enabled, "--atomic")
    }

    pub fn wait(self, enabled: bool) -> Self {
        self.flag_if(enabled, "--wait")
    }

    pub fn force(self, enabled: bool) -> Self {
        self.flag_if(enabled, "--force")
    }

    pub fn cleanup_on_fail(self, enabled: bool) -> Self {
        self.flag_if(enabled, "--cleanup-on-fail")
    }

    pub fn dry_run(self, enabled: bool) -> Self {
        self.flag_if(enabled, "--dry-run")
    }

    pub fn debug(self, enabled: bool) -> Self {
        self.flag_if(enabled, "--debug")
    }

    /// `--timeout <secs>s`, or `<millis>ms` when the duration has a
    /// sub-second part.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let rendered = if timeout.subsec_millis() == 0 {
            format!("{}s", timeout.as_secs())
        } else {
            format!("{}ms", timeout.as_millis())
        };
        self.flags.extend(["--timeout".to_string(), rendered]);
        self
    }

    /// `--set key=value`. The `image.repository` and `image.tag` keys also
    /// pin the desired artifact.
    pub fn value(mut self, value: ValueAssignment) -> Self {
        match value.key() {
            IMAGE_REPOSITORY_KEY => self.artifact.set_image(value.value()),
            IMAGE_TAG_KEY => self.artifact.set_tag(value.value()),
            _ => {}
        }
        self.flags.extend(["--set".to_string(), value.to_string()]);
        self
    }

    pub fn values(self, values: impl IntoIterator<Item = ValueAssignment>) -> Self {
        values.into_iter().fold(self, Self::value)
    }

    /// `--set-string key=value`
    pub fn value_string(mut self, value: ValueAssignment) -> Self {
        self.flags
            .extend(["--set-string".to_string(), value.to_string()]);
        self
    }

    /// `--values <file>`. An empty path is ignored.
    pub fn values_file(mut self, file: impl Into<String>) -> Self {
        let file = file.into();
        if !file.is_empty() {
            self.flags.extend(["--values".to_string(), file]);
        }
        self
    }

    /// Run `helm lint <chart>` before deploying.
    pub fn lint(mut self, enabled: bool) -> Self {
        self.lint = enabled;
        self
    }

    /// Register a chart repository before deploying. Any registered repository
    /// is followed by `repo update` and `repo list`.
    pub fn repo(mut self, repo: RepoSpec) -> Self {
        self.repos.push(repo);
        self
    }

    pub fn update_dependencies(mut self, enabled: bool) -> Self {
        self.update_dependencies = enabled;
        self
    }

    pub fn build_dependencies(mut self, enabled: bool) -> Self {
        self.build_dependencies = enabled;
        self
    }

    /// Run `helm test --logs <release>` after deploying.
    pub fn test(mut self, enabled: bool) -> Self {
        self.verify = enabled;
        self
    }

    /// Roll back with `helm rollback <release>` when tests fail.
    pub fn rollback_on_test_failure(mut self, enabled: bool) -> Self {
        self.rollback_on_failure = enabled;
        self
    }

    pub fn pre_command(mut self, command: HookCommand) -> Self {
        self.pre_commands.push(command);
        self
    }

    pub fn post_command(mut self, command: HookCommand) -> Self {
        self.post_commands.push(command);
        self
    }

    pub fn executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    fn flag_if(mut self, enabled: bool, flag: &str) -> Self {
        if enabled {
            self.flags.push(flag.to_string());
        }
        self
    }

    /// Validate and assemble the descriptor without requiring an executor.
    pub fn build_descriptor(self) -> Result<ReleaseDescriptor, BuildError> {
        self.assemble().map(|(descriptor, _)| descriptor)
    }

    /// Validate and produce a runnable job.
    pub fn build(self) -> Result<ReleaseJob, BuildError> {
        let (descriptor, executor) = self.assemble()?;
        let executor = executor.context(MissingExecutorSnafu)?;
        Ok(ReleaseJob::new(descriptor, executor))
    }

    fn assemble(self) -> Result<(ReleaseDescriptor, Option<Arc<dyn Executor>>), BuildError> {
        let release = self
            .release
            .filter(|r| !r.is_empty())
            .context(MissingReleaseSnafu)?;
        let release = ReleaseName::new(&release).context(InvalidReleaseSnafu)?;
        let chart = self
            .chart
            .filter(|c| !c.is_empty())
            .context(MissingChartSnafu)?;
        ensure!(!self.tool.trim().is_empty(), EmptyToolSnafu);

        let tool = self.tool;
        let helm = |args: &[&str]| {
            HookCommand::with_program(tool.as_str(), args.iter().map(|a| a.to_string()).collect())
        };

        let mut pre_ops = Vec::new();
        if !self.repos.is_empty() {
            pre_ops.extend(self.repos.iter().map(|repo| repo.add_command(&tool)));
            pre_ops.push(helm(&["repo", "update"]));
            pre_ops.push(helm(&["repo", "list"]));
        }
        if self.update_dependencies {
            pre_ops.push(helm(&["dependency", "update", chart.as_str()]));
        }
        if self.build_dependencies {
            pre_ops.push(helm(&["dependency", "build", chart.as_str()]));
        }
        if self.lint {
            pre_ops.push(helm(&["lint", chart.as_str()]));
        }
        pre_ops.extend(self.pre_commands);

        let mut deploy_args: Vec<String> =
            self.mode.prefix().iter().map(|s| s.to_string()).collect();
        deploy_args.extend(self.flags);
        deploy_args.push(release.to_string());
        deploy_args.push(chart.clone());

        let descriptor = ReleaseDescriptor {
            tool,
            release,
            chart,
            artifact: self.artifact,
            deploy_args,
            removal_args: self.removal_args,
            pre_ops,
            post_ops: self.post_commands,
            verify: self.verify,
            rollback_on_failure: self.rollback_on_failure,
        };

        Ok((descriptor, self.executor))
    }
}
