// ABOUTME: Finds the image currently deployed under a release and compares it to the desired one.
// ABOUTME: Drives the replace-vs-upgrade decision; any lookup failure means "do not replace".

use crate::exec::{CancelToken, ExecError, Executor};
use crate::types::Artifact;

/// A manifest line declares an image when it contains this substring.
pub const IMAGE_MARKER: &str = " image: ";

/// Why the current artifact could not be determined.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The manifest was retrieved but declares no quoted image.
    #[error("no image declaration found in manifest")]
    NotFound,

    /// Retrieving the manifest failed, typically because the release does not exist.
    #[error("manifest query failed: {0}")]
    Query(#[from] ExecError),
}

/// Extract the artifact reference from the first image declaration in a
/// rendered manifest.
///
/// Only the first line containing [`IMAGE_MARKER`] is considered. Its
/// reference is the text between the first pair of `"` characters; an
/// unquoted first declaration yields `None`.
pub fn scan_manifest(manifest: &str) -> Option<&str> {
    let line = manifest.lines().find(|line| line.contains(IMAGE_MARKER))?;
    line.split('"').nth(1)
}

/// Looks up the deployed artifact of a release through the Executor.
pub struct ArtifactResolver<'a> {
    executor: &'a dyn Executor,
    cancel: &'a CancelToken,
    tool: &'a str,
}

impl<'a> ArtifactResolver<'a> {
    pub fn new(executor: &'a dyn Executor, cancel: &'a CancelToken, tool: &'a str) -> Self {
        Self {
            executor,
            cancel,
            tool,
        }
    }

    /// Run `<tool> <manifest_args...>` and return the first declared image
    /// reference. `manifest_args` comes from
    /// [`ReleaseDescriptor::manifest_args`](crate::release::ReleaseDescriptor::manifest_args),
    /// i.e. `get manifest <release> <removal_args...>`.
    pub async fn resolve_current_artifact(
        &self,
        manifest_args: &[String],
    ) -> Result<String, ResolveError> {
        if self.cancel.is_cancelled() {
            return Err(ExecError::cancelled(self.tool).into());
        }

        let manifest = self
            .executor
            .capture(self.cancel, self.tool, manifest_args)
            .await?;
        scan_manifest(&manifest)
            .map(str::to_string)
            .ok_or(ResolveError::NotFound)
    }

    /// True only when the deployed image is exactly the desired one.
    ///
    /// Helm treats an upgrade with an unchanged image as a no-op for the
    /// workload, so an identical image forces an uninstall before deploy.
    /// Inability to read the current image never forces a replace.
    pub async fn should_replace(&self, manifest_args: &[String], desired: &Artifact) -> bool {
        if desired.is_empty() {
            tracing::debug!("no artifact pinned, skipping manifest lookup");
            return false;
        }

        let current = match self.resolve_current_artifact(manifest_args).await {
            Ok(current) => current,
            Err(ResolveError::NotFound) => {
                tracing::info!("deployed manifest declares no image, upgrading in place");
                return false;
            }
            Err(ResolveError::Query(e)) => {
                tracing::info!(
                    error = %e,
                    stderr = e.stderr().unwrap_or_default(),
                    "could not read deployed manifest, upgrading in place"
                );
                return false;
            }
        };

        let desired = desired.reference();
        let replace = current == desired;
        tracing::info!(%current, %desired, replace, "compared deployed image");
        replace
    }
}
