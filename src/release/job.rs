// ABOUTME: A validated release paired with the executor that will carry it out.
// ABOUTME: Entry point for running one orchestration pipeline.

use std::sync::Arc;

use crate::deploy::{self, ReleaseError, RunSummary};
use crate::exec::{CancelToken, Executor};

use super::ReleaseDescriptor;

/// A release ready to run. Produced by [`super::ReleaseBuilder::build`].
pub struct ReleaseJob {
    descriptor: ReleaseDescriptor,
    executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for ReleaseJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseJob")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl ReleaseJob {
    pub fn new(descriptor: ReleaseDescriptor, executor: Arc<dyn Executor>) -> Self {
        Self {
            descriptor,
            executor,
        }
    }

    pub fn descriptor(&self) -> &ReleaseDescriptor {
        &self.descriptor
    }

    /// Run the full pipeline once. `cancel` spans the whole run.
    pub async fn run(&self, cancel: &CancelToken) -> Result<RunSummary, ReleaseError> {
        deploy::execute(&self.descriptor, self.executor.as_ref(), cancel).await
    }
}
