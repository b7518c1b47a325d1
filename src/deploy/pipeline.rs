// ABOUTME: Generic pipeline struct parameterized by state marker.
// ABOUTME: Borrows the descriptor, executor and cancel token for the length of one run.

use std::time::Instant;

use crate::exec::{CancelToken, Executor};
use crate::release::ReleaseDescriptor;

use super::state::{Decided, Pending};

/// One orchestration run, parameterized by its current state.
///
/// Transitions consume the pipeline and return it in the next state, so a
/// stage can only be entered after the one before it has succeeded.
pub struct Pipeline<'a, S> {
    pub(crate) release: &'a ReleaseDescriptor,
    pub(crate) executor: &'a dyn Executor,
    pub(crate) cancel: &'a CancelToken,
    pub(crate) started: Instant,
    pub(crate) state: S,
}

impl<S: std::fmt::Debug> std::fmt::Debug for Pipeline<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("release", &self.release.release())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a> Pipeline<'a, Pending> {
    pub fn new(
        release: &'a ReleaseDescriptor,
        executor: &'a dyn Executor,
        cancel: &'a CancelToken,
    ) -> Self {
        Pipeline {
            release,
            executor,
            cancel,
            started: Instant::now(),
            state: Pending,
        }
    }
}

impl<S> Pipeline<'_, S> {
    pub fn release(&self) -> &ReleaseDescriptor {
        self.release
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Pipeline<'_, Decided> {
    /// Whether the existing release will be uninstalled before deploying.
    pub fn will_replace(&self) -> bool {
        self.state.replace
    }
}
