// ABOUTME: Release descriptor, its builder, and the runnable job.
// ABOUTME: Turns deploy options into the immutable facts the pipeline consumes.

mod builder;
mod descriptor;
mod job;
mod mode;
mod plan;
mod repo;

pub use builder::{BuildError, ReleaseBuilder};
pub use descriptor::ReleaseDescriptor;
pub use job::ReleaseJob;
pub use mode::DeployMode;
pub use plan::PlanStep;
pub use repo::{RepoSpec, RepoSpecError};
