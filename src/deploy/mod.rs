// ABOUTME: Release orchestration using the type state pattern.
// ABOUTME: Exports the pipeline, its state markers, the replace decision and the error taxonomy.

mod error;
mod pipeline;
mod resolver;
mod run;
mod stage;
mod state;
mod transitions;

pub use error::{ReleaseError, ReleaseErrorKind};
pub use pipeline::Pipeline;
pub use resolver::{ArtifactResolver, IMAGE_MARKER, ResolveError, scan_manifest};
pub use run::{RunSummary, execute};
pub use stage::Stage;
pub use state::{Cleared, Completed, Decided, Deployed, Pending, Prepared, Verified};
pub use transitions::TransitionResult;
