// ABOUTME: Validated domain types shared by the builder, config and pipeline.
// ABOUTME: Release names, artifacts, hook commands and value assignments.

mod artifact;
mod hook_command;
mod release_name;
mod value_assignment;

pub use artifact::Artifact;
pub use hook_command::{HookCommand, HookCommandError};
pub use release_name::{ReleaseName, ReleaseNameError};
pub use value_assignment::{ValueAssignment, ValueAssignmentError};
