// ABOUTME: Command execution capability consumed by the orchestration pipeline.
// ABOUTME: Exports the Executor trait, its error, cancellation and the process-backed impl.

mod cancel;
mod executor;
mod process;

pub use cancel::CancelToken;
pub use executor::{ExecError, Executor, REDACTED, format_command, invoke};
pub use process::ProcessExecutor;
