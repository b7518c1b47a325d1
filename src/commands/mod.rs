// ABOUTME: Command module aggregator for the helmflow CLI.
// ABOUTME: Re-exports init, plan and deploy command handlers.

mod deploy;
mod init;
mod plan;

pub use deploy::deploy;
pub use init::init;
pub use plan::plan;

use crate::cli::ReleaseArgs;
use helmflow::config::{Config, Overrides};
use helmflow::error::Result;
use std::path::Path;

/// Load the explicit config file, or discover one in `cwd`.
fn load_config(cwd: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load(path),
        None => Config::discover(cwd),
    }
}

fn overrides(args: ReleaseArgs) -> Overrides {
    Overrides {
        release: args.release,
        chart: args.chart,
        namespace: args.namespace,
        values: args.values,
        dry_run: args.dry_run,
    }
}
