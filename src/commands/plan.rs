// ABOUTME: Plan command implementation.
// ABOUTME: Prints every command a deploy would issue, in pipeline order, without running any.

use super::{load_config, overrides};
use crate::cli::ReleaseArgs;
use helmflow::error::Result;
use helmflow::output::Output;
use std::path::Path;

pub fn plan(cwd: &Path, config: Option<&Path>, args: ReleaseArgs, output: &Output) -> Result<()> {
    let config = load_config(cwd, config)?;
    let descriptor = config.to_builder(&overrides(args))?.build_descriptor()?;

    if !descriptor.artifact().is_empty() {
        output.progress(&format!(
            "Desired image: {}",
            descriptor.artifact().reference()
        ));
    }
    output.plan(&descriptor.plan());
    Ok(())
}
