// ABOUTME: Init command implementation.
// ABOUTME: Writes a helmflow.yml template into the working directory.

use helmflow::config::{CONFIG_FILENAME, init_config};
use helmflow::error::Result;
use helmflow::output::Output;
use std::path::Path;

pub fn init(
    cwd: &Path,
    release: Option<&str>,
    chart: Option<&str>,
    force: bool,
    output: &Output,
) -> Result<()> {
    init_config(cwd, release, chart, force)?;
    output.success(&format!("Created {CONFIG_FILENAME}"));
    Ok(())
}
