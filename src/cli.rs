// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use helmflow::types::ValueAssignment;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "helmflow")]
#[command(about = "Helm release orchestration with hooks, replace detection and test rollback")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: discover helmflow.yml in the working directory)
    #[arg(short, long, global = true, env = "HELMFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new helmflow.yml configuration file
    Init {
        /// Release name to write into the template
        #[arg(long)]
        release: Option<String>,

        /// Chart path or reference to write into the template
        #[arg(long)]
        chart: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the commands a deploy would issue without running them
    Plan(ReleaseArgs),

    /// Run the release pipeline
    Deploy(ReleaseArgs),
}

/// Overrides shared by `plan` and `deploy`.
#[derive(Args, Debug, Default)]
pub struct ReleaseArgs {
    /// Release name (overrides config)
    #[arg(short, long)]
    pub release: Option<String>,

    /// Chart path or reference (overrides config)
    #[arg(long)]
    pub chart: Option<String>,

    /// Kubernetes namespace (overrides config)
    #[arg(short, long, env = "HELMFLOW_NAMESPACE")]
    pub namespace: Option<String>,

    /// Extra chart value, appended after config values (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub values: Vec<ValueAssignment>,

    /// Pass --dry-run to the deploy command
    #[arg(long)]
    pub dry_run: bool,
}
