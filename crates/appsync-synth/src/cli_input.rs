use std::path::PathBuf;

use clap::Parser;

/// Synthesize the deployment plan for an AppSync GraphQL API stack.
#[derive(Debug, Parser)]
#[command(name = "appsync-synth", version)]
pub(crate) struct Args {
    /// The path of the stack configuration file
    #[arg(short('c'), long("config"), default_value = "stack.toml")]
    pub(crate) config_path: PathBuf,
    /// The directory the plan and its staged assets are written to
    #[arg(short('o'), long("out"), default_value = ".build")]
    pub(crate) out_dir: PathBuf,
    /// Set the tracing filter, e.g. `appsync_synth=debug`
    #[arg(long("log-filter"))]
    pub(crate) log_filter: Option<String>,
}
