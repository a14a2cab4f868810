#![forbid(unsafe_code)]
#![cfg_attr(test, allow(unused_crate_dependencies))]

mod cli_input;
mod config;
mod errors;
mod report;
mod synth;

use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{cli_input::Args, errors::CliError};

fn main() {
    let args = Args::parse();

    let exit_code = match try_main(&args) {
        Ok(()) => 0,
        Err(error) => {
            report::error(&error);
            1
        }
    };

    process::exit(exit_code);
}

fn try_main(args: &Args) -> Result<(), CliError> {
    let filter = {
        let builder = EnvFilter::builder();
        match &args.log_filter {
            Some(filter) => builder.parse_lossy(filter),
            None => builder.from_env_lossy(),
        }
    };

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    synth::synth(args)
}
