//! `unvcf`: split a VCF file into per-field tab-delimited tables.

use std::process::ExitCode;

use clap::Parser;
use unvcf_cli::logging::init_logging;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_fields, run_split};
use crate::summary::print_summary;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(err) = init_logging(&cli.log_config()) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    let result = match &cli.command {
        Command::Split(args) => run_split(args).map(|summary| print_summary(&summary)),
        Command::Fields(args) => run_fields(args),
    };
    report(result)
}

/// Anomalies never fail a run; only errors do.
fn report(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
