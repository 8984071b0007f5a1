//! GetHooks CLI
//!
//! Command-line interface for building and inspecting the filter lists.

mod args;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use args::Args;

/// Exit status for a broken list precondition
const EXIT_PRECONDITION: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(&args) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_precondition(&e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::from(EXIT_PRECONDITION)
        }
        Err(e) => {
            error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.config.as_deref();
    match args.command {
        Some(commands::Command::Show(show_args)) => commands::show::execute(show_args, config),
        Some(commands::Command::Check(check_args)) => {
            commands::check::execute(check_args, config)
        }
        Some(commands::Command::Config(config_args)) => commands::config::execute(config_args),
        Some(commands::Command::Completions(comp_args)) => {
            commands::completions::execute(comp_args)
        }
        None => commands::show::execute(commands::show::ShowArgs::default(), config),
    }
}

/// Whether a list store refused an operation outright
fn is_precondition(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<gethooks_core::Error>())
        .any(gethooks_core::Error::is_fatal)
}
