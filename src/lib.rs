//! Core library entry for the `docsmith` CLI.
//!
//! The pipeline: scan a project ([`scan`]), extract descriptor metadata
//! ([`metadata`]), fetch the hosted record ([`remote`]), synthesize badges
//! ([`badges`]), build the prompt ([`prompt`]), generate the narrative
//! ([`generation`]) and assemble and write the README ([`document`]).

pub mod adapters;
pub mod badges;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod document;
pub mod generation;
pub mod metadata;
pub mod ports;
pub mod prompt;
pub mod remote;
pub mod scan;
pub mod telemetry;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    telemetry::init(cli.verbose);
    commands::dispatch(&cli.command)
}
