//! Binary entrypoint for the `docsmith` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // API keys may live in a .env file next to the project.
    let _ = dotenvy::dotenv();
    match docsmith::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
