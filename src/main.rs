//! Blueprint CLI - Documentation-as-code for product strategy models

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = blueprint_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
