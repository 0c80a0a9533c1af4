//! Timecard - plain-text punch clock CLI

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = timecard_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
