//! `xl2imp` command-line tool
//!
//! Converts a point workbook into a point import file.

use pointimp_service::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Errors are already reported by the application
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
