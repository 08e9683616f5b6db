//! # smartpos
//!
//! Binary entry point. All logic lives in the library crate.

use std::process::ExitCode;

fn main() -> ExitCode {
    smartpos_cli::run()
}
