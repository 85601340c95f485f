//! furnistore entry point
//!
//! Parses arguments and runs the selected command via `cli::run`. On
//! failure the error is reported and the process exits non-zero.

use furnistore::cli;

fn main() {
    if let Err(e) = cli::run() {
        let _ = cli::write_error(e.code_str(), e.message());
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
