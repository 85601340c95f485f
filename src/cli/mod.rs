//! CLI module for furnistore
//!
//! Provides command-line interface for:
//! - serve: load the snapshot and serve the furniture API
//! - check: validate the snapshot and report its contents

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, Overrides, PersistenceFailurePolicyArg};
pub use commands::{check, run, run_command, serve, CheckReport};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
