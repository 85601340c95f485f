//! CLI argument definitions using clap
//!
//! Commands:
//! - furnistore serve [--config <path>] [--host <host>] [--port <port>] [--data-file <path>]
//! - furnistore check [--config <path>] [--data-file <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::store::PersistenceFailurePolicy;

/// furnistore - furniture records over HTTP, persisted to a JSON file
#[derive(Parser, Debug)]
#[command(name = "furnistore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the snapshot and serve the furniture API
    Serve {
        #[command(flatten)]
        overrides: Overrides,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(long)]
        port: Option<u16>,

        /// What to do when a snapshot write fails
        #[arg(long, value_enum)]
        on_write_failure: Option<PersistenceFailurePolicyArg>,
    },

    /// Validate the snapshot and report its size, then exit
    Check {
        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Options shared by every command
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Snapshot file, overrides `data_file` from the config
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

/// clap-facing wrapper around [`PersistenceFailurePolicy`]
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceFailurePolicyArg {
    Halt,
    Rollback,
}

impl From<PersistenceFailurePolicyArg> for PersistenceFailurePolicy {
    fn from(arg: PersistenceFailurePolicyArg) -> Self {
        match arg {
            PersistenceFailurePolicyArg::Halt => PersistenceFailurePolicy::Halt,
            PersistenceFailurePolicyArg::Rollback => PersistenceFailurePolicy::Rollback,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
