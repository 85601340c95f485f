//! CLI command implementations
//!
//! Boot sequence for `serve`:
//! 1. Load and validate configuration, apply flag overrides
//! 2. Load the snapshot; corruption stops boot here
//! 3. Build the runtime and serve until Ctrl-C

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;

use super::args::{Cli, Command, Overrides};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, Logger, Severity};
use crate::persistence::PersistenceError;
use crate::store::{FurnitureStore, PersistenceFailurePolicy};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            overrides,
            host,
            port,
            on_write_failure,
        } => {
            let mut config = resolve_config(&overrides)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(policy) = on_write_failure {
                config.persistence_failure_policy = policy.into();
            }
            config.validate()?;
            serve(config)
        }
        Command::Check { overrides } => {
            let config = resolve_config(&overrides)?;
            let report = check(&config)?;
            write_response(json!({
                "path": report.path.display().to_string(),
                "records": report.records,
                "next_id": report.next_id,
            }))
        }
    }
}

fn resolve_config(overrides: &Overrides) -> CliResult<Config> {
    let mut config = Config::load_or_default(overrides.config.as_deref())?;
    if let Some(data_file) = &overrides.data_file {
        config.data_file = data_file.clone();
    }
    Ok(config)
}

/// Load the snapshot and serve until shutdown
pub fn serve(config: Config) -> CliResult<()> {
    Logger::set_min_severity(config.severity()?);
    log_event(Event::BootStart);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("addr", &config.server.socket_addr()),
            ("data_file", &config.data_file.display().to_string()),
            ("policy", config.persistence_failure_policy.as_str()),
        ],
    );

    let store = open_store(&config.data_file, config.persistence_failure_policy)?;
    let server = HttpServer::new(config.server, Arc::new(store));

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))?;
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::serve_failed(e.to_string()))
}

/// Result of `check`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub path: PathBuf,
    pub records: usize,
    pub next_id: i64,
}

/// Load the snapshot the same way `serve` would and report what it holds
pub fn check(config: &Config) -> CliResult<CheckReport> {
    // Only the report goes to stdout.
    Logger::set_min_severity(Severity::Warn.max(config.severity()?));

    // Nothing is written during a check, so the policy never applies.
    let store = open_store(&config.data_file, PersistenceFailurePolicy::Rollback)?;
    Ok(CheckReport {
        path: store.path().to_path_buf(),
        records: store.len(),
        next_id: store.next_id(),
    })
}

fn open_store(
    data_file: &Path,
    policy: PersistenceFailurePolicy,
) -> CliResult<FurnitureStore> {
    FurnitureStore::open(data_file, policy).map_err(|e: PersistenceError| {
        let event = if e.is_corruption() {
            Event::StartupCorruption
        } else {
            Event::BootFailed
        };
        log_event_with_fields(event, &[("code", e.code()), ("reason", &e.to_string())]);
        CliError::from(e)
    })
}
