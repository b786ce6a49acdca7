// Bibsync - Base Bibliotek to ILS Patron Sync Tool
// Copyright (c) 2025 Bibsync Contributors
// Licensed under the MIT License

use bibsync::cli::Cli;
use bibsync::config::{load_config, load_mapping};
use bibsync::core::sync::{SyncJob, SyncOptions};
use bibsync::domain::{ApiError, BibsyncError, RegistryError};
use bibsync::logging::init_logging;
use clap::error::ErrorKind;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments. Help and version exit 0; every option-validation
    // failure (missing flags, bad date, conflicting flags) exits 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    // Load the two declarative documents before touching the network
    let config = match load_config(&cli.configfile) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    let mapping = match load_mapping(&cli.mapfile) {
        Ok(mapping) => mapping,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    // --debug forces the filter down so request/response detail is visible
    let log_level = if cli.debug { "debug" } else { &config.loglevel };
    let _guard = match init_logging(log_level, config.logdir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Bibsync - Base Bibliotek to ILS patron sync"
    );

    let options = SyncOptions {
        selector: cli.selector(),
        limit: cli.limit,
        verbose: cli.verbose,
    };

    let job = SyncJob::new(config, mapping, options);
    let mut stdout = std::io::stdout();

    let exit_code = match job.run(&mut stdout).await {
        Ok(summary) => {
            summary.log_summary();
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "Sync failed");
            eprintln!("Error: {e}");
            exit_code_for(&e)
        }
    };

    process::exit(exit_code);
}

/// Map a fatal error to the process exit code
fn exit_code_for(error: &BibsyncError) -> i32 {
    match error {
        BibsyncError::Configuration(_) => 2,
        BibsyncError::Registry(
            RegistryError::ConnectionFailed(_)
            | RegistryError::SnapshotNotFound { .. }
            | RegistryError::DownloadFailed { .. }
            | RegistryError::SnapshotMissing { .. },
        ) => 4,
        BibsyncError::Api(
            ApiError::ConnectionFailed(_) | ApiError::AuthenticationFailed(_),
        ) => 4,
        _ => 5,
    }
}
