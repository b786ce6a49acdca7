// Bibsync - Base Bibliotek to ILS Patron Sync Tool
// Copyright (c) 2025 Bibsync Contributors
// Licensed under the MIT License

//! # Bibsync - Base Bibliotek to ILS Patron Sync
//!
//! Bibsync is a batch tool that synchronizes library contact records from the
//! Base Bibliotek XML feed (published by the Norwegian National Library) into
//! a library-management system's patron/library API.
//!
//! ## Overview
//!
//! A run performs four steps:
//! - **Resolving** the snapshot file to use (explicit file, explicit date,
//!   full dump, or today's daily diff), downloading it from the feed if it is
//!   missing locally
//! - **Reading** the snapshot XML into per-library source records
//! - **Mapping** each source record onto the target schema using a
//!   user-supplied field mapping plus fixed configuration fields
//! - **Upserting** each mapped record via the target API, reporting
//!   per-record success or failure
//!
//! ## Architecture
//!
//! Bibsync follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (resolver, mapper, sync loop, summary)
//! - [`adapters`] - External integrations (Base Bibliotek feed, target API)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration and field-mapping management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bibsync::config::{load_config, load_mapping};
//! use bibsync::core::resolver::SnapshotSelector;
//! use bibsync::core::sync::{SyncJob, SyncOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("bibsync.toml")?;
//!     let mapping = load_mapping("mapping.toml")?;
//!
//!     let options = SyncOptions {
//!         selector: SnapshotSelector::Today,
//!         limit: None,
//!         verbose: false,
//!     };
//!
//!     let job = SyncJob::new(config, mapping, options);
//!     let summary = job.run(&mut std::io::stdout()).await?;
//!
//!     println!("{} of {} records processed", summary.processed, summary.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Bibsync uses the [`domain::BibsyncError`] type for all errors:
//!
//! ```rust,no_run
//! use bibsync::domain::BibsyncError;
//!
//! fn example() -> Result<(), BibsyncError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = bibsync::config::load_config("bibsync.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Bibsync uses structured logging with the `tracing` crate. Per-record sync
//! output (failure messages, the verbose summary line) is written to stdout
//! exactly as the operator expects it; diagnostics go to the tracing
//! subscriber and, when a log directory is configured, to rotated JSON files.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
