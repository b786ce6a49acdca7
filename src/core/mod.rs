//! Core business logic for bibsync.
//!
//! This module contains the business logic and orchestration for a sync run.
//!
//! # Modules
//!
//! - [`resolver`] - Snapshot file resolution (file / date / full / today)
//! - [`mapper`] - Field mapping from source records to target records
//! - [`summary`] - Run statistics and per-record reporting
//! - [`sync`] - The sync job orchestrating one run
//!
//! # Sync Workflow
//!
//! The typical run:
//!
//! 1. **Resolve**: determine the snapshot file, downloading it if missing
//! 2. **Read**: parse the snapshot into source records
//! 3. **Authenticate**: establish the target-API session, once
//! 4. **Loop**: map each record and upsert it, reporting each outcome
//! 5. **Report**: print the verbose summary line and log run statistics
//!
//! A failed upsert never halts the loop; only configuration, resolution,
//! and authentication failures are fatal to the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use bibsync::config::{load_config, load_mapping};
//! use bibsync::core::resolver::SnapshotSelector;
//! use bibsync::core::sync::{SyncJob, SyncOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("bibsync.toml")?;
//! let mapping = load_mapping("mapping.toml")?;
//!
//! let options = SyncOptions {
//!     selector: SnapshotSelector::Date("2015-02-06".to_string()),
//!     limit: None,
//!     verbose: true,
//! };
//!
//! let job = SyncJob::new(config, mapping, options);
//! let summary = job.run(&mut std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

pub mod mapper;
pub mod resolver;
pub mod summary;
pub mod sync;
