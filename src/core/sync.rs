//! The sync job - main orchestrator for one run
//!
//! Constructs the feed and API clients from configuration, resolves the
//! snapshot, authenticates once, then maps and upserts each record in
//! document order, strictly sequentially.

use crate::adapters::api::{ApiClient, UpsertOutcome};
use crate::adapters::registry::{RegistryClient, Snapshot};
use crate::config::{BibsyncConfig, FieldMapping};
use crate::core::mapper::{map_record, FixedFields};
use crate::core::resolver::{resolve, SnapshotSelector};
use crate::core::summary::{Reporter, SyncSummary};
use crate::domain::result::Result;
use std::io::Write;
use std::time::Instant;

/// Per-run options derived from the CLI
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Which snapshot to sync
    pub selector: SnapshotSelector,

    /// Only process the first N records
    pub limit: Option<usize>,

    /// Print a message for every record plus the final summary line
    pub verbose: bool,
}

/// One sync run: configuration, mapping, and options, executed to a summary
pub struct SyncJob {
    config: BibsyncConfig,
    mapping: FieldMapping,
    options: SyncOptions,
}

impl SyncJob {
    /// Create a new sync job
    pub fn new(config: BibsyncConfig, mapping: FieldMapping, options: SyncOptions) -> Self {
        Self {
            config,
            mapping,
            options,
        }
    }

    /// Execute the run.
    ///
    /// The snapshot is resolved (and downloaded if needed) before the API
    /// session is authenticated, so a missing snapshot aborts without any
    /// API traffic. Either fatal failure aborts before any record is
    /// processed. A failed upsert is reported through the writer and the
    /// loop continues with the next record.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<SyncSummary> {
        let start = Instant::now();

        let registry = RegistryClient::new(&self.config)?;
        let path = resolve(&self.options.selector, &self.config, &registry).await?;

        let snapshot = Snapshot::load(&path)?;
        tracing::info!(
            snapshot = %path.display(),
            records = snapshot.total(),
            "Snapshot loaded"
        );

        let api = ApiClient::new(&self.config)?;
        api.authenticate().await?;

        let fixed = FixedFields::from_config(&self.config);
        let mut summary = SyncSummary::new(snapshot.total());
        let mut reporter = Reporter::new(out, self.options.verbose);

        let limit = self.options.limit.unwrap_or(usize::MAX);
        for source in snapshot.records().take(limit) {
            let record = map_record(source, &self.mapping, &fixed);

            let outcome = match api.upsert(&record).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    // A request that never produced a response fails this
                    // record; the loop keeps going.
                    tracing::warn!(error = %e, "Upsert request failed");
                    UpsertOutcome::request_failed(e.to_string())
                }
            };

            summary.record(&outcome);
            reporter.report_record(&outcome)?;
        }

        summary.duration = start.elapsed();
        reporter.report_run(&summary)?;

        Ok(summary)
    }
}
