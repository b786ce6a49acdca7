//! Run statistics and per-record reporting
//!
//! The reporter owns the stdout contract: with verbose off only failed
//! upserts print a message; with verbose on every record prints a message
//! and the run ends with a `N of M records processed` line. The summary
//! additionally logs structured run statistics via tracing.

use crate::adapters::api::UpsertOutcome;
use std::io::Write;
use std::time::Duration;

/// Statistics accumulated over one sync run
#[derive(Debug, Clone)]
pub struct SyncSummary {
    /// Total records available in the snapshot, independent of any limit
    pub total: usize,

    /// Records actually processed (mapped and upserted)
    pub processed: usize,

    /// Upserts the API answered with `status = ok`
    pub succeeded: usize,

    /// Upserts that failed (API non-ok status or request failure)
    pub failed: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Messages of the failed upserts, in processing order
    pub failures: Vec<String>,
}

impl SyncSummary {
    /// Create an empty summary for a snapshot with `total` records
    pub fn new(total: usize) -> Self {
        Self {
            total,
            processed: 0,
            succeeded: 0,
            failed: 0,
            duration: Duration::from_secs(0),
            failures: Vec::new(),
        }
    }

    /// Account for one upsert outcome
    pub fn record(&mut self, outcome: &UpsertOutcome) {
        self.processed += 1;
        if outcome.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
            self.failures.push(outcome.message.clone());
        }
    }

    /// Check if the run was fully successful (no failed upserts)
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total,
            processed = self.processed,
            succeeded = self.succeeded,
            failed = self.failed,
            duration_secs = self.duration.as_secs(),
            "Sync completed"
        );

        if !self.failures.is_empty() {
            tracing::warn!(failure_count = self.failures.len(), "Sync completed with failures");
            for message in &self.failures {
                tracing::warn!(message = %message, "Failed upsert");
            }
        }
    }
}

/// Per-record and end-of-run output, written to a generic writer so tests
/// can capture what the operator sees on stdout
pub struct Reporter<'a, W: Write> {
    out: &'a mut W,
    verbose: bool,
}

impl<'a, W: Write> Reporter<'a, W> {
    /// Create a reporter with the given verbosity
    pub fn new(out: &'a mut W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    /// Print one record's message if the upsert failed or verbose is on
    pub fn report_record(&mut self, outcome: &UpsertOutcome) -> std::io::Result<()> {
        if !outcome.success || self.verbose {
            writeln!(self.out, "{}", outcome.message)?;
        }
        Ok(())
    }

    /// Print the final summary line when verbose is on
    pub fn report_run(&mut self, summary: &SyncSummary) -> std::io::Result<()> {
        if self.verbose {
            writeln!(
                self.out,
                "{} of {} records processed",
                summary.processed, summary.total
            )?;
        }
        Ok(())
    }
}
