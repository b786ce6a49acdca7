//! Snapshot file resolution
//!
//! Determines which snapshot file a run uses and guarantees it exists
//! locally before the run proceeds. Download failure is fatal: a daily
//! diff the feed never published is an expected reason for a run to stop,
//! and it aborts the same way a network failure does.

use crate::adapters::registry::RegistryClient;
use crate::config::BibsyncConfig;
use crate::domain::errors::RegistryError;
use crate::domain::result::Result;
use std::path::{Path, PathBuf};

/// Local name of the full dump file
pub const FULL_DUMP_NAME: &str = "bb-full.xml";

/// Which snapshot a run should use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSelector {
    /// An explicit local file; used as-is, never downloaded
    File(PathBuf),

    /// The daily diff for an explicit ISO date (`YYYY-MM-DD`)
    Date(String),

    /// The full dump; always re-downloaded
    Full,

    /// The daily diff for the current date
    Today,
}

/// Resolve the selector to a local snapshot path, downloading as needed.
///
/// - Explicit file: returned as-is (existence is enforced at option-parsing
///   time).
/// - Full dump: always re-downloaded to `<datadir>/bb-full.xml`,
///   overwriting any local copy.
/// - Dated (explicit or today): `<datadir>/bb-<date>.xml`; fetched via a
///   conditional mirror only when no local copy exists.
pub async fn resolve(
    selector: &SnapshotSelector,
    config: &BibsyncConfig,
    registry: &RegistryClient,
) -> Result<PathBuf> {
    match selector {
        SnapshotSelector::File(path) => {
            tracing::info!(snapshot = %path.display(), "Using explicit snapshot file");
            Ok(path.clone())
        }
        SnapshotSelector::Full => {
            let dest = Path::new(&config.datadir).join(FULL_DUMP_NAME);
            registry.replace(FULL_DUMP_NAME, &dest).await?;
            ensure_present(dest)
        }
        SnapshotSelector::Date(date) => resolve_dated(date, config, registry).await,
        SnapshotSelector::Today => resolve_dated(&today(), config, registry).await,
    }
}

/// File name of the daily diff for a date
pub fn dated_file_name(date: &str) -> String {
    format!("bb-{date}.xml")
}

/// Today's date in the feed's ISO file-name format
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

async fn resolve_dated(
    date: &str,
    config: &BibsyncConfig,
    registry: &RegistryClient,
) -> Result<PathBuf> {
    let name = dated_file_name(date);
    let dest = Path::new(&config.datadir).join(&name);

    if dest.exists() {
        tracing::debug!(snapshot = %dest.display(), "Snapshot already present locally");
    } else {
        registry.mirror(&name, &dest).await?;
    }

    ensure_present(dest)
}

/// The file must exist after whatever fetch attempt was made; anything
/// else is a fatal download error.
fn ensure_present(dest: PathBuf) -> Result<PathBuf> {
    if dest.exists() {
        Ok(dest)
    } else {
        Err(RegistryError::SnapshotMissing { path: dest }.into())
    }
}
