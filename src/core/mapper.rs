//! Field mapping from source records to target records
//!
//! A pure, data-driven transform: one target entry per mapping-table key,
//! pulled from the named source field, plus the three fixed configuration
//! fields. No I/O and no error conditions; a source field the mapping
//! references but the record lacks yields an empty value.

use crate::config::{BibsyncConfig, FieldMapping};
use crate::domain::record::{SourceRecord, TargetRecord};

/// The three configuration values merged into every target record
#[derive(Debug, Clone, Copy)]
pub struct FixedFields<'a> {
    /// Field the target system matches incoming records on
    pub matchfield: &'a str,

    /// Branch code applied to every record
    pub branchcode: &'a str,

    /// Category code applied to every record
    pub categorycode: &'a str,
}

impl<'a> FixedFields<'a> {
    /// Borrow the fixed fields from the loaded configuration
    pub fn from_config(config: &'a BibsyncConfig) -> Self {
        Self {
            matchfield: &config.matchfield,
            branchcode: &config.branchcode,
            categorycode: &config.categorycode,
        }
    }
}

/// Map one source record onto the target schema.
///
/// The result contains exactly the mapping-table keys plus `matchfield`,
/// `branchcode`, and `categorycode`.
pub fn map_record(
    source: &SourceRecord,
    mapping: &FieldMapping,
    fixed: &FixedFields<'_>,
) -> TargetRecord {
    let mut target = TargetRecord::new();

    for (target_field, source_field) in mapping.iter() {
        target.insert(target_field, source.get(source_field).unwrap_or_default());
    }

    target.insert("matchfield", fixed.matchfield);
    target.insert("branchcode", fixed.branchcode);
    target.insert("categorycode", fixed.categorycode);

    target
}
