#![forbid(unsafe_code)]

//! Persisted grid schema v1 with versioning and migration scaffolding.
//!
//! A [`GridSnapshot`] is the durable artifact handed to the persistence
//! collaborator: grid configuration plus the full placement record set.
//!
//! # Schema Versioning Policy
//!
//! - **Additive fields** ride in the `extensions` map without a version bump.
//! - **Breaking changes** (field removal, semantic changes) increment
//!   [`GRID_SNAPSHOT_SCHEMA_VERSION`] and add a migration path.
//! - Snapshots carry their schema version; loaders reject unknown versions
//!   with actionable diagnostics.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use stow_core::grid::GridConfig;
use stow_core::record::PlacementRecord;

use crate::occupancy::{Conflict, find_conflict};

/// Current grid snapshot schema version.
pub const GRID_SNAPSHOT_SCHEMA_VERSION: u16 = 1;

/// Persisted grid state: configuration plus the placement record set.
///
/// Forward-compatible: unknown fields land in `extensions` for
/// round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Schema version for migration detection.
    #[serde(default = "default_snapshot_version")]
    pub schema_version: u16,
    /// Capacity and column count the records were laid out against.
    pub config: GridConfig,
    /// The full placement record set.
    pub records: Vec<PlacementRecord>,
    /// Forward-compatible extension bag.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
}

fn default_snapshot_version() -> u16 {
    GRID_SNAPSHOT_SCHEMA_VERSION
}

impl GridSnapshot {
    /// Create a new v1 snapshot.
    #[must_use]
    pub fn new(config: GridConfig, records: Vec<PlacementRecord>) -> Self {
        Self {
            schema_version: GRID_SNAPSHOT_SCHEMA_VERSION,
            config,
            records,
            extensions: BTreeMap::new(),
        }
    }

    /// Validate the snapshot against schema and grid invariants.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.schema_version != GRID_SNAPSHOT_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.schema_version,
                expected: GRID_SNAPSHOT_SCHEMA_VERSION,
            });
        }
        if let Some(conflict) = find_conflict(&self.records, self.config.bounds()) {
            return Err(SnapshotError::Conflict(conflict));
        }
        Ok(())
    }
}

/// Errors from snapshot validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Schema version is not supported.
    UnsupportedVersion { found: u16, expected: u16 },
    /// The record set breaks a grid invariant.
    Conflict(Conflict),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported grid snapshot schema version {found} (expected {expected})"
                )
            }
            Self::Conflict(conflict) => write!(f, "snapshot is corrupt: {conflict}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Result of migrating a snapshot from an older schema version.
#[derive(Debug, Clone)]
pub struct SnapshotMigration {
    /// The migrated snapshot.
    pub snapshot: GridSnapshot,
    /// Source version before migration.
    pub from_version: u16,
    /// Target version after migration.
    pub to_version: u16,
    /// Warnings or notes from the migration.
    pub warnings: Vec<String>,
}

/// Migrate a snapshot to the current schema version.
///
/// For v1 (current) this is the identity migration. Future versions chain
/// through each intermediate version here.
pub fn migrate_snapshot(snapshot: GridSnapshot) -> Result<SnapshotMigration, SnapshotError> {
    match snapshot.schema_version {
        GRID_SNAPSHOT_SCHEMA_VERSION => Ok(SnapshotMigration {
            snapshot,
            from_version: GRID_SNAPSHOT_SCHEMA_VERSION,
            to_version: GRID_SNAPSHOT_SCHEMA_VERSION,
            warnings: Vec::new(),
        }),
        other => Err(SnapshotError::UnsupportedVersion {
            found: other,
            expected: GRID_SNAPSHOT_SCHEMA_VERSION,
        }),
    }
}
