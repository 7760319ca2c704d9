#![forbid(unsafe_code)]

//! Engine: placement validation, occupancy queries, and synchronization.
//!
//! # Role in stowage
//! `stow-engine` is the solver layer. Given grid bounds and a placement
//! record set it answers "can this item land here" ([`can_place`]), applies
//! validated moves ([`commit`]), and reconciles persisted state with the
//! live item collection at load time ([`synchronize`]).
//!
//! # How it fits in the system
//! The runtime (`stow-runtime`) drives these functions from its drag
//! controller; nothing in this crate holds state between calls. The record
//! collection always belongs to the caller and is borrowed per operation.

pub mod occupancy;
pub mod placement;
pub mod snapshot;
pub mod sync;

pub use occupancy::{Conflict, find_conflict, find_free_position, occupied_cells, record_at};
pub use placement::{InvalidMoveError, MoveRequest, PlacementEvaluation, can_place, commit, rotate};
pub use snapshot::{
    GRID_SNAPSHOT_SCHEMA_VERSION, GridSnapshot, SnapshotError, SnapshotMigration, migrate_snapshot,
};
pub use sync::{SyncReport, synchronize};
