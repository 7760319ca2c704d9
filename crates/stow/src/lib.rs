#![forbid(unsafe_code)]

//! Stowage public facade.
//!
//! Re-exports the member crates and a [`prelude`] with the types most
//! hosts need: load a session, feed it drag commands, persist the result.

pub use stow_core as core;
pub use stow_engine as engine;
pub use stow_runtime as runtime;

/// The commonly used surface in one import.
pub mod prelude {
    pub use stow_core::{
        CellPos, CellRect, DragCommand, Footprint, GridBounds, GridConfig, ItemId, Orientation,
        PlaceableItem, PlacementRecord,
    };
    pub use stow_engine::{
        GridSnapshot, MoveRequest, PlacementEvaluation, SyncReport, can_place, commit, rotate,
        synchronize,
    };
    pub use stow_runtime::{
        DragConfig, DragEffect, DragSnapshot, DragTransition, InventorySession, ItemSource,
        PersistenceSink, PresentationSink,
    };
}
