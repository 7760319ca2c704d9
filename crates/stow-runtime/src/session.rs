#![forbid(unsafe_code)]

//! The owning aggregate: one grid, one record set, one controller.
//!
//! [`InventorySession`] is the only long-lived owner of the placement
//! record collection. It runs the synchronizer once at load, then routes
//! every interactive change through the drag controller; the engine and
//! controller only ever borrow the records per call.

use stow_core::command::DragCommand;
use stow_core::footprint::Orientation;
use stow_core::geometry::CellPos;
use stow_core::grid::{GridBounds, GridConfig};
use stow_core::item::PlaceableItem;
use stow_core::record::{ItemId, PlacementRecord};
use stow_engine::occupancy::find_free_position;
use stow_engine::placement::{MoveRequest, commit};
use stow_engine::snapshot::GridSnapshot;
use stow_engine::sync::{SyncReport, synchronize};

use crate::drag::{DragConfig, DragController, DragTransition};
use crate::ports::{ItemSource, PersistenceSink, PresentationSink};

/// A loaded inventory grid and its interactive state.
#[derive(Debug)]
pub struct InventorySession {
    config: GridConfig,
    bounds: GridBounds,
    records: Vec<PlacementRecord>,
    controller: DragController,
}

impl InventorySession {
    /// Load a session: derive the grid bounds, reconcile the persisted
    /// records against the live item collection, and start idle.
    ///
    /// The returned [`SyncReport`] lists every anomaly; the caller is
    /// expected to clear carried flags for `dropped` items and surface a
    /// one-time warning naming them.
    pub fn load(
        config: GridConfig,
        items: &(impl ItemSource + ?Sized),
        persisted: &[PlacementRecord],
    ) -> (Self, SyncReport) {
        Self::load_with(config, DragConfig::default(), items, persisted)
    }

    /// [`load`](Self::load) with explicit drag configuration.
    pub fn load_with(
        config: GridConfig,
        drag: DragConfig,
        items: &(impl ItemSource + ?Sized),
        persisted: &[PlacementRecord],
    ) -> (Self, SyncReport) {
        let bounds = config.bounds();
        let report = synchronize(persisted, &items.placeable_items(), bounds);
        if !report.is_clean() {
            tracing::warn!(
                orphaned = report.orphaned.len(),
                dropped = report.dropped.len(),
                "inventory loaded with stale placements"
            );
        }
        let session = Self {
            config,
            bounds,
            records: report.records.clone(),
            controller: DragController::new(bounds, drag),
        };
        (session, report)
    }

    /// The derived grid bounds.
    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// The current record set.
    #[must_use]
    pub fn records(&self) -> &[PlacementRecord] {
        &self.records
    }

    /// Whether a drag is in flight.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Route a drag command through the controller against the owned
    /// record set.
    pub fn handle(
        &mut self,
        command: DragCommand,
        persistence: &mut dyn PersistenceSink,
        presentation: &mut dyn PresentationSink,
    ) -> DragTransition {
        self.controller
            .handle(command, &mut self.records, persistence, presentation)
    }

    /// Place a newly added item at the first free slot, row-major.
    ///
    /// Returns the chosen cell, or `None` when the grid has no room.
    /// Persists on success.
    pub fn place_new_item(
        &mut self,
        item: &PlaceableItem,
        persistence: &mut dyn PersistenceSink,
    ) -> Option<CellPos> {
        let orientation = Orientation::default();
        let cell = find_free_position(item.footprint, orientation, self.bounds, &self.records)?;
        let request = MoveRequest::new(item.id.clone(), item.footprint, orientation, cell);
        match commit(&request, self.bounds, &self.records) {
            Ok(updated) => {
                self.records = updated;
                persistence.persist(&self.records);
                Some(cell)
            }
            Err(error) => {
                // A free slot that fails to commit means the scan and the
                // engine disagree; keep the records untouched.
                tracing::error!(error = %error, "free-slot placement rejected");
                debug_assert!(false, "free-slot placement rejected: {error}");
                None
            }
        }
    }

    /// Remove an item's record (picked up, deleted, or moved to another
    /// container). Persists when a record was actually removed.
    pub fn remove_item(&mut self, item_id: &ItemId, persistence: &mut dyn PersistenceSink) -> bool {
        let before = self.records.len();
        self.records.retain(|record| &record.item_id != item_id);
        if self.records.len() != before {
            persistence.persist(&self.records);
            true
        } else {
            false
        }
    }

    /// The durable snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.config, self.records.clone())
    }
}
