#![forbid(unsafe_code)]

//! Collaborator ports.
//!
//! The engine never touches a host document. Hosts plug in behind these
//! traits: an item source read once at load, a persistence sink that
//! receives the full record set after every commit (fire-and-forget; the
//! engine does not retry or confirm), and a presentation sink fed a
//! renderable snapshot after every drag transition.

use stow_core::item::PlaceableItem;
use stow_core::record::PlacementRecord;

use crate::drag::DragSnapshot;

/// Read-only access to the host's placeable item collection.
pub trait ItemSource {
    /// The current items, with footprints and carried flags.
    fn placeable_items(&self) -> Vec<PlaceableItem>;
}

impl ItemSource for [PlaceableItem] {
    fn placeable_items(&self) -> Vec<PlaceableItem> {
        self.to_vec()
    }
}

impl ItemSource for Vec<PlaceableItem> {
    fn placeable_items(&self) -> Vec<PlaceableItem> {
        self.clone()
    }
}

/// Durable storage for the placement record set.
///
/// Called with the full updated set after each successful commit. Failures
/// are the collaborator's concern; the engine has already returned to idle.
pub trait PersistenceSink {
    fn persist(&mut self, records: &[PlacementRecord]);
}

/// Visual feedback for an in-flight drag.
///
/// `present` is called after every transition that changes the drag ghost;
/// `clear` when the drag ends (commit, revert, or cancel) and the ghost
/// should disappear.
pub trait PresentationSink {
    fn present(&mut self, snapshot: &DragSnapshot);
    fn clear(&mut self);
}

/// A presentation sink that renders nothing. Useful for headless hosts and
/// tests that only care about record state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresentation;

impl PresentationSink for NullPresentation {
    fn present(&mut self, _snapshot: &DragSnapshot) {}
    fn clear(&mut self) {}
}
