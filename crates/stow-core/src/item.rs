#![forbid(unsafe_code)]

//! The read-only item view consumed at load time.

use crate::footprint::Footprint;
use crate::record::ItemId;

/// One row of the host's item collection, as seen by the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceableItem {
    /// Stable identity of the item.
    pub id: ItemId,
    /// Intrinsic (pre-rotation) size.
    pub footprint: Footprint,
    /// Whether the owner flags this item as carried (on the grid).
    pub carried: bool,
}

impl PlaceableItem {
    /// Create an item row.
    #[must_use]
    pub fn new(id: ItemId, footprint: Footprint, carried: bool) -> Self {
        Self {
            id,
            footprint,
            carried,
        }
    }
}
