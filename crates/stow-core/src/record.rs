#![forbid(unsafe_code)]

//! Placement records: the persisted position and orientation of one item.
//!
//! A [`PlacementRecord`] is created when an item lands on the grid, mutated
//! only by the placement engine's commit path or the load-time
//! synchronizer, and destroyed when the item leaves the grid. The record
//! carries the item's intrinsic [`Footprint`] so its oriented rectangle is
//! derivable without consulting the item source, but the item source stays
//! authoritative: the synchronizer refreshes the footprint on load.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::footprint::{Footprint, Orientation};
use crate::geometry::{CellPos, CellRect};

/// Stable host-document identity of an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One item's placement on the grid: top-left cell, orientation, and
/// intrinsic footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Identity of the placed item. At most one record per id.
    pub item_id: ItemId,
    /// Left edge of the oriented rectangle.
    pub x: u16,
    /// Top edge of the oriented rectangle.
    pub y: u16,
    /// Current rotation of the item.
    #[serde(default)]
    pub orientation: Orientation,
    /// The item's intrinsic (pre-rotation) size.
    pub footprint: Footprint,
}

impl PlacementRecord {
    /// Create a record.
    #[must_use]
    pub fn new(
        item_id: ItemId,
        x: u16,
        y: u16,
        orientation: Orientation,
        footprint: Footprint,
    ) -> Self {
        Self {
            item_id,
            x,
            y,
            orientation,
            footprint,
        }
    }

    /// Top-left cell of the oriented rectangle.
    #[must_use]
    pub const fn position(&self) -> CellPos {
        CellPos::new(self.x, self.y)
    }

    /// The oriented rectangle the item covers.
    #[must_use]
    pub const fn rect(&self) -> CellRect {
        self.footprint.oriented(self.orientation).rect_at(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemId, PlacementRecord};
    use crate::footprint::{Footprint, Orientation};
    use crate::geometry::CellRect;

    #[test]
    fn rect_applies_orientation() {
        let record = PlacementRecord::new(
            ItemId::from("spear"),
            1,
            2,
            Orientation::Horizontal,
            Footprint::new(1, 4),
        );
        assert_eq!(record.rect(), CellRect::new(1, 2, 4, 1));
    }

    #[test]
    fn serde_round_trips_and_defaults_orientation() {
        let record = PlacementRecord::new(
            ItemId::from("rope"),
            0,
            0,
            Orientation::Vertical,
            Footprint::new(1, 2),
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: PlacementRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);

        // Records written before rotation support carry no orientation field.
        let legacy = r#"{"item_id":"rope","x":0,"y":0,"footprint":{"width":1,"height":2}}"#;
        let parsed: PlacementRecord = serde_json::from_str(legacy).unwrap();
        assert_eq!(parsed.orientation, Orientation::Vertical);
    }
}
