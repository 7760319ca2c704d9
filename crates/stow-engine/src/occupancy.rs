#![forbid(unsafe_code)]

//! Derived occupancy queries.
//!
//! The grid stores no cell array. Everything here is computed on demand
//! from the placement record list, so the record set stays the single
//! source of truth for what sits where.

use std::fmt;

use rustc_hash::FxHashSet;

use stow_core::footprint::{Footprint, Orientation};
use stow_core::geometry::{CellPos, CellRect};
use stow_core::grid::GridBounds;
use stow_core::record::{ItemId, PlacementRecord};

/// Find the record whose oriented rectangle covers the given cell.
#[must_use]
pub fn record_at<'a>(records: &'a [PlacementRecord], cell: CellPos) -> Option<&'a PlacementRecord> {
    records.iter().find(|record| record.rect().contains(cell))
}

/// Collect every cell covered by the given records.
#[must_use]
pub fn occupied_cells(records: &[PlacementRecord]) -> FxHashSet<CellPos> {
    let mut cells = FxHashSet::with_capacity_and_hasher(
        records.iter().map(|r| r.rect().area() as usize).sum(),
        Default::default(),
    );
    for record in records {
        cells.extend(record.rect().cells());
    }
    cells
}

/// Row-major first-fit scan for a free slot of the given oriented size.
///
/// Returns the top-left cell of the first position where the item fits
/// inside the grid without touching any occupied cell, or `None` when the
/// grid has no room. This is a single-item placement aid for newly added
/// items, not a packing optimizer.
#[must_use]
pub fn find_free_position(
    footprint: Footprint,
    orientation: Orientation,
    bounds: GridBounds,
    records: &[PlacementRecord],
) -> Option<CellPos> {
    let size = footprint.oriented(orientation);
    if size.width > bounds.columns || size.height > bounds.rows {
        return None;
    }
    let occupied = occupied_cells(records);
    for y in 0..=(bounds.rows - size.height) {
        for x in 0..=(bounds.columns - size.width) {
            let rect = size.rect_at(x, y);
            if rect.cells().all(|cell| !occupied.contains(&cell)) {
                return Some(CellPos::new(x, y));
            }
        }
    }
    None
}

/// A violation of the grid invariants found in a record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// A record's oriented rectangle spills outside the grid.
    OutOfBounds { item_id: ItemId },
    /// Two records' oriented rectangles share at least one cell.
    Overlap { first: ItemId, second: ItemId },
    /// The same item id appears in more than one record.
    DuplicateId { item_id: ItemId },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { item_id } => {
                write!(f, "record for item {item_id} lies outside the grid")
            }
            Self::Overlap { first, second } => {
                write!(f, "records for items {first} and {second} overlap")
            }
            Self::DuplicateId { item_id } => {
                write!(f, "item {item_id} has more than one record")
            }
        }
    }
}

/// Scan a record set for the first invariant violation.
///
/// Checks, in order: duplicate ids, grid bounds, pairwise overlap.
#[must_use]
pub fn find_conflict(records: &[PlacementRecord], bounds: GridBounds) -> Option<Conflict> {
    let mut seen = FxHashSet::with_capacity_and_hasher(records.len(), Default::default());
    for record in records {
        if !seen.insert(&record.item_id) {
            return Some(Conflict::DuplicateId {
                item_id: record.item_id.clone(),
            });
        }
    }
    for record in records {
        if !bounds.contains_rect(&record.rect()) {
            return Some(Conflict::OutOfBounds {
                item_id: record.item_id.clone(),
            });
        }
    }
    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            if a.rect().intersects(&b.rect()) {
                return Some(Conflict::Overlap {
                    first: a.item_id.clone(),
                    second: b.item_id.clone(),
                });
            }
        }
    }
    None
}
