#![forbid(unsafe_code)]

//! Grid sizing derived from carrying capacity.
//!
//! The grid holds no cell state. Occupancy is always derived on demand from
//! the active placement record set, so there is exactly one source of truth
//! for what sits where.

use serde::{Deserialize, Serialize};

use crate::geometry::CellRect;

/// Host-supplied grid parameters: total carrying capacity in cells and the
/// configured column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Total number of cells the owner may fill.
    pub capacity: u32,
    /// Number of columns the grid is laid out in.
    pub columns: u16,
}

impl GridConfig {
    /// Create a grid configuration.
    #[must_use]
    pub const fn new(capacity: u32, columns: u16) -> Self {
        Self { capacity, columns }
    }

    /// Derive the grid bounds. Degenerate column counts are clamped to 1;
    /// capacities needing more than `u16::MAX` rows saturate.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        let columns = if self.columns == 0 { 1 } else { self.columns };
        let rows = self.capacity.div_ceil(columns as u32);
        let rows = if rows > u16::MAX as u32 {
            u16::MAX
        } else {
            rows as u16
        };
        GridBounds { columns, rows }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

/// Fixed grid bounds: `columns` x `rows` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub columns: u16,
    pub rows: u16,
}

impl GridBounds {
    /// Create bounds directly.
    #[must_use]
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// The full grid as a rectangle anchored at the origin.
    #[must_use]
    pub const fn as_rect(&self) -> CellRect {
        CellRect::new(0, 0, self.columns, self.rows)
    }

    /// Check whether a rectangle lies entirely inside the grid.
    #[must_use]
    pub const fn contains_rect(&self, rect: &CellRect) -> bool {
        self.as_rect().contains_rect(rect)
    }
}
