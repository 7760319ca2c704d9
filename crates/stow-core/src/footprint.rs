#![forbid(unsafe_code)]

//! Item footprints and rotation.
//!
//! A [`Footprint`] is an item's intrinsic size before any rotation. The
//! size an item actually occupies on the grid is its [`OrientedSize`],
//! derived on demand from the footprint and the current [`Orientation`]
//! and never stored separately.
//!
//! # Invariants
//!
//! 1. Footprint dimensions are always at least 1 cell.
//! 2. Rotation is an involution: toggling orientation twice restores the
//!    original oriented size.

use serde::{Deserialize, Serialize};

use crate::geometry::CellRect;

/// The intrinsic width/height of an item in grid cells, before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    width: u16,
    height: u16,
}

impl Footprint {
    /// Create a footprint. Dimensions are clamped to at least 1 cell.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    /// Intrinsic width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Intrinsic height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The size the item occupies under the given orientation.
    #[must_use]
    pub const fn oriented(&self, orientation: Orientation) -> OrientedSize {
        match orientation {
            Orientation::Vertical => OrientedSize {
                width: self.width,
                height: self.height,
            },
            Orientation::Horizontal => OrientedSize {
                width: self.height,
                height: self.width,
            },
        }
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// How an item is turned on the grid.
///
/// `Vertical` is the identity orientation; `Horizontal` swaps the
/// footprint's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The other orientation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// A footprint after applying an orientation. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientedSize {
    pub width: u16,
    pub height: u16,
}

impl OrientedSize {
    /// The rectangle this size covers when anchored at the given top-left cell.
    #[must_use]
    pub const fn rect_at(&self, x: u16, y: u16) -> CellRect {
        CellRect::new(x, y, self.width, self.height)
    }
}
