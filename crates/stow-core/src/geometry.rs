#![forbid(unsafe_code)]

//! Cell-grid geometry primitives.
//!
//! All coordinates are 0-indexed grid cells with the origin at the top-left.
//! Rectangle right/bottom edges are exclusive, so a 1x1 rectangle at (0, 0)
//! covers exactly the cell (0, 0).

/// A single cell position on the grid (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellPos {
    pub x: u16,
    pub y: u16,
}

impl CellPos {
    /// Create a new cell position.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl From<(u16, u16)> for CellPos {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle of grid cells.
///
/// Used for item footprints on the grid, bounds checks, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl CellRect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Area in cells.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle covers zero cells.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a cell lies inside the rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(&self, cell: CellPos) -> bool {
        cell.x >= self.x && cell.x < self.right() && cell.y >= self.y && cell.y < self.bottom()
    }

    /// Check if this rectangle shares at least one cell with another.
    #[inline]
    #[must_use]
    pub const fn intersects(&self, other: &CellRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Check if another rectangle lies entirely inside this one.
    ///
    /// An empty `other` is never considered contained.
    #[inline]
    #[must_use]
    pub const fn contains_rect(&self, other: &CellRect) -> bool {
        !other.is_empty()
            && other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Iterate over every cell covered by the rectangle, row-major.
    pub fn cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        (self.y..self.bottom())
            .flat_map(move |y| (self.x..self.right()).map(move |x| CellPos::new(x, y)))
    }
}
