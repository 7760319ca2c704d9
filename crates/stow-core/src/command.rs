#![forbid(unsafe_code)]

//! Abstract drag commands.
//!
//! The host's input adapter translates raw pointer and keyboard events into
//! these commands; the drag controller consumes them without knowing
//! anything about the underlying input technology.

use crate::geometry::CellPos;

/// One abstract input step of a drag interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragCommand {
    /// Pointer pressed on the given grid cell.
    PointerDown(CellPos),
    /// Pointer moved while held; the cell currently under the pointer.
    PointerMove(CellPos),
    /// Rotate the item being dragged (e.g. a key press mid-drag).
    Rotate,
    /// Pointer released: commit if the current target is valid, else revert.
    PointerUp,
    /// Abort the drag unconditionally (pointer left the surface, explicit
    /// cancel key, focus loss).
    Cancel,
}
