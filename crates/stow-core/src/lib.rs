#![forbid(unsafe_code)]

//! Core: geometry, footprints, records, and drag commands.
//!
//! # Role in stowage
//! `stow-core` defines the value types every other crate speaks in. It has
//! no engine logic of its own: the placement solver lives in `stow-engine`
//! and the interactive layer in `stow-runtime`.
//!
//! # Primary responsibilities
//! - **CellPos / CellRect**: 0-indexed grid cells and rectangle algebra.
//! - **Footprint / Orientation**: intrinsic item size and rotation.
//! - **PlacementRecord**: the persisted position of one item on the grid.
//! - **GridConfig / GridBounds**: grid sizing derived from carry capacity.
//! - **DragCommand**: the abstract input vocabulary for drags.

pub mod command;
pub mod footprint;
pub mod geometry;
pub mod grid;
pub mod item;
pub mod record;

pub use command::DragCommand;
pub use footprint::{Footprint, Orientation, OrientedSize};
pub use geometry::{CellPos, CellRect};
pub use grid::{GridBounds, GridConfig};
pub use item::PlaceableItem;
pub use record::{ItemId, PlacementRecord};
