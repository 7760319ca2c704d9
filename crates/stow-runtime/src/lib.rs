#![forbid(unsafe_code)]

//! Runtime: the interactive layer over the placement engine.
//!
//! # Role in stowage
//! `stow-runtime` owns the drag state machine and the seams to the host:
//! where `stow-engine` answers pure placement questions, this crate decides
//! *when* to ask them and what to do with the answers.
//!
//! # Primary responsibilities
//! - **DragController**: Idle/Dragging/Committing machine over
//!   [`DragCommand`](stow_core::command::DragCommand)s.
//! - **Ports**: `ItemSource`, `PersistenceSink`, `PresentationSink`.
//! - **InventorySession**: the owning aggregate tying load-time
//!   synchronization to interactive drags.

pub mod drag;
pub mod ports;
pub mod session;

pub use drag::{
    DragConfig, DragController, DragEffect, DragNoopReason, DragPhase, DragSnapshot,
    DragTransition, RevertReason,
};
pub use ports::{ItemSource, NullPresentation, PersistenceSink, PresentationSink};
pub use session::InventorySession;
