#![forbid(unsafe_code)]

//! The interactive drag state machine.
//!
//! [`DragController`] turns abstract [`DragCommand`]s into placement
//! engine queries and, on release, a commit or revert. Every call to
//! [`handle`](DragController::handle) returns a [`DragTransition`]
//! describing the phase change and its effect, so hosts can drive
//! feedback rendering from the return value alone.
//!
//! # State Machine
//!
//! - **Idle -> Dragging** on pointer-down over a placed item. The item's
//!   id, footprint, and orientation are captured; the target starts at the
//!   item's current cell, so the drag opens on a valid no-op.
//! - **Dragging** self-loops on pointer-move (re-evaluate when the target
//!   cell changed) and on rotate (toggle the working orientation and
//!   re-evaluate immediately; rotation changes validity without moving
//!   the pointer).
//! - **Dragging -> Committing -> Idle** on pointer-up with a valid stored
//!   evaluation: commit, hand the updated set to the persistence sink,
//!   return to idle. `Committing` is transient; `handle` always completes
//!   it before returning, so reported transitions end at `Idle`.
//! - **Dragging -> Idle** on pointer-up with an invalid evaluation or on
//!   cancel: the records are untouched and the drag is discarded.
//!
//! # Invariants
//!
//! 1. Only one drag is active at a time; pointer-down while dragging is a
//!    no-op.
//! 2. Records are mutated only by a successful commit; move, rotate, and
//!    cancel never write.
//! 3. A commit is always preceded by a valid evaluation at the same
//!    target and orientation (and re-derived inside the engine).

use stow_core::command::DragCommand;
use stow_core::footprint::{Footprint, Orientation};
use stow_core::geometry::CellPos;
use stow_core::grid::GridBounds;
use stow_core::record::{ItemId, PlacementRecord};
use stow_engine::placement::{MoveRequest, PlacementEvaluation, can_place, commit};

use crate::ports::{PersistenceSink, PresentationSink};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Behavioral knobs for the drag controller.
#[derive(Debug, Clone, Copy)]
pub struct DragConfig {
    /// Whether the rotate command is honored mid-drag (default: true).
    pub allow_rotation: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            allow_rotation: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Phases, effects, transitions
// ---------------------------------------------------------------------------

/// The controller's observable phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No drag in flight.
    Idle,
    /// An item is being dragged; evaluations track the pointer.
    Dragging,
    /// Release accepted; the engine commit and persistence call are in
    /// flight. Transient: `handle` finishes it before returning.
    Committing,
}

/// Why a command produced no state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragNoopReason {
    /// Pointer-down on a cell with no placed item.
    NoItemAtCell,
    /// Pointer-down while a drag is already active.
    AlreadyDragging,
    /// Move, rotate, release, or cancel with no drag in flight.
    NotDragging,
    /// Pointer-move within the same target cell as the last evaluation.
    TargetUnchanged,
    /// Rotate command with rotation disabled in the configuration.
    RotationDisabled,
}

/// Why a drag ended without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertReason {
    /// Explicit cancel (escape, pointer left the surface, focus loss).
    Canceled,
    /// Released over an invalid target; normal interaction, not an error.
    InvalidTarget,
    /// The engine rejected the commit on re-validation. A caller bug;
    /// logged at error level and surfaced as a revert.
    CommitRejected,
}

/// A renderable view of the drag for the presentation sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSnapshot {
    /// The item being dragged.
    pub item_id: ItemId,
    /// Top-left cell the item would land on.
    pub target: CellPos,
    /// Working orientation of the dragged item.
    pub orientation: Orientation,
    /// Whether releasing here would commit.
    pub valid: bool,
    /// Items that would be relocated by the swap, for highlight rendering.
    pub displaced: Vec<ItemId>,
}

/// What a handled command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEffect {
    /// Nothing changed.
    Noop { reason: DragNoopReason },
    /// A drag began on the given item.
    Started { snapshot: DragSnapshot },
    /// The target or orientation changed and was re-evaluated.
    Evaluated { snapshot: DragSnapshot },
    /// The drag committed; the record set was updated and persisted.
    Committed { item_id: ItemId, target: CellPos },
    /// The drag ended without touching the records.
    Reverted { reason: RevertReason },
}

/// One observed state change of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragTransition {
    /// Monotonic id, unique per controller.
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Working state captured for the drag in flight.
#[derive(Debug, Clone)]
struct ActiveDrag {
    item_id: ItemId,
    footprint: Footprint,
    orientation: Orientation,
    target: CellPos,
    evaluation: PlacementEvaluation,
}

impl ActiveDrag {
    fn snapshot(&self) -> DragSnapshot {
        DragSnapshot {
            item_id: self.item_id.clone(),
            target: self.target,
            orientation: self.orientation,
            valid: self.evaluation.valid,
            displaced: self.evaluation.displaced.clone(),
        }
    }

    fn request(&self) -> MoveRequest {
        MoveRequest::new(
            self.item_id.clone(),
            self.footprint,
            self.orientation,
            self.target,
        )
    }
}

/// Translates drag commands into engine queries and commits.
///
/// Holds only transient working state (source, target, orientation, last
/// evaluation) during a drag; the record collection belongs to the caller
/// and is borrowed per call.
#[derive(Debug)]
pub struct DragController {
    config: DragConfig,
    bounds: GridBounds,
    phase: DragPhase,
    active: Option<ActiveDrag>,
    transition_counter: u64,
}

impl DragController {
    /// Create a controller for a grid of the given bounds.
    #[must_use]
    pub fn new(bounds: GridBounds, config: DragConfig) -> Self {
        Self {
            config,
            bounds,
            phase: DragPhase::Idle,
            active: None,
            transition_counter: 0,
        }
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether a drag is in flight.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Handle one drag command against the caller's record set.
    ///
    /// Mutates `records` only on a successful commit, in which case the
    /// full updated set is also handed to `persistence`. `presentation`
    /// receives a snapshot after every ghost-changing transition and a
    /// `clear` when the drag ends.
    pub fn handle(
        &mut self,
        command: DragCommand,
        records: &mut Vec<PlacementRecord>,
        persistence: &mut dyn PersistenceSink,
        presentation: &mut dyn PresentationSink,
    ) -> DragTransition {
        let from = self.phase;
        let effect = match command {
            DragCommand::PointerDown(cell) => self.on_pointer_down(cell, records, presentation),
            DragCommand::PointerMove(cell) => self.on_pointer_move(cell, records, presentation),
            DragCommand::Rotate => self.on_rotate(records, presentation),
            DragCommand::PointerUp => self.on_pointer_up(records, persistence, presentation),
            DragCommand::Cancel => self.on_cancel(presentation),
        };

        self.transition_counter = self.transition_counter.saturating_add(1);
        let transition = DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase,
            effect,
        };
        tracing::debug!(
            id = transition.transition_id,
            from = ?transition.from,
            to = ?transition.to,
            effect = ?transition.effect,
            "drag transition"
        );
        transition
    }

    fn on_pointer_down(
        &mut self,
        cell: CellPos,
        records: &[PlacementRecord],
        presentation: &mut dyn PresentationSink,
    ) -> DragEffect {
        if self.active.is_some() {
            return DragEffect::Noop {
                reason: DragNoopReason::AlreadyDragging,
            };
        }
        let Some(record) = stow_engine::occupancy::record_at(records, cell) else {
            return DragEffect::Noop {
                reason: DragNoopReason::NoItemAtCell,
            };
        };

        let drag = ActiveDrag {
            item_id: record.item_id.clone(),
            footprint: record.footprint,
            orientation: record.orientation,
            target: record.position(),
            // Target equals source, so the drag starts on a valid no-op.
            evaluation: PlacementEvaluation::clear(),
        };
        let snapshot = drag.snapshot();
        self.active = Some(drag);
        self.phase = DragPhase::Dragging;
        presentation.present(&snapshot);
        DragEffect::Started { snapshot }
    }

    fn on_pointer_move(
        &mut self,
        cell: CellPos,
        records: &[PlacementRecord],
        presentation: &mut dyn PresentationSink,
    ) -> DragEffect {
        let bounds = self.bounds;
        let Some(drag) = self.active.as_mut() else {
            return DragEffect::Noop {
                reason: DragNoopReason::NotDragging,
            };
        };
        if cell == drag.target {
            return DragEffect::Noop {
                reason: DragNoopReason::TargetUnchanged,
            };
        }
        drag.target = cell;
        drag.evaluation = can_place(&drag.request(), bounds, records);
        let snapshot = drag.snapshot();
        presentation.present(&snapshot);
        DragEffect::Evaluated { snapshot }
    }

    fn on_rotate(
        &mut self,
        records: &[PlacementRecord],
        presentation: &mut dyn PresentationSink,
    ) -> DragEffect {
        if !self.config.allow_rotation {
            return DragEffect::Noop {
                reason: DragNoopReason::RotationDisabled,
            };
        }
        let bounds = self.bounds;
        let Some(drag) = self.active.as_mut() else {
            return DragEffect::Noop {
                reason: DragNoopReason::NotDragging,
            };
        };
        drag.orientation = drag.orientation.toggled();
        drag.evaluation = can_place(&drag.request(), bounds, records);
        let snapshot = drag.snapshot();
        presentation.present(&snapshot);
        DragEffect::Evaluated { snapshot }
    }

    fn on_pointer_up(
        &mut self,
        records: &mut Vec<PlacementRecord>,
        persistence: &mut dyn PersistenceSink,
        presentation: &mut dyn PresentationSink,
    ) -> DragEffect {
        let Some(drag) = self.active.take() else {
            return DragEffect::Noop {
                reason: DragNoopReason::NotDragging,
            };
        };

        if !drag.evaluation.valid {
            self.phase = DragPhase::Idle;
            presentation.clear();
            return DragEffect::Reverted {
                reason: RevertReason::InvalidTarget,
            };
        }

        self.phase = DragPhase::Committing;
        let effect = match commit(&drag.request(), self.bounds, records) {
            Ok(updated) => {
                *records = updated;
                persistence.persist(records);
                DragEffect::Committed {
                    item_id: drag.item_id,
                    target: drag.target,
                }
            }
            Err(error) => {
                // The evaluation is re-derived inside commit, so this can
                // only mean the evaluation went stale between events.
                tracing::error!(error = %error, "commit rejected on re-validation");
                debug_assert!(false, "commit rejected on re-validation: {error}");
                DragEffect::Reverted {
                    reason: RevertReason::CommitRejected,
                }
            }
        };
        self.phase = DragPhase::Idle;
        presentation.clear();
        effect
    }

    fn on_cancel(&mut self, presentation: &mut dyn PresentationSink) -> DragEffect {
        if self.active.take().is_none() {
            return DragEffect::Noop {
                reason: DragNoopReason::NotDragging,
            };
        }
        self.phase = DragPhase::Idle;
        presentation.clear();
        DragEffect::Reverted {
            reason: RevertReason::Canceled,
        }
    }
}
