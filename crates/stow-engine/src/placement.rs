#![forbid(unsafe_code)]

//! Placement validation and commit.
//!
//! [`can_place`] is a pure predicate over a move candidate and the current
//! record set; it never fails and never mutates. [`commit`] produces the
//! updated record set for a previously validated move, re-deriving the
//! evaluation defensively so a stale or fabricated evaluation can never
//! corrupt the grid.
//!
//! # Invariants
//!
//! After every successful commit:
//! 1. No two records' oriented rectangles overlap.
//! 2. Every record's oriented rectangle lies inside the grid bounds.
//! 3. Each item id appears in at most one record.
//!
//! # Swap semantics
//!
//! Items fully covered by a candidate rectangle are *displaced*: on commit
//! they are translated by the offset between the mover's source and target
//! cells, preserving their own orientation. Translating (rather than
//! literally exchanging coordinates) keeps the relative arrangement of
//! several displaced items intact, so pushing a 2x2 item through a cluster
//! of 1x1 items moves the whole cluster coherently.

use std::fmt;

use stow_core::footprint::{Footprint, Orientation};
use stow_core::geometry::{CellPos, CellRect};
use stow_core::grid::GridBounds;
use stow_core::record::{ItemId, PlacementRecord};

use crate::occupancy::{Conflict, find_conflict};

/// A candidate move: place `item_id` with the given footprint and
/// orientation so its top-left cell lands on `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub item_id: ItemId,
    pub footprint: Footprint,
    pub orientation: Orientation,
    pub target: CellPos,
}

impl MoveRequest {
    /// Create a move request.
    #[must_use]
    pub fn new(
        item_id: ItemId,
        footprint: Footprint,
        orientation: Orientation,
        target: CellPos,
    ) -> Self {
        Self {
            item_id,
            footprint,
            orientation,
            target,
        }
    }

    /// The oriented rectangle the move would cover.
    #[must_use]
    pub const fn rect(&self) -> CellRect {
        self.footprint
            .oriented(self.orientation)
            .rect_at(self.target.x, self.target.y)
    }
}

/// The outcome of evaluating a candidate move.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacementEvaluation {
    /// Whether the move may be committed.
    pub valid: bool,
    /// Items fully covered by the candidate rectangle, eligible to be
    /// relocated as part of a swap. Empty for plain moves.
    pub displaced: Vec<ItemId>,
}

impl PlacementEvaluation {
    /// A valid evaluation displacing nothing.
    #[must_use]
    pub const fn clear() -> Self {
        Self {
            valid: true,
            displaced: Vec::new(),
        }
    }

    /// A valid evaluation displacing the given items.
    #[must_use]
    pub fn displacing(displaced: Vec<ItemId>) -> Self {
        Self {
            valid: true,
            displaced,
        }
    }

    /// An invalid evaluation.
    #[must_use]
    pub const fn rejected() -> Self {
        Self {
            valid: false,
            displaced: Vec::new(),
        }
    }
}

/// Evaluate a candidate move against the current record set.
///
/// Pure and infallible. `records` is the full active set; the mover's own
/// record, if present, is excluded from collision checks against itself.
///
/// Rules, in order:
/// 1. Target and orientation identical to the mover's current record is a
///    no-op move and always valid.
/// 2. A rectangle spilling outside the grid is invalid.
/// 3. Every other record intersecting the candidate rectangle must be
///    *fully contained* in it; a partial overlap can never be resolved by
///    swapping and is invalid.
/// 4. An item with no existing record has no source cells to vacate, so a
///    fresh placement must not overlap anything.
/// 5. A swap is only valid if the relocation itself is clean: the
///    displaced arrangement, translated to the mover's source, must stay
///    inside the grid and clear of every untouched record. Without this
///    check a rotated multi-item swap could evaluate valid yet be
///    uncommittable, since the vacated cells need not match the shape the
///    displaced items land on.
#[must_use]
pub fn can_place(
    request: &MoveRequest,
    bounds: GridBounds,
    records: &[PlacementRecord],
) -> PlacementEvaluation {
    let current = records.iter().find(|r| r.item_id == request.item_id);

    if let Some(current) = current
        && current.position() == request.target
        && current.orientation == request.orientation
    {
        return PlacementEvaluation::clear();
    }

    let rect = request.rect();
    if !bounds.contains_rect(&rect) {
        return PlacementEvaluation::rejected();
    }

    let mut displaced = Vec::new();
    for other in records.iter().filter(|r| r.item_id != request.item_id) {
        let other_rect = other.rect();
        if !rect.intersects(&other_rect) {
            continue;
        }
        if rect.contains_rect(&other_rect) {
            displaced.push(other.item_id.clone());
        } else {
            return PlacementEvaluation::rejected();
        }
    }

    if displaced.is_empty() {
        return PlacementEvaluation::clear();
    }

    if current.is_none() {
        return PlacementEvaluation::rejected();
    }

    match relocate(request, &displaced, records) {
        Ok(updated) if find_conflict(&updated, bounds).is_none() => {
            PlacementEvaluation::displacing(displaced)
        }
        _ => PlacementEvaluation::rejected(),
    }
}

/// Commit a validated move, returning the full updated record set.
///
/// Re-derives [`can_place`] before touching anything; calling this with a
/// move that does not evaluate valid is a caller bug and yields
/// [`InvalidMoveError::RejectedMove`]. Displaced items are translated by
/// the source-to-target offset, keeping their own orientation. The updated
/// set is checked against the full invariant set before it is returned.
pub fn commit(
    request: &MoveRequest,
    bounds: GridBounds,
    records: &[PlacementRecord],
) -> Result<Vec<PlacementRecord>, InvalidMoveError> {
    let evaluation = can_place(request, bounds, records);
    if !evaluation.valid {
        return Err(InvalidMoveError::RejectedMove {
            item_id: request.item_id.clone(),
        });
    }

    let updated = relocate(request, &evaluation.displaced, records)?;
    if let Some(conflict) = find_conflict(&updated, bounds) {
        return Err(InvalidMoveError::ConflictAfterMove { conflict });
    }

    Ok(updated)
}

/// Apply a move to a copy of the record set: translate the displaced items
/// by the source-to-target offset, then write or create the mover's record
/// at the target. No invariant checking; callers validate the result.
fn relocate(
    request: &MoveRequest,
    displaced: &[ItemId],
    records: &[PlacementRecord],
) -> Result<Vec<PlacementRecord>, InvalidMoveError> {
    let mut updated = records.to_vec();
    let source = updated
        .iter()
        .find(|r| r.item_id == request.item_id)
        .map(PlacementRecord::position);

    // Displaced items travel opposite to the mover: into the cells it vacates.
    if let Some(source) = source {
        let dx = i32::from(source.x) - i32::from(request.target.x);
        let dy = i32::from(source.y) - i32::from(request.target.y);
        for item_id in displaced {
            let Some(record) = updated.iter_mut().find(|r| &r.item_id == item_id) else {
                continue;
            };
            let x = i32::from(record.x) + dx;
            let y = i32::from(record.y) + dy;
            if x < 0 || y < 0 || x > i32::from(u16::MAX) || y > i32::from(u16::MAX) {
                return Err(InvalidMoveError::DisplacedOutOfBounds {
                    item_id: item_id.clone(),
                });
            }
            record.x = x as u16;
            record.y = y as u16;
        }
    }

    match updated.iter_mut().find(|r| r.item_id == request.item_id) {
        Some(record) => {
            record.x = request.target.x;
            record.y = request.target.y;
            record.orientation = request.orientation;
            record.footprint = request.footprint;
        }
        None => updated.push(PlacementRecord::new(
            request.item_id.clone(),
            request.target.x,
            request.target.y,
            request.orientation,
            request.footprint,
        )),
    }

    Ok(updated)
}

/// A record with its orientation toggled. Position is untouched; callers
/// re-validate via [`can_place`] before committing a rotated placement.
#[must_use]
pub fn rotate(record: &PlacementRecord) -> PlacementRecord {
    let mut rotated = record.clone();
    rotated.orientation = rotated.orientation.toggled();
    rotated
}

/// Errors from [`commit`]. Always a bug in the caller, never a user-facing
/// failure: the drag layer must only commit moves that evaluate valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMoveError {
    /// The move does not evaluate valid against the current record set.
    RejectedMove { item_id: ItemId },
    /// A displaced item would land outside representable coordinates.
    DisplacedOutOfBounds { item_id: ItemId },
    /// The relocated set breaks a grid invariant.
    ConflictAfterMove { conflict: Conflict },
}

impl fmt::Display for InvalidMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RejectedMove { item_id } => {
                write!(f, "commit for item {item_id} without a valid evaluation")
            }
            Self::DisplacedOutOfBounds { item_id } => {
                write!(f, "displaced item {item_id} would leave the grid")
            }
            Self::ConflictAfterMove { conflict } => {
                write!(f, "move would corrupt the grid: {conflict}")
            }
        }
    }
}

impl std::error::Error for InvalidMoveError {}

#[cfg(test)]
mod tests {
    use super::{InvalidMoveError, MoveRequest, can_place, commit, rotate};
    use stow_core::footprint::{Footprint, Orientation};
    use stow_core::geometry::CellPos;
    use stow_core::grid::GridBounds;
    use stow_core::record::{ItemId, PlacementRecord};

    fn record(id: &str, x: u16, y: u16, w: u16, h: u16) -> PlacementRecord {
        PlacementRecord::new(
            ItemId::from(id),
            x,
            y,
            Orientation::Vertical,
            Footprint::new(w, h),
        )
    }

    fn request(id: &str, w: u16, h: u16, x: u16, y: u16) -> MoveRequest {
        MoveRequest::new(
            ItemId::from(id),
            Footprint::new(w, h),
            Orientation::Vertical,
            CellPos::new(x, y),
        )
    }

    #[test]
    fn no_op_move_is_always_valid() {
        // Grid is otherwise crowded; moving onto your own cells stays a no-op.
        let records = vec![record("a", 0, 0, 1, 1), record("b", 1, 0, 3, 3)];
        let eval = can_place(&request("a", 1, 1, 0, 0), GridBounds::new(4, 3), &records);
        assert!(eval.valid);
        assert!(eval.displaced.is_empty());
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let bounds = GridBounds::new(4, 3);
        let eval = can_place(&request("a", 2, 2, 3, 0), bounds, &[]);
        assert!(!eval.valid);
        let eval = can_place(&request("a", 1, 1, 0, 3), bounds, &[]);
        assert!(!eval.valid);
    }

    #[test]
    fn partial_overlap_is_rejected() {
        // Candidate covers only one cell of a 2x1 occupant.
        let records = vec![record("a", 2, 2, 1, 1), record("tall", 0, 0, 1, 2)];
        let eval = can_place(&request("a", 1, 1, 0, 0), GridBounds::new(4, 3), &records);
        assert!(!eval.valid);
    }

    #[test]
    fn fully_contained_occupant_becomes_displaced() {
        let records = vec![record("a", 0, 0, 1, 1), record("b", 1, 0, 1, 1)];
        let eval = can_place(&request("a", 1, 1, 1, 0), GridBounds::new(4, 3), &records);
        assert!(eval.valid);
        assert_eq!(eval.displaced, vec![ItemId::from("b")]);
    }

    #[test]
    fn fresh_placement_must_not_overlap() {
        let records = vec![record("b", 1, 0, 1, 1)];
        let eval = can_place(&request("new", 1, 1, 1, 0), GridBounds::new(4, 3), &records);
        assert!(!eval.valid);
        let eval = can_place(&request("new", 1, 1, 0, 0), GridBounds::new(4, 3), &records);
        assert!(eval.valid);
    }

    #[test]
    fn swap_commit_exchanges_positions() {
        let bounds = GridBounds::new(4, 3);
        let records = vec![record("a", 0, 0, 1, 1), record("b", 1, 0, 1, 1)];
        let updated = commit(&request("a", 1, 1, 1, 0), bounds, &records).unwrap();
        let find = |id: &str| updated.iter().find(|r| r.item_id.as_str() == id).unwrap();
        assert_eq!(find("a").position(), CellPos::new(1, 0));
        assert_eq!(find("b").position(), CellPos::new(0, 0));
        assert_eq!(updated.len(), 2);
    }

    #[test]
    fn multi_item_push_translates_cluster() {
        // A 2x1 mover covering two 1x1 items shifts both by the same offset.
        let bounds = GridBounds::new(4, 3);
        let records = vec![
            record("wide", 0, 0, 2, 1),
            record("b", 2, 0, 1, 1),
            record("c", 3, 0, 1, 1),
        ];
        let updated = commit(&request("wide", 2, 1, 2, 0), bounds, &records).unwrap();
        let find = |id: &str| updated.iter().find(|r| r.item_id.as_str() == id).unwrap();
        assert_eq!(find("wide").position(), CellPos::new(2, 0));
        assert_eq!(find("b").position(), CellPos::new(0, 0));
        assert_eq!(find("c").position(), CellPos::new(1, 0));
    }

    #[test]
    fn displaced_keep_their_own_orientation() {
        let bounds = GridBounds::new(4, 4);
        let mut sideways = record("b", 2, 0, 1, 2);
        sideways.orientation = Orientation::Horizontal; // occupies 2x1 at (2,0)
        let records = vec![record("big", 0, 0, 2, 2), sideways];
        let updated = commit(&request("big", 2, 2, 2, 0), bounds, &records).unwrap();
        let b = updated.iter().find(|r| r.item_id.as_str() == "b").unwrap();
        assert_eq!(b.orientation, Orientation::Horizontal);
        assert_eq!(b.position(), CellPos::new(0, 0));
    }

    #[test]
    fn swap_requiring_dirty_relocation_is_rejected() {
        // "tall" rotates onto a row of three 1x1 items; translated to the
        // source offset they would land on "block", so the swap is invalid
        // even though every overlap is fully contained.
        let bounds = GridBounds::new(4, 4);
        let records = vec![
            record("tall", 0, 0, 1, 3),
            record("block", 1, 0, 1, 1),
            record("b", 1, 3, 1, 1),
            record("c", 2, 3, 1, 1),
            record("d", 3, 3, 1, 1),
        ];
        let rotated = MoveRequest::new(
            ItemId::from("tall"),
            Footprint::new(1, 3),
            Orientation::Horizontal,
            CellPos::new(1, 3),
        );
        let eval = can_place(&rotated, bounds, &records);
        assert!(!eval.valid);
        assert!(commit(&rotated, bounds, &records).is_err());
    }

    #[test]
    fn commit_without_valid_evaluation_fails() {
        let bounds = GridBounds::new(4, 3);
        let records = vec![record("tall", 0, 0, 1, 2), record("a", 2, 2, 1, 1)];
        let err = commit(&request("a", 1, 1, 0, 0), bounds, &records).unwrap_err();
        assert!(matches!(err, InvalidMoveError::RejectedMove { .. }));
    }

    #[test]
    fn commit_creates_record_for_fresh_placement() {
        let bounds = GridBounds::new(4, 3);
        let updated = commit(&request("new", 2, 1, 1, 1), bounds, &[]).unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].item_id.as_str(), "new");
        assert_eq!(updated[0].position(), CellPos::new(1, 1));
    }

    #[test]
    fn rotation_is_an_involution() {
        let original = record("a", 1, 1, 1, 3);
        let once = rotate(&original);
        assert_eq!(once.orientation, Orientation::Horizontal);
        assert_eq!(once.rect().width, 3);
        let twice = rotate(&once);
        assert_eq!(twice, original);
    }

    #[test]
    fn rotated_move_can_displace() {
        // A 1x2 item rotated to 2x1 fully covers two side-by-side 1x1 items.
        let bounds = GridBounds::new(4, 3);
        let records = vec![
            record("tall", 0, 0, 1, 2),
            record("b", 2, 0, 1, 1),
            record("c", 3, 0, 1, 1),
        ];
        let rotated = MoveRequest::new(
            ItemId::from("tall"),
            Footprint::new(1, 2),
            Orientation::Horizontal,
            CellPos::new(2, 0),
        );
        let eval = can_place(&rotated, bounds, &records);
        assert!(eval.valid);
        assert_eq!(eval.displaced.len(), 2);
    }
}
