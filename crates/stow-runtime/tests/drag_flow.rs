//! End-to-end drag interactions against an owning session.

use stow_core::command::DragCommand;
use stow_core::footprint::{Footprint, Orientation};
use stow_core::geometry::CellPos;
use stow_core::grid::GridConfig;
use stow_core::item::PlaceableItem;
use stow_core::record::{ItemId, PlacementRecord};
use stow_runtime::drag::{DragEffect, DragSnapshot, RevertReason};
use stow_runtime::ports::{PersistenceSink, PresentationSink};
use stow_runtime::session::InventorySession;

#[derive(Default)]
struct MemoryStore {
    saved: Vec<Vec<PlacementRecord>>,
}

impl PersistenceSink for MemoryStore {
    fn persist(&mut self, records: &[PlacementRecord]) {
        self.saved.push(records.to_vec());
    }
}

#[derive(Default)]
struct GhostLog {
    presented: Vec<DragSnapshot>,
    cleared: usize,
}

impl PresentationSink for GhostLog {
    fn present(&mut self, snapshot: &DragSnapshot) {
        self.presented.push(snapshot.clone());
    }

    fn clear(&mut self) {
        self.cleared += 1;
    }
}

fn item(id: &str, w: u16, h: u16) -> PlaceableItem {
    PlaceableItem::new(ItemId::from(id), Footprint::new(w, h), true)
}

fn record(id: &str, x: u16, y: u16, w: u16, h: u16) -> PlacementRecord {
    PlacementRecord::new(
        ItemId::from(id),
        x,
        y,
        Orientation::Vertical,
        Footprint::new(w, h),
    )
}

/// Grid columns=4, rows=3; A (1x1) at (0,0); B (1x1) at (1,0).
fn two_item_session() -> (InventorySession, MemoryStore, GhostLog) {
    let items = vec![item("a", 1, 1), item("b", 1, 1)];
    let persisted = vec![record("a", 0, 0, 1, 1), record("b", 1, 0, 1, 1)];
    let (session, report) = InventorySession::load(GridConfig::new(12, 4), &items, &persisted);
    assert!(report.is_clean());
    (session, MemoryStore::default(), GhostLog::default())
}

fn position_of(session: &InventorySession, id: &str) -> CellPos {
    session
        .records()
        .iter()
        .find(|r| r.item_id.as_str() == id)
        .map(|r| r.position())
        .expect("record must exist")
}

#[test]
fn drag_onto_neighbor_swaps_and_persists_once() {
    let (mut session, mut store, mut ghost) = two_item_session();

    session.handle(DragCommand::PointerDown(CellPos::new(0, 0)), &mut store, &mut ghost);
    let moved = session.handle(
        DragCommand::PointerMove(CellPos::new(1, 0)),
        &mut store,
        &mut ghost,
    );
    match &moved.effect {
        DragEffect::Evaluated { snapshot } => {
            assert!(snapshot.valid);
            assert_eq!(snapshot.displaced, vec![ItemId::from("b")]);
        }
        other => panic!("expected evaluation, got {other:?}"),
    }

    let released = session.handle(DragCommand::PointerUp, &mut store, &mut ghost);
    assert!(matches!(released.effect, DragEffect::Committed { .. }));

    assert_eq!(position_of(&session, "a"), CellPos::new(1, 0));
    assert_eq!(position_of(&session, "b"), CellPos::new(0, 0));
    assert_eq!(store.saved.len(), 1);
    assert_eq!(ghost.cleared, 1);
}

#[test]
fn cancel_leaves_records_untouched() {
    let (mut session, mut store, mut ghost) = two_item_session();
    let before = session.records().to_vec();

    session.handle(DragCommand::PointerDown(CellPos::new(0, 0)), &mut store, &mut ghost);
    session.handle(DragCommand::PointerMove(CellPos::new(2, 1)), &mut store, &mut ghost);
    let canceled = session.handle(DragCommand::Cancel, &mut store, &mut ghost);

    assert_eq!(
        canceled.effect,
        DragEffect::Reverted {
            reason: RevertReason::Canceled
        }
    );
    assert_eq!(session.records(), &before[..]);
    assert!(store.saved.is_empty());
    assert!(!session.is_dragging());
}

#[test]
fn release_over_invalid_target_reverts() {
    let items = vec![item("tall", 1, 2), item("a", 1, 1)];
    let persisted = vec![record("tall", 0, 0, 1, 2), record("a", 2, 2, 1, 1)];
    let (mut session, report) = InventorySession::load(GridConfig::new(12, 4), &items, &persisted);
    assert!(report.is_clean());
    let before = session.records().to_vec();
    let mut store = MemoryStore::default();
    let mut ghost = GhostLog::default();

    // Drag "a" onto one cell of the 2-cell occupant: partial overlap.
    session.handle(DragCommand::PointerDown(CellPos::new(2, 2)), &mut store, &mut ghost);
    let moved = session.handle(
        DragCommand::PointerMove(CellPos::new(0, 0)),
        &mut store,
        &mut ghost,
    );
    match &moved.effect {
        DragEffect::Evaluated { snapshot } => assert!(!snapshot.valid),
        other => panic!("expected evaluation, got {other:?}"),
    }

    let released = session.handle(DragCommand::PointerUp, &mut store, &mut ghost);
    assert_eq!(
        released.effect,
        DragEffect::Reverted {
            reason: RevertReason::InvalidTarget
        }
    );
    assert_eq!(session.records(), &before[..]);
    assert!(store.saved.is_empty());
}

#[test]
fn rotation_mid_drag_flips_validity_without_moving() {
    // A 1x3 item dragged to the last row only fits rotated.
    let items = vec![item("staff", 1, 3)];
    let persisted = vec![record("staff", 0, 0, 1, 3)];
    let (mut session, report) = InventorySession::load(GridConfig::new(12, 4), &items, &persisted);
    assert!(report.is_clean());
    let mut store = MemoryStore::default();
    let mut ghost = GhostLog::default();

    session.handle(DragCommand::PointerDown(CellPos::new(0, 0)), &mut store, &mut ghost);
    let moved = session.handle(
        DragCommand::PointerMove(CellPos::new(1, 2)),
        &mut store,
        &mut ghost,
    );
    match &moved.effect {
        DragEffect::Evaluated { snapshot } => assert!(!snapshot.valid),
        other => panic!("expected evaluation, got {other:?}"),
    }

    let rotated = session.handle(DragCommand::Rotate, &mut store, &mut ghost);
    match &rotated.effect {
        DragEffect::Evaluated { snapshot } => {
            assert!(snapshot.valid);
            assert_eq!(snapshot.orientation, Orientation::Horizontal);
            assert_eq!(snapshot.target, CellPos::new(1, 2));
        }
        other => panic!("expected evaluation, got {other:?}"),
    }

    let released = session.handle(DragCommand::PointerUp, &mut store, &mut ghost);
    assert!(matches!(released.effect, DragEffect::Committed { .. }));
    let staff = &session.records()[0];
    assert_eq!(staff.position(), CellPos::new(1, 2));
    assert_eq!(staff.orientation, Orientation::Horizontal);
}

#[test]
fn presentation_sees_every_ghost_change() {
    let (mut session, mut store, mut ghost) = two_item_session();

    session.handle(DragCommand::PointerDown(CellPos::new(0, 0)), &mut store, &mut ghost);
    session.handle(DragCommand::PointerMove(CellPos::new(2, 0)), &mut store, &mut ghost);
    // Same cell again: no re-evaluation, no new ghost.
    session.handle(DragCommand::PointerMove(CellPos::new(2, 0)), &mut store, &mut ghost);
    session.handle(DragCommand::PointerUp, &mut store, &mut ghost);

    assert_eq!(ghost.presented.len(), 2);
    assert_eq!(ghost.presented[0].target, CellPos::new(0, 0));
    assert!(ghost.presented[0].valid);
    assert_eq!(ghost.presented[1].target, CellPos::new(2, 0));
    assert_eq!(ghost.cleared, 1);
}

#[test]
fn commands_without_a_drag_do_nothing() {
    let (mut session, mut store, mut ghost) = two_item_session();
    let before = session.records().to_vec();

    for command in [
        DragCommand::PointerMove(CellPos::new(1, 1)),
        DragCommand::Rotate,
        DragCommand::PointerUp,
        DragCommand::Cancel,
    ] {
        let transition = session.handle(command, &mut store, &mut ghost);
        assert!(matches!(transition.effect, DragEffect::Noop { .. }));
    }
    assert_eq!(session.records(), &before[..]);
    assert!(store.saved.is_empty());
    assert_eq!(ghost.presented.len(), 0);
}
