#![forbid(unsafe_code)]

//! Load-time reconciliation of persisted records against the live items.
//!
//! Persisted placements can go stale while the grid is not loaded: items
//! get deleted, traded away, or resized. [`synchronize`] screens the
//! persisted set once at load and reports every anomaly instead of
//! throwing; callers decide how to react (clear a carried flag, warn the
//! user) and the grid then stabilizes on the validated set.
//!
//! Overlaps found here are corruption, not swap opportunities: nothing
//! distinguishes which member of an overlapping pair was written wrong, so
//! every record touching another is discarded.

use rustc_hash::{FxHashMap, FxHashSet};

use stow_core::grid::GridBounds;
use stow_core::item::PlaceableItem;
use stow_core::record::{ItemId, PlacementRecord};

/// The outcome of synchronizing persisted records with the item collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Records that survived screening; the new authoritative set.
    pub records: Vec<PlacementRecord>,
    /// Ids of records whose item no longer exists. The records are gone;
    /// nothing else to do.
    pub orphaned: Vec<ItemId>,
    /// Items flagged as carried whose placement could not be trusted
    /// (failed screening or never persisted). Callers should clear the
    /// carried flag and surface a warning.
    pub dropped: Vec<ItemId>,
}

impl SyncReport {
    /// Whether the persisted set matched the item collection exactly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.orphaned.is_empty() && self.dropped.is_empty()
    }
}

/// Reconcile persisted records against the current item collection.
///
/// Pure over its inputs; mutates nothing. In order:
/// 1. Records referencing unknown items are reported as `orphaned`.
/// 2. Duplicate records for one item: the first wins, later ones are
///    discarded silently (the item still has a trusted placement).
/// 3. Known records refresh their footprint from the item source, then
///    must fit the grid bounds and stay clear of *every* other known
///    record; failures put the item id in `dropped`. Mutually overlapping
///    records all drop, since neither side of an overlap can be trusted
///    over the other.
/// 4. Carried items with no surviving record are added to `dropped`.
pub fn synchronize(
    persisted: &[PlacementRecord],
    items: &[PlaceableItem],
    bounds: GridBounds,
) -> SyncReport {
    let by_id: FxHashMap<&ItemId, &PlaceableItem> =
        items.iter().map(|item| (&item.id, item)).collect();

    let mut report = SyncReport::default();
    let mut seen: FxHashSet<&ItemId> = FxHashSet::default();

    let mut known: Vec<PlacementRecord> = Vec::with_capacity(persisted.len());
    for record in persisted {
        let Some(item) = by_id.get(&record.item_id) else {
            if !report.orphaned.contains(&record.item_id) {
                report.orphaned.push(record.item_id.clone());
            }
            continue;
        };
        if !seen.insert(&record.item_id) {
            continue;
        }
        let mut refreshed = record.clone();
        refreshed.footprint = item.footprint;
        known.push(refreshed);
    }

    for (index, record) in known.iter().enumerate() {
        let rect = record.rect();
        let fits = bounds.contains_rect(&rect);
        let collides = known
            .iter()
            .enumerate()
            .any(|(other, candidate)| other != index && candidate.rect().intersects(&rect));
        if fits && !collides {
            report.records.push(record.clone());
        } else {
            report.dropped.push(record.item_id.clone());
        }
    }

    let placed: FxHashSet<&ItemId> = report.records.iter().map(|r| &r.item_id).collect();
    for item in items {
        if item.carried && !placed.contains(&item.id) && !report.dropped.contains(&item.id) {
            report.dropped.push(item.id.clone());
        }
    }

    #[cfg(feature = "tracing")]
    if !report.is_clean() {
        tracing::warn!(
            orphaned = report.orphaned.len(),
            dropped = report.dropped.len(),
            "grid synchronization found stale placements"
        );
    }

    report
}
