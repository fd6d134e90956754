//! Ordered queue mirror built from incremental id-level deltas.

use std::collections::HashMap;

use tracing::debug;

use cast_model::{ItemId, QueueItem};

/// Mirror of the receiver's playback queue.
///
/// Ordering (`order`) and content (`items`) are tracked separately
/// because the SDK reports them separately. Content is populated only
/// by [`QueueReconciler::on_items_fetched`]; every other operation is
/// id-only. Invariants:
///
/// - `order` never contains duplicate ids;
/// - [`QueueReconciler::ordered_snapshot`] only yields ids whose
///   content is present, so the host never sees ids without content.
pub struct QueueReconciler {
    /// Authoritative ordering of known item ids
    order: Vec<ItemId>,
    /// Content cache keyed by item id, populated asynchronously
    items: HashMap<ItemId, QueueItem>,
}

impl QueueReconciler {
    /// Create an empty reconciler
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
        }
    }

    /// Wholesale replacement of the queue ordering.
    ///
    /// Returns the ids whose content is not yet cached and must be
    /// fetched. Duplicate ids in the notification keep their first
    /// occurrence. Content for ids that dropped out of the list is
    /// evicted; a fetch already in flight for such an id will merge
    /// into an orphaned slot and be evicted again on the next
    /// replacement, which is harmless.
    pub fn on_full_id_list(&mut self, ids: Vec<ItemId>) -> Vec<ItemId> {
        self.order.clear();
        for id in ids {
            if !self.order.contains(&id) {
                self.order.push(id);
            }
        }
        self.items.retain(|id, _| self.order.contains(id));

        self.order
            .iter()
            .copied()
            .filter(|id| !self.items.contains_key(id))
            .collect()
    }

    /// Splice inserted ids before the given anchor.
    ///
    /// An absent or unknown anchor degrades to append: a late insert
    /// notification whose anchor was already removed must not be
    /// dropped, so losing strict ordering fidelity is preferred over
    /// losing the item. Ids already present — in `order` or earlier in
    /// the same batch — keep their first position, but every given id
    /// is returned for (re)fetch — an insert notification implies the
    /// receiver considers their content current.
    pub fn on_items_inserted(&mut self, ids: Vec<ItemId>, before: Option<ItemId>) -> Vec<ItemId> {
        let mut fresh: Vec<ItemId> = Vec::new();
        for id in ids.iter().copied() {
            if !self.order.contains(&id) && !fresh.contains(&id) {
                fresh.push(id);
            }
        }

        let anchor = before.and_then(|b| self.order.iter().position(|id| *id == b));
        match anchor {
            Some(index) => {
                self.order.splice(index..index, fresh);
            }
            None => {
                if before.is_some() {
                    debug!(?before, "insert anchor unknown, appending");
                }
                self.order.extend(fresh);
            }
        }

        ids
    }

    /// Remove ids from both ordering and content.
    ///
    /// Idempotent: ids not present are no-ops, never errors — removal
    /// notifications can race a prior full-list replacement. Returns
    /// `true` when anything was actually removed.
    pub fn on_items_removed(&mut self, ids: &[ItemId]) -> bool {
        let len_before = self.order.len();
        self.order.retain(|id| !ids.contains(id));
        for id in ids {
            self.items.remove(id);
        }
        self.order.len() != len_before
    }

    /// Mark content for the given ids stale.
    ///
    /// Ordering is untouched; the ids are returned for refetch whether
    /// or not their content was ever cached (a change notification can
    /// arrive before the first fetch completes).
    pub fn on_items_changed(&self, ids: Vec<ItemId>) -> Vec<ItemId> {
        ids
    }

    /// Merge fetched content into the cache.
    ///
    /// The only operation that populates content. Arrives
    /// asynchronously and possibly out of order relative to id-level
    /// deltas; results for ids that have since been removed become
    /// orphaned writes, evicted lazily on the next wholesale
    /// replacement.
    pub fn on_items_fetched(&mut self, fetched: Vec<QueueItem>) {
        for item in fetched {
            if !self.order.contains(&item.item_id) {
                debug!(item = %item.item_id, "fetched content for id no longer in queue");
            }
            self.items.insert(item.item_id, item);
        }
    }

    /// The ordered queue as currently known.
    ///
    /// Ids whose content has not yet arrived are silently skipped — a
    /// transient gap while fetches are in flight, not an error. The
    /// caller re-emits once a completing fetch closes the gap.
    pub fn ordered_snapshot(&self) -> Vec<QueueItem> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id).cloned())
            .collect()
    }

    /// Session ended: drop ordering and content.
    pub fn clear(&mut self) {
        self.order.clear();
        self.items.clear();
    }

    /// Number of ids in the ordering (fetched or not)
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    fn order_ids(&self) -> &[ItemId] {
        &self.order
    }
}

impl Default for QueueReconciler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cast_model::MediaInfo;
    use proptest::prelude::*;

    fn ids(raw: &[u32]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId::new).collect()
    }

    fn item(id: u32) -> QueueItem {
        QueueItem::new(
            ItemId::new(id),
            MediaInfo::new(format!("http://media/{id}"), "video/mp4"),
        )
    }

    #[test]
    fn test_full_id_list_replaces_order() {
        let mut queue = QueueReconciler::new();
        let to_fetch = queue.on_full_id_list(ids(&[1, 2, 3]));
        assert_eq!(to_fetch, ids(&[1, 2, 3]));
        assert_eq!(queue.order_ids(), ids(&[1, 2, 3]).as_slice());

        let to_fetch = queue.on_full_id_list(ids(&[3, 4]));
        assert_eq!(queue.order_ids(), ids(&[3, 4]).as_slice());
        assert_eq!(to_fetch, ids(&[3, 4]));
    }

    #[test]
    fn test_full_id_list_skips_cached_content() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2]));
        queue.on_items_fetched(vec![item(1)]);

        let to_fetch = queue.on_full_id_list(ids(&[1, 2]));
        assert_eq!(to_fetch, ids(&[2]));
    }

    #[test]
    fn test_full_id_list_dedups_first_occurrence() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2, 1, 3, 2]));
        assert_eq!(queue.order_ids(), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn test_insert_before_known_anchor() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2]));
        queue.on_items_inserted(ids(&[3]), Some(ItemId::new(2)));
        assert_eq!(queue.order_ids(), ids(&[1, 3, 2]).as_slice());
    }

    #[test]
    fn test_insert_before_unknown_anchor_appends() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2]));
        queue.on_items_inserted(ids(&[3]), Some(ItemId::new(99)));
        assert_eq!(queue.order_ids(), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn test_insert_without_anchor_appends() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1]));
        queue.on_items_inserted(ids(&[2, 3]), None);
        assert_eq!(queue.order_ids(), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn test_duplicate_insert_keeps_position_but_refetches() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2, 3]));

        let to_fetch = queue.on_items_inserted(ids(&[2]), Some(ItemId::new(1)));
        assert_eq!(queue.order_ids(), ids(&[1, 2, 3]).as_slice());
        assert_eq!(to_fetch, ids(&[2]), "duplicate insert still refetches");
    }

    #[test]
    fn test_insert_batch_with_repeated_id_keeps_one() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2]));

        let to_fetch = queue.on_items_inserted(ids(&[3, 3]), None);
        assert_eq!(queue.order_ids(), ids(&[1, 2, 3]).as_slice());
        assert_eq!(to_fetch, ids(&[3, 3]), "every given id still refetched");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2, 3]));

        assert!(queue.on_items_removed(&ids(&[2])));
        assert_eq!(queue.order_ids(), ids(&[1, 3]).as_slice());

        assert!(!queue.on_items_removed(&ids(&[2])));
        assert_eq!(queue.order_ids(), ids(&[1, 3]).as_slice());

        // Absent ids are a no-op, never an error.
        assert!(!queue.on_items_removed(&ids(&[42])));
    }

    #[test]
    fn test_snapshot_skips_unfetched_ids() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2]));
        assert!(queue.ordered_snapshot().is_empty());

        queue.on_items_fetched(vec![item(1)]);
        let snapshot = queue.ordered_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].item_id, ItemId::new(1));

        queue.on_items_fetched(vec![item(2)]);
        assert_eq!(queue.ordered_snapshot().len(), 2);
    }

    #[test]
    fn test_snapshot_follows_order_not_fetch_completion() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[3, 1, 2]));
        queue.on_items_fetched(vec![item(2), item(3), item(1)]);

        let snapshot: Vec<u32> = queue
            .ordered_snapshot()
            .iter()
            .map(|i| i.item_id.get())
            .collect();
        assert_eq!(snapshot, vec![3, 1, 2]);
    }

    #[test]
    fn test_changed_requests_refetch_without_touching_order() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2]));
        queue.on_items_fetched(vec![item(1), item(2)]);

        let to_fetch = queue.on_items_changed(ids(&[1]));
        assert_eq!(to_fetch, ids(&[1]));
        assert_eq!(queue.order_ids(), ids(&[1, 2]).as_slice());
    }

    #[test]
    fn test_orphaned_fetch_result_is_harmless() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2]));
        queue.on_items_removed(&ids(&[2]));

        // Fetch dispatched before the removal completes after it.
        queue.on_items_fetched(vec![item(2)]);
        let snapshot = queue.ordered_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].item_id, ItemId::new(1));

        // Wholesale replacement evicts the orphaned slot.
        queue.on_full_id_list(ids(&[1]));
        assert_eq!(queue.ordered_snapshot().len(), 1);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut queue = QueueReconciler::new();
        queue.on_full_id_list(ids(&[1, 2]));
        queue.on_items_fetched(vec![item(1), item(2)]);

        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.ordered_snapshot().is_empty());
    }

    // Delta operations for the property tests below.
    #[derive(Debug, Clone)]
    enum Op {
        FullList(Vec<u32>),
        Insert(Vec<u32>, Option<u32>),
        Remove(Vec<u32>),
        Fetch(Vec<u32>),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let id = 0u32..16;
        prop_oneof![
            proptest::collection::vec(id.clone(), 0..8).prop_map(Op::FullList),
            (
                proptest::collection::vec(id.clone(), 0..4),
                proptest::option::of(id.clone())
            )
                .prop_map(|(ids, before)| Op::Insert(ids, before)),
            proptest::collection::vec(id.clone(), 0..4).prop_map(Op::Remove),
            proptest::collection::vec(id, 0..4).prop_map(Op::Fetch),
        ]
    }

    proptest! {
        #[test]
        fn prop_order_never_contains_duplicates(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let mut queue = QueueReconciler::new();
            for op in ops {
                match op {
                    Op::FullList(raw) => { queue.on_full_id_list(ids(&raw)); }
                    Op::Insert(raw, before) => {
                        queue.on_items_inserted(ids(&raw), before.map(ItemId::new));
                    }
                    Op::Remove(raw) => { queue.on_items_removed(&ids(&raw)); }
                    Op::Fetch(raw) => {
                        queue.on_items_fetched(raw.into_iter().map(item).collect());
                    }
                }

                let order = queue.order_ids();
                let mut seen = std::collections::HashSet::new();
                prop_assert!(order.iter().all(|id| seen.insert(*id)), "duplicate id in order");
                prop_assert!(queue.ordered_snapshot().len() <= order.len());
            }
        }

        #[test]
        fn prop_remove_is_idempotent(
            initial in proptest::collection::vec(0u32..16, 0..10),
            removed in proptest::collection::vec(0u32..16, 0..6),
        ) {
            let mut once = QueueReconciler::new();
            once.on_full_id_list(ids(&initial));
            once.on_items_removed(&ids(&removed));

            let mut twice = QueueReconciler::new();
            twice.on_full_id_list(ids(&initial));
            twice.on_items_removed(&ids(&removed));
            twice.on_items_removed(&ids(&removed));

            prop_assert_eq!(once.order_ids(), twice.order_ids());
        }
    }
}
