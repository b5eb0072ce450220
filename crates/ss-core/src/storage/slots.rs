//! Fixed-capacity slot grids keyed by item kind, as used by the bank and shops.

use crate::catalog::{Item, ItemKind};

/// One cell of a [`SlotStorage`]: empty, or a stack of a single kind.
#[derive(Debug, Default)]
pub struct Slot {
    items: Vec<Item>,
}

impl Slot {
    /// The kind held, or `None` when the slot is empty.
    pub fn kind(&self) -> Option<ItemKind> {
        self.items.first().map(Item::kind)
    }

    /// Items held, 0 for an empty slot.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// True when the slot holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A fixed array of slots. At most one slot holds any given kind, and a slot
/// is active exactly when it holds at least one item.
#[derive(Debug)]
pub struct SlotStorage {
    slots: Vec<Slot>,
}

impl SlotStorage {
    /// An all-empty grid of `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "storage needs at least one slot");
        Self {
            slots: (0..capacity).map(|_| Slot::default()).collect(),
        }
    }

    /// A grid pre-filled with `count` fresh items of each listed kind.
    pub fn with_stock(capacity: usize, stock: &[(ItemKind, usize)]) -> Self {
        let mut storage = Self::new(capacity);
        for &(kind, count) in stock {
            if count > 0 {
                storage.add(Item::batch(kind, count));
            }
        }
        storage
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Every slot, in display order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// `None` when `index` is out of range.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Index of the slot holding `kind`.
    pub fn find_slot_for_kind(&self, kind: ItemKind) -> Option<usize> {
        self.slots.iter().position(|s| s.kind() == Some(kind))
    }

    /// Index of the first slot with no kind assigned.
    pub fn find_first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_empty)
    }

    /// True if `kind` already has a slot or an empty slot is free.
    pub fn has_space_for(&self, kind: ItemKind) -> bool {
        self.find_slot_for_kind(kind).is_some() || self.find_first_empty().is_some()
    }

    /// Append a same-kind batch to the slot for its kind, claiming the first
    /// empty slot if the kind is new.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty, mixes kinds, or does not fit.
    pub fn add(&mut self, items: Vec<Item>) {
        let kind = match items.first() {
            Some(item) => item.kind(),
            None => panic!("cannot add an empty batch"),
        };
        assert!(
            items.iter().all(|i| i.kind() == kind),
            "batch mixes item kinds"
        );
        let index = self
            .find_slot_for_kind(kind)
            .or_else(|| self.find_first_empty());
        let Some(index) = index else {
            panic!("no space for {kind}");
        };
        self.slots[index].items.extend(items);
    }

    /// Take the first `amount` items out of a slot. The slot becomes empty
    /// when its last item leaves.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < amount <= count` for that slot.
    pub fn remove(&mut self, index: usize, amount: usize) -> Vec<Item> {
        let slot = &mut self.slots[index];
        assert!(
            amount > 0 && amount <= slot.count(),
            "cannot remove {amount} from a slot of {}",
            slot.count()
        );
        slot.items.drain(..amount).collect()
    }

    /// Move active slots to the front in catalog order; empty slots follow.
    pub fn sort(&mut self) {
        self.slots
            .sort_by_key(|s| s.kind().map_or(usize::MAX, ItemKind::rank));
    }

    /// Number of slots holding at least one item.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// No empty slot remains. A full grid may still accept kinds it holds.
    pub fn is_full(&self) -> bool {
        self.find_first_empty().is_none()
    }

    /// Number of empty slots.
    pub fn space_remaining(&self) -> usize {
        self.capacity() - self.active_count()
    }

    /// Sum of counts across all slots.
    pub fn total_items(&self) -> usize {
        self.slots.iter().map(Slot::count).sum()
    }

    /// Items of `kind` across all slots.
    pub fn count_of(&self, kind: ItemKind) -> usize {
        self.find_slot_for_kind(kind)
            .map_or(0, |i| self.slots[i].count())
    }

    /// `(kind, count)` for every active slot, in slot order.
    pub fn contents(&self) -> Vec<(ItemKind, usize)> {
        self.slots
            .iter()
            .filter_map(|s| s.kind().map(|k| (k, s.count())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_claims_first_empty_then_merges() {
        let mut storage = SlotStorage::new(3);
        storage.add(Item::batch(ItemKind::OakLog, 2));
        storage.add(Item::batch(ItemKind::CopperOre, 1));
        storage.add(Item::batch(ItemKind::OakLog, 3));
        assert_eq!(storage.find_slot_for_kind(ItemKind::OakLog), Some(0));
        assert_eq!(storage.count_of(ItemKind::OakLog), 5);
        assert_eq!(storage.active_count(), 2);
        assert_eq!(storage.space_remaining(), 1);
        assert_eq!(storage.total_items(), 6);
    }

    #[test]
    fn full_grid_still_accepts_known_kinds() {
        let mut storage = SlotStorage::with_stock(1, &[(ItemKind::Knife, 1)]);
        assert!(storage.is_full());
        assert!(storage.has_space_for(ItemKind::Knife));
        assert!(!storage.has_space_for(ItemKind::Tinderbox));
        storage.add(Item::batch(ItemKind::Knife, 4));
        assert_eq!(storage.count_of(ItemKind::Knife), 5);
    }

    #[test]
    fn remove_drains_and_frees_the_slot() {
        let mut storage = SlotStorage::with_stock(2, &[(ItemKind::YewLog, 3)]);
        let taken = storage.remove(0, 2);
        assert_eq!(taken.len(), 2);
        assert_eq!(storage.count_of(ItemKind::YewLog), 1);
        storage.remove(0, 1);
        assert_eq!(storage.slot(0).unwrap().kind(), None);
        assert_eq!(storage.find_first_empty(), Some(0));
    }

    #[test]
    #[should_panic(expected = "cannot remove 4 from a slot of 3")]
    fn removing_too_many_panics() {
        let mut storage = SlotStorage::with_stock(2, &[(ItemKind::YewLog, 3)]);
        storage.remove(0, 4);
    }

    #[test]
    #[should_panic(expected = "batch mixes item kinds")]
    fn mixed_batch_panics() {
        let mut storage = SlotStorage::new(2);
        storage.add(vec![Item::new(ItemKind::OakLog), Item::new(ItemKind::Knife)]);
    }

    #[test]
    #[should_panic(expected = "cannot add an empty batch")]
    fn empty_batch_panics() {
        SlotStorage::new(2).add(Vec::new());
    }

    #[test]
    #[should_panic(expected = "no space for Knife")]
    fn adding_without_space_panics() {
        let mut storage = SlotStorage::with_stock(1, &[(ItemKind::OakLog, 1)]);
        storage.add(Item::batch(ItemKind::Knife, 1));
    }

    #[test]
    fn sort_orders_by_catalog_and_keeps_capacity() {
        let mut storage = SlotStorage::new(5);
        storage.add(Item::batch(ItemKind::MagicShortbow, 1));
        storage.add(Item::batch(ItemKind::GoldOre, 2));
        storage.add(Item::batch(ItemKind::Tinderbox, 1));
        storage.remove(1, 2);
        storage.sort();
        assert_eq!(
            storage.contents(),
            vec![(ItemKind::Tinderbox, 1), (ItemKind::MagicShortbow, 1)]
        );
        assert_eq!(storage.slot(0).unwrap().kind(), Some(ItemKind::Tinderbox));
        assert!(storage.slot(2).unwrap().is_empty());
        assert_eq!(storage.capacity(), 5);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, usize),
        Remove(usize, usize),
        Sort,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..ItemKind::ALL.len(), 1usize..6).prop_map(|(k, n)| Op::Add(k, n)),
            (0usize..8, 1usize..6).prop_map(|(i, n)| Op::Remove(i, n)),
            Just(Op::Sort),
        ]
    }

    fn apply(storage: &mut SlotStorage, op: &Op) {
        match *op {
            Op::Add(k, n) => {
                let kind = ItemKind::ALL[k];
                if storage.has_space_for(kind) {
                    storage.add(Item::batch(kind, n));
                }
            }
            Op::Remove(i, n) => {
                let count = storage.slot(i).map_or(0, Slot::count);
                if count > 0 {
                    storage.remove(i, n.min(count));
                }
            }
            Op::Sort => storage.sort(),
        }
    }

    proptest! {
        #[test]
        fn kinds_stay_unique_and_slots_add_up(ops in prop::collection::vec(op(), 0..60)) {
            let mut storage = SlotStorage::new(8);
            for op in &ops {
                apply(&mut storage, op);
                let kinds: Vec<_> = storage.contents().into_iter().map(|(k, _)| k).collect();
                let mut unique = kinds.clone();
                unique.sort_by_key(|k| k.rank());
                unique.dedup();
                prop_assert_eq!(unique.len(), kinds.len());
                prop_assert_eq!(storage.active_count() + storage.space_remaining(), 8);
                prop_assert_eq!(storage.slots().len(), 8);
            }
        }

        #[test]
        fn sort_is_idempotent(ops in prop::collection::vec(op(), 0..40)) {
            let mut storage = SlotStorage::new(8);
            for op in &ops {
                apply(&mut storage, op);
            }
            storage.sort();
            let once: Vec<_> = storage.slots().iter().map(|s| (s.kind(), s.count())).collect();
            storage.sort();
            let twice: Vec<_> = storage.slots().iter().map(|s| (s.kind(), s.count())).collect();
            prop_assert_eq!(once, twice);
        }
    }
}
