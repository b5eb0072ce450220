//! The player's inventory: single-item slots, a gold pouch, and the current
//! item selection.

use crate::catalog::{Item, ItemCategory, ItemKind, ToolFamily};
use crate::error::{Outcome, Rejection};
use crate::skills::SkillSet;

/// Items every new character carries.
pub const STARTER_KIT: [ItemKind; 4] = [
    ItemKind::CopperAxe,
    ItemKind::CopperPickaxe,
    ItemKind::Tinderbox,
    ItemKind::Knife,
];

/// Result of clicking an inventory slot while the map is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing was selected before; now this slot is.
    Selected(usize),
    /// The selected slot was clicked again.
    Deselected,
    /// A second slot was clicked; the pair is a tool and a resource.
    Combine {
        /// Slot holding the tool.
        tool: usize,
        /// Slot holding the resource.
        resource: usize,
    },
    /// The slot is empty; selection is unchanged.
    Ignored,
}

/// A grid of slots that each hold at most one item.
///
/// Unlike the bank, the inventory never stacks: 28 logs occupy 28 slots.
#[derive(Debug)]
pub struct Inventory {
    slots: Vec<Option<Item>>,
    gold: u64,
    selected: Option<usize>,
}

impl Inventory {
    /// An empty inventory.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, gold: u64) -> Self {
        assert!(capacity > 0, "inventory needs at least one slot");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            gold,
            selected: None,
        }
    }

    /// An inventory holding the starter kit.
    pub fn with_starter_kit(capacity: usize, gold: u64) -> Self {
        let mut inventory = Self::new(capacity, gold);
        let kit: Vec<Item> = STARTER_KIT
            .iter()
            .take(capacity)
            .map(|k| Item::new(*k))
            .collect();
        inventory.add(kit);
        inventory
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Every slot, empty ones included.
    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }

    /// Kind in a slot, `None` for empty or out-of-range slots.
    pub fn kind_at(&self, index: usize) -> Option<ItemKind> {
        self.slots.get(index)?.as_ref().map(Item::kind)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when no slot is empty.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Number of empty slots.
    pub fn space_remaining(&self) -> usize {
        self.capacity() - self.len()
    }

    /// How many items of `kind` the inventory holds.
    pub fn count_of(&self, kind: ItemKind) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|i| i.kind() == kind)
            .count()
    }

    /// Distinct kinds held, in the order each is first met in slot order.
    pub fn kinds_in_order(&self) -> Vec<(ItemKind, usize)> {
        let mut out: Vec<(ItemKind, usize)> = Vec::new();
        for item in self.slots.iter().flatten() {
            match out.iter_mut().find(|(k, _)| *k == item.kind()) {
                Some((_, n)) => *n += 1,
                None => out.push((item.kind(), 1)),
            }
        }
        out
    }

    /// Place items into the first empty slots, in order.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty or larger than the free space.
    pub fn add(&mut self, items: Vec<Item>) {
        assert!(
            !items.is_empty() && items.len() <= self.space_remaining(),
            "cannot add {} items with {} slots free",
            items.len(),
            self.space_remaining()
        );
        let mut empties = self.slots.iter_mut().filter(|s| s.is_none());
        for item in items {
            if let Some(slot) = empties.next() {
                *slot = Some(item);
            }
        }
    }

    /// Take up to `amount` items of `kind`, earliest slots first.
    pub fn remove_kind(&mut self, kind: ItemKind, amount: usize) -> Vec<Item> {
        let mut taken = Vec::new();
        for slot in &mut self.slots {
            if taken.len() == amount {
                break;
            }
            if slot.as_ref().is_some_and(|i| i.kind() == kind) {
                taken.extend(slot.take());
            }
        }
        taken
    }

    /// Empty a single slot.
    pub fn take(&mut self, index: usize) -> Option<Item> {
        self.slots.get_mut(index)?.take()
    }

    /// Put an item into a specific empty slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is occupied or out of range.
    pub fn put(&mut self, index: usize, item: Item) {
        let slot = &mut self.slots[index];
        assert!(slot.is_none(), "slot {index} is occupied");
        *slot = Some(item);
    }

    /// The strongest tool of `family` the player can wield. The earliest slot
    /// wins ties.
    pub fn best_tool(&self, family: ToolFamily, skills: &SkillSet) -> Option<ItemKind> {
        let mut best: Option<(ItemKind, u32)> = None;
        for item in self.slots.iter().flatten() {
            let Some(spec) = item.kind().tool() else {
                continue;
            };
            if spec.family != family || !skills.can_use(item.kind()) {
                continue;
            }
            if best.is_none_or(|(_, strength)| spec.strength() > strength) {
                best = Some((item.kind(), spec.strength()));
            }
        }
        best.map(|(kind, _)| kind)
    }

    /// Gold carried.
    pub fn gold(&self) -> u64 {
        self.gold
    }

    /// Add gold.
    pub fn credit(&mut self, amount: u64) {
        self.gold += amount;
    }

    /// # Panics
    ///
    /// Panics if the pouch holds less than `amount`.
    pub fn debit(&mut self, amount: u64) {
        assert!(amount <= self.gold, "cannot pay {amount} from {}", self.gold);
        self.gold -= amount;
    }

    /// Index of the selected slot, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Click a slot: select it, deselect it, or pair it with the current
    /// selection. Pairing always clears the selection.
    pub fn select(&mut self, index: usize) -> Outcome<Selection> {
        let Some(clicked) = self.kind_at(index) else {
            return Ok(Selection::Ignored);
        };
        let Some(current) = self.selected else {
            self.selected = Some(index);
            return Ok(Selection::Selected(index));
        };
        self.selected = None;
        if current == index {
            return Ok(Selection::Deselected);
        }
        let held = self.kind_at(current).map(ItemKind::category);
        match (held, clicked.category()) {
            (Some(ItemCategory::Tool), ItemCategory::Resource) => Ok(Selection::Combine {
                tool: current,
                resource: index,
            }),
            (Some(ItemCategory::Resource), ItemCategory::Tool) => Ok(Selection::Combine {
                tool: index,
                resource: current,
            }),
            _ => Err(Rejection::NotToolAndResource),
        }
    }
}
