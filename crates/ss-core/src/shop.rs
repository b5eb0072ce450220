//! Shop stock templates and shop instances.

use serde::{Deserialize, Serialize};

use crate::catalog::ItemKind;
use crate::storage::SlotStorage;

/// The three kinds of shop that can appear on a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopKind {
    /// Tools and logs.
    General,
    /// Knives and bows.
    Archery,
    /// Axes, pickaxes and ore.
    Blacksmith,
}

impl ShopKind {
    /// Sign text, e.g. `"General Store"`.
    pub fn title(self) -> &'static str {
        match self {
            Self::General => "General Shop",
            Self::Archery => "Archery Shop",
            Self::Blacksmith => "Blacksmith Shop",
        }
    }

    /// Opening stock, in slot order.
    pub fn stock(self) -> &'static [(ItemKind, usize)] {
        use ItemKind::*;
        match self {
            Self::General => &[
                (CopperAxe, 2),
                (CopperPickaxe, 2),
                (Tinderbox, 3),
                (Knife, 3),
                (OakLog, 10),
                (WillowLog, 5),
            ],
            Self::Archery => &[
                (OakShortbow, 5),
                (WillowShortbow, 5),
                (MapleShortbow, 3),
                (YewShortbow, 2),
                (MagicShortbow, 1),
            ],
            Self::Blacksmith => &[
                (CopperAxe, 5),
                (SteelAxe, 5),
                (MithrilAxe, 5),
                (AdamantAxe, 3),
                (CopperPickaxe, 5),
                (SteelPickaxe, 5),
                (MithrilPickaxe, 5),
                (AdamantPickaxe, 3),
            ],
        }
    }
}

/// One shop counter. Every shop tile owns its own instance, so two general
/// shops on different maps keep separate stock.
#[derive(Debug)]
pub struct Shop {
    kind: ShopKind,
    storage: SlotStorage,
}

impl Shop {
    /// An empty shop with `capacity` stock slots.
    pub fn new(kind: ShopKind, capacity: usize) -> Self {
        Self {
            kind,
            storage: SlotStorage::with_stock(capacity, kind.stock()),
        }
    }

    /// Which shop this is.
    pub fn kind(&self) -> ShopKind {
        self.kind
    }

    /// Shorthand for `kind().title()`.
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// The shop's stock.
    pub fn storage(&self) -> &SlotStorage {
        &self.storage
    }

    /// Mutable access to the stock.
    pub fn storage_mut(&mut self) -> &mut SlotStorage {
        &mut self.storage
    }

    /// Status line for inspecting a stocked item.
    pub fn buy_quote(kind: ItemKind) -> String {
        format!("{} costs {}g to buy", kind.title(), kind.buy_price())
    }

    /// Status line for inspecting one of the player's items at the counter.
    pub fn sell_quote(kind: ItemKind) -> String {
        format!("{} sells for {}g", kind.title(), kind.sell_price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shops_open_with_their_stock() {
        let general = Shop::new(ShopKind::General, 100);
        assert_eq!(general.title(), "General Shop");
        assert_eq!(general.storage().count_of(ItemKind::OakLog), 10);
        assert_eq!(general.storage().active_count(), 6);

        let smith = Shop::new(ShopKind::Blacksmith, 100);
        assert_eq!(smith.storage().count_of(ItemKind::AdamantPickaxe), 3);
        assert_eq!(smith.storage().space_remaining(), 92);
    }

    #[test]
    fn quotes_read_as_status_text() {
        assert_eq!(
            Shop::buy_quote(ItemKind::MagicShortbow),
            "Magic Shortbow costs 1000g to buy"
        );
        assert_eq!(Shop::sell_quote(ItemKind::OakLog), "Oak Log sells for 10g");
    }
}
