//! The item catalog: every concrete item kind and its static properties.
//!
//! Item kinds form a closed set. Behaviour that differs per kind (prices,
//! tool tiers, log requirements) is looked up from the kind itself rather
//! than carried on individual items. [`ItemKind::ALL`] doubles as the sort
//! rank used when a storage grid is sorted.

use serde::{Deserialize, Serialize};

/// Broad category of an item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Something wielded against a node or a resource.
    Tool,
    /// Raw material gathered from nodes.
    Resource,
    /// A crafted weapon.
    Weapon,
}

/// Which node or resource a tool works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolFamily {
    /// Lights logs.
    Tinderbox,
    /// Shapes logs into bows.
    Knife,
    /// Chops trees.
    Axe,
    /// Mines rocks.
    Pickaxe,
}

/// Material tier of an axe or pickaxe. Ordered weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolTier {
    /// Strength 1, level 1.
    Copper,
    /// Strength 3, level 5.
    Steel,
    /// Strength 6, level 10.
    Mithril,
    /// Strength 10, level 12.
    Adamant,
}

impl ToolTier {
    /// Relative strength used to pick the best tool in an inventory.
    pub fn strength(self) -> u32 {
        match self {
            Self::Copper => 1,
            Self::Steel => 3,
            Self::Mithril => 6,
            Self::Adamant => 10,
        }
    }

    /// Skill level needed to wield a tool of this tier.
    pub fn skill_level_required(self) -> u32 {
        match self {
            Self::Copper => 1,
            Self::Steel => 5,
            Self::Mithril => 10,
            Self::Adamant => 12,
        }
    }
}

/// Kind of raw resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceClass {
    /// Chopped from trees; can be burned or fletched.
    Log,
    /// Mined from rocks.
    Ore,
}

/// Static tool attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    /// What the tool works on.
    pub family: ToolFamily,
    /// Material tier; `None` for tinderboxes and knives.
    pub tier: Option<ToolTier>,
    /// Minimum level in the tool's skill.
    pub skill_level_required: u32,
}

impl ToolSpec {
    /// Strength of the tool; untiered tools have strength 0.
    pub fn strength(&self) -> u32 {
        self.tier.map(ToolTier::strength).unwrap_or(0)
    }
}

/// Static log attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSpec {
    /// Fletching level needed to carve this log.
    pub fletching_required: u32,
    /// Firemaking level needed to burn this log.
    pub firemaking_required: u32,
    /// Ticks a fire made from this log keeps burning.
    pub fire_ticks: u32,
    /// The bow a knife carves from this log.
    pub shortbow: ItemKind,
}

/// A concrete, instantiable item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Lights logs for firemaking.
    Tinderbox,
    /// Carves logs into bows.
    Knife,
    /// Tier 1 axe.
    CopperAxe,
    /// Tier 2 axe.
    SteelAxe,
    /// Tier 3 axe.
    MithrilAxe,
    /// Tier 4 axe.
    AdamantAxe,
    /// Tier 1 pickaxe.
    CopperPickaxe,
    /// Tier 2 pickaxe.
    SteelPickaxe,
    /// Tier 3 pickaxe.
    MithrilPickaxe,
    /// Tier 4 pickaxe.
    AdamantPickaxe,
    /// From oak trees.
    OakLog,
    /// From willow trees.
    WillowLog,
    /// From maple trees.
    MapleLog,
    /// From yew trees.
    YewLog,
    /// From magic trees.
    MagicLog,
    /// From copper rocks.
    CopperOre,
    /// From tin rocks.
    TinOre,
    /// From coal rocks.
    CoalOre,
    /// From iron rocks.
    IronOre,
    /// From gold rocks.
    GoldOre,
    /// Fletched from an oak log.
    OakShortbow,
    /// Fletched from a willow log.
    WillowShortbow,
    /// Fletched from a maple log.
    MapleShortbow,
    /// Fletched from a yew log.
    YewShortbow,
    /// Fletched from a magic log.
    MagicShortbow,
}

impl ItemKind {
    /// Every kind, in catalog sort order.
    pub const ALL: [ItemKind; 25] = [
        Self::Tinderbox,
        Self::Knife,
        Self::CopperAxe,
        Self::SteelAxe,
        Self::MithrilAxe,
        Self::AdamantAxe,
        Self::CopperPickaxe,
        Self::SteelPickaxe,
        Self::MithrilPickaxe,
        Self::AdamantPickaxe,
        Self::OakLog,
        Self::WillowLog,
        Self::MapleLog,
        Self::YewLog,
        Self::MagicLog,
        Self::CopperOre,
        Self::TinOre,
        Self::CoalOre,
        Self::IronOre,
        Self::GoldOre,
        Self::OakShortbow,
        Self::WillowShortbow,
        Self::MapleShortbow,
        Self::YewShortbow,
        Self::MagicShortbow,
    ];

    /// Position in [`ItemKind::ALL`]; the total order used by sorting.
    pub fn rank(self) -> usize {
        Self::ALL
            .iter()
            .position(|k| *k == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Display name, e.g. `"Oak Log"`.
    pub fn title(self) -> &'static str {
        match self {
            Self::Tinderbox => "Tinderbox",
            Self::Knife => "Knife",
            Self::CopperAxe => "Copper Axe",
            Self::SteelAxe => "Steel Axe",
            Self::MithrilAxe => "Mithril Axe",
            Self::AdamantAxe => "Adamant Axe",
            Self::CopperPickaxe => "Copper Pickaxe",
            Self::SteelPickaxe => "Steel Pickaxe",
            Self::MithrilPickaxe => "Mithril Pickaxe",
            Self::AdamantPickaxe => "Adamant Pickaxe",
            Self::OakLog => "Oak Log",
            Self::WillowLog => "Willow Log",
            Self::MapleLog => "Maple Log",
            Self::YewLog => "Yew Log",
            Self::MagicLog => "Magic Log",
            Self::CopperOre => "Copper Ore",
            Self::TinOre => "Tin Ore",
            Self::CoalOre => "Coal Ore",
            Self::IronOre => "Iron Ore",
            Self::GoldOre => "Gold Ore",
            Self::OakShortbow => "Oak Shortbow",
            Self::WillowShortbow => "Willow Shortbow",
            Self::MapleShortbow => "Maple Shortbow",
            Self::YewShortbow => "Yew Shortbow",
            Self::MagicShortbow => "Magic Shortbow",
        }
    }

    /// Flavour text shown when the item is examined.
    pub fn description(self) -> &'static str {
        match self {
            Self::Tinderbox => "Tinderbox for lighting logs",
            Self::Knife => "Knife for shaping logs into items like bows",
            Self::CopperAxe | Self::SteelAxe | Self::MithrilAxe | Self::AdamantAxe => {
                "Axe for chopping down trees"
            }
            Self::CopperPickaxe
            | Self::SteelPickaxe
            | Self::MithrilPickaxe
            | Self::AdamantPickaxe => "Pickaxe for mining rocks",
            Self::OakLog
            | Self::WillowLog
            | Self::MapleLog
            | Self::YewLog
            | Self::MagicLog => "Log obtained from chopping a tree with an axe",
            Self::CopperOre | Self::TinOre | Self::CoalOre | Self::IronOre | Self::GoldOre => {
                "Ore obtained from mining a rock with a pickaxe"
            }
            Self::OakShortbow
            | Self::WillowShortbow
            | Self::MapleShortbow
            | Self::YewShortbow
            | Self::MagicShortbow => "Shortbow carved from a log for firing arrows",
        }
    }

    /// Tool, resource or product.
    pub fn category(self) -> ItemCategory {
        if self.tool().is_some() {
            ItemCategory::Tool
        } else if self.resource_class().is_some() {
            ItemCategory::Resource
        } else {
            ItemCategory::Weapon
        }
    }

    /// Gold a shop pays for one of these.
    pub fn sell_price(self) -> u64 {
        self.prices().0
    }

    /// Gold a shop charges for one of these.
    pub fn buy_price(self) -> u64 {
        self.prices().1
    }

    fn prices(self) -> (u64, u64) {
        match self {
            Self::Tinderbox => (10, 100),
            Self::Knife => (10, 75),
            Self::CopperAxe | Self::CopperPickaxe => (75, 200),
            Self::SteelAxe | Self::SteelPickaxe => (125, 500),
            Self::MithrilAxe | Self::MithrilPickaxe => (250, 1500),
            Self::AdamantAxe | Self::AdamantPickaxe => (400, 2500),
            Self::OakLog => (10, 50),
            Self::WillowLog => (30, 100),
            Self::MapleLog => (50, 150),
            Self::YewLog => (75, 200),
            Self::MagicLog => (100, 500),
            Self::CopperOre | Self::TinOre => (15, 30),
            Self::CoalOre => (30, 75),
            Self::IronOre => (60, 150),
            Self::GoldOre => (60, 100),
            Self::OakShortbow => (30, 150),
            Self::WillowShortbow => (50, 200),
            Self::MapleShortbow => (100, 400),
            Self::YewShortbow => (125, 600),
            Self::MagicShortbow => (200, 1000),
        }
    }

    /// Tool attributes, if this kind is a tool.
    pub fn tool(self) -> Option<ToolSpec> {
        let (family, tier) = match self {
            Self::Tinderbox => (ToolFamily::Tinderbox, None),
            Self::Knife => (ToolFamily::Knife, None),
            Self::CopperAxe => (ToolFamily::Axe, Some(ToolTier::Copper)),
            Self::SteelAxe => (ToolFamily::Axe, Some(ToolTier::Steel)),
            Self::MithrilAxe => (ToolFamily::Axe, Some(ToolTier::Mithril)),
            Self::AdamantAxe => (ToolFamily::Axe, Some(ToolTier::Adamant)),
            Self::CopperPickaxe => (ToolFamily::Pickaxe, Some(ToolTier::Copper)),
            Self::SteelPickaxe => (ToolFamily::Pickaxe, Some(ToolTier::Steel)),
            Self::MithrilPickaxe => (ToolFamily::Pickaxe, Some(ToolTier::Mithril)),
            Self::AdamantPickaxe => (ToolFamily::Pickaxe, Some(ToolTier::Adamant)),
            _ => return None,
        };
        Some(ToolSpec {
            family,
            tier,
            skill_level_required: tier.map(ToolTier::skill_level_required).unwrap_or(1),
        })
    }

    /// Resources carry a skill and a level requirement; other kinds return `None`.
    pub fn resource_class(self) -> Option<ResourceClass> {
        match self {
            Self::OakLog | Self::WillowLog | Self::MapleLog | Self::YewLog | Self::MagicLog => {
                Some(ResourceClass::Log)
            }
            Self::CopperOre | Self::TinOre | Self::CoalOre | Self::IronOre | Self::GoldOre => {
                Some(ResourceClass::Ore)
            }
            _ => None,
        }
    }

    /// Log attributes, if this kind is a log.
    pub fn log(self) -> Option<LogSpec> {
        let (fletching_required, firemaking_required, fire_ticks, shortbow) = match self {
            Self::OakLog => (1, 1, 10, Self::OakShortbow),
            Self::WillowLog => (4, 5, 15, Self::WillowShortbow),
            Self::MapleLog => (6, 8, 20, Self::MapleShortbow),
            Self::YewLog => (8, 10, 30, Self::YewShortbow),
            Self::MagicLog => (12, 12, 60, Self::MagicShortbow),
            _ => return None,
        };
        Some(LogSpec {
            fletching_required,
            firemaking_required,
            fire_ticks,
            shortbow,
        })
    }

    /// Look up a kind by its title, ignoring case and surrounding whitespace.
    /// Underscores and hyphens count as spaces so `oak_log` resolves.
    pub fn from_title(title: &str) -> Option<Self> {
        let wanted = title.trim().replace(['_', '-'], " ").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.title().to_lowercase() == wanted)
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A single item. Items carry no state beyond their kind and are moved, never
/// cloned, between containers.
#[derive(Debug, PartialEq, Eq)]
pub struct Item {
    kind: ItemKind,
}

impl Item {
    /// A single item of `kind`.
    pub fn new(kind: ItemKind) -> Self {
        Self { kind }
    }

    /// Make `count` fresh items of one kind.
    pub fn batch(kind: ItemKind, count: usize) -> Vec<Item> {
        (0..count).map(|_| Self::new(kind)).collect()
    }

    /// What the item is.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }
}
