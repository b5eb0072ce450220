//! Trees and rocks: resource nodes that deplete and regenerate.
//!
//! A node is `Active` while it has health left and `Depleted` while it
//! counts down to regrowth. Each successful harvest costs one health; the
//! chance of success is a straight line in the player's skill level, with
//! stronger tools raising the intercept.

use rand::Rng;
use serde::{Deserialize, Serialize};
use ss_core::{
    ExperienceReport, Inventory, Item, ItemKind, Outcome, Rejection, SkillKind, SkillSet,
    ToolFamily, ToolTier, XpAccounting,
};

/// Every kind of tree and rock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Any axe.
    OakTree,
    /// Steel axe or better.
    WillowTree,
    /// Mithril axe or better.
    MapleTree,
    /// Mithril axe or better.
    YewTree,
    /// Adamant axe only.
    MagicTree,
    /// Any pickaxe.
    CopperRock,
    /// Any pickaxe.
    TinRock,
    /// Steel pickaxe or better.
    CoalRock,
    /// Mithril pickaxe or better.
    IronRock,
    /// Adamant pickaxe only.
    GoldRock,
}

impl NodeKind {
    /// Trees weakest first, then rocks weakest first.
    pub const ALL: [NodeKind; 10] = [
        Self::OakTree,
        Self::WillowTree,
        Self::MapleTree,
        Self::YewTree,
        Self::MagicTree,
        Self::CopperRock,
        Self::TinRock,
        Self::CoalRock,
        Self::IronRock,
        Self::GoldRock,
    ];

    /// Display name, e.g. `"Oak Tree"`.
    pub fn title(self) -> &'static str {
        match self {
            Self::OakTree => "Oak Tree",
            Self::WillowTree => "Willow Tree",
            Self::MapleTree => "Maple Tree",
            Self::YewTree => "Yew Tree",
            Self::MagicTree => "Magic Tree",
            Self::CopperRock => "Copper Rock",
            Self::TinRock => "Tin Rock",
            Self::CoalRock => "Coal Rock",
            Self::IronRock => "Iron Rock",
            Self::GoldRock => "Gold Rock",
        }
    }

    /// Axe for trees, pickaxe for rocks.
    pub fn tool_family(self) -> ToolFamily {
        match self {
            Self::OakTree | Self::WillowTree | Self::MapleTree | Self::YewTree | Self::MagicTree => {
                ToolFamily::Axe
            }
            _ => ToolFamily::Pickaxe,
        }
    }

    /// The resource a successful harvest yields.
    pub fn yields(self) -> ItemKind {
        match self {
            Self::OakTree => ItemKind::OakLog,
            Self::WillowTree => ItemKind::WillowLog,
            Self::MapleTree => ItemKind::MapleLog,
            Self::YewTree => ItemKind::YewLog,
            Self::MagicTree => ItemKind::MagicLog,
            Self::CopperRock => ItemKind::CopperOre,
            Self::TinRock => ItemKind::TinOre,
            Self::CoalRock => ItemKind::CoalOre,
            Self::IronRock => ItemKind::IronOre,
            Self::GoldRock => ItemKind::GoldOre,
        }
    }

    /// Inclusive health range rolled on creation and on every regrowth.
    pub fn health_range(self) -> (u32, u32) {
        match self {
            Self::OakTree | Self::CopperRock | Self::TinRock => (3, 5),
            Self::WillowTree | Self::CoalRock => (6, 10),
            Self::MapleTree | Self::IronRock => (10, 15),
            Self::YewTree => (15, 20),
            Self::MagicTree => (15, 25),
            Self::GoldRock => (10, 20),
        }
    }

    /// Ticks spent depleted before regrowth.
    pub fn regen_ticks(self) -> u32 {
        match self {
            Self::OakTree | Self::CopperRock | Self::TinRock => 10,
            Self::WillowTree | Self::CoalRock => 20,
            Self::MapleTree | Self::IronRock => 30,
            Self::YewTree => 45,
            Self::MagicTree | Self::GoldRock => 60,
        }
    }

    /// Weakest tool tier that can work this node.
    pub fn min_tier(self) -> ToolTier {
        match self {
            Self::OakTree | Self::CopperRock | Self::TinRock => ToolTier::Copper,
            Self::WillowTree | Self::CoalRock => ToolTier::Steel,
            Self::MapleTree | Self::YewTree | Self::IronRock => ToolTier::Mithril,
            Self::MagicTree | Self::GoldRock => ToolTier::Adamant,
        }
    }

    /// Slope and per-tier intercepts of the success line, in percent.
    fn curve(self, tier: ToolTier) -> Option<(f64, f64)> {
        use ToolTier::*;
        let (gradient, intercept) = match (self, tier) {
            (Self::OakTree | Self::CopperRock | Self::TinRock, t) => (
                25.0 / 9.0,
                match t {
                    Copper => 200.0 / 9.0,
                    Steel => 325.0 / 9.0,
                    Mithril => 470.0 / 9.0,
                    Adamant => 555.0 / 9.0,
                },
            ),
            (Self::WillowTree | Self::CoalRock, Steel) => (4.0, 10.0),
            (Self::WillowTree | Self::CoalRock, Mithril) => (4.0, 20.0),
            (Self::WillowTree | Self::CoalRock, Adamant) => (4.0, 27.0),
            (Self::MapleTree | Self::IronRock, Mithril) => (3.0, 20.0),
            (Self::MapleTree | Self::IronRock, Adamant) => (3.0, 29.0),
            (Self::YewTree, Mithril) => (3.0, 10.0),
            (Self::YewTree, Adamant) => (3.0, 19.0),
            (Self::MagicTree | Self::GoldRock, Adamant) => (2.5, 15.0),
            _ => return None,
        };
        Some((gradient, intercept))
    }

    /// Chance in `[0, 1]` that one swing yields a resource, or `None` when
    /// the tier is below this node's minimum.
    pub fn success_rate(self, level: u32, tier: ToolTier) -> Option<f64> {
        let (gradient, intercept) = self.curve(tier)?;
        let percent = gradient * f64::from(level) + intercept;
        Some((percent / 100.0).clamp(0.0, 1.0))
    }
}

/// Lifecycle of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Can be harvested `health` more times.
    Active {
        /// Harvests left before depletion.
        health: u32,
    },
    /// Regrowing.
    Depleted {
        /// Ticks until the node is active again.
        ticks_left: u32,
    },
}

/// What one harvest attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Harvest {
    /// One resource went into the inventory.
    Yielded {
        /// Resource gained.
        item: ItemKind,
        /// Experience credited for the swing.
        experience: ExperienceReport,
        /// The node ran out with this swing.
        depleted: bool,
    },
    /// The roll failed; nothing changed.
    Missed,
}

/// A tree or rock standing on a map tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    kind: NodeKind,
    state: NodeState,
}

impl ResourceNode {
    /// A fresh node with rolled health.
    pub fn new<R: Rng + ?Sized>(kind: NodeKind, rng: &mut R) -> Self {
        Self {
            kind,
            state: NodeState::Active {
                health: roll_health(kind, rng),
            },
        }
    }

    /// A node in an explicit state.
    pub fn with_state(kind: NodeKind, state: NodeState) -> Self {
        Self { kind, state }
    }

    /// Which tree or rock this is.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Active or depleted.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Harvests left, or 0 while depleted.
    pub fn health(&self) -> u32 {
        match self.state {
            NodeState::Active { health } => health,
            NodeState::Depleted { .. } => 0,
        }
    }

    /// True while regrowing.
    pub fn is_depleted(&self) -> bool {
        matches!(self.state, NodeState::Depleted { .. })
    }

    /// Swing at the node with the best tool the player can wield.
    ///
    /// Checks run in order: depletion, inventory room, tool availability.
    /// Only a successful roll changes anything.
    pub fn harvest<R: Rng + ?Sized>(
        &mut self,
        inventory: &mut Inventory,
        skills: &mut SkillSet,
        rng: &mut R,
    ) -> Outcome<Harvest> {
        let NodeState::Active { health } = self.state else {
            return Err(Rejection::NodeDepleted);
        };
        if inventory.is_full() {
            return Err(Rejection::InventoryFull("receive more items"));
        }
        let tool = inventory
            .best_tool(self.kind.tool_family(), skills)
            .and_then(|kind| kind.tool())
            .and_then(|spec| spec.tier)
            .filter(|tier| tier.strength() >= self.kind.min_tier().strength())
            .ok_or(Rejection::NoUsableTool)?;

        let skill = SkillKind::for_family(self.kind.tool_family());
        let chance = self
            .kind
            .success_rate(skills.level(skill), tool)
            .ok_or(Rejection::NoUsableTool)?;
        let roll: f64 = rng.random();
        tracing::debug!(node = self.kind.title(), chance, roll, "harvest roll");
        if roll >= chance {
            return Ok(Harvest::Missed);
        }

        let item = self.kind.yields();
        let experience = skills.award(&[item], XpAccounting::Generation);
        inventory.add(vec![Item::new(item)]);
        let depleted = health == 1;
        self.state = if depleted {
            tracing::info!(node = self.kind.title(), "node depleted");
            NodeState::Depleted {
                ticks_left: self.kind.regen_ticks(),
            }
        } else {
            NodeState::Active { health: health - 1 }
        };
        Ok(Harvest::Yielded {
            item,
            experience,
            depleted,
        })
    }

    /// Advance one tick. Returns `true` when the node regrew on this tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let NodeState::Depleted { ticks_left } = self.state else {
            return false;
        };
        if ticks_left > 1 {
            self.state = NodeState::Depleted {
                ticks_left: ticks_left - 1,
            };
            return false;
        }
        self.state = NodeState::Active {
            health: roll_health(self.kind, rng),
        };
        true
    }
}

fn roll_health<R: Rng + ?Sized>(kind: NodeKind, rng: &mut R) -> u32 {
    let (min, max) = kind.health_range();
    rng.random_range(min..=max)
}
