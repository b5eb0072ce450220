//! Core types for Starscape: the item catalog, skills, slot storage, and
//! the economy that moves items between them.
//!
//! Nothing here knows about maps or tiles. The world crate consults these
//! types for gating and experience, and the simulation crate owns the
//! player's inventory, the bank, and every shop.

/// The closed set of item kinds and their static properties.
pub mod catalog;
/// Transfers between the inventory and the bank or a shop.
pub mod economy;
/// Player-facing rejections.
pub mod error;
/// Shop stock templates and shop instances.
pub mod shop;
/// Experience, levels, and skill gates.
pub mod skills;
/// Slot grids and the inventory.
pub mod storage;

pub use catalog::{Item, ItemCategory, ItemKind, ResourceClass, ToolFamily, ToolTier};
pub use economy::{DepositAllReport, Transfer, TransferKind};
pub use error::{Outcome, Rejection};
pub use shop::{Shop, ShopKind};
pub use skills::{
    ExperienceReport, LevelUp, Skill, SkillKind, SkillRequirements, SkillSet, XpAccounting,
};
pub use storage::{Inventory, Selection, SlotStorage};
