//! The world of Starscape: tile maps loaded from JSON, resource nodes,
//! wandering NPCs, fires, transports between maps, and crafting with the
//! inventory.
//!
//! Maps are read with [`load_dir`] into an [`Atlas`]. Each [`GridMap`] owns
//! its tiles and tracks the player when the player stands on it.

pub mod atlas;
pub mod crafting;
pub mod error;
pub mod loader;
pub mod map;
pub mod node;
pub mod render;
pub mod skill_info;
pub mod tile;

pub use atlas::{Atlas, ShopId};
pub use crafting::{CraftAction, Crafted, combine};
pub use error::{WorldError, WorldResult};
pub use loader::{MapDefinition, load_dir, load_file};
pub use map::{GridMap, Interaction, MapSettings, NpcMove, Window};
pub use node::{Harvest, NodeKind, NodeState, ResourceNode};
pub use render::{render_map, render_window};
pub use skill_info::{SkillInfo, SkillTarget, skill_info};
pub use tile::{Direction, Npc, NpcKind, Position, Tile, TileKind, TransportKind, TransportLink};
