//! Tick-based simulation for Starscape.
//!
//! A [`Simulation`] owns every loaded map, the player's inventory and
//! skills, the bank and each shop. Input commands (moving, clicking tiles
//! and inventory slots, banking, trading) run one at a time and report a
//! status line. Ticks drive registered [`System`]s: fires burning down,
//! depleted nodes regrowing, and NPCs wandering on every map.

/// Tick counting.
pub mod clock;
/// Seed, start position and event cap.
pub mod config;
/// Borrowed world state handed to a system for one tick.
pub mod context;
pub mod error;
/// What happened, and when.
pub mod event;
/// Fires burning down.
pub mod fires;
/// Depleted trees and rocks growing back.
pub mod regeneration;
/// The [`Simulation`] and the player commands it accepts.
pub mod simulation;
/// Per-tick behaviour plugged into a [`Simulation`].
pub mod system;
/// NPCs wandering around their origin.
pub mod wander;

#[cfg(test)]
mod testing;

pub use clock::SimClock;
pub use config::{DEFAULT_MAX_EVENTS, SimConfig};
pub use context::SimContext;
pub use error::{SimError, SimResult};
pub use event::{EventLog, SimEvent, SimEventKind};
pub use fires::FireSystem;
pub use regeneration::RegenerationSystem;
pub use simulation::{Simulation, Surface};
pub use system::System;
pub use wander::WanderSystem;
