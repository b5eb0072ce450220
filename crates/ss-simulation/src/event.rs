use std::collections::VecDeque;

use ss_core::{ItemKind, SkillKind, TransferKind};
use ss_world::{NodeKind, Position};

/// Something that changed the world or the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEventKind {
    // Nodes
    /// A node gave its last resource.
    NodeDepleted {
        /// Map the node is on.
        map: String,
        /// The node's tile.
        position: Position,
        /// Which node it was.
        node: NodeKind,
    },
    /// A depleted node grew back.
    NodeRegenerated {
        /// Map the node is on.
        map: String,
        /// The node's tile.
        position: Position,
        /// Which node it was.
        node: NodeKind,
    },

    // NPCs
    /// An NPC stepped to a neighbouring tile.
    NpcMoved {
        /// Map the NPC walks on.
        map: String,
        /// Tile left.
        from: Position,
        /// Tile entered.
        to: Position,
    },

    // Fires
    /// Logs were set alight.
    FireLit {
        /// Map the fire burns on.
        map: String,
        /// Tile the fire occupies.
        position: Position,
    },
    /// A fire went out and left empty ground.
    FireBurnedOut {
        /// Map the fire burned on.
        map: String,
        /// Tile that is empty again.
        position: Position,
    },

    // Player
    /// A skill reached a new level.
    LevelUp {
        /// The skill that improved.
        skill: SkillKind,
        /// Its new level.
        level: u32,
    },
    /// The player went through a transport.
    PlayerTransported {
        /// Map left.
        from: String,
        /// Map entered.
        to: String,
        /// Arrival tile on `to`.
        target: Position,
    },
    /// Items moved between the inventory and the bank or a shop.
    ItemsTransferred {
        /// Bank or shop, in or out.
        direction: TransferKind,
        /// What moved.
        kind: ItemKind,
        /// How many.
        count: usize,
    },
}

impl SimEventKind {
    /// Check whether the event happened on, or led to, the named map.
    pub fn involves_map(&self, name: &str) -> bool {
        match self {
            Self::NodeDepleted { map, .. }
            | Self::NodeRegenerated { map, .. }
            | Self::NpcMoved { map, .. }
            | Self::FireLit { map, .. }
            | Self::FireBurnedOut { map, .. } => map == name,
            Self::PlayerTransported { from, to, .. } => from == name || to == name,
            Self::LevelUp { .. } | Self::ItemsTransferred { .. } => false,
        }
    }
}

/// One entry in the [`EventLog`].
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// Tick the event happened on. Zero for player commands before the first tick.
    pub tick: u64,
    /// What happened.
    pub kind: SimEventKind,
    /// Log line, e.g. `"Oak tree at (2, 1) on surface is depleted"`.
    pub description: String,
}

impl SimEvent {
    /// An event with its log line.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Everything of note that happened in a session, oldest first.
///
/// A nonzero cap turns the log into a ring: once full, each new event
/// evicts the oldest one.
#[derive(Debug, Default)]
pub struct EventLog {
    ring: VecDeque<SimEvent>,
    cap: usize,
}

impl EventLog {
    /// A log holding at most `cap` events. Zero keeps everything.
    pub fn new(cap: usize) -> Self {
        Self {
            ring: VecDeque::new(),
            cap,
        }
    }

    /// Append an event, evicting the oldest when the cap is reached.
    pub fn push(&mut self, event: SimEvent) {
        tracing::trace!(tick = event.tick, description = %event.description, "event");
        if self.cap > 0 && self.ring.len() == self.cap {
            self.ring.pop_front();
        }
        self.ring.push_back(event);
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.ring.iter()
    }

    /// The most recent event.
    pub fn latest(&self) -> Option<&SimEvent> {
        self.ring.back()
    }

    /// Events recorded on one tick.
    pub fn at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.ring.iter().filter(|e| e.tick == tick).collect()
    }

    /// Events that happened on the named map or moved the player to or from it.
    pub fn on_map(&self, name: &str) -> Vec<&SimEvent> {
        self.ring
            .iter()
            .filter(|e| e.kind.involves_map(name))
            .collect()
    }

    /// Number of events held.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Drop every event.
    pub fn clear(&mut self) {
        self.ring.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burnout(tick: u64, map: &str) -> SimEvent {
        SimEvent::new(
            tick,
            SimEventKind::FireBurnedOut {
                map: map.into(),
                position: Position::new(1, 1),
            },
            "fire out",
        )
    }

    #[test]
    fn filters_by_tick_and_map() {
        let mut log = EventLog::new(0);
        log.push(burnout(1, "surface"));
        log.push(burnout(2, "cave"));
        log.push(burnout(2, "surface"));
        assert_eq!(log.at_tick(2).len(), 2);
        assert_eq!(log.on_map("surface").len(), 2);
        assert_eq!(log.on_map("cave")[0].tick, 2);
        assert!(log.on_map("lower_cave").is_empty());
    }

    #[test]
    fn full_ring_evicts_oldest() {
        let mut log = EventLog::new(3);
        for tick in 1..=7 {
            log.push(burnout(tick, "surface"));
        }
        let ticks: Vec<u64> = log.iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![5, 6, 7]);
        assert_eq!(log.latest().map(|e| e.tick), Some(7));
    }

    #[test]
    fn uncapped_log_keeps_a_long_session() {
        let mut log = EventLog::new(0);
        for tick in 0..500 {
            log.push(burnout(tick, "cave"));
        }
        assert_eq!(log.len(), 500);
        log.clear();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
    }

    #[test]
    fn transport_touches_both_maps() {
        let kind = SimEventKind::PlayerTransported {
            from: "surface".into(),
            to: "cave".into(),
            target: Position::new(0, 0),
        };
        assert!(kind.involves_map("surface"));
        assert!(kind.involves_map("cave"));
        assert!(!kind.involves_map("lower_cave"));

        let kind = SimEventKind::LevelUp {
            skill: SkillKind::Mining,
            level: 2,
        };
        assert!(!kind.involves_map("surface"));
    }
}
