use ss_world::Position;

/// Events kept by default before the oldest are evicted.
pub const DEFAULT_MAX_EVENTS: usize = 10_000;

/// Knobs for starting a session. `Default` gives the standard world.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Seeds node health rolls, harvest rolls and NPC wandering.
    pub seed: u64,
    /// Event log cap. Zero keeps every event.
    pub max_events: usize,
    /// Map the player starts on.
    pub start_map: String,
    /// Where the player appears on the start map.
    pub start_position: Position,
    /// Slots in the shared bank.
    pub bank_capacity: usize,
    /// Slots in every shop.
    pub shop_capacity: usize,
    /// Single-item slots in the player's inventory.
    pub inventory_capacity: usize,
    /// Gold in the pouch at the start.
    pub starting_gold: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_events: DEFAULT_MAX_EVENTS,
            start_map: "surface".into(),
            start_position: Position::new(2, 2),
            bank_capacity: 100,
            shop_capacity: 100,
            inventory_capacity: 28,
            starting_gold: 100,
        }
    }
}

impl SimConfig {
    /// Use another RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cap the event log at `max` events; zero removes the cap.
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set where the player enters the world.
    pub fn with_start(mut self, map: impl Into<String>, position: Position) -> Self {
        self.start_map = map.into();
        self.start_position = position;
        self
    }

    /// Give the bank `capacity` slots.
    pub fn with_bank_capacity(mut self, capacity: usize) -> Self {
        self.bank_capacity = capacity;
        self
    }

    /// Give every shop `capacity` slots.
    pub fn with_shop_capacity(mut self, capacity: usize) -> Self {
        self.shop_capacity = capacity;
        self
    }

    /// Give the inventory `capacity` slots.
    pub fn with_inventory_capacity(mut self, capacity: usize) -> Self {
        self.inventory_capacity = capacity;
        self
    }

    /// Start with `gold` in the pouch.
    pub fn with_starting_gold(mut self, gold: u64) -> Self {
        self.starting_gold = gold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_world() {
        let config = SimConfig::default();
        assert_eq!(config.start_map, "surface");
        assert_eq!(config.max_events, DEFAULT_MAX_EVENTS);
        assert_eq!(config.start_position, Position::new(2, 2));
        assert_eq!(config.bank_capacity, 100);
        assert_eq!(config.inventory_capacity, 28);
        assert_eq!(config.starting_gold, 100);
    }

    #[test]
    fn small_cave_start() {
        let config = SimConfig::default()
            .with_start("cave", Position::new(1, 4))
            .with_bank_capacity(3)
            .with_shop_capacity(2)
            .with_inventory_capacity(4)
            .with_starting_gold(7)
            .with_seed(9)
            .with_max_events(64);
        assert_eq!((config.seed, config.max_events), (9, 64));
        assert_eq!(config.shop_capacity, 2);
        assert_eq!(config.inventory_capacity, 4);
        assert_eq!(config.start_map, "cave");
        assert_eq!(config.start_position, Position::new(1, 4));
        assert_eq!(config.bank_capacity, 3);
        assert_eq!(config.starting_gold, 7);
    }
}
