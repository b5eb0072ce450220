use rand::rngs::StdRng;
use ss_world::Atlas;

use crate::clock::SimClock;
use crate::event::{EventLog, SimEvent, SimEventKind};

/// Mutable context passed to each system during a tick.
pub struct SimContext<'a> {
    /// Every loaded map.
    pub atlas: &'a mut Atlas,
    /// Current tick number.
    pub clock: &'a SimClock,
    /// Where systems record what they did.
    pub events: &'a mut EventLog,
    /// Seeded generator shared by all systems.
    pub rng: &'a mut StdRng,
}

impl SimContext<'_> {
    /// Emit a simulation event at the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    /// The tick being run.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }
}
