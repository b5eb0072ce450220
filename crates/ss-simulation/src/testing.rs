//! Small worlds for unit tests.

use rand::SeedableRng;
use rand::rngs::StdRng;
use ss_world::{Atlas, GridMap, MapSettings, TileKind};

use crate::clock::SimClock;
use crate::context::SimContext;
use crate::event::EventLog;
use crate::system::System;

/// A single map named `name`, row-major, lit fires allowed.
pub fn grid(name: &str, width: usize, kinds: Vec<TileKind>) -> GridMap {
    let height = kinds.len() / width;
    GridMap::new(
        name,
        MapSettings {
            width,
            height,
            window_width: if width % 2 == 1 { width } else { width - 1 },
            window_height: if height % 2 == 1 { height } else { height - 1 },
            can_light_fires: true,
            background_color: "green".into(),
        },
        kinds,
    )
}

/// Drive one system directly for `ticks` ticks.
pub struct Harness {
    pub atlas: Atlas,
    pub clock: SimClock,
    pub events: EventLog,
    pub rng: StdRng,
}

impl Harness {
    pub fn new(maps: Vec<GridMap>) -> Self {
        Self {
            atlas: Atlas::new(maps).unwrap(),
            clock: SimClock::new(),
            events: EventLog::new(0),
            rng: StdRng::seed_from_u64(9),
        }
    }

    pub fn run<S: System>(&mut self, system: &mut S, ticks: u64) {
        for _ in 0..ticks {
            self.clock.advance();
            let mut ctx = SimContext {
                atlas: &mut self.atlas,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
            };
            system.tick(&mut ctx).unwrap();
        }
    }
}
