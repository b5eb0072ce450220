use ss_world::{NodeKind, Position};

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::System;

/// Counts depleted trees and rocks down and regrows them with fresh health.
#[derive(Debug, Default)]
pub struct RegenerationSystem {
    regrown: u64,
}

impl RegenerationSystem {
    /// A regeneration system with nothing tracked yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes regrown since the system was registered.
    pub fn regrown(&self) -> u64 {
        self.regrown
    }
}

impl System for RegenerationSystem {
    fn name(&self) -> &str {
        "regeneration"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let mut regrown: Vec<(String, Position, NodeKind)> = Vec::new();
        for map in ctx.atlas.maps_mut() {
            for (position, node) in map.tick_nodes(&mut *ctx.rng) {
                regrown.push((map.name().to_string(), position, node));
            }
        }
        for (map, position, node) in regrown {
            tracing::info!(%map, %position, node = node.title(), "node regenerated");
            self.regrown += 1;
            ctx.emit(
                SimEventKind::NodeRegenerated {
                    map: map.clone(),
                    position,
                    node,
                },
                format!("{} at {position} on {map} has grown back", node.title()),
            );
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
