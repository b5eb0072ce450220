use ss_world::Position;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::System;

/// Burns every fire down by one tick and clears those that go out.
#[derive(Debug, Default)]
pub struct FireSystem;

impl FireSystem {
    /// A fire system with nothing tracked yet.
    pub fn new() -> Self {
        Self
    }
}

impl System for FireSystem {
    fn name(&self) -> &str {
        "fires"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let mut out: Vec<(String, Position)> = Vec::new();
        for map in ctx.atlas.maps_mut() {
            let name = map.name().to_string();
            out.extend(map.tick_fires().into_iter().map(|p| (name.clone(), p)));
        }
        for (map, position) in out {
            tracing::debug!(%map, %position, "fire burned out");
            ctx.emit(
                SimEventKind::FireBurnedOut {
                    map: map.clone(),
                    position,
                },
                format!("The fire at {position} on {map} burned out"),
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
