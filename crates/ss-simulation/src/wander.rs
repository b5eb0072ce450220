use ss_world::NpcMove;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::System;

/// Moves every NPC on every map one random step per tick, whether or not
/// its map is the one being shown.
#[derive(Debug, Default)]
pub struct WanderSystem {
    steps: u64,
}

impl WanderSystem {
    /// A wander system with default odds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps taken by all NPCs so far. Pauses are not counted.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl System for WanderSystem {
    fn name(&self) -> &str {
        "wander"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let mut moves: Vec<(String, NpcMove)> = Vec::new();
        for map in ctx.atlas.maps_mut() {
            let name = map.name().to_string();
            moves.extend(
                map.wander_npcs(&mut *ctx.rng)
                    .into_iter()
                    .map(|m| (name.clone(), m)),
            );
        }
        for (map, NpcMove { from, to }) in moves {
            self.steps += 1;
            ctx.emit(
                SimEventKind::NpcMoved {
                    map: map.clone(),
                    from,
                    to,
                },
                format!("NPC on {map} moved from {from} to {to}"),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, grid};
    use ss_world::{Npc, NpcKind, Position, TileKind};

    fn chicken_pen() -> Vec<TileKind> {
        let mut kinds = vec![TileKind::Empty; 81];
        kinds[4 * 9 + 4] = TileKind::Npc(Npc {
            kind: NpcKind::Chicken,
            origin: Position::new(4, 4),
        });
        kinds[0] = TileKind::Bank;
        kinds
    }

    fn npc_position(harness: &Harness, map: &str) -> Position {
        harness
            .atlas
            .get(map)
            .unwrap()
            .tiles()
            .iter()
            .find(|t| matches!(t.kind, TileKind::Npc(_)))
            .map(|t| t.position)
            .unwrap()
    }

    #[test]
    fn chickens_stay_near_home_on_hidden_maps() {
        let mut harness = Harness::new(vec![
            grid("surface", 9, chicken_pen()),
            grid("farm", 9, chicken_pen()),
        ]);
        harness.atlas.place_player("surface", Position::new(8, 8));
        let mut system = WanderSystem::new();
        for _ in 0..200 {
            harness.run(&mut system, 1);
            for map in ["surface", "farm"] {
                let at = npc_position(&harness, map);
                assert!(at.x.abs_diff(4) <= 2 && at.y.abs_diff(4) <= 2, "{at}");
            }
        }
        assert!(system.steps() > 0);
        assert!(!harness.events.on_map("farm").is_empty());
        // The bank never moves.
        assert_eq!(
            harness.atlas.get("farm").unwrap().tiles()[0].kind,
            TileKind::Bank
        );
    }
}
