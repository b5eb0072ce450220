//! Every loaded map, keyed by name, and the single player moving between them.

use std::collections::BTreeMap;

use ss_core::{Outcome, Rejection, ShopKind};

use crate::error::{WorldError, WorldResult};
use crate::map::GridMap;
use crate::tile::{Position, TileKind};

/// Identifies one shop counter: the map it is on and where it stands.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShopId {
    /// Map the shop stands on.
    pub map: String,
    /// Its tile.
    pub position: Position,
}

/// The set of maps making up the world. At most one player exists across
/// all of them.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    maps: BTreeMap<String, GridMap>,
}

impl Atlas {
    /// Collect maps, rejecting duplicate names and transports that lead off
    /// the known maps.
    pub fn new(maps: impl IntoIterator<Item = GridMap>) -> WorldResult<Self> {
        let mut atlas = Self::default();
        for map in maps {
            let name = map.name().to_string();
            if atlas.maps.insert(name.clone(), map).is_some() {
                return Err(WorldError::DuplicateMap(name));
            }
        }
        atlas.check_transports()?;
        let players = atlas
            .maps
            .values()
            .filter(|m| m.player().is_some())
            .count();
        assert!(players <= 1, "more than one player across the atlas");
        Ok(atlas)
    }

    fn check_transports(&self) -> WorldResult<()> {
        for map in self.maps.values() {
            for tile in map.tiles() {
                let TileKind::Transport(link) = &tile.kind else {
                    continue;
                };
                let lands = self
                    .maps
                    .get(&link.destination)
                    .is_some_and(|dest| dest.tile(link.target).is_some());
                if !lands {
                    return Err(WorldError::DanglingTransport {
                        map: map.name().to_string(),
                        x: tile.position.x,
                        y: tile.position.y,
                        destination: format!("{}{}", link.destination, link.target),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a map by name.
    pub fn get(&self, name: &str) -> Option<&GridMap> {
        self.maps.get(name)
    }

    /// Mutable lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut GridMap> {
        self.maps.get_mut(name)
    }

    /// Map names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    /// Every map, mutably.
    pub fn maps_mut(&mut self) -> impl Iterator<Item = &mut GridMap> {
        self.maps.values_mut()
    }

    /// Number of loaded maps.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// True when no map is loaded.
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// The map holding the player and the player's position on it.
    pub fn player_location(&self) -> Option<(&str, Position)> {
        self.maps
            .values()
            .find_map(|m| m.player().map(|p| (m.name(), p)))
    }

    /// Put the player into the world for the first time.
    ///
    /// # Panics
    ///
    /// Panics if a player already exists, the map is unknown, or the tile
    /// is not empty.
    pub fn place_player(&mut self, map: &str, pos: Position) {
        assert!(
            self.player_location().is_none(),
            "the world already has a player"
        );
        let Some(grid) = self.maps.get_mut(map) else {
            panic!("unknown map {map}");
        };
        grid.insert_player(pos);
    }

    /// Move the player to `target` on `destination`. The landing tile must
    /// be empty; the player leaves the old map before arriving.
    pub fn relocate_player(&mut self, destination: &str, target: Position) -> Outcome<()> {
        let can_land = self
            .maps
            .get(destination)
            .ok_or_else(|| Rejection::UnknownMap(destination.to_string()))?
            .can_insert_player(target);
        if !can_land {
            return Err(Rejection::LandingOccupied);
        }
        for map in self.maps.values_mut() {
            if map.player().is_some() {
                map.remove_player();
            }
        }
        if let Some(map) = self.maps.get_mut(destination) {
            map.insert_player(target);
        }
        tracing::info!(destination, %target, "player transported");
        Ok(())
    }

    /// Every shop tile in the world, ordered by map then position.
    pub fn shop_sites(&self) -> Vec<(ShopId, ShopKind)> {
        let mut sites = Vec::new();
        for map in self.maps.values() {
            for tile in map.tiles() {
                if let TileKind::Shop(kind) = tile.kind {
                    sites.push((
                        ShopId {
                            map: map.name().to_string(),
                            position: tile.position,
                        },
                        kind,
                    ));
                }
            }
        }
        sites
    }
}
