//! A single grid map: tile storage, movement, the visible window, fires,
//! and player interaction.
//!
//! Tiles are stored row-major and every tile records its own position. All
//! movement is a swap of two tile records, after which both embedded
//! positions are rewritten to match their new slots.

use std::ops::Range;

use rand::Rng;
use rand::seq::IndexedRandom;
use ss_core::{Inventory, Outcome, Rejection, SkillSet};

use crate::node::{Harvest, NodeKind};
use crate::tile::{Direction, Position, Tile, TileKind, TransportLink};

/// Map-wide settings read from the map file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSettings {
    /// Grid columns.
    pub width: usize,
    /// Grid rows.
    pub height: usize,
    /// Visible columns.
    pub window_width: usize,
    /// Visible rows.
    pub window_height: usize,
    /// Whether logs may be lit here.
    pub can_light_fires: bool,
    /// Colour name used behind empty tiles.
    pub background_color: String,
}

/// What a successful interaction asks the caller to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Show the shop standing at this position.
    OpenShop(Position),
    /// Show the bank.
    OpenBank,
    /// Move the player to another map.
    Travel {
        /// Name of the map to load.
        destination: String,
        /// Where the player arrives.
        target: Position,
    },
    /// A node was worked.
    Harvested(Harvest),
    /// The tile does nothing when clicked.
    Inert,
}

/// An NPC step taken during a wander tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NpcMove {
    /// Tile the NPC left.
    pub from: Position,
    /// Tile the NPC entered.
    pub to: Position,
}

/// The rectangle of tiles visible around an anchor.
#[derive(Debug)]
pub struct Window<'a> {
    /// Top-left corner in map coordinates.
    pub origin: Position,
    /// Visible tiles, top row first.
    pub rows: Vec<&'a [Tile]>,
}

/// One map of the world.
#[derive(Debug, Clone)]
pub struct GridMap {
    name: String,
    settings: MapSettings,
    tiles: Vec<Tile>,
    player: Option<Position>,
}

impl GridMap {
    /// Build a map from row-major tile kinds.
    ///
    /// # Panics
    ///
    /// Panics if `kinds` does not hold `width * height` entries or if more
    /// than one tile is the player.
    pub fn new(name: impl Into<String>, settings: MapSettings, kinds: Vec<TileKind>) -> Self {
        assert_eq!(
            kinds.len(),
            settings.width * settings.height,
            "tile count does not match dimensions"
        );
        let width = settings.width;
        let tiles: Vec<Tile> = kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| Tile::new(Position::new(i % width, i / width), kind))
            .collect();
        let players: Vec<Position> = tiles
            .iter()
            .filter(|t| t.kind == TileKind::Player)
            .map(|t| t.position)
            .collect();
        assert!(players.len() <= 1, "a map holds at most one player");
        Self {
            name: name.into(),
            settings,
            tiles,
            player: players.first().copied(),
        }
    }

    /// The map's name, also its file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size, window and flags as loaded.
    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Grid columns.
    pub fn width(&self) -> usize {
        self.settings.width
    }

    /// Grid rows.
    pub fn height(&self) -> usize {
        self.settings.height
    }

    /// Where the player stands, if on this map.
    pub fn player(&self) -> Option<Position> {
        self.player
    }

    /// Row-major tiles.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.width() && pos.y < self.height()).then(|| pos.y * self.width() + pos.x)
    }

    /// `None` off the grid.
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).map(|i| &mut self.tiles[i])
    }

    fn is_empty_at(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|t| t.kind.is_empty())
    }

    /// The in-bounds neighbour one step away, if any.
    pub fn step(&self, pos: Position, direction: Direction) -> Option<Position> {
        let next = match direction {
            Direction::Up => Position::new(pos.x, pos.y.checked_sub(1)?),
            Direction::Down => Position::new(pos.x, pos.y + 1),
            Direction::Left => Position::new(pos.x.checked_sub(1)?, pos.y),
            Direction::Right => Position::new(pos.x + 1, pos.y),
        };
        self.index(next).map(|_| next)
    }

    /// Exchange two tile records and rewrite their positions.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) {
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            panic!("swap out of bounds: {a} <-> {b}");
        };
        self.tiles.swap(ia, ib);
        self.tiles[ia].position = a;
        self.tiles[ib].position = b;
        if self.player == Some(a) {
            self.player = Some(b);
        } else if self.player == Some(b) {
            self.player = Some(a);
        }
    }

    /// Step the player onto an adjacent empty tile. Map edges and occupied
    /// tiles stop the move silently. Returns whether the player moved.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        let Some(from) = self.player else {
            return false;
        };
        match self.step(from, direction) {
            Some(to) if self.is_empty_at(to) => {
                self.swap(from, to);
                tracing::debug!(map = %self.name, %from, %to, "player moved");
                true
            }
            _ => false,
        }
    }

    /// Column and row ranges of the window around `anchor`, shifted to stay
    /// inside the map near its edges.
    pub fn window_range(&self, anchor: Position) -> (Range<usize>, Range<usize>) {
        (
            clamp_axis(anchor.x, self.settings.window_width, self.width()),
            clamp_axis(anchor.y, self.settings.window_height, self.height()),
        )
    }

    /// The window of tiles around `anchor`; always exactly window-sized.
    pub fn windowed_view(&self, anchor: Position) -> Window<'_> {
        let (cols, rows) = self.window_range(anchor);
        let width = self.width();
        Window {
            origin: Position::new(cols.start, rows.start),
            rows: rows
                .map(|y| &self.tiles[y * width + cols.start..y * width + cols.end])
                .collect(),
        }
    }

    /// Orthogonal neighbours that exist, in the order right, left, up, down.
    pub fn neighbors4(&self, pos: Position) -> Vec<&Tile> {
        let mut out = Vec::with_capacity(4);
        let candidates = [
            pos.x.checked_add(1).map(|x| Position::new(x, pos.y)),
            pos.x.checked_sub(1).map(|x| Position::new(x, pos.y)),
            pos.y.checked_sub(1).map(|y| Position::new(pos.x, y)),
            pos.y.checked_add(1).map(|y| Position::new(pos.x, y)),
        ];
        for p in candidates.into_iter().flatten() {
            if let Some(tile) = self.tile(p) {
                out.push(tile);
            }
        }
        out
    }

    /// Whether the player could be placed on `pos`.
    pub fn can_insert_player(&self, pos: Position) -> bool {
        self.is_empty_at(pos)
    }

    /// # Panics
    ///
    /// Panics if the map already has a player or the tile is not empty.
    pub fn insert_player(&mut self, pos: Position) {
        assert!(self.player.is_none(), "map {} already has a player", self.name);
        assert!(self.can_insert_player(pos), "cannot place player at {pos}");
        if let Some(tile) = self.tile_mut(pos) {
            tile.kind = TileKind::Player;
        }
        self.player = Some(pos);
    }

    /// Take the player off the map, leaving empty ground.
    ///
    /// # Panics
    ///
    /// Panics if there is no player on this map.
    pub fn remove_player(&mut self) -> Position {
        let Some(pos) = self.player.take() else {
            panic!("map {} has no player", self.name);
        };
        if let Some(tile) = self.tile_mut(pos) {
            tile.kind = TileKind::Empty;
        }
        pos
    }

    /// Fires may be lit here and the tile right of the player is free.
    pub fn can_light_fire(&self) -> bool {
        let Some(player) = self.player else {
            return false;
        };
        self.settings.can_light_fires
            && self
                .step(player, Direction::Right)
                .is_some_and(|right| self.is_empty_at(right))
    }

    /// Step the player right and light a fire where they stood.
    ///
    /// # Panics
    ///
    /// Panics unless [`GridMap::can_light_fire`] holds.
    pub fn light_fire(&mut self, ticks: u32) -> Position {
        assert!(self.can_light_fire(), "cannot light a fire here");
        let Some(at) = self.player else {
            panic!("map {} has no player", self.name);
        };
        self.move_player(Direction::Right);
        if let Some(tile) = self.tile_mut(at) {
            tile.kind = TileKind::Fire { ticks_left: ticks };
        }
        tracing::info!(map = %self.name, %at, ticks, "fire lit");
        at
    }

    /// Count every fire down; returns the positions that burned out.
    pub fn tick_fires(&mut self) -> Vec<Position> {
        let mut burned_out = Vec::new();
        for tile in &mut self.tiles {
            if let TileKind::Fire { ticks_left } = &mut tile.kind {
                *ticks_left = ticks_left.saturating_sub(1);
                if *ticks_left == 0 {
                    tile.kind = TileKind::Empty;
                    burned_out.push(tile.position);
                }
            }
        }
        burned_out
    }

    /// Advance every depleted node; returns the nodes that regrew.
    pub fn tick_nodes<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<(Position, NodeKind)> {
        let mut regrown = Vec::new();
        for tile in &mut self.tiles {
            if let TileKind::Node(node) = &mut tile.kind {
                if node.tick(rng) {
                    regrown.push((tile.position, node.kind()));
                }
            }
        }
        regrown
    }

    /// Positions an NPC at `pos` may take this tick, starting with staying
    /// put. A step must land on empty ground and keep the NPC within its
    /// radius of its origin on both axes.
    pub fn npc_move_options(&self, pos: Position) -> Vec<Position> {
        let Some(TileKind::Npc(npc)) = self.tile(pos).map(|t| &t.kind) else {
            return Vec::new();
        };
        let radius = npc.kind.radius();
        let origin = npc.origin;
        let mut options = vec![pos];
        for direction in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            let Some(to) = self.step(pos, direction) else {
                continue;
            };
            let within = to.x.abs_diff(origin.x) <= radius && to.y.abs_diff(origin.y) <= radius;
            if within && self.is_empty_at(to) {
                options.push(to);
            }
        }
        options
    }

    /// Give every NPC on the map one random step (or a pause).
    pub fn wander_npcs<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<NpcMove> {
        let npcs: Vec<Position> = self
            .tiles
            .iter()
            .filter(|t| matches!(t.kind, TileKind::Npc(_)))
            .map(|t| t.position)
            .collect();
        let mut moves = Vec::new();
        for from in npcs {
            let options = self.npc_move_options(from);
            let Some(&to) = options.choose(rng) else {
                continue;
            };
            self.swap(from, to);
            if to != from {
                moves.push(NpcMove { from, to });
            }
        }
        moves
    }

    /// Act on the tile at `target`. The player must stand orthogonally next
    /// to it.
    pub fn interact<R: Rng + ?Sized>(
        &mut self,
        target: Position,
        inventory: &mut Inventory,
        skills: &mut SkillSet,
        rng: &mut R,
    ) -> Outcome<Interaction> {
        if self.tile(target).is_none() {
            return Err(Rejection::OutOfReach);
        }
        let adjacent = self
            .neighbors4(target)
            .iter()
            .any(|t| t.kind == TileKind::Player);
        if !adjacent {
            return Err(Rejection::OutOfReach);
        }
        let Some(tile) = self.tile_mut(target) else {
            return Err(Rejection::OutOfReach);
        };
        match &mut tile.kind {
            TileKind::Shop(_) => Ok(Interaction::OpenShop(target)),
            TileKind::Bank => Ok(Interaction::OpenBank),
            TileKind::Transport(TransportLink {
                destination,
                target: landing,
                requirements,
                ..
            }) => {
                if skills.meets_requirements(requirements) {
                    Ok(Interaction::Travel {
                        destination: destination.clone(),
                        target: *landing,
                    })
                } else {
                    Err(Rejection::SkillRequirements(requirements.to_string()))
                }
            }
            TileKind::Node(node) => node
                .harvest(inventory, skills, rng)
                .map(Interaction::Harvested),
            _ => Ok(Interaction::Inert),
        }
    }
}

fn clamp_axis(center: usize, span: usize, total: usize) -> Range<usize> {
    let half = span / 2;
    if center < half {
        0..span
    } else if center + half >= total {
        total - span..total
    } else {
        center - half..center - half + span
    }
}
