use std::collections::BTreeMap;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use ss_core::economy;
use ss_core::{
    DepositAllReport, ExperienceReport, Inventory, ItemKind, Outcome, Rejection, Selection, Shop,
    SkillKind, SkillSet, SlotStorage, Transfer,
};
use ss_world::{
    Atlas, CraftAction, Crafted, Direction, Harvest, Interaction, Position, ShopId, SkillInfo,
    TileKind, combine, load_dir, render_window, skill_info,
};

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::error::{SimError, SimResult};
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::fires::FireSystem;
use crate::regeneration::RegenerationSystem;
use crate::system::System;
use crate::wander::WanderSystem;

/// The surface currently shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    /// A map, by name.
    Map(String),
    /// The bank.
    Bank,
    /// The shop counter the player clicked.
    Shop(ShopId),
    /// The information screen for one skill.
    Skill(SkillKind),
}

/// One play session over a loaded world.
///
/// Owns every map, the player's inventory and skills, the bank, one shop per
/// shop tile, the clock, RNG, event log, and registered tick systems. Input
/// commands and ticks never interleave: each runs to completion.
///
/// Every input command clears the status line first, then leaves the
/// rejection text there if it was refused. Every command other than
/// clicking an inventory slot also drops the current item selection.
pub struct Simulation {
    atlas: Atlas,
    inventory: Inventory,
    skills: SkillSet,
    bank: SlotStorage,
    shops: BTreeMap<ShopId, Shop>,
    surface: Surface,
    status: String,
    clock: SimClock,
    rng: StdRng,
    events: EventLog,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("surface", &self.surface)
            .field("systems", &self.systems.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a simulation over `atlas`. If no map holds a player yet, the
    /// player is placed at the configured start.
    pub fn new(atlas: Atlas, config: SimConfig) -> SimResult<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::assemble(atlas, config, rng)
    }

    /// Load every map in `dir` and start a simulation on them. The same
    /// seeded RNG rolls node health during loading and drives the run.
    pub fn load(dir: &Path, config: SimConfig) -> SimResult<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let atlas = load_dir(dir, &mut rng)?;
        Self::assemble(atlas, config, rng)
    }

    fn assemble(mut atlas: Atlas, config: SimConfig, rng: StdRng) -> SimResult<Self> {
        let current = match atlas.player_location() {
            Some((map, _)) => map.to_string(),
            None => {
                let map = atlas
                    .get(&config.start_map)
                    .ok_or_else(|| SimError::UnknownStartMap(config.start_map.clone()))?;
                if !map.can_insert_player(config.start_position) {
                    return Err(SimError::StartBlocked {
                        map: config.start_map,
                        position: config.start_position,
                    });
                }
                atlas.place_player(&config.start_map, config.start_position);
                config.start_map.clone()
            }
        };
        let shops = atlas
            .shop_sites()
            .into_iter()
            .map(|(id, kind)| (id, Shop::new(kind, config.shop_capacity)))
            .collect();
        tracing::info!(map = %current, maps = atlas.len(), "simulation started");
        Ok(Self {
            atlas,
            inventory: Inventory::with_starter_kit(config.inventory_capacity, config.starting_gold),
            skills: SkillSet::new(),
            bank: SlotStorage::new(config.bank_capacity),
            shops,
            surface: Surface::Map(current),
            status: String::new(),
            clock: SimClock::new(),
            rng,
            events: EventLog::new(config.max_events),
            systems: Vec::new(),
            initialized: false,
        })
    }

    /// Register the fire, regeneration and wander systems, in that order.
    pub fn with_default_systems(mut self) -> Self {
        self.add_system(FireSystem::new());
        self.add_system(RegenerationSystem::new());
        self.add_system(WanderSystem::new());
        self
    }

    /// Add a system after those already registered.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Run every system's setup hook. Later calls do nothing.
    pub fn init(&mut self) -> SimResult<()> {
        if self.initialized {
            return Ok(());
        }
        self.each_system(|system, ctx| system.init(ctx))?;
        self.initialized = true;
        Ok(())
    }

    /// Advance the clock and tick every system once.
    pub fn tick(&mut self) -> SimResult<()> {
        self.init()?;
        self.clock.advance();
        self.each_system(|system, ctx| system.tick(ctx))
    }

    /// Take each system out in turn so it can borrow the rest of the world.
    fn each_system(
        &mut self,
        mut f: impl FnMut(&mut dyn System, &mut SimContext<'_>) -> SimResult<()>,
    ) -> SimResult<()> {
        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                atlas: &mut self.atlas,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
            };
            let result = f(system.as_mut(), &mut ctx);
            self.systems[i] = system;
            result?;
        }
        Ok(())
    }

    /// Tick `n` times, stopping at the first system error.
    pub fn run(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    // ---- input commands ----

    /// Walk one tile. Only possible while a map is shown; walls, NPCs and
    /// map edges stop the player silently.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        self.begin();
        let Surface::Map(name) = &self.surface else {
            return false;
        };
        self.atlas
            .get_mut(name)
            .is_some_and(|map| map.move_player(direction))
    }

    /// Click the tile at `target` on the player's map.
    pub fn interact(&mut self, target: Position) -> Outcome<Interaction> {
        self.begin();
        if !matches!(self.surface, Surface::Map(_)) {
            return self.report(Err(Rejection::NotOpen("map")));
        }
        let (map_name, _) = self.player_location();
        let outcome = match self.atlas.get_mut(&map_name) {
            Some(map) => map.interact(target, &mut self.inventory, &mut self.skills, &mut self.rng),
            None => Err(Rejection::UnknownMap(map_name.clone())),
        };
        let interaction = self.report(outcome)?;

        match &interaction {
            Interaction::OpenShop(position) => {
                self.surface = Surface::Shop(ShopId {
                    map: map_name,
                    position: *position,
                });
            }
            Interaction::OpenBank => self.surface = Surface::Bank,
            Interaction::Travel {
                destination,
                target: landing,
            } => {
                let moved = self.atlas.relocate_player(destination, *landing);
                self.report(moved)?;
                self.surface = Surface::Map(destination.clone());
                self.record(
                    SimEventKind::PlayerTransported {
                        from: map_name.clone(),
                        to: destination.clone(),
                        target: *landing,
                    },
                    format!("Travelled from {map_name} to {destination} at {landing}"),
                );
            }
            Interaction::Harvested(Harvest::Yielded {
                item,
                experience,
                depleted,
            }) => {
                self.status = experience.to_string();
                self.record_level_ups(experience);
                tracing::debug!(%item, "harvested");
                if *depleted {
                    self.record_depletion(&map_name, target);
                }
            }
            Interaction::Harvested(Harvest::Missed) => self.status = "You missed!".into(),
            Interaction::Inert => {}
        }
        Ok(interaction)
    }

    /// Click an inventory slot while the map is shown. Selecting a tool and
    /// then a resource (or the reverse) combines them.
    pub fn select_slot(&mut self, index: usize) -> Outcome<Option<Crafted>> {
        self.status.clear();
        if !matches!(self.surface, Surface::Map(_)) {
            return self.report(Err(Rejection::NotOpen("map")));
        }
        let selected = self.inventory.select(index);
        let Selection::Combine { tool, resource } = self.report(selected)? else {
            return Ok(None);
        };

        let (map_name, before) = self.player_location();
        let outcome = match self.atlas.get_mut(&map_name) {
            Some(map) => combine(&mut self.inventory, tool, resource, &mut self.skills, map),
            None => Err(Rejection::UnknownMap(map_name.clone())),
        };
        let crafted = self.report(outcome)?;
        if crafted.action == CraftAction::Remove {
            self.record(
                SimEventKind::FireLit {
                    map: map_name.clone(),
                    position: before,
                },
                format!("A fire was lit at {before} on {map_name}"),
            );
        }
        self.status = crafted.experience.to_string();
        self.record_level_ups(&crafted.experience);
        Ok(Some(crafted))
    }

    /// Move up to `amount` of `kind` into the open bank.
    pub fn deposit(&mut self, kind: ItemKind, amount: usize) -> Outcome<Transfer> {
        self.begin();
        let outcome = if self.surface == Surface::Bank {
            economy::deposit(&mut self.inventory, &mut self.bank, kind, amount)
        } else {
            Err(Rejection::NotOpen("bank"))
        };
        self.finish_transfer(outcome)
    }

    /// Deposit the whole inventory into the open bank. The status line
    /// shows the first kind that did not fit.
    pub fn deposit_all(&mut self) -> Outcome<DepositAllReport> {
        self.begin();
        if self.surface != Surface::Bank {
            return self.report(Err(Rejection::NotOpen("bank")));
        }
        let report = economy::deposit_all(&mut self.inventory, &mut self.bank);
        for transfer in &report.deposited {
            self.record_transfer(transfer);
        }
        self.status = report.status();
        Ok(report)
    }

    /// Move up to `amount` of `kind` out of the open bank.
    pub fn withdraw(&mut self, kind: ItemKind, amount: usize) -> Outcome<Transfer> {
        self.begin();
        let outcome = if self.surface == Surface::Bank {
            economy::withdraw(&mut self.bank, &mut self.inventory, kind, amount)
        } else {
            Err(Rejection::NotOpen("bank"))
        };
        self.finish_transfer(outcome)
    }

    /// Sell up to `amount` of `kind` to the open shop.
    pub fn sell(&mut self, kind: ItemKind, amount: usize) -> Outcome<Transfer> {
        self.begin();
        let outcome = match &self.surface {
            Surface::Shop(id) => match self.shops.get_mut(id) {
                Some(shop) => economy::sell(&mut self.inventory, shop.storage_mut(), kind, amount),
                None => Err(Rejection::NotOpen("shop")),
            },
            _ => Err(Rejection::NotOpen("shop")),
        };
        self.finish_transfer(outcome)
    }

    /// Buy up to `amount` of `kind` from the open shop.
    pub fn buy(&mut self, kind: ItemKind, amount: usize) -> Outcome<Transfer> {
        self.begin();
        let outcome = match &self.surface {
            Surface::Shop(id) => match self.shops.get_mut(id) {
                Some(shop) => economy::buy(shop.storage_mut(), &mut self.inventory, kind, amount),
                None => Err(Rejection::NotOpen("shop")),
            },
            _ => Err(Rejection::NotOpen("shop")),
        };
        self.finish_transfer(outcome)
    }

    /// Sort the open bank or shop by catalog rank.
    pub fn sort(&mut self) -> Outcome<()> {
        self.begin();
        match &self.surface {
            Surface::Bank => self.bank.sort(),
            Surface::Shop(id) => match self.shops.get_mut(id) {
                Some(shop) => shop.storage_mut().sort(),
                None => return self.report(Err(Rejection::NotOpen("shop"))),
            },
            Surface::Map(_) | Surface::Skill(_) => {
                return self.report(Err(Rejection::NotOpen("bank")));
            }
        }
        Ok(())
    }

    /// Show one of the player's inventory items to the open shop, which
    /// quotes what it would pay.
    pub fn inspect_item(&mut self, index: usize) -> Outcome<String> {
        self.begin();
        let quote = match (&self.surface, self.inventory.kind_at(index)) {
            (Surface::Shop(_), Some(kind)) => Ok(Shop::sell_quote(kind)),
            (Surface::Shop(_), None) => Err(Rejection::EmptySlot),
            _ => Err(Rejection::NotOpen("shop")),
        };
        self.quote(quote)
    }

    /// Look at a slot of the open shop's stock and its asking price.
    pub fn inspect_stock(&mut self, index: usize) -> Outcome<String> {
        self.begin();
        let quote = match &self.surface {
            Surface::Shop(id) => self
                .shops
                .get(id)
                .and_then(|shop| shop.storage().slot(index)?.kind())
                .map(Shop::buy_quote)
                .ok_or(Rejection::EmptySlot),
            _ => Err(Rejection::NotOpen("shop")),
        };
        self.quote(quote)
    }

    /// Open the information screen for `skill`.
    pub fn open_skill_info(&mut self, skill: SkillKind) -> SkillInfo {
        self.begin();
        self.surface = Surface::Skill(skill);
        skill_info(skill)
    }

    /// Close the bank, shop or skill screen and show the player's map again.
    pub fn close_surface(&mut self) {
        self.begin();
        let (map, _) = self.player_location();
        self.surface = Surface::Map(map);
    }

    // ---- queries ----

    /// The map holding the player and where the player stands.
    ///
    /// # Panics
    ///
    /// Panics if the player has left the world, which no command allows.
    pub fn player_location(&self) -> (String, Position) {
        let Some((map, position)) = self.atlas.player_location() else {
            panic!("the simulation has no player");
        };
        (map.to_string(), position)
    }

    /// The visible window of the player's map as text.
    pub fn view(&self) -> String {
        let (map, position) = self.player_location();
        self.atlas
            .get(&map)
            .map(|grid| render_window(grid, position))
            .unwrap_or_default()
    }

    /// Every loaded map.
    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    /// The player's inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Direct inventory access, for seeding a session.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// The player's skills.
    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    /// The bank's slots.
    pub fn bank(&self) -> &SlotStorage {
        &self.bank
    }

    /// The shop standing at `id`, if there is one.
    pub fn shop(&self, id: &ShopId) -> Option<&Shop> {
        self.shops.get(id)
    }

    /// Every shop, ordered by map then position.
    pub fn shops(&self) -> impl Iterator<Item = (&ShopId, &Shop)> {
        self.shops.iter()
    }

    /// What the player is looking at.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Feedback from the last input command; empty when there is none.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The tick clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Everything recorded so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The registered system of type `T`, if any.
    pub fn get_system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Mutable counterpart of [`get_system`](Self::get_system).
    pub fn get_system_mut<T: System + 'static>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// Shorthand for `clock().tick()`.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }

    // ---- bookkeeping ----

    fn begin(&mut self) {
        self.status.clear();
        self.inventory.deselect();
    }

    fn quote(&mut self, outcome: Outcome<String>) -> Outcome<String> {
        let quote = self.report(outcome)?;
        self.status.clone_from(&quote);
        Ok(quote)
    }

    fn report<T>(&mut self, outcome: Outcome<T>) -> Outcome<T> {
        if let Err(reason) = &outcome {
            tracing::debug!(%reason, "rejected");
            self.status = reason.to_string();
        }
        outcome
    }

    fn finish_transfer(&mut self, outcome: Outcome<Transfer>) -> Outcome<Transfer> {
        let transfer = self.report(outcome)?;
        self.record_transfer(&transfer);
        Ok(transfer)
    }

    fn record(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    fn record_transfer(&mut self, transfer: &Transfer) {
        self.record(
            SimEventKind::ItemsTransferred {
                direction: transfer.direction,
                kind: transfer.kind,
                count: transfer.count,
            },
            transfer.to_string(),
        );
    }

    fn record_level_ups(&mut self, report: &ExperienceReport) {
        for up in &report.level_ups {
            for &level in &up.levels {
                self.record(
                    SimEventKind::LevelUp {
                        skill: up.skill,
                        level,
                    },
                    format!("{} reached level {level}", up.skill),
                );
            }
        }
    }

    fn record_depletion(&mut self, map: &str, position: Position) {
        let node = self
            .atlas
            .get(map)
            .and_then(|grid| grid.tile(position))
            .and_then(|tile| match &tile.kind {
                TileKind::Node(node) => Some(node.kind()),
                _ => None,
            });
        if let Some(node) = node {
            self.record(
                SimEventKind::NodeDepleted {
                    map: map.to_string(),
                    position,
                    node,
                },
                format!("{} at {position} on {map} was used up", node.title()),
            );
        }
    }
}

/// Stands in for a system while it is being ticked.
#[derive(Debug)]
struct NoopSystem;

impl System for NoopSystem {
    fn name(&self) -> &str {
        "noop"
    }
    fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
