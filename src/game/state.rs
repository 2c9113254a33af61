//! Game state management.
//!
//! [`Game`] bundles the world with everything that is not simulation state:
//! the player's selection, the random number generator and the rule set.
//! It is the surface renderers and drivers talk to.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::CommandResult;
use crate::game::{
    CityId, CityView, ClickOutcome, Command, GameRng, Hex, ProductionOrder, ResearchSwitch,
    Selection, Tech, TileView, TurnReport, UnitId, UnitKind, UnitView, World, WorldSnapshot,
    city_views, commands, generate_world, snapshot, tile_views, turn, unit_views,
};

/// Map radius used when none is given.
pub const DEFAULT_MAP_RADIUS: u32 = 10;

/// Largest map radius accepted.
pub const MAX_MAP_RADIUS: u32 = 64;

fn clamp_radius(radius: u32) -> u32 {
    let clamped = radius.clamp(1, MAX_MAP_RADIUS);
    if clamped != radius {
        warn!("map radius {radius} outside 1..={MAX_MAP_RADIUS}, using {clamped}");
    }
    clamped
}

/// Tunable rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// What happens to research progress when the target changes.
    pub research_switch: ResearchSwitch,
}

/// What a successfully applied [`Command`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A tile click was resolved.
    Click(ClickOutcome),
    /// A city was founded.
    CityFounded(CityId),
    /// A road was built.
    RoadBuilt(Hex),
    /// A unit was bought.
    UnitBought(UnitId),
    /// A production order was set.
    ProductionQueued,
    /// The research target was set.
    ResearchSet,
    /// A turn passed.
    TurnEnded(TurnReport),
}

/// A running game.
#[derive(Debug, Clone)]
pub struct Game {
    /// Simulation state.
    pub world: World,
    /// Player focus.
    pub selection: Selection,
    /// Rule set.
    pub rules: Rules,
    rng: GameRng,
}

impl Game {
    /// Create a game with a freshly generated map.
    ///
    /// `radius` is clamped to `1..=MAX_MAP_RADIUS`.
    #[must_use]
    pub fn new(seed: u64, radius: u32, rules: Rules) -> Self {
        let mut rng = GameRng::new(seed);
        let world = generate_world(clamp_radius(radius), &mut rng);
        Self {
            world,
            selection: Selection::new(),
            rules,
            rng,
        }
    }

    /// Wrap an existing world, e.g. a hand-built test scenario.
    #[must_use]
    pub fn from_world(world: World, seed: u64, rules: Rules) -> Self {
        Self {
            world,
            selection: Selection::new(),
            rules,
            rng: GameRng::new(seed),
        }
    }

    /// Seed the game was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Current turn number.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.world.turn
    }

    /// Throw the current world away and generate a new one.
    ///
    /// Units, cities, treasuries, research and the turn counter all reset.
    /// The random stream continues rather than restarting. `radius` is
    /// clamped to `1..=MAX_MAP_RADIUS`.
    pub fn generate_map(&mut self, radius: u32) {
        self.world = generate_world(clamp_radius(radius), &mut self.rng);
        self.selection = Selection::new();
    }

    /// Resolve a click on a tile.
    pub fn select_tile(&mut self, q: i32, r: i32) -> ClickOutcome {
        commands::select_tile(
            &mut self.world,
            &mut self.selection,
            &mut self.rng,
            Hex::new(q, r),
        )
    }

    /// Advance one turn.
    pub fn end_turn(&mut self) -> TurnReport {
        turn::end_turn(&mut self.world)
    }

    /// Found a city with the selected settler.
    ///
    /// # Errors
    ///
    /// Rejected unless a player settler is selected on a tile without a city.
    pub fn found_city(&mut self) -> CommandResult<CityId> {
        commands::found_city(&mut self.world, &mut self.selection)
    }

    /// Pave the selected worker's tile.
    ///
    /// # Errors
    ///
    /// Rejected unless a player worker with movement left is selected.
    pub fn build_road(&mut self) -> CommandResult<Hex> {
        commands::build_road(&mut self.world, &self.selection)
    }

    /// Buy a unit in a city.
    ///
    /// # Errors
    ///
    /// Rejected for unknown cities, unbuildable or locked kinds, and when
    /// the treasury is short.
    pub fn buy_unit(&mut self, city: CityId, kind: UnitKind) -> CommandResult<UnitId> {
        commands::buy_unit(&mut self.world, city, kind)
    }

    /// Change the research target.
    ///
    /// # Errors
    ///
    /// Rejected if the technology is unlocked or its prerequisites are not.
    pub fn set_research(&mut self, tech: Tech) -> CommandResult {
        commands::set_research(&mut self.world, tech, self.rules.research_switch)
    }

    /// Replace a city's production order.
    ///
    /// # Errors
    ///
    /// Rejected for unknown cities, barbarian units and buildings the city
    /// already has.
    pub fn queue_production(&mut self, city: CityId, order: ProductionOrder) -> CommandResult {
        commands::queue_production(&mut self.world, city, order)
    }

    /// Apply a serialized command.
    ///
    /// # Errors
    ///
    /// Propagates the rejection of the underlying command.
    pub fn execute(&mut self, command: Command) -> CommandResult<CommandOutcome> {
        let outcome = match command {
            Command::Select { q, r } => CommandOutcome::Click(self.select_tile(q, r)),
            Command::FoundCity => CommandOutcome::CityFounded(self.found_city()?),
            Command::BuildRoad => CommandOutcome::RoadBuilt(self.build_road()?),
            Command::BuyUnit { city, unit } => {
                CommandOutcome::UnitBought(self.buy_unit(city, unit)?)
            }
            Command::QueueProduction { city, order } => {
                self.queue_production(city, order)?;
                CommandOutcome::ProductionQueued
            }
            Command::SetResearch { tech } => {
                self.set_research(tech)?;
                CommandOutcome::ResearchSet
            }
            Command::EndTurn => CommandOutcome::TurnEnded(self.end_turn()),
        };
        Ok(outcome)
    }

    /// Render data for every tile.
    #[must_use]
    pub fn tiles(&self) -> Vec<TileView> {
        tile_views(&self.world)
    }

    /// Render data for every unit.
    #[must_use]
    pub fn units(&self) -> Vec<UnitView> {
        unit_views(&self.world)
    }

    /// Render data for every city.
    #[must_use]
    pub fn cities(&self) -> Vec<CityView> {
        city_views(&self.world)
    }

    /// Full serializable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        snapshot(&self.world, &self.selection)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(0, DEFAULT_MAP_RADIUS, Rules::default())
    }
}
