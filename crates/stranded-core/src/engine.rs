//! The turn/time controller: the top-level game state machine.
//!
//! A [`Game`] owns the grid, the bot arena, the controllers, the clock,
//! and the event log. External callers construct it from a validated
//! configuration, feed it batches of orders through
//! [`Game::process_turn`], and read results back with [`Game::snapshot`].
//! One game per session; the embedding service serializes calls.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::components::{
    Bot, Controller, ControllerId, Deck, Position, ResourceKind,
};
use crate::config::{GameConfig, InitialState, StatePreset};
use crate::error::{ConfigError, OrderError};
use crate::events::EventLog;
use crate::generation;
use crate::grid::Grid;
use crate::orders::{DeckEdit, Order, OrderAction, OrderOutcome, TurnReport};
use crate::snapshot::{
    AssetView, BotView, CellBotView, CellView, ControllerView, GameSnapshot, MapSize,
};
use crate::systems::{mature_seedlings, ActionInterpreter};

/// Hour prices of controller actions. Fixed by the rules, not by
/// configuration.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HourCosts {
    pub bot_action: u32,
    pub modify_deck: u32,
    pub new_bot: u32,
}

impl HourCosts {
    pub const STANDARD: Self = Self {
        bot_action: 1,
        modify_deck: 1,
        new_bot: 6,
    };
}

/// Resource prices taken from configuration.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResourceCosts {
    pub new_bot: u32,
    pub modify_deck: u32,
}

/// Whether the game is still being played. `Victory` is terminal; the
/// caller stops submitting turns once it is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Active,
    Victory,
}

/// A full game session.
pub struct Game {
    grid: Grid,
    world: World,
    controllers: Vec<Controller>,
    day: u32,
    hour: u32,
    hours_per_day: u32,
    seedling_maturity_time: u32,
    hour_costs: HourCosts,
    costs: ResourceCosts,
    victory_conditions: BTreeMap<ResourceKind, i64>,
    state: GameState,
    victors: Vec<ControllerId>,
    event_log: EventLog,
    rng: StdRng,
}

impl Game {
    /// Build a game from a configuration. Validation failures are fatal.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut grid = Grid::new(config.map_width, config.map_height);
        let mut world = World::new();
        let mut controllers = Vec::with_capacity(config.controllers.len());

        for (id, spec) in config.controllers.iter().enumerate() {
            let starting_position = spec.starting_position.unwrap_or(Position::ORIGIN);
            let mut controller = Controller::new(id, starting_position);
            for (&kind, &amount) in &spec.resources {
                controller.resources.add(kind, amount);
            }
            for bot_spec in &spec.bots {
                let pos = Position::new(bot_spec.x, bot_spec.y);
                let bot = world.spawn((
                    pos,
                    Bot {
                        controller_id: id,
                        deck: Deck::new(bot_spec.deck.iter().copied()),
                    },
                ));
                controller.bots.push(bot);
                grid.cell_mut(pos).bots.insert(bot);
            }
            controllers.push(controller);
        }

        match &config.initial_state {
            InitialState::Preset(StatePreset::Uniform) => generation::generate_uniform_assets(
                &mut grid,
                &config.asset_distribution,
                config.seedling_maturity_time,
                &mut rng,
            ),
            InitialState::Preset(StatePreset::Empty) => {}
            InitialState::Explicit(placements) => {
                generation::place_assets(&mut grid, placements, config.seedling_maturity_time)
            }
        }

        Ok(Self {
            grid,
            world,
            controllers,
            day: 0,
            hour: 0,
            hours_per_day: config.hours_per_day,
            seedling_maturity_time: config.seedling_maturity_time,
            hour_costs: HourCosts::STANDARD,
            costs: ResourceCosts {
                new_bot: config.new_bot_cost,
                modify_deck: config.modify_deck_cost,
            },
            victory_conditions: config.victory_conditions,
            state: GameState::Active,
            victors: Vec::new(),
            event_log: EventLog::new(),
            rng,
        })
    }

    /// Process one turn: run the orders in list order, then the end-of-turn
    /// phases (maturation, elimination sweep, victory check).
    ///
    /// A failed order aborts only itself; its rejection lands in the
    /// report row and later orders still run.
    pub fn process_turn(&mut self, orders: &[Order]) -> TurnReport {
        if self.state != GameState::Active {
            log::warn!("turn processed after victory; callers should stop submitting orders");
        }

        let mut report = TurnReport::default();
        for order in orders {
            let result = self.process_order(order);
            if let Err(err) = &result {
                log::warn!(
                    "order by controller {} rejected: {}",
                    order.controller_id,
                    err
                );
            }
            report.outcomes.push(OrderOutcome {
                controller_id: order.controller_id,
                action: order.action.kind(),
                result,
            });
        }

        // Growth runs once per turn, after all orders.
        mature_seedlings(&mut self.grid, &mut self.event_log, self.day, self.hour);

        self.sweep_eliminations();
        self.check_victory();
        report
    }

    fn process_order(&mut self, order: &Order) -> Result<(), OrderError> {
        let controller_id = order.controller_id;
        self.controller_index(controller_id)
            .ok_or(OrderError::UnknownController { controller_id })?;

        let hour_cost = match order.action {
            OrderAction::TakeBotActions { energy_points } => {
                energy_points.saturating_mul(self.hour_costs.bot_action)
            }
            OrderAction::ModifyDeck { .. } => self.hour_costs.modify_deck,
            OrderAction::CreateBot => self.hour_costs.new_bot,
        };
        self.advance_time(hour_cost)?;

        match &order.action {
            OrderAction::TakeBotActions { energy_points } => {
                self.take_bot_actions(controller_id, *energy_points)?
            }
            OrderAction::ModifyDeck { bot_id, edit } => {
                self.modify_deck(controller_id, *bot_id, edit)?
            }
            OrderAction::CreateBot => self.create_bot(controller_id)?,
        }

        self.log_event(format!(
            "Controller {} performed {}",
            controller_id,
            order.action.kind().name()
        ));
        Ok(())
    }

    /// Advance the clock. Fails without side effects when the cost does
    /// not fit into the remaining hours of the current day; on reaching
    /// the day boundary the hour resets and the day increments.
    fn advance_time(&mut self, hours: u32) -> Result<(), OrderError> {
        let remaining = self.hours_per_day - self.hour;
        if hours > remaining {
            return Err(OrderError::InsufficientTime {
                needed: hours,
                remaining,
            });
        }
        self.hour += hours;
        if self.hour >= self.hours_per_day {
            self.hour = 0;
            self.day += 1;
        }
        Ok(())
    }

    /// Spend energy letting bots act: each point executes the head card of
    /// one of the controller's bots, chosen uniformly with replacement.
    /// With no bots left the remaining points go unspent on actions, but
    /// the energy is already deducted.
    fn take_bot_actions(
        &mut self,
        controller_id: ControllerId,
        energy_points: u32,
    ) -> Result<(), OrderError> {
        let idx = self
            .controller_index(controller_id)
            .ok_or(OrderError::UnknownController { controller_id })?;
        let required = energy_points as i64;

        let resources = self.controllers[idx].resources;
        if required > resources.total() {
            return Err(OrderError::InsufficientResources {
                required,
                available: resources.total(),
            });
        }
        let energy = resources.get(ResourceKind::Energy);
        if required > energy {
            return Err(OrderError::InsufficientEnergy {
                required,
                available: energy,
            });
        }
        self.controllers[idx]
            .resources
            .deduct(ResourceKind::Energy, required);

        for _ in 0..energy_points {
            let bot = {
                let bots = &self.controllers[idx].bots;
                if bots.is_empty() {
                    break;
                }
                bots[self.rng.gen_range(0..bots.len())]
            };
            self.interpreter().execute_head(bot);
        }
        Ok(())
    }

    /// Edit one bot's deck. The biomass cost is charged once per order,
    /// and only after the whole edit has validated.
    fn modify_deck(
        &mut self,
        controller_id: ControllerId,
        bot_id: usize,
        edit: &DeckEdit,
    ) -> Result<(), OrderError> {
        let idx = self
            .controller_index(controller_id)
            .ok_or(OrderError::UnknownController { controller_id })?;
        let cost = self.costs.modify_deck as i64;

        let (bot, biomass) = {
            let controller = &self.controllers[idx];
            let bot = controller
                .bots
                .get(bot_id)
                .copied()
                .ok_or(OrderError::UnknownBot {
                    controller_id,
                    bot_id,
                })?;
            (bot, controller.resources.get(ResourceKind::Biomass))
        };
        if cost > biomass {
            return Err(OrderError::InsufficientBiomass {
                required: cost,
                available: biomass,
            });
        }

        match edit {
            DeckEdit::Remove { removed_ids } => {
                let deck_len = self
                    .world
                    .get::<&Bot>(bot)
                    .map(|data| data.deck.len())
                    .unwrap_or(0);
                let mut indices = removed_ids.clone();
                indices.sort_unstable_by(|a, b| b.cmp(a));
                for pair in indices.windows(2) {
                    if pair[0] == pair[1] {
                        return Err(OrderError::DuplicateDeckIndex { index: pair[0] });
                    }
                }
                if let Some(&index) = indices.iter().find(|&&index| index >= deck_len) {
                    return Err(OrderError::InvalidDeckIndex { index, deck_len });
                }

                self.controllers[idx]
                    .resources
                    .deduct(ResourceKind::Biomass, cost);
                if let Ok(mut data) = self.world.get::<&mut Bot>(bot) {
                    for &index in &indices {
                        data.deck.remove(index);
                    }
                }
            }
            DeckEdit::Append { cards } => {
                self.controllers[idx]
                    .resources
                    .deduct(ResourceKind::Biomass, cost);
                if let Ok(mut data) = self.world.get::<&mut Bot>(bot) {
                    for &card in cards {
                        data.deck.append(card);
                    }
                }
            }
        }
        Ok(())
    }

    /// Build a bot with an empty deck at the controller's starting
    /// position, spreading the cost proportionally across all three
    /// resources. The new bot stacks silently if the cell is occupied.
    fn create_bot(&mut self, controller_id: ControllerId) -> Result<(), OrderError> {
        let idx = self
            .controller_index(controller_id)
            .ok_or(OrderError::UnknownController { controller_id })?;
        let cost = self.costs.new_bot as i64;

        let (total, pos) = {
            let controller = &self.controllers[idx];
            (controller.resources.total(), controller.starting_position)
        };
        if cost > total {
            return Err(OrderError::InsufficientResources {
                required: cost,
                available: total,
            });
        }

        let bot = self.world.spawn((
            pos,
            Bot {
                controller_id,
                deck: Deck::default(),
            },
        ));
        self.grid.cell_mut(pos).bots.insert(bot);
        let controller = &mut self.controllers[idx];
        controller.bots.push(bot);
        controller.resources.deduct_spread(cost);
        Ok(())
    }

    /// Remove every controller whose energy has drained to zero, along
    /// with all of their bots. Runs every turn, orders or not.
    fn sweep_eliminations(&mut self) {
        let doomed: Vec<ControllerId> = self
            .controllers
            .iter()
            .filter(|c| c.resources.get(ResourceKind::Energy) <= 0)
            .map(|c| c.id)
            .collect();
        for id in doomed {
            self.log_event(format!(
                "Controller {id} has no energy left and is eliminated"
            ));
            log::info!("controller {id} eliminated");
            self.eliminate_controller(id);
        }
    }

    fn eliminate_controller(&mut self, id: ControllerId) {
        let Some(idx) = self.controller_index(id) else {
            return;
        };
        let bots = self.controllers[idx].bots.clone();
        {
            let mut interpreter = self.interpreter();
            for bot in bots {
                interpreter.destroy_bot(bot);
            }
        }
        if let Some(idx) = self.controller_index(id) {
            self.controllers.remove(idx);
        }
    }

    /// Mark every controller meeting all victory thresholds as a victor.
    /// The state flips to `Victory` with the first one and stays there.
    fn check_victory(&mut self) {
        let winners: Vec<ControllerId> = self
            .controllers
            .iter()
            .filter(|c| {
                self.victory_conditions
                    .iter()
                    .all(|(&kind, &amount)| c.resources.get(kind) >= amount)
            })
            .map(|c| c.id)
            .collect();
        for id in winners {
            if !self.victors.contains(&id) {
                self.state = GameState::Victory;
                self.victors.push(id);
                self.log_event(format!("Controller {id} has met the victory conditions"));
                log::info!("controller {id} wins");
            }
        }
    }

    fn controller_index(&self, id: ControllerId) -> Option<usize> {
        self.controllers.iter().position(|c| c.id == id)
    }

    fn interpreter(&mut self) -> ActionInterpreter<'_> {
        ActionInterpreter {
            world: &mut self.world,
            grid: &mut self.grid,
            controllers: &mut self.controllers,
            events: &mut self.event_log,
            rng: &mut self.rng,
            day: self.day,
            hour: self.hour,
            seedling_maturity_time: self.seedling_maturity_time,
        }
    }

    fn log_event(&mut self, message: String) {
        self.event_log.push(self.day, self.hour, message);
    }

    // ── Read access ─────────────────────────────────────────────────────

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn victors(&self) -> &[ControllerId] {
        &self.victors
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    pub fn controller(&self, id: ControllerId) -> Option<&Controller> {
        self.controllers.iter().find(|c| c.id == id)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn bot_position(&self, bot: Entity) -> Option<Position> {
        self.world.get::<&Position>(bot).ok().map(|pos| *pos)
    }

    pub fn bot_deck(&self, bot: Entity) -> Option<Deck> {
        self.world.get::<&Bot>(bot).ok().map(|data| data.deck.clone())
    }

    /// Pure read of the complete observable state for the presentation
    /// layer.
    pub fn snapshot(&self) -> GameSnapshot {
        let controllers = self
            .controllers
            .iter()
            .map(|c| ControllerView {
                id: c.id,
                resources: ResourceKind::ALL
                    .iter()
                    .map(|&kind| (kind.name().to_string(), c.resources.get(kind)))
                    .collect(),
                bots: c
                    .bots
                    .iter()
                    .filter_map(|&bot| {
                        let position = self.bot_position(bot)?;
                        let deck = self.bot_deck(bot)?;
                        Some(BotView {
                            position,
                            deck: deck.iter().map(Into::into).collect(),
                        })
                    })
                    .collect(),
            })
            .collect();

        let mut map = Vec::with_capacity(self.grid.height() as usize);
        for y in 0..self.grid.height() as i32 {
            let mut row = Vec::with_capacity(self.grid.width() as usize);
            for x in 0..self.grid.width() as i32 {
                let position = Position::new(x, y);
                let cell = self.grid.cell(position);
                row.push(CellView {
                    position,
                    assets: cell
                        .assets
                        .iter()
                        .map(|asset| AssetView {
                            asset_type: asset.type_name(),
                            amount: asset.amount,
                            maturity_time: asset.maturity,
                        })
                        .collect(),
                    bots: cell
                        .bots
                        .iter()
                        .filter_map(|&bot| {
                            let controller_id =
                                self.world.get::<&Bot>(bot).ok()?.controller_id;
                            Some(CellBotView {
                                controller_id,
                                position,
                            })
                        })
                        .collect(),
                });
            }
            map.push(row);
        }

        GameSnapshot {
            day: self.day,
            hour: self.hour,
            hours_per_day: self.hours_per_day,
            map_size: MapSize {
                width: self.grid.width(),
                height: self.grid.height(),
            },
            costs: self.costs,
            hour_costs: self.hour_costs,
            victory_conditions: self
                .victory_conditions
                .iter()
                .map(|(&kind, &amount)| (kind.name().to_string(), amount))
                .collect(),
            controllers,
            state: self.state,
            victors: self.victors.clone(),
            map,
            event_log: self.event_log.entries().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AssetKind, AssetTypeName, Card, Direction};
    use crate::config::{AssetPlacement, BotConfig, ControllerConfig};

    fn base_config() -> GameConfig {
        GameConfig {
            map_width: 5,
            map_height: 5,
            seedling_maturity_time: 5,
            new_bot_cost: 20,
            modify_deck_cost: 2,
            victory_conditions: BTreeMap::from([(ResourceKind::Biomass, 20)]),
            hours_per_day: 24,
            initial_state: InitialState::Preset(StatePreset::Empty),
            asset_distribution: BTreeMap::new(),
            controllers: Vec::new(),
            seed: Some(1),
        }
    }

    fn controller_with(
        resources: &[(ResourceKind, i64)],
        bots: Vec<BotConfig>,
    ) -> ControllerConfig {
        ControllerConfig {
            resources: resources.iter().copied().collect(),
            starting_position: None,
            bots,
        }
    }

    fn take_bot_actions(controller_id: ControllerId, energy_points: u32) -> Order {
        Order::new(
            controller_id,
            OrderAction::TakeBotActions { energy_points },
        )
    }

    #[test]
    fn test_move_then_harvest_end_to_end() {
        let mut config = base_config();
        config.initial_state = InitialState::Explicit(vec![AssetPlacement {
            asset_type: AssetTypeName::Ore,
            amount: 3,
            x: 2,
            y: 1,
        }]);
        config.controllers = vec![controller_with(
            &[(ResourceKind::Energy, 10)],
            vec![BotConfig {
                x: 2,
                y: 2,
                deck: vec![
                    Card::Move(Direction::North),
                    Card::Harvest(AssetKind::Ore),
                ],
            }],
        )];
        let mut game = Game::new(config).expect("game");
        let bot = game.controllers()[0].bots[0];

        let report = game.process_turn(&[take_bot_actions(0, 2)]);
        assert!(report.all_ok());

        let controller = game.controller(0).expect("alive");
        assert_eq!(game.bot_position(bot), Some(Position::new(2, 1)));
        assert_eq!(controller.resources.get(ResourceKind::Mineral), 3);
        assert_eq!(controller.resources.get(ResourceKind::Energy), 8);
        // Two executions of a two-card deck: back to the original order.
        let deck = game.bot_deck(bot).expect("alive");
        let cards: Vec<Card> = deck.iter().collect();
        assert_eq!(
            cards,
            vec![Card::Move(Direction::North), Card::Harvest(AssetKind::Ore)]
        );
        assert_eq!(game.hour(), 2);
    }

    #[test]
    fn test_orderless_turn_matures_a_due_seedling() {
        let mut config = base_config();
        config.seedling_maturity_time = 1;
        config.initial_state = InitialState::Explicit(vec![AssetPlacement {
            asset_type: AssetTypeName::PlantSeedling,
            amount: 2,
            x: 0,
            y: 0,
        }]);
        config.controllers = vec![controller_with(&[(ResourceKind::Energy, 5)], Vec::new())];
        let mut game = Game::new(config).expect("game");

        game.process_turn(&[]);

        let cell = game.grid().cell(Position::new(0, 0));
        assert_eq!(cell.assets.len(), 1);
        assert_eq!(cell.assets[0].kind, AssetKind::Plant);
        assert_eq!(cell.assets[0].maturity, None);
        assert_eq!(cell.assets[0].amount, 2);
    }

    #[test]
    fn test_seedling_ages_once_per_turn_even_across_rollover() {
        let mut config = base_config();
        config.hours_per_day = 2;
        config.seedling_maturity_time = 5;
        config.initial_state = InitialState::Explicit(vec![AssetPlacement {
            asset_type: AssetTypeName::OreSeedling,
            amount: 1,
            x: 1,
            y: 1,
        }]);
        config.controllers = vec![controller_with(&[(ResourceKind::Energy, 10)], Vec::new())];
        let mut game = Game::new(config).expect("game");

        // Two hours spent: the day rolls over inside the turn, but growth
        // still only ticks once.
        game.process_turn(&[take_bot_actions(0, 2)]);
        assert_eq!(game.day(), 1);
        assert_eq!(game.hour(), 0);
        let cell = game.grid().cell(Position::new(1, 1));
        assert_eq!(cell.assets[0].maturity, Some(4));
    }

    #[test]
    fn test_insufficient_time_rejects_only_that_order() {
        let mut config = base_config();
        config.controllers = vec![controller_with(&[(ResourceKind::Energy, 30)], Vec::new())];
        let mut game = Game::new(config).expect("game");

        let report = game.process_turn(&[take_bot_actions(0, 25), take_bot_actions(0, 2)]);

        assert_eq!(
            report.outcomes[0].result,
            Err(OrderError::InsufficientTime {
                needed: 25,
                remaining: 24,
            })
        );
        assert!(report.outcomes[1].result.is_ok());
        // Only the accepted order paid energy.
        let controller = game.controller(0).expect("alive");
        assert_eq!(controller.resources.get(ResourceKind::Energy), 28);
        assert_eq!(game.hour(), 2);
    }

    #[test]
    fn test_unknown_controller_is_reported() {
        let mut config = base_config();
        config.controllers = vec![controller_with(&[(ResourceKind::Energy, 5)], Vec::new())];
        let mut game = Game::new(config).expect("game");

        let report = game.process_turn(&[take_bot_actions(9, 1)]);
        assert_eq!(
            report.outcomes[0].result,
            Err(OrderError::UnknownController { controller_id: 9 })
        );
    }

    #[test]
    fn test_energy_guard_blocks_overdraw() {
        let mut config = base_config();
        config.controllers = vec![controller_with(
            &[(ResourceKind::Energy, 3), (ResourceKind::Mineral, 10)],
            Vec::new(),
        )];
        let mut game = Game::new(config).expect("game");

        let report = game.process_turn(&[take_bot_actions(0, 5)]);
        assert_eq!(
            report.outcomes[0].result,
            Err(OrderError::InsufficientEnergy {
                required: 5,
                available: 3,
            })
        );
        let controller = game.controller(0).expect("alive");
        assert_eq!(controller.resources.get(ResourceKind::Energy), 3);
    }

    #[test]
    fn test_empty_deck_bot_consumes_energy_idle() {
        let mut config = base_config();
        config.controllers = vec![controller_with(
            &[(ResourceKind::Energy, 5)],
            vec![BotConfig {
                x: 2,
                y: 2,
                deck: Vec::new(),
            }],
        )];
        let mut game = Game::new(config).expect("game");
        let bot = game.controllers()[0].bots[0];

        let report = game.process_turn(&[take_bot_actions(0, 3)]);
        assert!(report.all_ok());
        let controller = game.controller(0).expect("alive");
        assert_eq!(controller.resources.get(ResourceKind::Energy), 2);
        assert_eq!(game.bot_position(bot), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_modify_deck_remove_append_and_charging() {
        let mut config = base_config();
        config.controllers = vec![controller_with(
            &[(ResourceKind::Biomass, 5), (ResourceKind::Energy, 5)],
            vec![BotConfig {
                x: 0,
                y: 0,
                deck: vec![
                    Card::Move(Direction::North),
                    Card::Move(Direction::South),
                    Card::Move(Direction::East),
                ],
            }],
        )];
        let mut game = Game::new(config).expect("game");
        let bot = game.controllers()[0].bots[0];

        let report = game.process_turn(&[
            Order::new(
                0,
                OrderAction::ModifyDeck {
                    bot_id: 0,
                    edit: DeckEdit::Remove {
                        removed_ids: vec![2, 0],
                    },
                },
            ),
            Order::new(
                0,
                OrderAction::ModifyDeck {
                    bot_id: 0,
                    edit: DeckEdit::Append {
                        cards: vec![Card::Harvest(AssetKind::Ore)],
                    },
                },
            ),
        ]);
        assert!(report.all_ok());

        let cards: Vec<Card> = game.bot_deck(bot).expect("alive").iter().collect();
        assert_eq!(
            cards,
            vec![Card::Move(Direction::South), Card::Harvest(AssetKind::Ore)]
        );
        // One charge per order, not per card.
        let controller = game.controller(0).expect("alive");
        assert_eq!(controller.resources.get(ResourceKind::Biomass), 1);

        // A third edit no longer fits the biomass balance.
        let report = game.process_turn(&[Order::new(
            0,
            OrderAction::ModifyDeck {
                bot_id: 0,
                edit: DeckEdit::Append {
                    cards: vec![Card::Plant(AssetKind::Plant)],
                },
            },
        )]);
        assert_eq!(
            report.outcomes[0].result,
            Err(OrderError::InsufficientBiomass {
                required: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn test_modify_deck_validates_before_charging() {
        let mut config = base_config();
        config.controllers = vec![controller_with(
            &[(ResourceKind::Biomass, 5), (ResourceKind::Energy, 5)],
            vec![BotConfig {
                x: 0,
                y: 0,
                deck: vec![Card::Move(Direction::North)],
            }],
        )];
        let mut game = Game::new(config).expect("game");
        let bot = game.controllers()[0].bots[0];

        let report = game.process_turn(&[Order::new(
            0,
            OrderAction::ModifyDeck {
                bot_id: 0,
                edit: DeckEdit::Remove {
                    removed_ids: vec![4],
                },
            },
        )]);
        assert_eq!(
            report.outcomes[0].result,
            Err(OrderError::InvalidDeckIndex {
                index: 4,
                deck_len: 1,
            })
        );
        // No charge, no edit.
        let controller = game.controller(0).expect("alive");
        assert_eq!(controller.resources.get(ResourceKind::Biomass), 5);
        assert_eq!(game.bot_deck(bot).expect("alive").len(), 1);

        let report = game.process_turn(&[Order::new(
            0,
            OrderAction::ModifyDeck {
                bot_id: 7,
                edit: DeckEdit::Append { cards: Vec::new() },
            },
        )]);
        assert_eq!(
            report.outcomes[0].result,
            Err(OrderError::UnknownBot {
                controller_id: 0,
                bot_id: 7,
            })
        );
    }

    #[test]
    fn test_create_bot_spawns_at_start_and_spreads_cost() {
        let mut config = base_config();
        config.controllers = vec![ControllerConfig {
            resources: BTreeMap::from([
                (ResourceKind::Mineral, 10),
                (ResourceKind::Biomass, 10),
                (ResourceKind::Energy, 10),
            ]),
            starting_position: Some(Position::new(1, 1)),
            bots: Vec::new(),
        }];
        let mut game = Game::new(config).expect("game");

        let report = game.process_turn(&[Order::new(0, OrderAction::CreateBot)]);
        assert!(report.all_ok());
        assert_eq!(game.hour(), 6);

        let controller = game.controller(0).expect("alive");
        assert_eq!(controller.bots.len(), 1);
        let bot = controller.bots[0];
        assert_eq!(game.bot_position(bot), Some(Position::new(1, 1)));
        assert!(game.bot_deck(bot).expect("alive").is_empty());
        assert!(game
            .grid()
            .cell(Position::new(1, 1))
            .bots
            .contains(&bot));
        // floor(20 * 10 / 30) = 6 off each balance.
        assert_eq!(controller.resources.get(ResourceKind::Mineral), 4);
        assert_eq!(controller.resources.get(ResourceKind::Biomass), 4);
        assert_eq!(controller.resources.get(ResourceKind::Energy), 4);

        // 12 total left cannot afford another 20-cost bot.
        let report = game.process_turn(&[Order::new(0, OrderAction::CreateBot)]);
        assert_eq!(
            report.outcomes[0].result,
            Err(OrderError::InsufficientResources {
                required: 20,
                available: 12,
            })
        );
    }

    #[test]
    fn test_elimination_removes_controller_and_bots() {
        let mut config = base_config();
        config.controllers = vec![controller_with(
            &[(ResourceKind::Energy, 2)],
            vec![BotConfig {
                x: 3,
                y: 3,
                deck: vec![Card::Plant(AssetKind::Plant)],
            }],
        )];
        let mut game = Game::new(config).expect("game");
        let bot = game.controllers()[0].bots[0];

        game.process_turn(&[take_bot_actions(0, 2)]);

        assert!(game.controllers().is_empty());
        assert!(game.bot_position(bot).is_none());
        assert!(game.grid().cell(Position::new(3, 3)).bots.is_empty());
    }

    #[test]
    fn test_victory_marks_state_without_duplicates() {
        let mut config = base_config();
        config.controllers = vec![controller_with(
            &[(ResourceKind::Biomass, 25), (ResourceKind::Energy, 5)],
            Vec::new(),
        )];
        let mut game = Game::new(config).expect("game");

        game.process_turn(&[]);
        assert_eq!(game.state(), GameState::Victory);
        assert_eq!(game.victors(), &[0]);

        // Defensive checks keep running but the victor is not re-listed.
        game.process_turn(&[]);
        assert_eq!(game.victors(), &[0]);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut config = base_config();
        config.initial_state = InitialState::Explicit(vec![AssetPlacement {
            asset_type: AssetTypeName::Ore,
            amount: 3,
            x: 2,
            y: 1,
        }]);
        config.controllers = vec![controller_with(
            &[(ResourceKind::Energy, 10)],
            vec![BotConfig {
                x: 2,
                y: 2,
                deck: vec![Card::Move(Direction::North)],
            }],
        )];
        let game = Game::new(config).expect("game");

        let value = serde_json::to_value(game.snapshot()).expect("serialize");
        assert_eq!(value["day"], 0);
        assert_eq!(value["hours_per_day"], 24);
        assert_eq!(value["map_size"]["width"], 5);
        assert_eq!(value["state"], "active");
        assert_eq!(value["victory_conditions"]["BIOMASS"], 20);
        assert_eq!(value["controllers"][0]["resources"]["ENERGY"], 10);
        assert_eq!(
            value["controllers"][0]["bots"][0]["deck"][0]["action_type"],
            "MOVE"
        );
        assert_eq!(value["map"][1][2]["assets"][0]["type"], "ORE");
        assert_eq!(value["map"][2][2]["bots"][0]["controller_id"], 0);
        assert_eq!(value["costs"]["new_bot"], 20);
        assert_eq!(value["hour_costs"]["new_bot"], 6);
    }
}
