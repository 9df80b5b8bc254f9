//! Stranded Headless Scenario Harness
//!
//! Drives the simulation engine through scripted scenarios without any
//! server, UI, or persistence. Every scenario is deterministic (seeded
//! RNG) so a failure is reproducible.
//!
//! Usage:
//!   cargo run -p stranded-simtest
//!   cargo run -p stranded-simtest -- --verbose

use std::collections::BTreeMap;

use stranded_core::components::{
    Asset, AssetKind, AssetTypeName, Card, Direction, Position, ResourceKind,
};
use stranded_core::config::{
    AssetPlacement, BotConfig, ControllerConfig, GameConfig, InitialState, StatePreset,
};
use stranded_core::engine::{Game, GameState};
use stranded_core::error::OrderError;
use stranded_core::orders::{DeckEdit, Order, OrderAction};

// ── Scenario data (same JSON shape an embedding service would feed) ─────
const SCENARIO_BASIC: &str = include_str!("../../../data/scenario_basic.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail,
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Stranded Simulation Harness ===\n");

    let mut results = Vec::new();

    results.extend(scenario_basic_runs(verbose));
    results.extend(scenario_harvest_round_trip(verbose));
    results.extend(scenario_collision(verbose));
    results.extend(scenario_seedling_lifecycle(verbose));
    results.extend(scenario_deck_editing(verbose));
    results.extend(scenario_victory_and_elimination(verbose));

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    println!("\n=== Results: {} passed, {} failed ===", passed, failed);
    for result in &results {
        if !result.passed || verbose {
            let mark = if result.passed { "PASS" } else { "FAIL" };
            println!("[{}] {} - {}", mark, result.name, result.detail);
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

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
        seed: Some(99),
    }
}

fn bot_at(x: i32, y: i32, deck: Vec<Card>) -> BotConfig {
    BotConfig { x, y, deck }
}

fn controller_with(resources: &[(ResourceKind, i64)], bots: Vec<BotConfig>) -> ControllerConfig {
    ControllerConfig {
        resources: resources.iter().copied().collect(),
        starting_position: None,
        bots,
    }
}

fn take_bot_actions(controller_id: usize, energy_points: u32) -> Order {
    Order::new(controller_id, OrderAction::TakeBotActions { energy_points })
}

// ── Scenarios ───────────────────────────────────────────────────────────

/// The bundled scenario file parses, builds, and survives a week of play.
fn scenario_basic_runs(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let config: GameConfig = match serde_json::from_str(SCENARIO_BASIC) {
        Ok(config) => config,
        Err(err) => {
            results.push(TestResult::check(
                "basic: scenario file parses",
                false,
                format!("{err}"),
            ));
            return results;
        }
    };
    results.push(TestResult::check(
        "basic: scenario file parses",
        true,
        "scenario_basic.json".to_string(),
    ));

    let mut game = match Game::new(config) {
        Ok(game) => game,
        Err(err) => {
            results.push(TestResult::check(
                "basic: game constructs",
                false,
                format!("{err}"),
            ));
            return results;
        }
    };
    let placed: usize = game
        .snapshot()
        .map
        .iter()
        .flatten()
        .map(|cell| cell.assets.len())
        .sum();
    results.push(TestResult::check(
        "basic: game constructs",
        placed == 6,
        format!("{placed} assets scattered (expected 6)"),
    ));

    // Seven in-game days: two four-point action batches per day.
    for day in 0..7 {
        let report = game.process_turn(&[take_bot_actions(0, 4), take_bot_actions(0, 4)]);
        if verbose {
            println!(
                "day {day}: {} orders ok, clock at day {} hour {}",
                report.outcomes.iter().filter(|o| o.result.is_ok()).count(),
                game.day(),
                game.hour()
            );
        }
        if game.controllers().is_empty() {
            break;
        }
    }
    results.push(TestResult::check(
        "basic: week of play holds invariants",
        game.event_log().len() > 0 && game.hour() < game.hours_per_day(),
        format!(
            "{} events, clock day {} hour {}",
            game.event_log().len(),
            game.day(),
            game.hour()
        ),
    ));

    results
}

/// Move north, harvest ore: position, resources, and deck rotation all
/// line up after a two-point action batch.
fn scenario_harvest_round_trip(verbose: bool) -> Vec<TestResult> {
    let mut config = base_config();
    config.initial_state = InitialState::Explicit(vec![AssetPlacement {
        asset_type: AssetTypeName::Ore,
        amount: 3,
        x: 2,
        y: 1,
    }]);
    config.controllers = vec![controller_with(
        &[(ResourceKind::Energy, 10)],
        vec![bot_at(
            2,
            2,
            vec![Card::Move(Direction::North), Card::Harvest(AssetKind::Ore)],
        )],
    )];

    let mut game = Game::new(config).expect("scenario config is valid");
    let bot = game.controllers()[0].bots[0];
    let report = game.process_turn(&[take_bot_actions(0, 2)]);

    let controller = game.controller(0).expect("controller survives");
    let deck: Vec<Card> = game.bot_deck(bot).expect("bot survives").iter().collect();
    if verbose {
        println!(
            "harvest: bot at {:?}, minerals {}, energy {}",
            game.bot_position(bot),
            controller.resources.get(ResourceKind::Mineral),
            controller.resources.get(ResourceKind::Energy)
        );
    }

    vec![
        TestResult::check(
            "harvest: orders accepted",
            report.all_ok(),
            format!("{} outcomes", report.outcomes.len()),
        ),
        TestResult::check(
            "harvest: bot moved onto the deposit",
            game.bot_position(bot) == Some(Position::new(2, 1)),
            format!("{:?}", game.bot_position(bot)),
        ),
        TestResult::check(
            "harvest: minerals credited, energy charged",
            controller.resources.get(ResourceKind::Mineral) == 3
                && controller.resources.get(ResourceKind::Energy) == 8,
            format!("{:?}", controller.resources),
        ),
        TestResult::check(
            "harvest: two executions cycle a two-card deck",
            deck == vec![Card::Move(Direction::North), Card::Harvest(AssetKind::Ore)],
            format!("{} cards", deck.len()),
        ),
    ]
}

/// A move into an occupied cell destroys the mover and the occupant,
/// whoever owns them.
fn scenario_collision(verbose: bool) -> Vec<TestResult> {
    let mut config = base_config();
    config.controllers = vec![
        controller_with(
            &[(ResourceKind::Energy, 5)],
            vec![bot_at(1, 1, vec![Card::Move(Direction::East)])],
        ),
        controller_with(
            &[(ResourceKind::Energy, 5)],
            vec![bot_at(2, 1, vec![Card::Move(Direction::West)])],
        ),
    ];

    let mut game = Game::new(config).expect("scenario config is valid");
    game.process_turn(&[take_bot_actions(0, 1)]);

    let survivors: usize = game.controllers().iter().map(|c| c.bots.len()).sum();
    let cells_clear = game.grid().cell(Position::new(1, 1)).bots.is_empty()
        && game.grid().cell(Position::new(2, 1)).bots.is_empty();
    if verbose {
        println!("collision: {survivors} bots left, cells clear: {cells_clear}");
    }

    vec![
        TestResult::check(
            "collision: both bots destroyed",
            survivors == 0,
            format!("{survivors} bots remain"),
        ),
        TestResult::check(
            "collision: both cells emptied",
            cells_clear,
            "origin and destination".to_string(),
        ),
    ]
}

/// Plant, wait out the countdown, harvest the grown asset.
fn scenario_seedling_lifecycle(verbose: bool) -> Vec<TestResult> {
    let mut config = base_config();
    config.seedling_maturity_time = 2;
    config.controllers = vec![controller_with(
        &[(ResourceKind::Energy, 10)],
        vec![bot_at(
            0,
            0,
            vec![Card::Plant(AssetKind::Plant), Card::Harvest(AssetKind::Plant)],
        )],
    )];

    let mut game = Game::new(config).expect("scenario config is valid");
    let cell_pos = Position::new(0, 0);

    // Plant; end-of-turn growth ages the fresh seedling to 1 day left.
    game.process_turn(&[take_bot_actions(0, 1)]);
    let after_plant = game.grid().cell(cell_pos).assets.clone();

    // Orderless turn: the countdown expires and the seedling converts.
    game.process_turn(&[]);
    let after_growth = game.grid().cell(cell_pos).assets.clone();

    // The harvest card is next in the rotation.
    game.process_turn(&[take_bot_actions(0, 1)]);
    let controller = game.controller(0).expect("controller survives");
    if verbose {
        println!(
            "seedling: after plant {after_plant:?}, after growth {after_growth:?}, biomass {}",
            controller.resources.get(ResourceKind::Biomass)
        );
    }

    vec![
        TestResult::check(
            "seedling: planted with countdown",
            after_plant == vec![Asset::seedling(AssetKind::Plant, 1, 1)],
            format!("{after_plant:?}"),
        ),
        TestResult::check(
            "seedling: converts when due",
            after_growth == vec![Asset::mature(AssetKind::Plant, 1)],
            format!("{after_growth:?}"),
        ),
        TestResult::check(
            "seedling: grown asset harvests as biomass",
            controller.resources.get(ResourceKind::Biomass) == 1,
            format!("{}", controller.resources.get(ResourceKind::Biomass)),
        ),
    ]
}

/// Deck edits charge biomass once per order and reject bad indices before
/// touching anything.
fn scenario_deck_editing(verbose: bool) -> Vec<TestResult> {
    let mut config = base_config();
    config.controllers = vec![controller_with(
        &[(ResourceKind::Biomass, 5), (ResourceKind::Energy, 5)],
        vec![bot_at(
            0,
            0,
            vec![
                Card::Move(Direction::North),
                Card::Move(Direction::South),
                Card::Move(Direction::East),
            ],
        )],
    )];

    let mut game = Game::new(config).expect("scenario config is valid");
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
                    cards: vec![Card::Harvest(AssetKind::Ore), Card::Plant(AssetKind::Ore)],
                },
            },
        ),
        Order::new(
            0,
            OrderAction::ModifyDeck {
                bot_id: 0,
                edit: DeckEdit::Remove {
                    removed_ids: vec![9],
                },
            },
        ),
    ]);

    let deck: Vec<Card> = game.bot_deck(bot).expect("bot survives").iter().collect();
    let biomass = game
        .controller(0)
        .expect("controller survives")
        .resources
        .get(ResourceKind::Biomass);
    if verbose {
        println!("deck edit: {deck:?}, biomass {biomass}");
    }

    vec![
        TestResult::check(
            "deck edit: remove and append applied in order",
            deck == vec![
                Card::Move(Direction::South),
                Card::Harvest(AssetKind::Ore),
                Card::Plant(AssetKind::Ore),
            ],
            format!("{} cards", deck.len()),
        ),
        TestResult::check(
            "deck edit: flat charge per order, none for the rejected one",
            biomass == 1,
            format!("biomass {biomass}"),
        ),
        TestResult::check(
            "deck edit: bad index rejected",
            matches!(
                report.outcomes[2].result,
                Err(OrderError::InvalidDeckIndex { index: 9, .. })
            ),
            format!("{:?}", report.outcomes[2].result),
        ),
    ]
}

/// A harvest pushes one controller over the victory threshold in the same
/// turn another one drains its energy and is eliminated.
fn scenario_victory_and_elimination(verbose: bool) -> Vec<TestResult> {
    let mut config = base_config();
    config.initial_state = InitialState::Explicit(vec![AssetPlacement {
        asset_type: AssetTypeName::Plant,
        amount: 5,
        x: 4,
        y: 4,
    }]);
    config.controllers = vec![
        controller_with(
            &[(ResourceKind::Biomass, 16), (ResourceKind::Energy, 10)],
            vec![bot_at(4, 4, vec![Card::Harvest(AssetKind::Plant)])],
        ),
        controller_with(
            &[(ResourceKind::Energy, 1)],
            vec![bot_at(0, 0, vec![Card::Move(Direction::Random)])],
        ),
    ];

    let mut game = Game::new(config).expect("scenario config is valid");
    game.process_turn(&[take_bot_actions(0, 1), take_bot_actions(1, 1)]);

    let eliminated = game.controller(1).is_none();
    let victory = game.state() == GameState::Victory && game.victors() == &[0];
    if verbose {
        println!(
            "endgame: state {:?}, victors {:?}, controllers left {}",
            game.state(),
            game.victors(),
            game.controllers().len()
        );
    }

    vec![
        TestResult::check(
            "endgame: drained controller eliminated",
            eliminated,
            format!("{} controllers left", game.controllers().len()),
        ),
        TestResult::check(
            "endgame: harvest reaches the victory threshold",
            victory,
            format!("state {:?}, victors {:?}", game.state(), game.victors()),
        ),
    ]
}
