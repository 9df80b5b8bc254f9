//! Stranded Core - colony survival simulation engine
//!
//! A turn-based colony-survival game on a fixed 2D grid. Autonomous bots
//! execute a rotating deck of action cards (move, harvest, plant) while
//! controllers spend a shared per-day hour budget to reprogram bots, build
//! new ones, or let them act. The engine is the whole story here: the
//! turn/time state machine, the card interpreter, collision resolution,
//! the resource economy, and seedling maturation. HTTP, rendering, and
//! request parsing live with the embedding service.
//!
//! # Architecture
//!
//! - **components**: pure data (positions, cards, decks, assets, ledgers)
//! - **grid**: the width×height cell field bots and assets live on
//! - **systems**: the action interpreter and the maturation pass
//! - **engine**: the [`engine::Game`] state machine tying it together
//!
//! Bots live in a `hecs` arena; cells and controllers hold entity handles,
//! so identity stays unambiguous when positions collide.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use stranded_core::prelude::*;
//!
//! let config = GameConfig {
//!     map_width: 5,
//!     map_height: 5,
//!     seedling_maturity_time: 5,
//!     new_bot_cost: 20,
//!     modify_deck_cost: 2,
//!     victory_conditions: BTreeMap::from([(ResourceKind::Biomass, 20)]),
//!     hours_per_day: 24,
//!     initial_state: InitialState::Preset(StatePreset::Empty),
//!     asset_distribution: BTreeMap::new(),
//!     controllers: Vec::new(),
//!     seed: Some(7),
//! };
//!
//! let mut game = Game::new(config).expect("valid configuration");
//! let report = game.process_turn(&[]);
//! assert!(report.all_ok());
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod generation;
pub mod grid;
pub mod orders;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::{
        AssetPlacement, BotConfig, ControllerConfig, GameConfig, InitialState, StatePreset,
    };
    pub use crate::engine::{Game, GameState};
    pub use crate::error::{ConfigError, OrderError};
    pub use crate::orders::{DeckEdit, Order, OrderAction, OrderKind, TurnReport};
}
