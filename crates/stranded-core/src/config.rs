//! Game construction parameters and their validation.
//!
//! The engine does not load files; the embedding layer hands it a
//! deserialized [`GameConfig`] and construction validates the bounds the
//! engine itself enforces. Everything else about configuration handling is
//! the embedder's business.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::components::{AssetTypeName, Card, Position, ResourceKind};
use crate::error::ConfigError;

const MAP_SIZE_MIN: u32 = 5;
const MAP_SIZE_MAX: u32 = 1000;
const MATURITY_MIN: u32 = 1;
const MATURITY_MAX: u32 = 100;
const COST_MIN: u32 = 1;
const COST_MAX: u32 = 1000;
const HOURS_MIN: u32 = 1;
const HOURS_MAX: u32 = 48;

fn default_hours_per_day() -> u32 {
    24
}

/// Everything a game is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub map_width: u32,
    pub map_height: u32,
    /// Days a planted seedling needs before it can be harvested.
    pub seedling_maturity_time: u32,
    pub new_bot_cost: u32,
    pub modify_deck_cost: u32,
    /// Resource thresholds a controller must meet simultaneously to win.
    pub victory_conditions: BTreeMap<ResourceKind, i64>,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,
    pub initial_state: InitialState,
    /// Counts per asset type for `initial_state: "uniform"`.
    #[serde(default)]
    pub asset_distribution: BTreeMap<AssetTypeName, u32>,
    pub controllers: Vec<ControllerConfig>,
    /// Seed for the game's RNG; omit to draw from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// How the map is stocked before the first turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialState {
    /// `"uniform"` scatters `asset_distribution` over distinct random
    /// cells; `"empty"` places nothing.
    Preset(StatePreset),
    /// Explicit placements.
    Explicit(Vec<AssetPlacement>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatePreset {
    Uniform,
    Empty,
}

/// One pre-placed asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPlacement {
    #[serde(rename = "type")]
    pub asset_type: AssetTypeName,
    pub amount: u32,
    pub x: i32,
    pub y: i32,
}

/// One controller's starting state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default)]
    pub resources: BTreeMap<ResourceKind, i64>,
    /// Where CREATE_BOT places new bots. Defaults to the origin.
    #[serde(default)]
    pub starting_position: Option<Position>,
    #[serde(default)]
    pub bots: Vec<BotConfig>,
}

/// One initial bot: a position and a programmed deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub deck: Vec<Card>,
}

impl GameConfig {
    /// Check the bounds the engine enforces. Construction calls this; a
    /// failure is fatal to startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        range("map_width", self.map_width, MAP_SIZE_MIN, MAP_SIZE_MAX)?;
        range("map_height", self.map_height, MAP_SIZE_MIN, MAP_SIZE_MAX)?;
        range(
            "seedling_maturity_time",
            self.seedling_maturity_time,
            MATURITY_MIN,
            MATURITY_MAX,
        )?;
        range("new_bot_cost", self.new_bot_cost, COST_MIN, COST_MAX)?;
        range(
            "modify_deck_cost",
            self.modify_deck_cost,
            COST_MIN,
            COST_MAX,
        )?;
        range("hours_per_day", self.hours_per_day, HOURS_MIN, HOURS_MAX)?;

        if self.victory_conditions.is_empty() {
            return Err(ConfigError::EmptyVictoryConditions);
        }
        for (&resource, &amount) in &self.victory_conditions {
            if amount <= 0 {
                return Err(ConfigError::InvalidVictoryThreshold {
                    resource: resource.name(),
                });
            }
        }

        for controller in &self.controllers {
            if let Some(pos) = controller.starting_position {
                self.check_in_bounds("starting position", pos.x, pos.y)?;
            }
            for bot in &controller.bots {
                self.check_in_bounds("bot", bot.x, bot.y)?;
            }
        }

        if let InitialState::Explicit(placements) = &self.initial_state {
            let mut seeded: Vec<(i32, i32)> = Vec::new();
            for placement in placements {
                self.check_in_bounds("asset", placement.x, placement.y)?;
                if placement.amount == 0 {
                    return Err(ConfigError::ZeroAssetAmount {
                        x: placement.x,
                        y: placement.y,
                    });
                }
                if placement.asset_type.is_seedling() {
                    let key = (placement.x, placement.y);
                    if seeded.contains(&key) {
                        return Err(ConfigError::DuplicateSeedling {
                            x: placement.x,
                            y: placement.y,
                        });
                    }
                    seeded.push(key);
                }
            }
        }

        Ok(())
    }

    fn check_in_bounds(&self, what: &'static str, x: i32, y: i32) -> Result<(), ConfigError> {
        let inside =
            x >= 0 && y >= 0 && (x as u32) < self.map_width && (y as u32) < self.map_height;
        if inside {
            Ok(())
        } else {
            Err(ConfigError::PositionOutOfBounds {
                what,
                x,
                y,
                width: self.map_width,
                height: self.map_height,
            })
        }
    }
}

fn range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            min: min as i64,
            max: max as i64,
            value: value as i64,
        });
    }
    Ok(())
}
