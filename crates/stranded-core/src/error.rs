//! Error taxonomy: fatal configuration problems and per-order rejections.
//!
//! Soft gameplay failures (a move off the map, a harvest that finds
//! nothing, a plant onto a seeded cell) are not errors; they are logged
//! no-ops reported through boolean outcomes.

use thiserror::Error;

use crate::components::ControllerId;

/// Configuration problems caught once at construction. Fatal to startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    #[error("victory conditions must name at least one resource")]
    EmptyVictoryConditions,

    #[error("victory threshold for {resource} must be positive")]
    InvalidVictoryThreshold { resource: &'static str },

    #[error("{what} at ({x}, {y}) is outside the {width}x{height} map")]
    PositionOutOfBounds {
        what: &'static str,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("asset amount at ({x}, {y}) must be positive")]
    ZeroAssetAmount { x: i32, y: i32 },

    #[error("cell ({x}, {y}) would hold more than one seedling")]
    DuplicateSeedling { x: i32, y: i32 },
}

/// Why a single order was rejected. A rejected order leaves no resource
/// deduction of its own; later orders in the same turn still run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("unknown controller {controller_id}")]
    UnknownController { controller_id: ControllerId },

    #[error("controller {controller_id} has no bot {bot_id}")]
    UnknownBot {
        controller_id: ControllerId,
        bot_id: usize,
    },

    #[error("deck index {index} is out of range for a {deck_len}-card deck")]
    InvalidDeckIndex { index: usize, deck_len: usize },

    #[error("deck index {index} given more than once")]
    DuplicateDeckIndex { index: usize },

    #[error("{needed} hours requested but only {remaining} left in the day")]
    InsufficientTime { needed: u32, remaining: u32 },

    #[error("requires {required} total resources, controller has {available}")]
    InsufficientResources { required: i64, available: i64 },

    #[error("requires {required} energy, controller has {available}")]
    InsufficientEnergy { required: i64, available: i64 },

    #[error("requires {required} biomass, controller has {available}")]
    InsufficientBiomass { required: i64, available: i64 },
}
