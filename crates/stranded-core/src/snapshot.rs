//! Serializable full-state views for the presentation layer.
//!
//! A snapshot is a pure read of the game's current fields; building one
//! mutates nothing. The shapes here are the engine's outward contract:
//! asset types use the six-name wire scheme and decks appear as named
//! cards.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::components::{AssetTypeName, CardSpec, ControllerId, Position};
use crate::engine::{GameState, HourCosts, ResourceCosts};
use crate::events::EventEntry;

/// Complete observable game state.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub day: u32,
    pub hour: u32,
    pub hours_per_day: u32,
    pub map_size: MapSize,
    pub costs: ResourceCosts,
    pub hour_costs: HourCosts,
    /// Victory thresholds by resource name.
    pub victory_conditions: BTreeMap<String, i64>,
    pub controllers: Vec<ControllerView>,
    pub state: GameState,
    pub victors: Vec<ControllerId>,
    /// Cells row by row, `map[y][x]`.
    pub map: Vec<Vec<CellView>>,
    pub event_log: Vec<EventEntry>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControllerView {
    pub id: ControllerId,
    /// Balances by resource name.
    pub resources: BTreeMap<String, i64>,
    pub bots: Vec<BotView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BotView {
    pub position: Position,
    /// Deck in execution order, head first.
    pub deck: Vec<CardSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellView {
    pub position: Position,
    pub assets: Vec<AssetView>,
    pub bots: Vec<CellBotView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetView {
    #[serde(rename = "type")]
    pub asset_type: AssetTypeName,
    pub amount: u32,
    pub maturity_time: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellBotView {
    pub controller_id: ControllerId,
    pub position: Position,
}
