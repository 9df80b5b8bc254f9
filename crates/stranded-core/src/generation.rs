//! Initial map stocking.
//!
//! Runs once during construction, after the grid is allocated and before
//! the first turn. Uniform generation draws from the game's own RNG so a
//! seeded configuration reproduces the same map.

use rand::Rng;
use std::collections::BTreeMap;

use crate::components::{Asset, AssetTypeName, Position};
use crate::config::AssetPlacement;
use crate::grid::Grid;

/// Scatter `distribution` over the grid: each placed asset lands on a
/// distinct free cell chosen uniformly without replacement, with an amount
/// drawn from 1..=5. Seedling types start with the configured countdown.
/// Counts beyond the number of remaining free cells are dropped.
pub fn generate_uniform_assets(
    grid: &mut Grid,
    distribution: &BTreeMap<AssetTypeName, u32>,
    maturity_time: u32,
    rng: &mut impl Rng,
) {
    let mut free: Vec<Position> = grid.iter().map(|(pos, _)| pos).collect();

    for (&type_name, &count) in distribution {
        let count = (count as usize).min(free.len());
        for _ in 0..count {
            let pos = free.swap_remove(rng.gen_range(0..free.len()));
            let amount = rng.gen_range(1..=5);
            let maturity = type_name.is_seedling().then_some(maturity_time);
            grid.cell_mut(pos).assets.push(Asset {
                kind: type_name.kind(),
                amount,
                maturity,
            });
        }
    }
}

/// Apply explicit placements. Mature assets merge into same-kind entries;
/// seedling types start with the configured countdown. Positions were
/// validated with the rest of the configuration.
pub fn place_assets(grid: &mut Grid, placements: &[AssetPlacement], maturity_time: u32) {
    for placement in placements {
        let pos = Position::new(placement.x, placement.y);
        let kind = placement.asset_type.kind();
        if placement.asset_type.is_seedling() {
            grid.cell_mut(pos)
                .assets
                .push(Asset::seedling(kind, placement.amount, maturity_time));
        } else {
            grid.cell_mut(pos).add_mature(kind, placement.amount);
        }
    }
}
