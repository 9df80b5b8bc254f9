//! Seedling maturation: the growth pass that ages every seedling by one
//! day and converts the ones that are due.
//!
//! Cells are independent; processing order does not matter. Matured
//! amounts merge into an existing mature entry of the same kind, so a cell
//! never holds two mature entries of one kind.

use crate::components::AssetKind;
use crate::events::EventLog;
use crate::grid::{Cell, Grid};

/// Age every seedling on the grid by one day, converting those whose
/// countdown reaches zero. Conversions are logged with the given clock.
pub fn mature_seedlings(grid: &mut Grid, events: &mut EventLog, day: u32, hour: u32) {
    for (pos, cell) in grid.iter_mut() {
        for (kind, amount) in mature_cell(cell) {
            events.push(
                day,
                hour,
                format!("Seedling matured into {} {} at {}", amount, kind.name(), pos),
            );
        }
    }
}

/// Age one cell's seedlings; returns what matured.
fn mature_cell(cell: &mut Cell) -> Vec<(AssetKind, u32)> {
    let mut matured = Vec::new();
    let mut index = 0;
    while index < cell.assets.len() {
        match cell.assets[index].maturity {
            Some(days) => {
                let days = days.saturating_sub(1);
                if days == 0 {
                    let asset = cell.assets.remove(index);
                    matured.push((asset.kind, asset.amount));
                } else {
                    cell.assets[index].maturity = Some(days);
                    index += 1;
                }
            }
            None => index += 1,
        }
    }
    for &(kind, amount) in &matured {
        cell.add_mature(kind, amount);
    }
    matured
}
