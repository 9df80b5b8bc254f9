//! The spatial grid: a fixed width×height field of cells.
//!
//! The grid performs no clamping or wraparound; callers bounds-check
//! positions with [`Grid::is_valid`] before touching a cell.

use hecs::Entity;
use std::collections::HashSet;

use crate::components::{Asset, AssetKind, Position};

/// Contents of one grid coordinate.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// Bots standing here, by arena handle. Normally at most one
    /// controller's worth; a collision empties the set.
    pub bots: HashSet<Entity>,
    /// Deposits here, in placement order.
    pub assets: Vec<Asset>,
}

impl Cell {
    /// Whether any seedling occupies this cell. At most one ever does.
    pub fn has_seedling(&self) -> bool {
        self.assets.iter().any(Asset::is_seedling)
    }

    /// Index of the first mature asset of `kind`, if any.
    pub fn find_mature(&self, kind: AssetKind) -> Option<usize> {
        self.assets
            .iter()
            .position(|a| a.kind == kind && !a.is_seedling())
    }

    /// Merge `amount` of a mature asset into an existing same-kind entry,
    /// or append a new one.
    pub fn add_mature(&mut self, kind: AssetKind, amount: u32) {
        match self.find_mature(kind) {
            Some(index) => self.assets[index].amount += amount,
            None => self.assets.push(Asset::mature(kind, amount)),
        }
    }
}

/// Fixed-size field of cells, allocated once for the game's lifetime.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `pos` lies on the grid.
    pub fn is_valid(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Cell at `pos`. Panics on an out-of-grid position; callers check
    /// [`Grid::is_valid`] first.
    pub fn cell(&self, pos: Position) -> &Cell {
        debug_assert!(self.is_valid(pos));
        &self.cells[self.index(pos)]
    }

    /// Mutable cell at `pos`. Same contract as [`Grid::cell`].
    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        debug_assert!(self.is_valid(pos));
        let index = self.index(pos);
        &mut self.cells[index]
    }

    /// All cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let pos = Position::new((i as u32 % width) as i32, (i as u32 / width) as i32);
            (pos, cell)
        })
    }

    /// Mutable variant of [`Grid::iter`].
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Position, &mut Cell)> + '_ {
        let width = self.width;
        self.cells.iter_mut().enumerate().map(move |(i, cell)| {
            let pos = Position::new((i as u32 % width) as i32, (i as u32 / width) as i32);
            (pos, cell)
        })
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y as u32 * self.width + pos.x as u32) as usize
    }
}
