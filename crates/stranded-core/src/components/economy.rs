//! Resource and asset economy types.

use serde::{Deserialize, Serialize};

/// The three currencies a controller banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Mineral,
    Biomass,
    Energy,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Mineral,
        ResourceKind::Biomass,
        ResourceKind::Energy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Mineral => "MINERAL",
            ResourceKind::Biomass => "BIOMASS",
            ResourceKind::Energy => "ENERGY",
        }
    }
}

/// Per-controller resource balances.
///
/// Balances are signed so the elimination sweep can observe a drained
/// energy balance; order validation keeps them from going below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub mineral: i64,
    pub biomass: i64,
    pub energy: i64,
}

impl ResourceLedger {
    pub fn get(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Mineral => self.mineral,
            ResourceKind::Biomass => self.biomass,
            ResourceKind::Energy => self.energy,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: i64) {
        match kind {
            ResourceKind::Mineral => self.mineral += amount,
            ResourceKind::Biomass => self.biomass += amount,
            ResourceKind::Energy => self.energy += amount,
        }
    }

    pub fn deduct(&mut self, kind: ResourceKind, amount: i64) {
        self.add(kind, -amount);
    }

    pub fn total(&self) -> i64 {
        self.mineral + self.biomass + self.energy
    }

    /// Spread `cost` across the three kinds in proportion to their current
    /// balances, flooring each share. The floored shares can sum to less
    /// than `cost`; the shortfall is not charged. Callers check
    /// affordability against `total()` first.
    pub fn deduct_spread(&mut self, cost: i64) {
        let total = self.total();
        if total <= 0 {
            return;
        }
        for kind in ResourceKind::ALL {
            let share = cost * self.get(kind) / total;
            self.deduct(kind, share);
        }
    }
}

/// Harvestable asset kinds and the resources they yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetKind {
    Ore,
    Plant,
    Coal,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Ore, AssetKind::Plant, AssetKind::Coal];

    pub fn name(self) -> &'static str {
        match self {
            AssetKind::Ore => "ORE",
            AssetKind::Plant => "PLANT",
            AssetKind::Coal => "COAL",
        }
    }

    /// Resource credited when an asset of this kind is harvested.
    pub fn resource(self) -> ResourceKind {
        match self {
            AssetKind::Ore => ResourceKind::Mineral,
            AssetKind::Plant => ResourceKind::Biomass,
            AssetKind::Coal => ResourceKind::Energy,
        }
    }
}

/// Wire-facing asset type names covering mature assets and seedlings.
///
/// Internally an asset is a kind plus an optional maturity countdown; the
/// six-name scheme survives only in configuration and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetTypeName {
    Ore,
    Plant,
    Coal,
    OreSeedling,
    PlantSeedling,
    CoalSeedling,
}

impl AssetTypeName {
    pub fn kind(self) -> AssetKind {
        match self {
            AssetTypeName::Ore | AssetTypeName::OreSeedling => AssetKind::Ore,
            AssetTypeName::Plant | AssetTypeName::PlantSeedling => AssetKind::Plant,
            AssetTypeName::Coal | AssetTypeName::CoalSeedling => AssetKind::Coal,
        }
    }

    pub fn is_seedling(self) -> bool {
        matches!(
            self,
            AssetTypeName::OreSeedling | AssetTypeName::PlantSeedling | AssetTypeName::CoalSeedling
        )
    }

    pub fn from_parts(kind: AssetKind, seedling: bool) -> Self {
        match (kind, seedling) {
            (AssetKind::Ore, false) => AssetTypeName::Ore,
            (AssetKind::Plant, false) => AssetTypeName::Plant,
            (AssetKind::Coal, false) => AssetTypeName::Coal,
            (AssetKind::Ore, true) => AssetTypeName::OreSeedling,
            (AssetKind::Plant, true) => AssetTypeName::PlantSeedling,
            (AssetKind::Coal, true) => AssetTypeName::CoalSeedling,
        }
    }
}

/// A resource deposit sitting on a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub kind: AssetKind,
    pub amount: u32,
    /// Days until maturity; `None` means harvestable now.
    pub maturity: Option<u32>,
}

impl Asset {
    pub fn mature(kind: AssetKind, amount: u32) -> Self {
        Self {
            kind,
            amount,
            maturity: None,
        }
    }

    pub fn seedling(kind: AssetKind, amount: u32, days: u32) -> Self {
        Self {
            kind,
            amount,
            maturity: Some(days),
        }
    }

    pub fn is_seedling(&self) -> bool {
        self.maturity.is_some()
    }

    pub fn type_name(&self) -> AssetTypeName {
        AssetTypeName::from_parts(self.kind, self.is_seedling())
    }
}
