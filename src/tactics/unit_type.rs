//! Unit types and their per-terrain modifier tables
//!
//! A unit type is loaded once and shared read-only by every entity of that
//! type. Terrain only has meaning through these tables.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::tactics::terrain::Terrain;

/// Per-terrain modifiers for one unit type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitAttributes {
    /// Vision budget for line of sight, in cells
    pub los_distance: i32,
    /// Movement cost delta added to the base step cost. A terrain missing
    /// here is impassable for this unit type.
    pub move_mods: AHashMap<Terrain, i32>,
    /// Concealment cost per terrain. Missing or negative means opaque.
    pub los_mods: AHashMap<Terrain, i32>,
    pub attack_mods: AHashMap<Terrain, i32>,
    pub defense_mods: AHashMap<Terrain, i32>,
}

impl UnitAttributes {
    /// Every terrain passable at `move_delta` and seen through at `concealment`
    pub fn uniform(los_distance: i32, move_delta: i32, concealment: i32) -> Self {
        Self {
            los_distance,
            move_mods: Terrain::ALL.into_iter().map(|t| (t, move_delta)).collect(),
            los_mods: Terrain::ALL.into_iter().map(|t| (t, concealment)).collect(),
            attack_mods: AHashMap::new(),
            defense_mods: AHashMap::new(),
        }
    }

    pub fn with_move_mod(mut self, terrain: Terrain, delta: i32) -> Self {
        self.move_mods.insert(terrain, delta);
        self
    }

    pub fn impassable(mut self, terrain: Terrain) -> Self {
        self.move_mods.remove(&terrain);
        self
    }

    pub fn with_concealment(mut self, terrain: Terrain, concealment: i32) -> Self {
        self.los_mods.insert(terrain, concealment);
        self
    }

    pub fn opaque(mut self, terrain: Terrain) -> Self {
        self.los_mods.insert(terrain, -1);
        self
    }

    /// Concealment of a terrain, `None` when it blocks sight outright
    pub fn concealment(&self, terrain: Terrain) -> Option<i32> {
        self.los_mods.get(&terrain).copied().filter(|c| *c >= 0)
    }
}

/// Static definition of a unit type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitType {
    pub name: String,
    pub health: i32,
    /// Action points granted each round
    pub ap: i32,
    pub attack: i32,
    pub defense: i32,
    /// AP cost of one step before terrain modifiers
    pub base_step_cost: i32,
    /// Board units per second while walking
    pub move_speed: f32,
    pub attributes: UnitAttributes,
}

impl Default for UnitType {
    fn default() -> Self {
        Self {
            name: "unit".into(),
            health: 10,
            ap: 10,
            attack: 0,
            defense: 0,
            base_step_cost: 1,
            move_speed: 2.0,
            attributes: UnitAttributes::uniform(8, 0, 0),
        }
    }
}

impl UnitType {
    pub fn new(name: impl Into<String>, ap: i32, attributes: UnitAttributes) -> Self {
        Self {
            name: name.into(),
            ap,
            attributes,
            ..Self::default()
        }
    }

    /// AP cost of entering a terrain, `None` if impassable
    pub fn entry_cost(&self, terrain: Terrain) -> Option<u32> {
        let delta = self.attributes.move_mods.get(&terrain)?;
        u32::try_from(self.base_step_cost + delta).ok()
    }
}
