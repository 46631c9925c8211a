//! Terrain classification for grid cells
//!
//! Terrain carries no costs of its own. What a terrain means for movement,
//! sight and combat is decided per unit type by its modifier tables.

use serde::{Deserialize, Serialize};

/// Terrain classification of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    #[default]
    Grass,
    Dirt,
    Brush,
    Forest,
    ShallowWater,
    DeepWater,
    Rock,
    Wall,
}

impl Terrain {
    pub const ALL: [Terrain; 8] = [
        Terrain::Grass,
        Terrain::Dirt,
        Terrain::Brush,
        Terrain::Forest,
        Terrain::ShallowWater,
        Terrain::DeepWater,
        Terrain::Rock,
        Terrain::Wall,
    ];

    /// Single-character glyph used by text maps
    pub fn glyph(&self) -> char {
        match self {
            Terrain::Grass => '.',
            Terrain::Dirt => ',',
            Terrain::Brush => '"',
            Terrain::Forest => 'T',
            Terrain::ShallowWater => '~',
            Terrain::DeepWater => 'W',
            Terrain::Rock => '^',
            Terrain::Wall => '#',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Terrain> {
        Terrain::ALL.into_iter().find(|t| t.glyph() == glyph)
    }
}
