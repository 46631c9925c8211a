//! Load playable levels from TOML scenario files
//!
//! ```toml
//! name = "river ford"
//! rows = ["..~..", ".#~..", "....."]
//!
//! [[units]]
//! side = 1
//! at = { x = 0, y = 0 }
//! [units.unit_type]
//! name = "trooper"
//! ap = 3
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::config::TacticsConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, Side};
use crate::tactics::animation::AnimationController;
use crate::tactics::grid::Grid;
use crate::tactics::level::Level;
use crate::tactics::unit_type::UnitType;
use crate::tactics::vertex::Coordinate;

/// One unit placed by a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioUnit {
    pub side: u8,
    pub at: Coordinate,
    pub unit_type: UnitType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    /// Terrain glyph rows, first row is `y = 0`
    pub rows: Vec<String>,
    pub config: TacticsConfig,
    /// Seconds an animation transition takes to show up
    pub transition_time: f32,
    pub units: Vec<ScenarioUnit>,
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build the level and spawn every unit, in file order
    pub fn build(&self) -> Result<(Level, Vec<EntityId>)> {
        let grid = Grid::from_rows(&self.rows)?;
        let mut level = Level::with_config(grid, self.config.clone());

        let mut ids = Vec::with_capacity(self.units.len());
        for unit in &self.units {
            let id = level.spawn(
                Arc::new(unit.unit_type.clone()),
                unit.at,
                Side(unit.side),
                Box::new(AnimationController::new(self.transition_time)),
            )?;
            ids.push(id);
        }
        level.on_setup();

        tracing::info!(scenario = %self.name, units = ids.len(), "scenario loaded");
        Ok((level, ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TacticsError;
    use crate::tactics::terrain::Terrain;

    const FORD: &str = r#"
        name = "ford"
        rows = ["..~", ".#~", "..."]
        transition_time = 0.25

        [config]
        waypoint_epsilon = 0.001

        [[units]]
        side = 1
        at = { x = 0, y = 0 }
        [units.unit_type]
        name = "trooper"
        ap = 3
        [units.unit_type.attributes]
        los_distance = 4
        move_mods = { grass = 0, shallow_water = 1 }
        los_mods = { grass = 0, shallow_water = 0, wall = -1 }

        [[units]]
        side = 2
        at = { x = 2, y = 2 }
        [units.unit_type]
        name = "raider"
    "#;

    #[test]
    fn test_scenario_builds_level() {
        let scenario = Scenario::from_toml_str(FORD).unwrap();
        let (level, ids) = scenario.build().unwrap();

        assert_eq!(ids, vec![EntityId(1), EntityId(2)]);
        assert_eq!(level.grid.width(), 3);
        assert_eq!(level.grid.terrain(Coordinate::new(1, 1)), Some(Terrain::Wall));
        assert_eq!(level.config.waypoint_epsilon, 0.001);

        let trooper = level.entity(ids[0]).unwrap();
        assert_eq!(trooper.ap, 3);
        assert_eq!(trooper.unit_type.entry_cost(Terrain::ShallowWater), Some(2));
        assert!(trooper.can_see(&level.grid, Coordinate::new(1, 1)));
        assert!(!trooper.can_see(&level.grid, Coordinate::new(2, 2)));

        let raider = level.entity(ids[1]).unwrap();
        assert_eq!(raider.ap, 10);
        assert_eq!(raider.side, Side(2));
    }

    #[test]
    fn test_unit_outside_grid_is_rejected() {
        let content = r#"
            rows = ["..", ".."]
            [[units]]
            side = 1
            at = { x = 2, y = 0 }
            [units.unit_type]
            name = "lost"
        "#;
        let scenario = Scenario::from_toml_str(content).unwrap();
        assert!(matches!(scenario.build(), Err(TacticsError::OutOfBounds(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let content = r#"
            rows = ["."]
            [config]
            facing_min_deg = 30.0
            facing_max_deg = 10.0
        "#;
        assert!(matches!(
            Scenario::from_toml_str(content),
            Err(TacticsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_rows_are_rejected() {
        let scenario = Scenario::from_toml_str("name = \"void\"").unwrap();
        assert!(matches!(scenario.build(), Err(TacticsError::InvalidGrid(_))));
    }
}
