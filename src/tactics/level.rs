//! A playable level: the grid, its entities and the movement config
//!
//! The level hands out entity ids from its own counter and lends out the
//! grid and one entity at a time, so actions can mutate both without any
//! shared ownership.

use std::sync::Arc;

use crate::core::config::TacticsConfig;
use crate::core::error::{Result, TacticsError};
use crate::core::types::{EntityId, Side};
use crate::tactics::animation::Animator;
use crate::tactics::entity::Entity;
use crate::tactics::grid::Grid;
use crate::tactics::unit_type::UnitType;
use crate::tactics::vertex::Coordinate;

#[derive(Debug)]
pub struct Level {
    pub grid: Grid,
    pub config: TacticsConfig,
    entities: Vec<Entity>,
    next_entity_id: u32,
}

impl Level {
    pub fn new(grid: Grid) -> Self {
        Self::with_config(grid, TacticsConfig::default())
    }

    pub fn with_config(grid: Grid, config: TacticsConfig) -> Self {
        Self {
            grid,
            config,
            entities: Vec::new(),
            next_entity_id: 1,
        }
    }

    /// Place a new entity of `unit_type` on `at`
    pub fn spawn(
        &mut self,
        unit_type: Arc<UnitType>,
        at: Coordinate,
        side: Side,
        animator: Box<dyn Animator>,
    ) -> Result<EntityId> {
        if !self.grid.in_bounds(at) {
            return Err(TacticsError::OutOfBounds(at));
        }
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;

        let mut entity = Entity::new(id, unit_type, at, side, animator);
        entity.figure_visibility(&self.grid);
        self.entities.push(entity);
        tracing::debug!(entity = ?id, ?at, ?side, "spawned entity");
        Ok(id)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Borrow the grid mutably alongside one entity
    pub fn split_mut(&mut self, id: EntityId) -> Option<(&mut Grid, &TacticsConfig, &mut Entity)> {
        let entity = self.entities.iter_mut().find(|e| e.id == id)?;
        Some((&mut self.grid, &self.config, entity))
    }

    /// Entity whose last entered cell is `coord`, if any
    pub fn entity_at(&self, coord: Coordinate) -> Option<&Entity> {
        self.entities.iter().find(|e| e.checkpoint() == coord)
    }

    /// Start of the scenario: reset every entity to its base stats
    pub fn on_setup(&mut self) {
        for entity in &mut self.entities {
            entity.on_setup(&self.grid);
        }
    }

    /// Start of a new round: restore AP
    pub fn on_round(&mut self) {
        for entity in &mut self.entities {
            entity.on_round();
        }
    }

    /// Per-frame animation playback for every entity
    pub fn think(&mut self, dt: f32) {
        for entity in &mut self.entities {
            entity.animator.think(dt);
        }
    }

    /// Hostile entities standing on cells `id` can currently see
    pub fn visible_enemies(&self, id: EntityId) -> Vec<EntityId> {
        let Some(viewer) = self.entity(id) else {
            return Vec::new();
        };
        self.entities
            .iter()
            .filter(|other| other.id != id && viewer.side.is_hostile_to(other.side))
            .filter(|other| viewer.can_see(&self.grid, other.cell()))
            .map(|other| other.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::tactics::animation::AnimationController;
    use crate::tactics::terrain::Terrain;
    use crate::tactics::unit_type::UnitAttributes;

    fn scout() -> Arc<UnitType> {
        let attrs = UnitAttributes::uniform(3, 0, 0).opaque(Terrain::Wall);
        Arc::new(UnitType::new("scout", 4, attrs))
    }

    #[test]
    fn test_ids_are_sequential_per_level() {
        let mut a = Level::new(Grid::new(5, 5));
        let mut b = Level::new(Grid::new(5, 5));
        let anim = || Box::new(AnimationController::instant());

        let a1 = a.spawn(scout(), Coordinate::new(0, 0), Side(1), anim()).unwrap();
        let a2 = a.spawn(scout(), Coordinate::new(1, 0), Side(1), anim()).unwrap();
        let b1 = b.spawn(scout(), Coordinate::new(0, 0), Side(1), anim()).unwrap();

        assert_eq!(a1, EntityId(1));
        assert_eq!(a2, EntityId(2));
        assert_eq!(b1, EntityId(1));
    }

    #[test]
    fn test_spawn_out_of_bounds_fails() {
        let mut level = Level::new(Grid::new(5, 5));
        let result = level.spawn(
            scout(),
            Coordinate::new(5, 0),
            Side(1),
            Box::new(AnimationController::instant()),
        );
        assert!(matches!(result, Err(TacticsError::OutOfBounds(_))));
    }

    #[test]
    fn test_on_round_restores_everyone() {
        let mut level = Level::new(Grid::new(5, 5));
        let id = level
            .spawn(scout(), Coordinate::new(0, 0), Side(1), Box::new(AnimationController::instant()))
            .unwrap();
        level.entity_mut(id).unwrap().ap = 0;
        level.on_round();
        assert_eq!(level.entity(id).unwrap().ap, 4);
    }

    #[test]
    fn test_visible_enemies() {
        let mut grid = Grid::new(7, 1);
        grid.set_terrain(Coordinate::new(4, 0), Terrain::Wall);
        let mut level = Level::new(grid);
        let anim = || Box::new(AnimationController::instant());

        let me = level.spawn(scout(), Coordinate::new(0, 0), Side(1), anim()).unwrap();
        let near = level.spawn(scout(), Coordinate::new(2, 0), Side(2), anim()).unwrap();
        let _friend = level.spawn(scout(), Coordinate::new(1, 0), Side(1), anim()).unwrap();
        let _hidden = level.spawn(scout(), Coordinate::new(5, 0), Side(2), anim()).unwrap();
        level.on_setup();

        assert_eq!(level.visible_enemies(me), vec![near]);
    }

    #[test]
    fn test_entity_at_uses_entered_cell() {
        let mut level = Level::new(Grid::new(5, 1));
        let id = level
            .spawn(scout(), Coordinate::new(3, 0), Side(1), Box::new(AnimationController::instant()))
            .unwrap();
        level.on_setup();
        assert_eq!(level.entity_at(Coordinate::new(3, 0)).map(|e| e.id), Some(id));
        assert!(level.entity_at(Coordinate::new(0, 0)).is_none());

        // Halfway towards (2,0) the unit has not entered it yet
        level.entity_mut(id).unwrap().pos = Vec2::new(2.5, 0.0);
        assert!(level.entity_at(Coordinate::new(2, 0)).is_none());
        assert_eq!(level.entity_at(Coordinate::new(3, 0)).map(|e| e.id), Some(id));
    }
}
