//! A unit instance on the board
//!
//! The entity owns its own position, AP and path state. AP is charged as
//! cells are entered, always through [`UnitGraph::cost_to_move`].

use std::collections::VecDeque;
use std::sync::Arc;

use ahash::AHashSet;

use crate::core::types::{EntityId, Side, Vec2};
use crate::tactics::animation::Animator;
use crate::tactics::graph::UnitGraph;
use crate::tactics::grid::Grid;
use crate::tactics::unit_type::UnitType;
use crate::tactics::vertex::{Coordinate, VertexId};
use crate::tactics::visibility::visible_from;

#[derive(Debug)]
pub struct Entity {
    pub id: EntityId,
    pub side: Side,
    pub unit_type: Arc<UnitType>,

    pub health: i32,
    pub ap: i32,

    /// Continuous board position
    pub pos: Vec2,
    /// Last cell AP was settled for
    prev_pos: Coordinate,

    /// Waypoints still to walk, first element is the next cell to enter
    pub path: VecDeque<Coordinate>,
    /// Cell whose entry cost was already paid when the path was committed,
    /// with the amount paid
    prepaid: Option<(Coordinate, i32)>,

    visible: AHashSet<VertexId>,

    pub animator: Box<dyn Animator>,
}

impl Entity {
    pub fn new(
        id: EntityId,
        unit_type: Arc<UnitType>,
        cell: Coordinate,
        side: Side,
        animator: Box<dyn Animator>,
    ) -> Self {
        Self {
            id,
            side,
            health: unit_type.health,
            ap: unit_type.ap,
            unit_type,
            pos: cell.to_vec2(),
            prev_pos: cell,
            path: VecDeque::new(),
            prepaid: None,
            visible: AHashSet::new(),
            animator,
        }
    }

    /// Cell containing the continuous position
    pub fn cell(&self) -> Coordinate {
        Coordinate::containing(self.pos)
    }

    /// Last cell AP was charged for
    pub fn checkpoint(&self) -> Coordinate {
        self.prev_pos
    }

    pub fn cur_ap(&self) -> i32 {
        self.ap
    }

    pub fn is_moving(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn visible(&self) -> &AHashSet<VertexId> {
        &self.visible
    }

    pub fn can_see(&self, grid: &Grid, coord: Coordinate) -> bool {
        grid.to_vertex(coord).is_some_and(|v| self.visible.contains(&v))
    }

    /// Weighted view of `grid` through this entity's unit type
    pub fn graph<'a>(&'a self, grid: &'a Grid) -> UnitGraph<'a> {
        UnitGraph::new(grid, &self.unit_type)
    }

    pub fn on_setup(&mut self, grid: &Grid) {
        self.health = self.unit_type.health;
        self.ap = self.unit_type.ap;
        self.prev_pos = self.cell();
        self.figure_visibility(grid);
    }

    pub fn on_round(&mut self) {
        self.ap = self.unit_type.ap;
    }

    pub fn figure_visibility(&mut self, grid: &Grid) {
        let attributes = &self.unit_type.attributes;
        self.visible = visible_from(grid, self.cell(), attributes.los_distance, |terrain| {
            attributes.concealment(terrain)
        });
    }

    /// Pay up front for stepping into `dst`; false if impassable or
    /// unaffordable, in which case nothing is charged
    pub fn pay_for_move(&mut self, grid: &Grid, dst: Coordinate) -> bool {
        let Some(cost) = self.graph(grid).cost_between(self.prev_pos, dst) else {
            return false;
        };
        let Ok(cost) = i32::try_from(cost) else {
            return false;
        };
        if cost > self.ap {
            return false;
        }
        self.ap -= cost;
        self.prepaid = Some((dst, cost));
        true
    }

    /// Settle AP for entering `cell`, move the checkpoint and recompute
    /// what the entity can see
    pub fn enter_cell(&mut self, grid: &Grid, cell: Coordinate) {
        if matches!(self.prepaid, Some((paid, _)) if paid == cell) {
            self.prepaid = None;
        } else {
            let cost = match self.graph(grid).cost_between(self.prev_pos, cell) {
                Some(cost) => i32::try_from(cost).unwrap_or(i32::MAX),
                None => {
                    tracing::warn!(entity = ?self.id, ?cell, "entered a cell impassable for this unit");
                    0
                }
            };
            self.ap = self.ap.saturating_sub(cost);
        }
        tracing::trace!(entity = ?self.id, ?cell, ap = self.ap, "entered cell");

        if self.ap < 0 {
            tracing::warn!(entity = ?self.id, ap = self.ap, "AP over-charged, clamping to zero");
            self.ap = 0;
        }
        self.prev_pos = cell;
        self.figure_visibility(grid);
    }

    /// Drop any remaining waypoints and settle back onto the checkpoint
    ///
    /// A step paid at commit but never entered is refunded, so AP spent
    /// always matches the cells actually entered.
    pub fn clear_path(&mut self) {
        self.path.clear();
        if let Some((cell, cost)) = self.prepaid.take() {
            tracing::debug!(entity = ?self.id, ?cell, cost, "refunding unentered step");
            self.ap += cost;
        }
        self.pos = self.prev_pos.to_vec2();
    }

    /// Attack modifier granted by the terrain under the entity
    pub fn current_attack_mod(&self, grid: &Grid) -> i32 {
        grid.terrain(self.cell())
            .and_then(|t| self.unit_type.attributes.attack_mods.get(&t).copied())
            .unwrap_or(0)
    }

    /// Base defense plus the terrain defense modifier
    pub fn current_defense_mod(&self, grid: &Grid) -> i32 {
        let terrain_mod = grid
            .terrain(self.cell())
            .and_then(|t| self.unit_type.attributes.defense_mods.get(&t).copied())
            .unwrap_or(0);
        self.unit_type.defense + terrain_mod
    }
}
