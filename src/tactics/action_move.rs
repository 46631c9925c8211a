//! Move order for one unit: prepare, pick a destination, walk there
//!
//! Lifecycle: `Idle -> Prepared -> Committed -> InProgress -> Complete`,
//! with `Cancelled` reachable from any non-terminal state. A paused move
//! is cancelled outright and has to be prepared again.

use ahash::AHashSet;

use crate::core::types::{EntityId, Vec2};
use crate::tactics::action::{Action, ActionCommit, MaintenanceStatus};
use crate::tactics::animation::AnimCommand;
use crate::tactics::entity::Entity;
use crate::tactics::grid::{Grid, Highlight};
use crate::tactics::level::Level;
use crate::tactics::movement::advance_entity;
use crate::tactics::pathfinding::{reachable_within_limit, shortest_path, ShortestPath};
use crate::tactics::vertex::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveState {
    #[default]
    Idle,
    Prepared,
    Committed,
    InProgress,
    Complete,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ActionMove {
    ent: EntityId,
    reachable: AHashSet<Coordinate>,
    state: MoveState,
}

impl ActionMove {
    pub fn new(ent: EntityId) -> Self {
        Self {
            ent,
            reachable: AHashSet::new(),
            state: MoveState::Idle,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.ent
    }

    pub fn state(&self) -> MoveState {
        self.state
    }

    /// Last computed reachable set, sorted for stable output
    pub fn reachable(&self) -> Vec<Coordinate> {
        let mut cells: Vec<_> = self.reachable.iter().copied().collect();
        cells.sort();
        cells
    }

    pub fn is_reachable(&self, coord: Coordinate) -> bool {
        self.reachable.contains(&coord)
    }

    /// Cheapest route from the last entered cell to `dst`, origin included
    fn route(grid: &Grid, ent: &Entity, dst: Coordinate) -> ShortestPath {
        let (Some(src), Some(dst)) = (grid.to_vertex(ent.checkpoint()), grid.to_vertex(dst)) else {
            return ShortestPath::unreachable();
        };
        shortest_path(&ent.graph(grid), &[src], &[dst])
    }

    fn clear_highlights(grid: &mut Grid) {
        grid.clear_highlight(Highlight::REACHABLE | Highlight::PATH_PREVIEW);
    }
}

impl Action for ActionMove {
    fn prep(&mut self, level: &mut Level) -> bool {
        let Some((grid, _, ent)) = level.split_mut(self.ent) else {
            return false;
        };
        // One committed path per entity at a time
        if ent.is_moving() {
            return false;
        }
        let Some(origin) = grid.to_vertex(ent.checkpoint()) else {
            return false;
        };

        let reachable = reachable_within_limit(&ent.graph(grid), &[origin], f64::from(ent.cur_ap()));
        if reachable.is_empty() {
            return false;
        }

        self.reachable = reachable
            .into_iter()
            .filter_map(|v| grid.to_coordinate(v))
            .collect();
        for &cell in &self.reachable {
            grid.highlight(cell, Highlight::REACHABLE);
        }
        self.state = MoveState::Prepared;
        tracing::debug!(entity = ?self.ent, cells = self.reachable.len(), ap = ent.cur_ap(), "move prepared");
        true
    }

    fn cancel(&mut self, level: &mut Level) {
        self.reachable.clear();
        if let Some(ent) = level.entity_mut(self.ent) {
            ent.clear_path();
        }
        Self::clear_highlights(&mut level.grid);
        if self.state != MoveState::Complete {
            self.state = MoveState::Cancelled;
        }
        tracing::debug!(entity = ?self.ent, "move cancelled");
    }

    fn mouse_over(&mut self, level: &mut Level, bx: f32, by: f32) {
        level.grid.clear_highlight(Highlight::PATH_PREVIEW);
        let dst = Coordinate::containing(Vec2::new(bx, by));
        if self.state != MoveState::Prepared || !self.reachable.contains(&dst) {
            return;
        }
        let Some((grid, _, ent)) = level.split_mut(self.ent) else {
            return;
        };
        let route = Self::route(grid, ent, dst);
        for v in route.path.into_iter().skip(1) {
            if let Some(cell) = grid.to_coordinate(v) {
                grid.highlight(cell, Highlight::PATH_PREVIEW);
            }
        }
    }

    fn mouse_click(&mut self, level: &mut Level, bx: f32, by: f32) -> ActionCommit {
        let dst = Coordinate::containing(Vec2::new(bx, by));
        if !self.reachable.contains(&dst) {
            return ActionCommit::NoAction;
        }
        let Some((grid, _, ent)) = level.split_mut(self.ent) else {
            return ActionCommit::NoAction;
        };

        // AP may have changed since prep, so the budget is checked again
        let route = Self::route(grid, ent, dst);
        if route.path.len() < 2 || route.cost > f64::from(ent.cur_ap()) {
            return ActionCommit::NoAction;
        }

        let path: Vec<Coordinate> = route
            .path
            .iter()
            .skip(1)
            .filter_map(|v| grid.to_coordinate(*v))
            .collect();
        self.reachable.clear();

        Self::clear_highlights(grid);
        for &cell in &path {
            grid.highlight(cell, Highlight::REACHABLE);
        }

        if !ent.pay_for_move(grid, path[0]) {
            Self::clear_highlights(grid);
            self.state = MoveState::Idle;
            return ActionCommit::NoAction;
        }

        tracing::debug!(entity = ?self.ent, ?dst, cost = route.cost, steps = path.len(), "move committed");
        ent.path = path.into();
        self.state = MoveState::Committed;
        ActionCommit::StandardAction
    }

    fn pause(&mut self, level: &mut Level) -> bool {
        if let Some(ent) = level.entity_mut(self.ent) {
            ent.animator.command(AnimCommand::Stop);
        }
        self.cancel(level);
        false
    }

    fn maintain(&mut self, level: &mut Level, dt: f32) -> MaintenanceStatus {
        let Some((grid, config, ent)) = level.split_mut(self.ent) else {
            self.reachable.clear();
            self.state = MoveState::Complete;
            return MaintenanceStatus::Complete;
        };

        let before = ent.path.len();
        if self.state == MoveState::Committed {
            self.state = MoveState::InProgress;
        }

        if advance_entity(grid, config, ent, dt) {
            self.reachable.clear();
            ent.clear_path();
            Self::clear_highlights(grid);
            self.state = MoveState::Complete;
            tracing::debug!(entity = ?self.ent, ap = ent.cur_ap(), "move complete");
            return MaintenanceStatus::Complete;
        }

        if ent.path.len() < before {
            return MaintenanceStatus::CheckForInterrupts;
        }
        MaintenanceStatus::InProgress
    }
}
