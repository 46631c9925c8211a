//! Movement graph adapter: a grid seen through one unit type's costs
//!
//! `cost_to_move` is the only place AP cost of a step is computed.
//! Reachability, path search, commit-time payment and enter-time charging
//! all go through it, so they can never disagree.

use crate::tactics::grid::Grid;
use crate::tactics::pathfinding::WeightedGraph;
use crate::tactics::unit_type::UnitType;
use crate::tactics::vertex::{Coordinate, VertexId};

/// 4-connected weighted view of a grid for one unit type
#[derive(Debug, Clone, Copy)]
pub struct UnitGraph<'a> {
    grid: &'a Grid,
    unit: &'a UnitType,
}

impl<'a> UnitGraph<'a> {
    pub fn new(grid: &'a Grid, unit: &'a UnitType) -> Self {
        Self { grid, unit }
    }

    /// AP cost of stepping from `src` into `dst`, `None` if `dst` is
    /// out of bounds or impassable for this unit type
    ///
    /// The cost depends only on the entered cell; `src` is accepted so the
    /// signature matches a directed edge.
    pub fn cost_to_move(&self, _src: VertexId, dst: VertexId) -> Option<u32> {
        let cell = self.grid.cell_at_vertex(dst)?;
        self.unit.entry_cost(cell.terrain)
    }

    /// Same as [`cost_to_move`](Self::cost_to_move), in coordinates
    pub fn cost_between(&self, src: Coordinate, dst: Coordinate) -> Option<u32> {
        let src = self.grid.to_vertex(src)?;
        let dst = self.grid.to_vertex(dst)?;
        self.cost_to_move(src, dst)
    }

    /// Sum of step costs along consecutive vertices, `None` if any step
    /// is impassable
    pub fn path_cost(&self, path: &[VertexId]) -> Option<u32> {
        path.windows(2)
            .map(|w| self.cost_to_move(w[0], w[1]))
            .sum()
    }
}

impl WeightedGraph for UnitGraph<'_> {
    fn num_vertices(&self) -> usize {
        self.grid.len()
    }

    fn adjacent(&self, vertex: VertexId, out: &mut Vec<(VertexId, f64)>) {
        let Some(coord) = self.grid.to_coordinate(vertex) else {
            return;
        };
        for neighbor in coord.orthogonal_neighbors() {
            let Some(next) = self.grid.to_vertex(neighbor) else {
                continue;
            };
            if let Some(cost) = self.cost_to_move(vertex, next) {
                out.push((next, f64::from(cost)));
            }
        }
    }
}
