//! Grid tactics - turn-based movement with terrain costs and line of sight
//!
//! A unit sees through terrain according to its own concealment table and
//! pays its own movement costs, so the same grid is a different graph for
//! every unit type.

pub mod action;
pub mod action_move;
pub mod animation;
pub mod entity;
pub mod graph;
pub mod grid;
pub mod level;
pub mod line;
pub mod movement;
pub mod pathfinding;
pub mod scenario;
pub mod terrain;
pub mod unit_type;
pub mod vertex;
pub mod visibility;

// Re-exports for convenient access
pub use action::{Action, ActionCommit, MaintenanceStatus};
pub use action_move::{ActionMove, MoveState};
pub use animation::{AnimCommand, AnimState, AnimationController, Animator, Facing};
pub use entity::Entity;
pub use graph::UnitGraph;
pub use grid::{Cell, Grid, Highlight};
pub use level::Level;
pub use line::bresenham;
pub use movement::{advance, advance_entity, facing_for_angle, turn_to_face};
pub use pathfinding::{reachable_within_limit, shortest_path, ShortestPath, WeightedGraph, UNREACHABLE};
pub use scenario::{Scenario, ScenarioUnit};
pub use terrain::Terrain;
pub use unit_type::{UnitAttributes, UnitType};
pub use vertex::{Coordinate, VertexCodec, VertexId};
pub use visibility::visible_from;
