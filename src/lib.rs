//! Grid Tactics - terrain-aware movement, pathfinding and line of sight
//! for turn-based tactical games

pub mod core;
pub mod tactics;
