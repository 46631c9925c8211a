//! Vertex codec: integer grid coordinates <-> graph vertex ids
//!
//! The graph and pathfinding layers speak only in `VertexId`s, so they stay
//! unaware of how the grid is stored. Encoding is row-major:
//! `id = y * width + x`.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

/// Graph vertex identifier for one grid cell
pub type VertexId = usize;

/// Integer cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing a continuous board position
    pub fn containing(pos: Vec2) -> Self {
        Self::new(pos.x.floor() as i32, pos.y.floor() as i32)
    }

    /// Continuous board position of this cell's anchor point
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    pub fn manhattan_distance(&self, other: &Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbors (may be out of bounds)
    pub fn orthogonal_neighbors(&self) -> [Coordinate; 4] {
        [
            Coordinate::new(self.x + 1, self.y),
            Coordinate::new(self.x - 1, self.y),
            Coordinate::new(self.x, self.y + 1),
            Coordinate::new(self.x, self.y - 1),
        ]
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Bijection between in-bounds coordinates and vertex ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexCodec {
    width: u32,
    height: u32,
}

impl VertexCodec {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of vertices
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }

    pub fn to_vertex(&self, coord: Coordinate) -> Option<VertexId> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    pub fn to_coordinate(&self, vertex: VertexId) -> Option<Coordinate> {
        if vertex >= self.len() {
            return None;
        }
        let width = self.width as usize;
        Some(Coordinate::new((vertex % width) as i32, (vertex / width) as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_encoding() {
        let codec = VertexCodec::new(5, 3);
        assert_eq!(codec.to_vertex(Coordinate::new(0, 0)), Some(0));
        assert_eq!(codec.to_vertex(Coordinate::new(4, 0)), Some(4));
        assert_eq!(codec.to_vertex(Coordinate::new(0, 1)), Some(5));
        assert_eq!(codec.to_vertex(Coordinate::new(4, 2)), Some(14));
    }

    #[test]
    fn test_codec_is_bijective() {
        let codec = VertexCodec::new(7, 4);
        for vertex in 0..codec.len() {
            let coord = codec.to_coordinate(vertex).unwrap();
            assert!(codec.in_bounds(coord));
            assert_eq!(codec.to_vertex(coord), Some(vertex));
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let codec = VertexCodec::new(5, 5);
        assert_eq!(codec.to_vertex(Coordinate::new(-1, 0)), None);
        assert_eq!(codec.to_vertex(Coordinate::new(5, 0)), None);
        assert_eq!(codec.to_vertex(Coordinate::new(0, 5)), None);
        assert_eq!(codec.to_coordinate(25), None);
    }

    #[test]
    fn test_containing_floors() {
        assert_eq!(Coordinate::containing(Vec2::new(2.9, 0.1)), Coordinate::new(2, 0));
        assert_eq!(Coordinate::containing(Vec2::new(3.0, 4.0)), Coordinate::new(3, 4));
    }
}
