//! Line-of-sight raycasting with accumulating concealment
//!
//! Visibility is a per-direction raycast, not a radius. Each ray starts
//! with the full vision budget and pays `concealment + 1` for every cell it
//! passes through, so rays in different directions stop independently.

use ahash::AHashSet;

use crate::tactics::grid::Grid;
use crate::tactics::line::bresenham;
use crate::tactics::terrain::Terrain;
use crate::tactics::vertex::{Coordinate, VertexId};

/// Inclusive cell-space rectangle `(x0, y0)..=(x1, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Bounds {
    /// Square of `radius` around `center`, clamped to the grid
    fn around(grid: &Grid, center: Coordinate, radius: i32) -> Self {
        Self {
            x0: (center.x - radius).max(0),
            y0: (center.y - radius).max(0),
            x1: (center.x + radius).min(grid.width() as i32 - 1),
            y1: (center.y + radius).min(grid.height() as i32 - 1),
        }
    }

    fn perimeter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let rows = (self.x0..=self.x1)
            .flat_map(move |x| [Coordinate::new(x, self.y0), Coordinate::new(x, self.y1)]);
        let cols = (self.y0..=self.y1)
            .flat_map(move |y| [Coordinate::new(self.x0, y), Coordinate::new(self.x1, y)]);
        rows.chain(cols)
    }
}

/// Set of vertices visible from `origin` with the given vision budget
///
/// `concealment` maps a terrain to its sight cost; `None` (missing or
/// negative table entry) makes the terrain opaque. An opaque cell is itself
/// visible but nothing behind it along that ray is. The origin is always
/// visible; an out-of-bounds origin sees nothing.
pub fn visible_from<F>(grid: &Grid, origin: Coordinate, vision: i32, concealment: F) -> AHashSet<VertexId>
where
    F: Fn(Terrain) -> Option<i32>,
{
    let mut visible = AHashSet::new();
    let Some(origin_vertex) = grid.to_vertex(origin) else {
        return visible;
    };
    visible.insert(origin_vertex);

    // Rays go to every concentric ring, not only the outermost one, so a
    // larger budget can only ever add cells
    let mut previous: Option<Bounds> = None;
    for radius in 1..=vision.max(0) {
        let bounds = Bounds::around(grid, origin, radius);
        if previous == Some(bounds) {
            break; // clamped on every side, outer rings repeat this one
        }
        for target in bounds.perimeter() {
            let line = bresenham(origin, target);
            cast_ray(grid, &line[1..], vision, &concealment, &mut visible);
        }
        previous = Some(bounds);
    }

    visible
}

fn cast_ray<F>(grid: &Grid, line: &[Coordinate], vision: i32, concealment: &F, visible: &mut AHashSet<VertexId>)
where
    F: Fn(Terrain) -> Option<i32>,
{
    let mut budget = vision;
    for &coord in line {
        let Some(vertex) = grid.to_vertex(coord) else {
            break;
        };
        visible.insert(vertex);

        let Some(cell) = grid.cell_at_vertex(vertex) else {
            break;
        };
        let Some(cost) = concealment(cell.terrain) else {
            break;
        };
        budget -= cost + 1;
        if budget <= 0 {
            break;
        }
    }
}
