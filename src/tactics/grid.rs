//! Static terrain grid with a transient highlight cache
//!
//! Dimensions are fixed at construction. Terrain is only changed during
//! scenario setup; highlights are set by actions and bulk-cleared.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TacticsError};
use crate::tactics::terrain::Terrain;
use crate::tactics::vertex::{Coordinate, VertexCodec, VertexId};

/// Set of independent highlight flags on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Highlight(u8);

impl Highlight {
    pub const NONE: Highlight = Highlight(0);
    /// Cell can be reached this turn, or lies on the committed path
    pub const REACHABLE: Highlight = Highlight(1 << 0);
    /// Cell lies on the path the cursor is hovering over
    pub const PATH_PREVIEW: Highlight = Highlight(1 << 1);

    pub fn contains(&self, other: Highlight) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Highlight) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Highlight) {
        self.0 &= !other.0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Highlight {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Highlight(self.0 | rhs.0)
    }
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,
    pub highlight: Highlight,
}

impl Cell {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            highlight: Highlight::NONE,
        }
    }
}

/// Rectangular terrain grid, stored row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    codec: VertexCodec,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid filled with the default terrain
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Terrain::default())
    }

    pub fn filled(width: u32, height: u32, terrain: Terrain) -> Self {
        let codec = VertexCodec::new(width, height);
        Self {
            codec,
            cells: vec![Cell::new(terrain); codec.len()],
        }
    }

    /// Build a grid from text rows of terrain glyphs, row 0 is `y = 0`
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(TacticsError::InvalidGrid("grid must not be empty".into()));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(TacticsError::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, glyph) in row.chars().enumerate() {
                let terrain = Terrain::from_glyph(glyph).ok_or_else(|| {
                    TacticsError::InvalidGrid(format!("unknown glyph {:?} at ({}, {})", glyph, x, y))
                })?;
                cells.push(Cell::new(terrain));
            }
        }

        Ok(Self {
            codec: VertexCodec::new(width as u32, height as u32),
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.codec.width()
    }

    pub fn height(&self) -> u32 {
        self.codec.height()
    }

    pub fn codec(&self) -> &VertexCodec {
        &self.codec
    }

    /// Number of cells (and graph vertices)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        self.codec.in_bounds(coord)
    }

    pub fn to_vertex(&self, coord: Coordinate) -> Option<VertexId> {
        self.codec.to_vertex(coord)
    }

    pub fn to_coordinate(&self, vertex: VertexId) -> Option<Coordinate> {
        self.codec.to_coordinate(vertex)
    }

    pub fn cell(&self, coord: Coordinate) -> Option<&Cell> {
        let vertex = self.codec.to_vertex(coord)?;
        self.cells.get(vertex)
    }

    pub fn cell_mut(&mut self, coord: Coordinate) -> Option<&mut Cell> {
        let vertex = self.codec.to_vertex(coord)?;
        self.cells.get_mut(vertex)
    }

    pub fn cell_at_vertex(&self, vertex: VertexId) -> Option<&Cell> {
        self.cells.get(vertex)
    }

    pub fn terrain(&self, coord: Coordinate) -> Option<Terrain> {
        self.cell(coord).map(|c| c.terrain)
    }

    /// Set terrain at a coordinate; out-of-bounds writes are ignored
    pub fn set_terrain(&mut self, coord: Coordinate, terrain: Terrain) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.terrain = terrain;
        }
    }

    /// Add a highlight flag to one cell
    pub fn highlight(&mut self, coord: Coordinate, flag: Highlight) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.highlight.insert(flag);
        }
    }

    pub fn is_highlighted(&self, coord: Coordinate, flag: Highlight) -> bool {
        self.cell(coord).is_some_and(|c| c.highlight.contains(flag))
    }

    /// Remove a highlight flag from every cell
    pub fn clear_highlight(&mut self, flag: Highlight) {
        for cell in &mut self.cells {
            cell.highlight.remove(flag);
        }
    }

    /// All cells carrying a highlight flag, in vertex order
    pub fn highlighted(&self, flag: Highlight) -> Vec<Coordinate> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.highlight.contains(flag))
            .filter_map(|(v, _)| self.codec.to_coordinate(v))
            .collect()
    }

    /// Text rendering, one row per line, highlighted cells drawn as `*`
    pub fn render(&self, flag: Highlight) -> String {
        let width = self.width() as usize;
        let mut out = String::with_capacity(self.cells.len() + self.height() as usize);
        for row in self.cells.chunks(width.max(1)) {
            for cell in row {
                if !flag.is_empty() && cell.highlight.contains(flag) {
                    out.push('*');
                } else {
                    out.push(cell.terrain.glyph());
                }
            }
            out.push('\n');
        }
        out
    }
}
