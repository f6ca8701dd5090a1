use glam::Vec2;

use super::{Cell, TileGrid};

/// Named rectangular area of the map (spawn rooms, zones, sites).
///
/// Bounds are inclusive on both corners.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub name: String,
    pub min: Cell,
    pub max: Cell,
}

impl Region {
    pub fn new(name: impl Into<String>, a: Cell, b: Cell) -> Self {
        Self {
            name: name.into(),
            min: Cell::new(a.row.min(b.row), a.col.min(b.col)),
            max: Cell::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.min.row..=self.max.row).contains(&cell.row)
            && (self.min.col..=self.max.col).contains(&cell.col)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min.row..=self.max.row)
            .flat_map(move |row| (self.min.col..=self.max.col).map(move |col| Cell::new(row, col)))
    }

    /// Walkable cells of the region, in row-major order.
    pub fn walkable_cells<'a>(&'a self, grid: &'a dyn TileGrid) -> impl Iterator<Item = Cell> + 'a {
        self.cells().filter(move |cell| grid.is_walkable(*cell))
    }

    pub fn contains_point(&self, grid: &dyn TileGrid, point: Vec2) -> bool {
        grid.cell_at(point).is_some_and(|cell| self.contains(cell))
    }

    /// World-space center of the rectangle.
    pub fn center(&self, grid: &dyn TileGrid) -> Vec2 {
        (grid.center_of(self.min) + grid.center_of(self.max)) * 0.5
    }
}
