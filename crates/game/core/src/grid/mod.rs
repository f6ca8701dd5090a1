//! Tile grid collaborator.
//!
//! The grid classifies cells as walkable or not and converts between world
//! coordinates and cells. Map assets are loaded elsewhere; the simulation only
//! consumes the [`TileGrid`] trait.
mod region;
mod tile_map;

pub use region::Region;
pub use tile_map::TileMap;

use glam::Vec2;

/// Discrete grid cell addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Cells at Chebyshev distance one, in row-major order.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        (-1..=1).flat_map(move |dr| {
            (-1..=1).filter_map(move |dc| {
                (dr != 0 || dc != 0).then(|| Cell::new(self.row + dr, self.col + dc))
            })
        })
    }
}

/// Static classification of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    Floor,
    Wall,
    Void,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor)
    }

    /// Walls block sight; floor and void (pits, gaps) do not.
    pub fn blocks_sight(self) -> bool {
        matches!(self, Tile::Wall)
    }
}

/// Grid oracle exposing walkability and coordinate conversion.
pub trait TileGrid {
    fn rows(&self) -> i32;
    fn cols(&self) -> i32;

    /// World units covered by one cell edge.
    fn tile_size(&self) -> f32;

    fn tile(&self, cell: Cell) -> Option<Tile>;

    fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.col >= 0 && cell.row < self.rows() && cell.col < self.cols()
    }

    fn is_walkable(&self, cell: Cell) -> bool {
        self.tile(cell).is_some_and(Tile::is_walkable)
    }

    /// Cell containing a world-space point, if it lies on the grid.
    fn cell_at(&self, point: Vec2) -> Option<Cell> {
        let size = self.tile_size();
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let cell = Cell::new((point.y / size).floor() as i32, (point.x / size).floor() as i32);
        self.contains(cell).then_some(cell)
    }

    /// World-space center of a cell.
    fn center_of(&self, cell: Cell) -> Vec2 {
        let size = self.tile_size();
        Vec2::new((cell.col as f32 + 0.5) * size, (cell.row as f32 + 0.5) * size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_the_eight_surrounding_cells() {
        let around: Vec<Cell> = Cell::new(5, 5).neighbors().collect();
        assert_eq!(around.len(), 8);
        assert!(!around.contains(&Cell::new(5, 5)));
        assert!(around.contains(&Cell::new(4, 4)));
        assert!(around.contains(&Cell::new(6, 6)));
    }

    #[test]
    fn cell_and_center_round_trip() {
        let grid = TileMap::open(4, 6, 16.0);
        let cell = Cell::new(2, 3);
        let center = grid.center_of(cell);
        assert_eq!(center, Vec2::new(56.0, 40.0));
        assert_eq!(grid.cell_at(center), Some(cell));
        assert_eq!(grid.cell_at(Vec2::new(-1.0, 4.0)), None);
        assert_eq!(grid.cell_at(Vec2::new(6.0 * 16.0, 4.0)), None);
    }
}
