use crate::error::GridError;

use super::{Cell, Tile, TileGrid};

/// In-memory [`TileGrid`] backed by a row-major tile vector.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    rows: i32,
    cols: i32,
    tile_size: f32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Obstacle-free grid of the given dimensions.
    pub fn open(rows: i32, cols: i32, tile_size: f32) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            tile_size,
            tiles: vec![Tile::Floor; (rows * cols) as usize],
        }
    }

    /// Parses an ASCII layout.
    ///
    /// `#` is a wall, `~` is void, `.` and any ASCII letter or digit are floor
    /// (letters are commonly used by map files to mark spawns and sites).
    pub fn from_ascii<S: AsRef<str>>(lines: &[S], tile_size: f32) -> Result<Self, GridError> {
        let expected = lines.first().map(|l| l.as_ref().chars().count()).unwrap_or(0);
        if expected == 0 {
            return Err(GridError::Empty);
        }

        let mut tiles = Vec::with_capacity(lines.len() * expected);
        for (row, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let tile = match glyph {
                    '#' => Tile::Wall,
                    '~' => Tile::Void,
                    '.' => Tile::Floor,
                    c if c.is_ascii_alphanumeric() => Tile::Floor,
                    _ => return Err(GridError::UnknownGlyph { row, col, glyph }),
                };
                tiles.push(tile);
            }
        }

        Ok(Self {
            rows: lines.len() as i32,
            cols: expected as i32,
            tile_size,
            tiles,
        })
    }

    pub fn set(&mut self, cell: Cell, tile: Tile) {
        if let Some(index) = self.index(cell) {
            self.tiles[index] = tile;
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| (cell.row * self.cols + cell.col) as usize)
    }
}

impl TileGrid for TileMap {
    fn rows(&self) -> i32 {
        self.rows
    }

    fn cols(&self) -> i32 {
        self.cols
    }

    fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn tile(&self, cell: Cell) -> Option<Tile> {
        self.index(cell).map(|index| self.tiles[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ascii_layout() {
        let map = TileMap::from_ascii(&["#..", ".A~"], 8.0).unwrap();
        assert_eq!(map.rows(), 2);
        assert_eq!(map.cols(), 3);
        assert_eq!(map.tile(Cell::new(0, 0)), Some(Tile::Wall));
        assert!(map.is_walkable(Cell::new(1, 1)));
        assert_eq!(map.tile(Cell::new(1, 2)), Some(Tile::Void));
        assert!(!map.is_walkable(Cell::new(1, 2)));
        assert_eq!(map.tile(Cell::new(2, 0)), None);
    }

    #[test]
    fn rejects_ragged_and_unknown_rows() {
        assert_eq!(
            TileMap::from_ascii(&["...", ".."], 8.0),
            Err(GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            TileMap::from_ascii(&[".?."], 8.0),
            Err(GridError::UnknownGlyph { glyph: '?', .. })
        ));
        assert_eq!(TileMap::from_ascii::<&str>(&[], 8.0), Err(GridError::Empty));
    }
}
