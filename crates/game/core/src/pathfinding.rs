//! Best-first grid search between two cells.
//!
//! The search keeps an open heap of candidates ordered by `f = g + h`
//! (ties broken by the lower `h`, then by insertion order), a closed set of
//! visited cells and a node arena whose parent indices are walked back to
//! rebuild the path. Candidate neighbors are the eight surrounding cells that
//! the grid reports walkable.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::grid::{Cell, TileGrid};

/// Cost of a straight step.
pub const STRAIGHT_COST: u32 = 10;
/// Cost of a diagonal step.
pub const DIAGONAL_COST: u32 = 14;

/// Distance metric used both for step costs and for the heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceMetric {
    /// Octile distance: `14 * min(dr, dc) + 10 * |dr - dc|`.
    #[default]
    Octile,
    /// Replay-compatible metric that only measures the row difference.
    ///
    /// Older match recordings were produced with a metric whose column term
    /// always evaluated to zero. Selecting this variant reproduces the exact
    /// paths of those recordings, including free horizontal steps.
    RowOnly,
}

impl DistanceMetric {
    pub fn distance(self, a: Cell, b: Cell) -> u32 {
        let dr = a.row.abs_diff(b.row);
        match self {
            DistanceMetric::Octile => {
                let dc = a.col.abs_diff(b.col);
                let (short, long) = if dr < dc { (dr, dc) } else { (dc, dr) };
                DIAGONAL_COST * short + STRAIGHT_COST * (long - short)
            }
            DistanceMetric::RowOnly => STRAIGHT_COST * dr,
        }
    }
}

/// Search node: a cell with its cost-so-far, heuristic and parent link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathNode {
    pub cell: Cell,
    pub g_cost: u32,
    pub h_cost: u32,
    pub parent: Option<usize>,
}

impl PathNode {
    pub fn f_cost(&self) -> u32 {
        self.g_cost + self.h_cost
    }
}

#[derive(Debug, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    h: u32,
    seq: u64,
    node: usize,
}

impl Ord for OpenEntry {
    // BinaryHeap is a max-heap; reverse so the cheapest entry pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Grid pathfinder bound to a [`TileGrid`].
pub struct Pathfinder<'a> {
    grid: &'a dyn TileGrid,
    metric: DistanceMetric,
}

impl<'a> Pathfinder<'a> {
    pub fn new(grid: &'a dyn TileGrid, metric: DistanceMetric) -> Self {
        Self { grid, metric }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Returns the cells from `start` (exclusive) to `end` (inclusive).
    ///
    /// `None` means the goal is unreachable; callers treat that as "remain
    /// stationary". A search whose start equals its goal yields an empty path.
    pub fn find_path(&self, start: Cell, end: Cell) -> Option<Vec<Cell>> {
        if !self.grid.is_walkable(end) {
            tracing::trace!(?end, "path goal is not walkable");
            return None;
        }
        if start == end {
            return Some(Vec::new());
        }

        let mut nodes = vec![PathNode {
            cell: start,
            g_cost: 0,
            h_cost: self.metric.distance(start, end),
            parent: None,
        }];
        let mut open = BinaryHeap::new();
        let mut seq = 0u64;
        open.push(OpenEntry {
            f: nodes[0].f_cost(),
            h: nodes[0].h_cost,
            seq,
            node: 0,
        });

        let mut closed: HashSet<Cell> = HashSet::new();
        let mut best_g: HashMap<Cell, u32> = HashMap::from([(start, 0)]);

        while let Some(entry) = open.pop() {
            let current = nodes[entry.node];
            if !closed.insert(current.cell) {
                // Stale entry superseded by a cheaper one.
                continue;
            }

            if current.cell == end {
                return Some(Self::retrace(&nodes, entry.node));
            }

            for neighbor in current.cell.neighbors() {
                if closed.contains(&neighbor) || !self.grid.is_walkable(neighbor) {
                    continue;
                }

                let g = current.g_cost + self.metric.distance(current.cell, neighbor);
                if best_g.get(&neighbor).is_some_and(|&known| known <= g) {
                    continue;
                }
                best_g.insert(neighbor, g);

                let node = PathNode {
                    cell: neighbor,
                    g_cost: g,
                    h_cost: self.metric.distance(neighbor, end),
                    parent: Some(entry.node),
                };
                nodes.push(node);
                seq += 1;
                open.push(OpenEntry {
                    f: node.f_cost(),
                    h: node.h_cost,
                    seq,
                    node: nodes.len() - 1,
                });
            }
        }

        tracing::trace!(?start, ?end, visited = closed.len(), "open set exhausted");
        None
    }

    fn retrace(nodes: &[PathNode], goal: usize) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut cursor = Some(goal);
        while let Some(index) = cursor {
            let node = nodes[index];
            // The start node has no parent and is excluded from the path.
            if node.parent.is_none() {
                break;
            }
            path.push(node.cell);
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Tile, TileMap};

    fn is_adjacent(a: Cell, b: Cell) -> bool {
        a != b && a.row.abs_diff(b.row) <= 1 && a.col.abs_diff(b.col) <= 1
    }

    #[test]
    fn open_grid_path_ends_at_goal() {
        let grid = TileMap::open(10, 10, 16.0);
        let finder = Pathfinder::new(&grid, DistanceMetric::Octile);

        let start = Cell::new(0, 0);
        let goal = Cell::new(7, 4);
        let path = finder.find_path(start, goal).expect("open grid is connected");

        assert_eq!(path.last(), Some(&goal));
        assert!(!path.contains(&start));
        // Octile optimum: 4 diagonals + 3 straight steps.
        assert_eq!(path.len(), 7);
        let mut previous = start;
        for cell in &path {
            assert!(is_adjacent(previous, *cell));
            previous = *cell;
        }
    }

    #[test]
    fn same_start_and_goal_is_an_empty_path() {
        let grid = TileMap::open(3, 3, 16.0);
        let finder = Pathfinder::new(&grid, DistanceMetric::Octile);
        assert_eq!(finder.find_path(Cell::new(1, 1), Cell::new(1, 1)), Some(vec![]));
    }

    #[test]
    fn enclosed_start_has_no_path() {
        let mut grid = TileMap::open(7, 7, 16.0);
        let start = Cell::new(3, 3);
        for cell in start.neighbors() {
            grid.set(cell, Tile::Wall);
        }
        let finder = Pathfinder::new(&grid, DistanceMetric::Octile);
        assert_eq!(finder.find_path(start, Cell::new(0, 0)), None);
    }

    #[test]
    fn unwalkable_goal_has_no_path() {
        let mut grid = TileMap::open(4, 4, 16.0);
        grid.set(Cell::new(3, 3), Tile::Wall);
        let finder = Pathfinder::new(&grid, DistanceMetric::Octile);
        assert_eq!(finder.find_path(Cell::new(0, 0), Cell::new(3, 3)), None);
    }

    #[test]
    fn routes_around_walls() {
        let grid = TileMap::from_ascii(
            &[
                ".....", //
                ".###.", //
                ".#...", //
                ".#.#.", //
                "...#.",
            ],
            16.0,
        )
        .unwrap();
        let finder = Pathfinder::new(&grid, DistanceMetric::Octile);
        let path = finder
            .find_path(Cell::new(2, 2), Cell::new(4, 0))
            .expect("reachable around the wall");
        assert_eq!(path.last(), Some(&Cell::new(4, 0)));
        assert!(path.iter().all(|cell| grid.is_walkable(*cell)));
    }

    #[test]
    fn row_only_metric_ignores_columns() {
        let a = Cell::new(2, 0);
        let b = Cell::new(5, 9);
        assert_eq!(DistanceMetric::RowOnly.distance(a, b), 30);
        assert_eq!(DistanceMetric::Octile.distance(a, b), 14 * 3 + 10 * 6);
    }

    #[test]
    fn row_only_metric_still_reaches_goal() {
        let grid = TileMap::open(6, 6, 16.0);
        let finder = Pathfinder::new(&grid, DistanceMetric::RowOnly);
        let path = finder.find_path(Cell::new(0, 0), Cell::new(5, 5)).unwrap();
        assert_eq!(path.last(), Some(&Cell::new(5, 5)));
    }
}
