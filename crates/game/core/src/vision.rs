//! Vision cones and the raycast collaborator.
//!
//! The core only decides *who* to look at; obstruction geometry sits behind
//! [`VisionService`], so a renderer-backed raycaster can replace the grid
//! sampler used in headless matches.

use core::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::agent::AgentId;
use crate::grid::TileGrid;

/// Angular field of view anchored at an agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisionCone {
    pub origin: Vec2,
    /// Facing angle in radians (0 = +x, counter-clockwise).
    pub facing: f32,
    /// Full angular width in radians.
    pub width: f32,
    pub range: f32,
}

impl VisionCone {
    pub fn new(origin: Vec2, facing: f32, width: f32, range: f32) -> Self {
        Self {
            origin,
            facing,
            width,
            range,
        }
    }

    /// Angular and range containment; ignores obstruction.
    pub fn contains(&self, point: Vec2) -> bool {
        let offset = point - self.origin;
        let distance = offset.length();
        if distance > self.range {
            return false;
        }
        if distance <= f32::EPSILON {
            return true;
        }
        angle_delta(self.facing, angle_of(offset)).abs() <= self.width * 0.5
    }
}

/// Angle of a direction vector in radians.
pub fn angle_of(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}

/// Angle from one point towards another.
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    angle_of(to - from)
}

/// Signed smallest difference `to - from`, wrapped into `(-PI, PI]`.
pub fn angle_delta(from: f32, to: f32) -> f32 {
    let mut delta = (to - from) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta <= -PI {
        delta += TAU;
    }
    delta
}

/// Raycast collaborator consumed for target detection and shot traces.
pub trait VisionService {
    /// Whether the straight segment between two points is unobstructed.
    fn line_of_sight(&self, grid: &dyn TileGrid, from: Vec2, to: Vec2) -> bool;

    /// Casts a ray and returns the first obstructed point, or the point at
    /// `range` if nothing blocks it.
    fn cast(&self, grid: &dyn TileGrid, origin: Vec2, angle: f32, range: f32) -> Vec2;

    /// Candidates inside `cone` with an unobstructed line from its origin.
    fn visible(
        &self,
        grid: &dyn TileGrid,
        cone: &VisionCone,
        candidates: &[(AgentId, Vec2)],
    ) -> Vec<AgentId> {
        candidates
            .iter()
            .filter(|(_, point)| cone.contains(*point))
            .filter(|(_, point)| self.line_of_sight(grid, cone.origin, *point))
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Samples the segment at a fraction of the tile size and stops on walls.
#[derive(Clone, Copy, Debug)]
pub struct GridSight {
    /// Samples per tile edge.
    pub resolution: f32,
}

impl Default for GridSight {
    fn default() -> Self {
        Self { resolution: 4.0 }
    }
}

impl GridSight {
    fn blocked(grid: &dyn TileGrid, point: Vec2) -> bool {
        match grid.cell_at(point) {
            Some(cell) => grid.tile(cell).is_some_and(|tile| tile.blocks_sight()),
            None => true,
        }
    }

    fn step(&self, grid: &dyn TileGrid) -> f32 {
        (grid.tile_size() / self.resolution.max(1.0)).max(0.01)
    }
}

impl VisionService for GridSight {
    fn line_of_sight(&self, grid: &dyn TileGrid, from: Vec2, to: Vec2) -> bool {
        let length = from.distance(to);
        let step = self.step(grid);
        let samples = (length / step).ceil() as u32;
        (1..samples).all(|i| {
            let point = from.lerp(to, i as f32 / samples as f32);
            !Self::blocked(grid, point)
        })
    }

    fn cast(&self, grid: &dyn TileGrid, origin: Vec2, angle: f32, range: f32) -> Vec2 {
        let direction = Vec2::from_angle(angle);
        let step = self.step(grid);
        let mut travelled = step;
        while travelled < range {
            let point = origin + direction * travelled;
            if Self::blocked(grid, point) {
                return point;
            }
            travelled += step;
        }
        origin + direction * range
    }
}

/// Vision without obstruction.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClearSight;

impl VisionService for ClearSight {
    fn line_of_sight(&self, _grid: &dyn TileGrid, _from: Vec2, _to: Vec2) -> bool {
        true
    }

    fn cast(&self, _grid: &dyn TileGrid, origin: Vec2, angle: f32, range: f32) -> Vec2 {
        origin + Vec2::from_angle(angle) * range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileMap;

    #[test]
    fn cone_checks_angle_and_range() {
        let cone = VisionCone::new(Vec2::ZERO, 0.0, 90f32.to_radians(), 100.0);
        assert!(cone.contains(Vec2::new(50.0, 10.0)));
        assert!(cone.contains(Vec2::new(50.0, 49.0)));
        assert!(!cone.contains(Vec2::new(50.0, 60.0)));
        assert!(!cone.contains(Vec2::new(-10.0, 0.0)));
        assert!(!cone.contains(Vec2::new(150.0, 0.0)));
    }

    #[test]
    fn angle_delta_wraps_across_pi() {
        let delta = angle_delta(170f32.to_radians(), -170f32.to_radians());
        assert!((delta - 20f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn walls_block_grid_sight() {
        let grid = TileMap::from_ascii(&[".....", "..#..", "....."], 10.0).unwrap();
        let sight = GridSight::default();
        let left = grid.center_of(crate::grid::Cell::new(1, 0));
        let right = grid.center_of(crate::grid::Cell::new(1, 4));
        let above = grid.center_of(crate::grid::Cell::new(0, 4));
        assert!(!sight.line_of_sight(&grid, left, right));
        assert!(sight.line_of_sight(&grid, grid.center_of(crate::grid::Cell::new(0, 0)), above));

        let hit = sight.cast(&grid, left, 0.0, 100.0);
        assert!(hit.x >= 20.0 && hit.x <= 21.0, "ray stops at the wall face, got {hit}");
    }
}
