//! World-space geometry: positions, discretized block keys, volumes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// A discretized integer block coordinate.
///
/// This is the key of the block ledger. Equality and hashing are the
/// derived field-wise ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Floors a world-space point onto the block grid. Handles negative
    /// and fractional coordinates (-0.5 lands in block -1, not 0).
    pub fn from_world(pos: Vec3) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
            z: pos.z.floor() as i32,
        }
    }

    /// Center of the block, for distance checks against world positions.
    pub fn center(self) -> Vec3 {
        Vec3::new(
            self.x as f64 + 0.5,
            self.y as f64 + 0.5,
            self.z as f64 + 0.5,
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An axis-aligned bounding box, used to scope the generator density
/// check to the volume around a generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_world_floors_fractional_coordinates() {
        let pos = BlockPos::from_world(Vec3::new(10.9, 64.2, 10.0));
        assert_eq!(pos, BlockPos::new(10, 64, 10));
    }

    #[test]
    fn test_from_world_floors_negative_coordinates() {
        let pos = BlockPos::from_world(Vec3::new(-0.5, 64.0, -1.1));
        assert_eq!(pos, BlockPos::new(-1, 64, -2));
    }

    #[test]
    fn test_equal_positions_hash_equal() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(BlockPos::new(1, 2, 3));
        assert!(set.contains(&BlockPos::from_world(Vec3::new(1.7, 2.0, 3.9))));
    }

    #[test]
    fn test_aabb_contains() {
        let bb = Aabb::new(Vec3::new(-2.0, -1.0, -2.0), Vec3::new(2.0, 3.0, 2.0));
        assert!(bb.contains(Vec3::new(0.0, 1.0, 0.0)));
        assert!(!bb.contains(Vec3::new(0.0, 4.0, 0.0)));
    }

    #[test]
    fn test_distance() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 4.0, 0.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-9);
    }
}
