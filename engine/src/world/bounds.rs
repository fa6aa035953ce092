//! World Bounds
//!
//! Rectangular regions of the ground plane used for placement and layout.
//!
//! ## Layout
//! The world is 500 x 500 units. Along Z it runs from the city (negative Z)
//! through the forest to the river and docks (positive Z).
//! - `MAP_BOUNDS` - everything that can hold scenery
//! - `GAME_BOUNDS` - the region the player plays in
//! - `PLAY_BOUNDS` - game bounds shrunk by 50 on every side; animals and trees spawn here
//! - `CITY_BOUNDS` - strip between the game edge and the play area on the city side

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle on the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanarBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

/// Full scenery extent
pub const MAP_BOUNDS: PlanarBounds = PlanarBounds::new(-200.0, 170.0, -250.0, 250.0);

/// Playable region
pub const GAME_BOUNDS: PlanarBounds = PlanarBounds::new(-100.0, 100.0, -100.0, 100.0);

/// Spawn region for harvestables
pub const PLAY_BOUNDS: PlanarBounds = GAME_BOUNDS.shrink(50.0);

/// City strip on the negative-Z side
pub const CITY_BOUNDS: PlanarBounds =
    PlanarBounds::new(GAME_BOUNDS.min_x, GAME_BOUNDS.max_x, GAME_BOUNDS.min_z, PLAY_BOUNDS.min_z);

impl Default for PlanarBounds {
    fn default() -> Self {
        PLAY_BOUNDS
    }
}

impl PlanarBounds {
    /// Create bounds from X and Z ranges.
    pub const fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Bounds moved inward by `margin` on every side.
    pub const fn shrink(&self, margin: f32) -> Self {
        Self::new(
            self.min_x + margin,
            self.max_x - margin,
            self.min_z + margin,
            self.max_z - margin,
        )
    }

    /// Extent along X.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Extent along Z.
    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    /// True when both ranges are non-empty.
    pub fn is_valid(&self) -> bool {
        self.max_x > self.min_x && self.max_z > self.min_z
    }

    /// Check whether a position lies within the bounds. Y is ignored.
    pub fn contains(&self, pos: Vec3) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.z >= self.min_z && pos.z <= self.max_z
    }

    /// Clamp X and Z into the bounds; Y is preserved.
    pub fn clamp(&self, pos: Vec3) -> Vec3 {
        Vec3::new(
            pos.x.clamp(self.min_x, self.max_x),
            pos.y,
            pos.z.clamp(self.min_z, self.max_z),
        )
    }
}
