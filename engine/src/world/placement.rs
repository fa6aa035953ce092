//! Spatial Placement
//!
//! Rejection sampler for spawn positions. A candidate is drawn uniformly inside
//! the play area and accepted only if it keeps `min_distance` (on the XZ plane)
//! from every existing position; otherwise it is redrawn. The number of draws is
//! capped so a saturated area fails with [`SimError::PlacementExhausted`]
//! instead of spinning forever.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{PLAY_BOUNDS, PlanarBounds};
use super::sampling::random_point_in;
use crate::error::{Result, SimError};
use crate::physics::is_planar_separated;

/// Default draw budget per placement
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Default separation between spawned entities
pub const DEFAULT_MIN_DISTANCE: f32 = 10.0;

/// Configuration for the rejection sampler
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Region candidates are drawn from
    pub bounds: PlanarBounds,
    /// Minimum XZ distance to any existing position
    pub min_distance: f32,
    /// Draws before giving up
    pub max_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            bounds: PLAY_BOUNDS,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Draw a position whose planar distance to every entry of `existing` is at
/// least `config.min_distance`.
///
/// The returned position has `y = 0`; callers set the ground offset of the model.
pub fn find_free_position<R: Rng + ?Sized>(
    rng: &mut R,
    existing: &[Vec3],
    config: &PlacementConfig,
) -> Result<Vec3> {
    for _ in 0..config.max_attempts {
        let candidate = random_point_in(rng, &config.bounds, 0.0);
        if existing
            .iter()
            .all(|&p| is_planar_separated(candidate, p, config.min_distance))
        {
            return Ok(candidate);
        }
    }

    Err(SimError::PlacementExhausted {
        attempts: config.max_attempts,
        min_distance: config.min_distance,
    })
}

/// Place `count` positions one after another, each clear of `existing` and of
/// every position placed before it.
///
/// Stops at the first exhausted placement and returns the error.
pub fn place_many<R: Rng + ?Sized>(
    rng: &mut R,
    existing: &[Vec3],
    count: usize,
    config: &PlacementConfig,
) -> Result<Vec<Vec3>> {
    let mut occupied: Vec<Vec3> = existing.to_vec();
    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        let pos = find_free_position(rng, &occupied, config)?;
        occupied.push(pos);
        placed.push(pos);
    }
    Ok(placed)
}
