//! Random Sampling Helpers
//!
//! Uniform range draws and the yaw choices used when spawning entities.
//! Every helper takes the caller's RNG so a seeded `StdRng` gives the same
//! world on every run.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use super::bounds::PlanarBounds;

/// Denominators of the yaw choices handed to spawned entities (-PI/d).
const ROTATION_DENOMINATORS: [f32; 4] = [6.0, 4.0, 3.0, 2.0];

/// Uniform float in `[min, max)`. Returns `min` when the range is empty.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Uniform integer in `[ceil(min), floor(max))`; the maximum is exclusive.
///
/// Returns the lower bound when the range is empty.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> i32 {
    let lo = min.ceil() as i32;
    let hi = max.floor() as i32;
    if hi <= lo {
        return lo;
    }
    rng.gen_range(lo..hi)
}

/// One of `-PI/6`, `-PI/4`, `-PI/3`, `-PI/2`, chosen uniformly.
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let idx = rng.gen_range(0..ROTATION_DENOMINATORS.len());
    -PI / ROTATION_DENOMINATORS[idx]
}

/// Uniform point on the XZ plane inside `bounds`, at height `y`.
pub fn random_point_in<R: Rng + ?Sized>(rng: &mut R, bounds: &PlanarBounds, y: f32) -> Vec3 {
    Vec3::new(
        random_range(rng, bounds.min_x, bounds.max_x),
        y,
        random_range(rng, bounds.min_z, bounds.max_z),
    )
}
