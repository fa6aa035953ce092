//! Raycast Module
//!
//! Look-at resolution for the first-person camera. A ray is cast from the eye
//! along the view direction and tested against every occluding box; the camera
//! then looks at the nearest hit, so it never looks "through" a tree or building.

use glam::Vec3;

use crate::physics::Aabb;

/// How far ahead the camera looks when nothing is hit
pub const LOOK_AT_FALLBACK_DISTANCE: f32 = 100.0;

/// Result of a look-at query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAtTarget<T> {
    /// Point the camera should look at
    pub point: Vec3,
    /// Distance from the ray origin to `point`
    pub distance: f32,
    /// Identifier of the box that was hit, `None` for the fallback point
    pub hit: Option<T>,
}

/// Resolve the look-at point for a ray against a set of boxes.
///
/// The strictly nearest intersection wins; on equal distances the box seen
/// first in `boxes` is kept. Hits at or beyond [`LOOK_AT_FALLBACK_DISTANCE`]
/// lose to the fallback point `origin + direction * LOOK_AT_FALLBACK_DISTANCE`.
///
/// # Arguments
/// * `origin` - Eye position
/// * `direction` - View direction (normalized)
/// * `boxes` - `(id, box)` pairs in registry iteration order
pub fn resolve_look_at<T, I>(origin: Vec3, direction: Vec3, boxes: I) -> LookAtTarget<T>
where
    I: IntoIterator<Item = (T, Aabb)>,
{
    let mut best = LookAtTarget {
        point: origin + direction * LOOK_AT_FALLBACK_DISTANCE,
        distance: LOOK_AT_FALLBACK_DISTANCE,
        hit: None,
    };

    for (id, aabb) in boxes {
        if let Some(t) = aabb.ray_intersect(origin, direction) {
            if t < best.distance {
                best = LookAtTarget {
                    point: origin + direction * t,
                    distance: t,
                    hit: Some(id),
                };
            }
        }
    }

    best
}
