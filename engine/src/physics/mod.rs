//! Physics module
//!
//! Collision support for the simulation. Everything is axis-aligned boxes:
//! there is no rigid-body integration, gravity or response.
//!
//! # Unit System
//!
//! **1 unit = 1 world unit** of the scene (the world is 500 x 500 units).
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3, Quat) re-exported from glam
//! - [`collision`] - AABB overlap, containment and ray-AABB intersection

pub mod collision;
pub mod types;

pub use collision::{Aabb, is_planar_separated, planar_distance, ray_aabb_intersect};
pub use types::{Quat, Vec3};
