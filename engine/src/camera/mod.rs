//! Camera Module
//!
//! Camera pose and obstruction-aware look-at raycasting.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod pose;
pub mod raycast;

pub use pose::CameraPose;
pub use raycast::{LOOK_AT_FALLBACK_DISTANCE, LookAtTarget, resolve_look_at};
