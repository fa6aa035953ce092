//! Player Module
//!
//! First-person player control.
//!
//! # Components
//!
//! - [`MovementController`] - Mouse look, yaw-relative WASD movement and look-at raycasting
//!   - Walk/run speeds with a sprint toggle
//!   - Pitch clamped to ±π/3
//! - [`AnimationMixer`] - Idle/Walk/Run/Hit state with 0.2 s crossfades
//! - [`MovementSettings`] - Tunables, serde-loadable

pub mod animation;
pub mod movement_controller;

pub use animation::{AnimationMixer, AnimationState, ClipPlayback, FADE_DURATION};
pub use movement_controller::{
    MovementController, MovementSettings,
    WALK_SPEED, RUN_SPEED, YAW_SPEED, PITCH_SPEED, PITCH_LIMIT, EYE_HEIGHT, BODY_HEIGHT,
};
