//! Player Movement Controller
//!
//! First-person controller driven by [`InputState`]. Each tick it:
//!
//! 1. Turns the view from the mouse delta (yaw unbounded, pitch clamped to ±60°)
//! 2. Picks the animation state (movement > attack > idle) and crossfades to it
//! 3. Moves the body along the yaw-rotated forward/strafe intents
//! 4. Casts the view ray against the occluder boxes and looks at the nearest hit
//!
//! # Speeds
//!
//! - Walk: 10.0 units/s
//! - Run: 25.0 units/s (sprint toggle on)
//!
//! # Usage
//!
//! ```rust,ignore
//! use riverside_engine::player::MovementController;
//!
//! let mut controller = MovementController::new();
//!
//! // Each frame:
//! let look_at = controller.update(delta_time, &input, registry.occluders());
//! let pose = controller.camera_pose();
//! ```

use std::f32::consts::FRAC_PI_3;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::{CameraPose, LookAtTarget, resolve_look_at};
use crate::input::{InputState, Viewport};
use crate::physics::Aabb;

use super::animation::{AnimationMixer, AnimationState, FADE_DURATION};

/// Walk speed in units per second
pub const WALK_SPEED: f32 = 10.0;

/// Run speed in units per second
pub const RUN_SPEED: f32 = 25.0;

/// Yaw change per viewport width of mouse travel (radians)
pub const YAW_SPEED: f32 = 8.0;

/// Pitch change per viewport height of mouse travel (radians)
pub const PITCH_SPEED: f32 = 5.0;

/// Pitch limit in radians (π/3)
pub const PITCH_LIMIT: f32 = FRAC_PI_3;

/// Camera height above the body
pub const EYE_HEIGHT: f32 = 3.0;

/// Height of the body model's origin
pub const BODY_HEIGHT: f32 = 0.0;

/// Tunables for [`MovementController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub yaw_speed: f32,
    pub pitch_speed: f32,
    pub eye_height: f32,
    pub body_height: f32,
    pub fade_duration: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            run_speed: RUN_SPEED,
            yaw_speed: YAW_SPEED,
            pitch_speed: PITCH_SPEED,
            eye_height: EYE_HEIGHT,
            body_height: BODY_HEIGHT,
            fade_duration: FADE_DURATION,
        }
    }
}

/// First-person movement, orientation and animation state.
#[derive(Debug, Clone)]
pub struct MovementController {
    settings: MovementSettings,
    /// Body position on the ground plane (y = body height)
    position: Vec3,
    /// Rotation about +Y in radians
    yaw: f32,
    /// Rotation about the local +X in radians, clamped to ±PITCH_LIMIT
    pitch: f32,
    mixer: AnimationMixer,
    camera: CameraPose,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::with_settings(MovementSettings::default())
    }
}

impl MovementController {
    /// Create a controller at the origin with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with custom settings.
    pub fn with_settings(settings: MovementSettings) -> Self {
        let position = Vec3::new(0.0, settings.body_height, 0.0);
        let eye = position + Vec3::Y * (settings.eye_height - settings.body_height);
        Self {
            settings,
            position,
            yaw: 0.0,
            pitch: 0.0,
            mixer: AnimationMixer::with_fade_duration(settings.fade_duration),
            camera: CameraPose {
                eye,
                target: eye + Vec3::NEG_Z,
            },
        }
    }

    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    /// Body position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Place the body. The height is forced to the body height.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = Vec3::new(position.x, self.settings.body_height, position.z);
    }

    /// Camera position: the body position raised to eye height.
    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(self.position.x, self.settings.eye_height, self.position.z)
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// View rotation: yaw about +Y, then pitch about local +X.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// View direction including pitch.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Forward direction on the ground plane.
    pub fn planar_forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::NEG_Z
    }

    /// Left direction on the ground plane.
    pub fn planar_left(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::NEG_X
    }

    /// Animation state currently selected.
    pub fn current_animation(&self) -> AnimationState {
        self.mixer.current()
    }

    pub fn is_current_animation(&self, state: AnimationState) -> bool {
        self.mixer.current() == state
    }

    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    /// Camera pose resolved by the last look-at.
    pub fn camera_pose(&self) -> CameraPose {
        self.camera
    }

    /// Run one tick. Returns the resolved look-at target.
    ///
    /// # Arguments
    /// * `dt` - Time step in seconds
    /// * `input` - Input for this tick (not yet rolled by `end_frame`)
    /// * `occluders` - `(id, box)` pairs of every box the view can hit
    pub fn update<T, I>(&mut self, dt: f32, input: &InputState, occluders: I) -> LookAtTarget<T>
    where
        I: IntoIterator<Item = (T, Aabb)>,
    {
        let delta = input.delta();
        self.update_rotation(delta.x, delta.y, input.viewport());
        self.update_animation(input);
        self.mixer.update(dt);
        self.update_translation(dt, input);
        self.look_at(occluders)
    }

    /// Apply a mouse delta in pixels.
    pub fn update_rotation(&mut self, dx: f32, dy: f32, viewport: Viewport) {
        let xh = dx / viewport.width;
        let yh = dy / viewport.height;
        self.yaw += -xh * self.settings.yaw_speed;
        self.pitch = (self.pitch - yh * self.settings.pitch_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Select the animation for this tick. Returns true on a state change.
    pub fn update_animation(&mut self, input: &InputState) -> bool {
        let next = Self::select_animation(input);
        self.mixer.transition(next)
    }

    /// Movement beats attack beats idle; sprint toggle upgrades walk to run.
    pub fn select_animation(input: &InputState) -> AnimationState {
        if input.current().actions.any_movement() {
            if input.sprint_toggled() {
                AnimationState::Run
            } else {
                AnimationState::Walk
            }
        } else if input.is_mouse_down() {
            AnimationState::Hit
        } else {
            AnimationState::Idle
        }
    }

    /// Speed for the current animation state.
    pub fn velocity(&self) -> f32 {
        match self.mixer.current() {
            AnimationState::Run => self.settings.run_speed,
            _ => self.settings.walk_speed,
        }
    }

    /// Move along the held forward/strafe intents.
    pub fn update_translation(&mut self, dt: f32, input: &InputState) {
        let actions = &input.current().actions;
        let forward = actions.forward_axis() as f32;
        let strafe = actions.strafe_axis() as f32;
        if forward == 0.0 && strafe == 0.0 {
            return;
        }

        let step = self.velocity() * dt;
        self.position += self.planar_forward() * (forward * step);
        self.position += self.planar_left() * (strafe * step);
    }

    /// Cast the view ray from the eye and aim the camera at the nearest hit.
    pub fn look_at<T, I>(&mut self, occluders: I) -> LookAtTarget<T>
    where
        I: IntoIterator<Item = (T, Aabb)>,
    {
        let eye = self.eye_position();
        let target = resolve_look_at(eye, self.forward(), occluders);
        self.camera = CameraPose {
            eye,
            target: target.point,
        };
        target
    }

    /// Stand `2 * min_distance` in front (+Z) of a box and look at its centre.
    pub fn focus_on(&mut self, target: &Aabb, min_distance: f32) {
        let center = target.center();
        self.set_position(Vec3::new(center.x, 0.0, center.z + min_distance * 2.0));

        let eye = self.eye_position();
        let to_center = center - eye;
        if let Some(dir) = to_center.try_normalize() {
            self.yaw = (-dir.x).atan2(-dir.z);
            let horizontal = Vec3::new(dir.x, 0.0, dir.z).length();
            self.pitch = dir.y.atan2(horizontal).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.camera = CameraPose {
            eye,
            target: center,
        };
    }

    /// Body box standing on the current position, used for melee when no
    /// player model bounds are available.
    pub fn melee_box(&self, half_extents: Vec3) -> Aabb {
        let center = self.position + Vec3::Y * half_extents.y;
        Aabb::from_center_half_extents(center, half_extents)
    }
}
