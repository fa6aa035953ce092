//! Camera Pose
//!
//! Per-frame camera state handed to the renderer: where the eye is and what
//! it looks at.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Eye position plus look-at target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Eye position in world space
    pub eye: Vec3,
    /// Point being looked at
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
        }
    }
}

impl CameraPose {
    /// Normalized view direction. Falls back to -Z when eye and target coincide.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Right-handed view matrix with +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        let up = if self.forward().y.abs() > 0.99 { Vec3::Z } else { Vec3::Y };
        Mat4::look_at_rh(self.eye, self.eye + self.forward(), up)
    }

    /// Orientation that maps -Z onto the view direction.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_arc(Vec3::NEG_Z, self.forward())
    }
}
