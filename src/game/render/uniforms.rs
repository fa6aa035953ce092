//! GPU Uniform Buffers
//!
//! Plain-old-data layouts handed to the renderer each frame.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::camera::CameraPose;

/// Camera uniforms: view matrix and eye position
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::from_pose(&CameraPose::default())
    }
}

impl CameraUniform {
    pub fn from_pose(pose: &CameraPose) -> Self {
        Self {
            view: pose.view_matrix().to_cols_array_2d(),
            eye: pose.eye.extend(1.0).to_array(),
        }
    }
}

static_assertions::assert_eq_size!(CameraUniform, [u8; 80]);

/// Instance kinds, mirrored in the shader
pub const INSTANCE_PLAYER: u32 = 0;
pub const INSTANCE_HARVESTABLE: u32 = 1;
pub const INSTANCE_MERCHANT: u32 = 2;
pub const INSTANCE_DECORATIVE: u32 = 3;

/// Per-instance model matrix plus kind and animation data
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub kind: u32,
    /// Playback time of the instance's looping clip, 0 when static
    pub clip_time: f32,
    pub _padding: [u32; 2],
}

impl InstanceRaw {
    pub fn new(position: Vec3, yaw: f32, scale: Vec3, kind: u32, clip_time: f32) -> Self {
        let model = Mat4::from_scale_rotation_translation(scale, Quat::from_rotation_y(yaw), position);
        Self {
            model: model.to_cols_array_2d(),
            kind,
            clip_time,
            _padding: [0; 2],
        }
    }

    pub fn translation(&self) -> Vec3 {
        Mat4::from_cols_array_2d(&self.model).w_axis.truncate()
    }
}

static_assertions::assert_eq_size!(InstanceRaw, [u8; 80]);
static_assertions::const_assert!(std::mem::size_of::<InstanceRaw>() % 16 == 0);
