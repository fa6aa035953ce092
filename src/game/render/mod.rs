//! Render Interchange
//!
//! The renderer is external. Each frame the simulation hands it a
//! [`RenderFrame`]: the camera plus one [`InstanceRaw`] per visible model,
//! with a parallel list of model paths so the renderer knows which mesh to
//! draw for each instance.

pub mod uniforms;

pub use uniforms::{
    CameraUniform, INSTANCE_DECORATIVE, INSTANCE_HARVESTABLE, INSTANCE_MERCHANT, INSTANCE_PLAYER,
    InstanceRaw,
};

use crate::camera::CameraPose;

/// One frame of renderer input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    pub pose: CameraPose,
    pub camera: CameraUniform,
    pub instances: Vec<InstanceRaw>,
    /// Model path of each instance, same order as `instances`
    pub models: Vec<String>,
}

impl RenderFrame {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            camera: CameraUniform::from_pose(&pose),
            instances: Vec::new(),
            models: Vec::new(),
        }
    }

    pub fn push(&mut self, model: impl Into<String>, instance: InstanceRaw) {
        self.models.push(model.into());
        self.instances.push(instance);
    }

    /// Instance buffer contents.
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Camera buffer contents.
    pub fn camera_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_instance_bytes_match_count() {
        let mut frame = RenderFrame::new(CameraPose::default());
        frame.push("tree.glb", InstanceRaw::new(Vec3::new(1.0, 0.0, 2.0), 0.0, Vec3::ONE, INSTANCE_HARVESTABLE, 0.0));
        frame.push("dock.glb", InstanceRaw::new(Vec3::ZERO, 0.0, Vec3::ONE, INSTANCE_DECORATIVE, 0.0));

        assert_eq!(frame.instance_bytes().len(), 2 * std::mem::size_of::<InstanceRaw>());
        assert_eq!(frame.camera_bytes().len(), 80);
        assert_eq!(frame.models, vec!["tree.glb", "dock.glb"]);
    }

    #[test]
    fn test_instance_translation() {
        let raw = InstanceRaw::new(Vec3::new(3.0, -1.0, 5.0), 1.0, Vec3::splat(2.0), INSTANCE_MERCHANT, 0.0);
        assert!((raw.translation() - Vec3::new(3.0, -1.0, 5.0)).length() < 1e-5);
    }
}
