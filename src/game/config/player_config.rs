//! Player Configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::game::combat::HIT_COOLDOWN;
use crate::game::economy::Inventory;
use crate::player::MovementSettings;

/// Player model, movement and melee tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// First-person arms model carrying the axe clips
    pub model: String,
    pub model_scale: Vec3,
    pub movement: MovementSettings,
    /// Seconds between melee resolutions
    pub hit_cooldown: f32,
    /// Half size of the body box used for melee until the player model loads
    pub melee_half_extents: Vec3,
    pub starting_inventory: Inventory,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            model: "/static/models/animated_fps_axe.glb".to_string(),
            model_scale: Vec3::splat(2.0),
            movement: MovementSettings::default(),
            hit_cooldown: HIT_COOLDOWN,
            melee_half_extents: Vec3::new(1.5, 2.0, 1.5),
            starting_inventory: Inventory::starting(),
        }
    }
}
