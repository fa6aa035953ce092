//! World Configuration
//!
//! Spawn tables and scenery layout. `Default` reproduces the riverside map:
//! a river along +Z with a row of docks, a forest strip in the middle and two
//! rows of apartment buildings along -Z.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::world::{CITY_BOUNDS, GAME_BOUNDS, MAP_BOUNDS, PlacementConfig, PlanarBounds};

/// One animal species and how many to spawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimalSpec {
    /// Entity names are `{species}-{i}`
    pub species: String,
    pub model: String,
    /// Clip looped while idle
    pub idle_clip: String,
    pub meat: u32,
    pub health: i32,
    pub scale: Vec3,
    /// Height of the model origin above the ground
    pub ground_offset: f32,
    pub count: u32,
}

/// Trees scattered through the forest strip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSpec {
    pub model: String,
    pub lumber: u32,
    pub health: i32,
    pub scale: Vec3,
    pub ground_offset: f32,
    pub count: u32,
}

impl Default for TreeSpec {
    fn default() -> Self {
        Self {
            model: "/static/models/tree.glb".to_string(),
            lumber: 2,
            health: 3,
            scale: Vec3::splat(3.0),
            ground_offset: 0.0,
            count: 8,
        }
    }
}

/// Fixed scenery: models and anchor coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Whole map, used for the building rows
    pub map_bounds: PlanarBounds,
    /// Playable game area, used for the docks and the boat
    pub game_bounds: PlanarBounds,
    /// City strip holding the building rows and rails
    pub city_bounds: PlanarBounds,

    pub dock_model: String,
    pub dock_ground_offset: f32,
    /// Docks sit this far inside the river edge of the game bounds
    pub dock_inset: f32,

    pub building_model: String,
    pub building_ground_offset: f32,
    /// Gap between neighbouring buildings
    pub road_width: f32,
    /// Back row sits this far behind the front row
    pub back_row_offset: f32,
    /// Front-row indices removed on the win transition (inclusive)
    pub removable_front: (u32, u32),

    pub boat_model: String,
    pub boat_ground_offset: f32,
    /// Boat sits this far inside the river edge of the game bounds
    pub boat_inset: f32,

    pub station_model: String,
    pub station_position: Vec3,
    pub rail_model: String,
    pub rail_count: u32,
    pub rail_scale: Vec3,
    pub rail_start_x: f32,
    /// Extra gap between rails
    pub rail_gap: f32,
    /// Rails sit this much further behind the front row than their own depth
    pub rail_setback: f32,
    pub train_model: String,
    pub train_scale: Vec3,
    pub train_position: Vec3,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let city_front = CITY_BOUNDS.max_z;
        Self {
            map_bounds: MAP_BOUNDS,
            game_bounds: GAME_BOUNDS,
            city_bounds: CITY_BOUNDS,

            dock_model: "/static/models/low_poly_dock.glb".to_string(),
            dock_ground_offset: -2.0,
            dock_inset: 50.0,

            building_model: "/static/models/mega_moduler_apartment_building.glb".to_string(),
            building_ground_offset: -1.0,
            road_width: 10.0,
            back_row_offset: 65.0,
            removable_front: (3, 5),

            boat_model: "/static/models/boat.glb".to_string(),
            boat_ground_offset: 0.0,
            boat_inset: 43.0,

            station_model: "/static/models/mount_royal_train_station.glb".to_string(),
            station_position: Vec3::new(0.0, 24.0, city_front - 65.0),
            rail_model: "/static/models/rail_long.glb".to_string(),
            rail_count: 8,
            rail_scale: Vec3::new(5.0, 2.0, 2.0),
            rail_start_x: -30.0,
            rail_gap: 3.0,
            rail_setback: 4.5,
            train_model: "/static/models/train.glb".to_string(),
            train_scale: Vec3::splat(0.4),
            train_position: Vec3::new(0.0, 0.2, city_front - 8.0),
        }
    }
}

/// Everything about what goes where
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Rejection sampler for animals and trees
    pub placement: PlacementConfig,
    pub animals: Vec<AnimalSpec>,
    pub trees: TreeSpec,
    pub layout: LayoutConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            animals: vec![
                AnimalSpec {
                    species: "deer".to_string(),
                    model: "/static/models/deer.glb".to_string(),
                    idle_clip: "Idle".to_string(),
                    meat: 4,
                    health: 3,
                    scale: Vec3::splat(1.5),
                    ground_offset: 0.0,
                    count: 3,
                },
                AnimalSpec {
                    species: "fox".to_string(),
                    model: "/static/models/fox.glb".to_string(),
                    idle_clip: "Idle".to_string(),
                    meat: 2,
                    health: 1,
                    scale: Vec3::splat(0.05),
                    ground_offset: 0.0,
                    count: 2,
                },
            ],
            trees: TreeSpec::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Total harvestables requested by the spawn tables.
    pub fn harvestable_count(&self) -> u32 {
        self.animals.iter().map(|a| a.count).sum::<u32>() + self.trees.count
    }
}
