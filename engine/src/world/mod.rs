//! World Module
//!
//! World-space regions, random sampling helpers and the spawn-position sampler.

pub mod bounds;
pub mod placement;
pub mod sampling;

pub use bounds::{CITY_BOUNDS, GAME_BOUNDS, MAP_BOUNDS, PLAY_BOUNDS, PlanarBounds};
pub use placement::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_DISTANCE, PlacementConfig, find_free_position, place_many,
};
pub use sampling::{random_int, random_point_in, random_range, random_rotation};
