//! Riverside Engine Library
//!
//! Simulation core of a first-person harvest-and-trade game. The player walks a
//! riverside map, chops trees and hunts animals with an axe, trades meat for
//! metal at a moored boat and, once enough is gathered, watches part of the city
//! make way for a train station.
//!
//! Rendering and asset decoding live in the host. The core consumes decoded
//! input events and completed model loads, and produces a [`game::RenderFrame`]
//! and a [`game::HudSnapshot`] each tick.
//!
//! # Modules
//!
//! - [`input`] - Logical actions, mouse state and per-frame snapshots
//! - [`camera`] - Camera pose and obstruction-aware look-at raycasting
//! - [`player`] - First-person movement controller and animation mixer
//! - [`physics`] - Axis-aligned boxes and ray tests
//! - [`world`] - Map regions, random sampling and spawn placement
//! - [`game`] - Entities, economy, world layout and the [`game::Simulation`] loop
//!
//! # Example
//!
//! ```ignore
//! use riverside_engine::game::{SimConfig, Simulation, ScriptedLoader};
//! use riverside_engine::input::{InputAction, InputEvent};
//!
//! let config = SimConfig::load("riverside.json")?;
//! let mut sim = Simulation::new(config, ScriptedLoader::new())?;
//!
//! sim.handle_input(InputEvent::KeyDown(InputAction::MoveForward));
//! let report = sim.tick(1.0 / 60.0);
//! println!("{}", sim.hud().to_json()?);
//! ```

pub mod camera;
pub mod error;
pub mod input;
pub mod physics;
pub mod player;
pub mod world;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use error::{Result, SimError};
pub use input::{InputAction, InputEvent, InputState, MouseButton, Viewport};
pub use player::{AnimationState, MovementController};
pub use game::{SimConfig, Simulation};
