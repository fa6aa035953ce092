//! Game Module
//!
//! The riverside world built on top of the engine: entities and their registry,
//! asynchronous model loading, melee and trade, world layout and the tick loop.

pub mod assets;
pub mod combat;
pub mod config;
pub mod economy;
pub mod entities;
pub mod hud;
pub mod registry;
pub mod render;
pub mod simulation;
pub mod world_setup;

pub use assets::{
    AssetQueue, LoadError, ManualLoader, ModelHandle, ModelLoader, ReadyEvent, ScriptedLoader,
    model_slot,
};
pub use combat::{CombatOutcome, CombatResolver, HIT_COOLDOWN};
pub use config::{EconomyConfig, PlayerConfig, SimConfig, WorldConfig};
pub use economy::{
    Inventory, ResourceKind, ResourceYield, TradeOffer, TradeOutcome, TradeRejection, WinCondition,
    WinTracker,
};
pub use entities::{Decorative, Entity, EntityClass, EntityKind, Harvestable, Merchant};
pub use hud::{HudSnapshot, TradePopup};
pub use registry::{EntityId, EntityRegistry};
pub use render::{CameraUniform, InstanceRaw, RenderFrame};
pub use simulation::{Simulation, TickReport};
pub use world_setup::{BOAT_NAME, SpawnRequest, WorldSetup};
