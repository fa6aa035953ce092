//! World Entities
//!
//! Every object in the world is an [`Entity`] with a unique name, a transform,
//! a world-space bounding box fixed at spawn, and one of three kinds:
//!
//! - [`Harvestable`] - animals and trees; lose health when hit, yield a resource when destroyed
//! - [`Merchant`] - the moored boat with its trade offer
//! - [`Decorative`] - docks, buildings, rails; block the view, optionally removable

use glam::Vec3;

use crate::game::assets::ModelHandle;
use crate::game::economy::{ResourceYield, TradeOffer};
use crate::game::registry::EntityId;
use crate::physics::Aabb;

/// Looping idle clip of a harvestable
#[derive(Debug, Clone, PartialEq)]
pub struct IdleAnimation {
    pub clip: String,
    /// Playback time in seconds
    pub time: f32,
}

impl IdleAnimation {
    pub fn new(clip: impl Into<String>) -> Self {
        Self {
            clip: clip.into(),
            time: 0.0,
        }
    }
}

/// Destructible entity
#[derive(Debug, Clone, PartialEq)]
pub struct Harvestable {
    pub health: i32,
    pub resource: ResourceYield,
    pub idle: Option<IdleAnimation>,
}

impl Harvestable {
    pub fn new(health: i32, resource: ResourceYield) -> Self {
        Self {
            health,
            resource,
            idle: None,
        }
    }

    /// Builder: attach an idle clip.
    pub fn with_idle(mut self, clip: impl Into<String>) -> Self {
        self.idle = Some(IdleAnimation::new(clip));
        self
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Take one point of damage. Returns true if this destroyed it.
    pub fn take_hit(&mut self) -> bool {
        self.health -= 1;
        self.is_destroyed()
    }

    /// Advance the idle clip.
    pub fn advance(&mut self, dt: f32) {
        if let Some(idle) = self.idle.as_mut() {
            idle.time += dt;
        }
    }
}

/// Stationary trader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merchant {
    pub offer: TradeOffer,
    pub interaction_radius: f32,
}

/// Scenery; only used for view occlusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decorative {
    /// Removed when the win condition fires
    pub removable: bool,
}

/// Kind-specific data
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Harvestable(Harvestable),
    Merchant(Merchant),
    Decorative(Decorative),
}

/// Fieldless mirror of [`EntityKind`], stored in the box index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Harvestable,
    Merchant,
    Decorative,
}

impl EntityClass {
    /// Whether boxes of this class block the view ray.
    pub fn occludes(self) -> bool {
        match self {
            EntityClass::Harvestable | EntityClass::Decorative => true,
            EntityClass::Merchant => false,
        }
    }
}

impl EntityKind {
    pub fn class(&self) -> EntityClass {
        match self {
            EntityKind::Harvestable(_) => EntityClass::Harvestable,
            EntityKind::Merchant(_) => EntityClass::Merchant,
            EntityKind::Decorative(_) => EntityClass::Decorative,
        }
    }
}

/// One object in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Registry handle; set while the entity is registered
    pub id: Option<EntityId>,
    pub name: String,
    /// Model path this entity was spawned from
    pub model: String,
    pub position: Vec3,
    pub yaw: f32,
    pub scale: Vec3,
    bounds: Aabb,
    pub kind: EntityKind,
}

impl Entity {
    /// Build an entity from a placed model. The bounding box is taken from the
    /// model's world bounds now and never recomputed.
    pub fn from_model(name: impl Into<String>, model: &ModelHandle, kind: EntityKind) -> Self {
        Self {
            id: None,
            name: name.into(),
            model: model.path.clone(),
            position: model.position,
            yaw: model.yaw,
            scale: model.scale,
            bounds: model.world_bounds(),
            kind,
        }
    }

    /// Build an entity from an explicit box (no model).
    pub fn with_bounds(name: impl Into<String>, bounds: Aabb, kind: EntityKind) -> Self {
        Self {
            id: None,
            name: name.into(),
            model: String::new(),
            position: bounds.center(),
            yaw: 0.0,
            scale: Vec3::ONE,
            bounds,
            kind,
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn class(&self) -> EntityClass {
        self.kind.class()
    }

    pub fn as_harvestable(&self) -> Option<&Harvestable> {
        match &self.kind {
            EntityKind::Harvestable(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_harvestable_mut(&mut self) -> Option<&mut Harvestable> {
        match &mut self.kind {
            EntityKind::Harvestable(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_merchant(&self) -> Option<&Merchant> {
        match &self.kind {
            EntityKind::Merchant(m) => Some(m),
            _ => None,
        }
    }

    /// Decorative flagged for removal on the win transition.
    pub fn is_removable(&self) -> bool {
        matches!(self.kind, EntityKind::Decorative(Decorative { removable: true }))
    }
}
