//! Melee Combat
//!
//! While the player is in the Hit animation and no cooldown is running, the
//! melee box is tested against every harvestable. Each intersecting
//! harvestable loses one health; those reaching zero credit their yield and
//! are removed from the registry in one batch. Any hit starts a 0.5 s
//! cooldown, so a held attack resolves at most once per cooldown window.

use crate::game::economy::{Inventory, ResourceYield};
use crate::game::registry::{EntityId, EntityRegistry};
use crate::physics::Aabb;
use crate::player::AnimationState;

/// Seconds between combat resolutions
pub const HIT_COOLDOWN: f32 = 0.5;

/// Remainders below this count as an expired cooldown (frame-step rounding)
const COOLDOWN_EPSILON: f32 = 1e-4;

/// What one resolution did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatOutcome {
    /// Every harvestable hit this resolution
    pub hits: Vec<EntityId>,
    /// Names of harvestables destroyed
    pub destroyed: Vec<String>,
    /// Yields credited to the inventory
    pub yields: Vec<ResourceYield>,
}

impl CombatOutcome {
    pub fn any_hit(&self) -> bool {
        !self.hits.is_empty()
    }
}

/// Cooldown-gated melee resolution
#[derive(Debug, Clone)]
pub struct CombatResolver {
    cooldown: f32,
    remaining: f32,
}

impl Default for CombatResolver {
    fn default() -> Self {
        Self::new(HIT_COOLDOWN)
    }
}

impl CombatResolver {
    pub fn new(cooldown: f32) -> Self {
        Self {
            cooldown: cooldown.max(0.0),
            remaining: 0.0,
        }
    }

    pub fn is_cooling_down(&self) -> bool {
        self.remaining > 0.0
    }

    /// Seconds until the next resolution may happen
    pub fn cooldown_remaining(&self) -> f32 {
        self.remaining
    }

    /// Advance the cooldown timer.
    pub fn tick(&mut self, dt: f32) {
        self.remaining -= dt;
        if self.remaining <= COOLDOWN_EPSILON {
            self.remaining = 0.0;
        }
    }

    /// Resolve one tick of melee.
    ///
    /// # Arguments
    /// * `animation` - Current player animation; only `Hit` resolves
    /// * `melee` - Player melee box
    /// * `registry` - Harvestables are read from its index and removed on destruction
    /// * `inventory` - Receives yields
    pub fn resolve(
        &mut self,
        animation: AnimationState,
        melee: &Aabb,
        registry: &mut EntityRegistry,
        inventory: &mut Inventory,
    ) -> CombatOutcome {
        let mut outcome = CombatOutcome::default();
        if animation != AnimationState::Hit || self.is_cooling_down() {
            return outcome;
        }

        let targets: Vec<EntityId> = registry
            .harvestable_boxes()
            .filter(|(_, bounds)| bounds.intersects(melee))
            .map(|(id, _)| id)
            .collect();

        let mut doomed = Vec::new();
        for id in targets {
            let Some(harvestable) = registry.harvestable_mut(id) else {
                continue;
            };
            let destroyed = harvestable.take_hit();
            let resource = harvestable.resource;
            outcome.hits.push(id);

            if destroyed {
                inventory.credit(resource);
                outcome.yields.push(resource);
                doomed.push(id);
            }
        }

        for entity in registry.remove_many(&doomed) {
            log::info!("{} is destroyed", entity.name);
            outcome.destroyed.push(entity.name);
        }

        if outcome.any_hit() {
            log::debug!("melee hit {} target(s)", outcome.hits.len());
            self.remaining = self.cooldown;
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::economy::ResourceYield;
    use crate::game::entities::{Entity, EntityKind, Harvestable};
    use glam::Vec3;

    fn tree_registry() -> (EntityRegistry, EntityId) {
        let mut registry = EntityRegistry::new();
        let id = registry
            .add(Entity::with_bounds(
                "tree-0",
                Aabb::new(Vec3::new(-1.0, 0.0, -3.0), Vec3::new(1.0, 5.0, -1.0)),
                EntityKind::Harvestable(Harvestable::new(3, ResourceYield::lumber(2))),
            ))
            .unwrap();
        (registry, id)
    }

    fn melee() -> Aabb {
        Aabb::from_center_half_extents(Vec3::new(0.0, 1.0, -1.5), Vec3::ONE)
    }

    #[test]
    fn test_only_hit_animation_resolves() {
        let (mut registry, _) = tree_registry();
        let mut inv = Inventory::default();
        let mut combat = CombatResolver::default();

        let outcome = combat.resolve(AnimationState::Walk, &melee(), &mut registry, &mut inv);
        assert!(!outcome.any_hit());
        assert!(!combat.is_cooling_down());
    }

    #[test]
    fn test_cooldown_expires_after_frame_steps() {
        let (mut registry, _) = tree_registry();
        let mut inv = Inventory::default();
        let mut combat = CombatResolver::default();
        assert!(combat.resolve(AnimationState::Hit, &melee(), &mut registry, &mut inv).any_hit());

        // Five 0.1 s frames add up to the full cooldown
        for _ in 0..4 {
            combat.tick(0.1);
            assert!(combat.is_cooling_down());
        }
        combat.tick(0.1);
        assert!(!combat.is_cooling_down());
        assert_eq!(combat.cooldown_remaining(), 0.0);
        assert!(combat.resolve(AnimationState::Hit, &melee(), &mut registry, &mut inv).any_hit());
    }

    #[test]
    fn test_three_hits_destroy_and_credit_once() {
        let (mut registry, id) = tree_registry();
        let mut inv = Inventory::default();
        let mut combat = CombatResolver::default();

        for round in 0..3 {
            let outcome = combat.resolve(AnimationState::Hit, &melee(), &mut registry, &mut inv);
            assert_eq!(outcome.hits, vec![id]);
            assert_eq!(outcome.destroyed.is_empty(), round < 2);
            combat.tick(HIT_COOLDOWN);
        }

        assert_eq!(inv.lumber, 2);
        assert!(!registry.contains(id));
        assert!(registry.index().is_empty());

        // Nothing left to hit
        let outcome = combat.resolve(AnimationState::Hit, &melee(), &mut registry, &mut inv);
        assert!(!outcome.any_hit());
        assert_eq!(inv.lumber, 2);
    }

    #[test]
    fn test_cooldown_coalesces_hits() {
        let (mut registry, id) = tree_registry();
        let mut inv = Inventory::default();
        let mut combat = CombatResolver::default();

        assert!(combat.resolve(AnimationState::Hit, &melee(), &mut registry, &mut inv).any_hit());
        combat.tick(0.2);
        assert!(!combat.resolve(AnimationState::Hit, &melee(), &mut registry, &mut inv).any_hit());
        combat.tick(0.2);
        assert!(!combat.resolve(AnimationState::Hit, &melee(), &mut registry, &mut inv).any_hit());

        let health = registry.get(id).and_then(|e| e.as_harvestable()).map(|h| h.health);
        assert_eq!(health, Some(2));
    }

    #[test]
    fn test_miss_does_not_start_cooldown() {
        let (mut registry, _) = tree_registry();
        let mut inv = Inventory::default();
        let mut combat = CombatResolver::default();
        let far = Aabb::from_center_half_extents(Vec3::new(50.0, 1.0, 50.0), Vec3::ONE);

        assert!(!combat.resolve(AnimationState::Hit, &far, &mut registry, &mut inv).any_hit());
        assert!(!combat.is_cooling_down());
    }
}
