//! Entity Registry
//!
//! Arena storage for every [`Entity`] plus a derived bounding-box index.
//!
//! Entities live in slots addressed by [`EntityId`] (slot index + generation),
//! so a stale id never aliases a later entity that reuses the slot. Iteration
//! order is insertion order. The index is rebuilt before any mutating call
//! returns, which means readers never see a stale index.

use std::collections::HashMap;

use crate::error::{Result, SimError};
use crate::physics::Aabb;

use super::entities::{Entity, EntityClass, Harvestable, Merchant};

/// Generational handle into the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// One row of the bounding-box index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexEntry {
    pub id: EntityId,
    pub class: EntityClass,
    pub bounds: Aabb,
}

/// Owns all entities and their box index
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Live ids in insertion order
    order: Vec<EntityId>,
    names: HashMap<String, EntityId>,
    index: Vec<IndexEntry>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity. Names are unique.
    pub fn add(&mut self, mut entity: Entity) -> Result<EntityId> {
        if self.names.contains_key(&entity.name) {
            return Err(SimError::DuplicateName(entity.name));
        }

        let id = match self.free.pop() {
            Some(index) => EntityId {
                index,
                generation: self.slots[index as usize].generation,
            },
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entity: None,
                });
                EntityId {
                    index,
                    generation: 0,
                }
            }
        };
        log::debug!("spawned {} ({:?}) at {}", entity.name, entity.class(), entity.position);
        entity.id = Some(id);
        self.names.insert(entity.name.clone(), id);
        self.slots[id.index as usize].entity = Some(entity);
        self.order.push(id);
        self.rebuild_index();
        Ok(id)
    }

    fn take(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let mut entity = slot.entity.take()?;
        entity.id = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.names.remove(&entity.name);
        Some(entity)
    }

    /// Remove one entity. Stale ids are ignored.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.take(id)?;
        self.order.retain(|live| *live != id);
        self.rebuild_index();
        log::debug!("removed {}", entity.name);
        Some(entity)
    }

    /// Remove several entities with a single index rebuild.
    pub fn remove_many(&mut self, ids: &[EntityId]) -> Vec<Entity> {
        let removed: Vec<Entity> = ids.iter().filter_map(|id| self.take(*id)).collect();
        if !removed.is_empty() {
            self.order.retain(|id| self.slots[id.index as usize].generation == id.generation);
            self.rebuild_index();
        }
        removed
    }

    /// Remove every entity matching `predicate`, in registry order.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<Entity>
    where
        F: FnMut(&Entity) -> bool,
    {
        let ids: Vec<EntityId> = self
            .iter()
            .filter(|(_, entity)| predicate(entity))
            .map(|(id, _)| id)
            .collect();
        self.remove_many(&ids)
    }

    /// Recompute the box index from current membership. O(n).
    pub fn rebuild_index(&mut self) {
        let index: Vec<IndexEntry> = self
            .order
            .iter()
            .filter_map(|id| {
                let entity = self.slots[id.index as usize].entity.as_ref()?;
                Some(IndexEntry {
                    id: *id,
                    class: entity.class(),
                    bounds: entity.bounds(),
                })
            })
            .collect();
        self.index = index;
    }

    /// The box index, in registry order.
    pub fn index(&self) -> &[IndexEntry] {
        &self.index
    }

    /// `(id, box)` of every entity that blocks the view.
    pub fn occluders(&self) -> impl Iterator<Item = (EntityId, Aabb)> + '_ {
        self.index
            .iter()
            .filter(|entry| entry.class.occludes())
            .map(|entry| (entry.id, entry.bounds))
    }

    /// `(id, box)` of every harvestable.
    pub fn harvestable_boxes(&self) -> impl Iterator<Item = (EntityId, Aabb)> + '_ {
        self.index
            .iter()
            .filter(|entry| entry.class == EntityClass::Harvestable)
            .map(|entry| (entry.id, entry.bounds))
    }

    /// Advance idle animations. Never changes membership.
    pub fn update(&mut self, dt: f32) {
        for slot in &mut self.slots {
            if let Some(harvestable) = slot.entity.as_mut().and_then(Entity::as_harvestable_mut) {
                harvestable.advance(dt);
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_ref()
    }

    /// Mutable access to a harvestable's health and clip. Bounds stay fixed.
    pub fn harvestable_mut(&mut self, id: EntityId) -> Option<&mut Harvestable> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_mut()?.as_harvestable_mut()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn id_of(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Entity> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// First registered merchant.
    pub fn merchant(&self) -> Option<(&Entity, &Merchant)> {
        self.iter()
            .find_map(|(_, entity)| entity.as_merchant().map(|m| (entity, m)))
    }

    /// Live entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.get(*id).map(|entity| (*id, entity)))
    }

    pub fn count(&self, class: EntityClass) -> usize {
        self.index.iter().filter(|entry| entry.class == class).count()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
