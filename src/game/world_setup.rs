//! World Setup
//!
//! Lays out the riverside map and the scenery swap on winning.
//!
//! # Layout
//!
//! - Docks: a row along the river edge (z = 50), tiled along X by the dock depth
//! - Buildings: a front row on the city edge (z = -50) and a back row 65 units
//!   behind it, tiled along X by building width plus a 10 unit road
//! - Boat: the merchant, moored at (0, 0, 57) facing -X
//! - Animals and trees: rejection-sampled inside the play area
//!
//! # Win swap
//!
//! Front buildings 3..=5 are removed and a train station, eight rails and a
//! train are loaded into the gap.
//!
//! Every piece starts as a model load. Entities are created in [`WorldSetup::spawn`]
//! once the load completes, because tiled rows need the model size.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use rand::Rng;

use crate::error::Result;
use crate::game::assets::{AssetQueue, ModelHandle, ModelLoader, ReadyEvent};
use crate::game::config::{EconomyConfig, LayoutConfig, WorldConfig};
use crate::game::economy::{ResourceYield, TradeOffer};
use crate::game::entities::{Decorative, Entity, EntityKind, Harvestable, Merchant};
use crate::game::registry::{EntityId, EntityRegistry};
use crate::world::{find_free_position, random_rotation};

/// Upper bound on entities produced by one tiled row
pub const MAX_ROW_TILES: usize = 256;

/// Name of the merchant entity
pub const BOAT_NAME: &str = "boat";

/// Which building row a load is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingRow {
    Back,
    Front,
}

impl BuildingRow {
    fn prefix(self) -> &'static str {
        match self {
            BuildingRow::Back => "back-building",
            BuildingRow::Front => "front-building",
        }
    }
}

/// What to build when a model load completes
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnRequest {
    /// First-person arms; kept by the simulation, not registered
    Player,
    Animal {
        name: String,
        spec: usize,
        position: Vec3,
        yaw: f32,
    },
    Tree {
        name: String,
        position: Vec3,
        yaw: f32,
    },
    Boat {
        offer: TradeOffer,
    },
    Docks,
    Buildings(BuildingRow),
    Station,
    Rails,
    Train,
}

/// Places the world's entities.
#[derive(Debug, Clone)]
pub struct WorldSetup {
    world: WorldConfig,
    economy: EconomyConfig,
    /// Set by [`WorldSetup::begin_win_swap`]; removable buildings loading later are skipped
    swapped: bool,
}

impl WorldSetup {
    pub fn new(world: WorldConfig, economy: EconomyConfig) -> Self {
        Self {
            world,
            economy,
            swapped: false,
        }
    }

    /// Whether the win swap has run.
    pub fn is_swapped(&self) -> bool {
        self.swapped
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.world.layout
    }

    /// Boat anchor: on the river, `boat_inset` inside the far edge of the game area.
    pub fn boat_position(&self) -> Vec3 {
        let layout = &self.world.layout;
        Vec3::new(
            0.0,
            layout.boat_ground_offset,
            layout.game_bounds.max_z - layout.boat_inset,
        )
    }

    /// Choose spawn positions and submit every initial load.
    ///
    /// Positions are reserved up front so entities never overlap even though
    /// their models finish loading in any order. Running out of placement
    /// attempts is a hard error.
    pub fn populate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        loader: &mut dyn ModelLoader,
        queue: &mut AssetQueue<SpawnRequest>,
        player_model: &str,
    ) -> Result<()> {
        let layout = &self.world.layout;

        queue.submit(loader, player_model, SpawnRequest::Player);
        queue.submit(loader, &layout.dock_model, SpawnRequest::Docks);
        queue.submit(loader, &layout.building_model, SpawnRequest::Buildings(BuildingRow::Back));
        queue.submit(loader, &layout.building_model, SpawnRequest::Buildings(BuildingRow::Front));

        let offer = TradeOffer::generate(rng, self.economy.meat_wanted, self.economy.metal_offered);
        log::info!(
            "merchant wants {} meat for {} metal",
            offer.meat_wanted,
            offer.metal_offered
        );
        queue.submit(loader, &layout.boat_model, SpawnRequest::Boat { offer });

        let mut reserved = vec![self.boat_position()];

        for (spec_index, spec) in self.world.animals.iter().enumerate() {
            for i in 0..spec.count {
                let mut position = find_free_position(rng, &reserved, &self.world.placement)?;
                reserved.push(position);
                position.y = spec.ground_offset;
                let request = SpawnRequest::Animal {
                    name: format!("{}-{i}", spec.species),
                    spec: spec_index,
                    position,
                    yaw: random_rotation(rng),
                };
                queue.submit(loader, &spec.model, request);
            }
        }

        let trees = &self.world.trees;
        for i in 0..trees.count {
            let mut position = find_free_position(rng, &reserved, &self.world.placement)?;
            reserved.push(position);
            position.y = trees.ground_offset;
            let request = SpawnRequest::Tree {
                name: format!("tree-{i}"),
                position,
                yaw: random_rotation(rng),
            };
            queue.submit(loader, &trees.model, request);
        }

        Ok(())
    }

    /// Turn a completed load into registered entities.
    ///
    /// Returns the ids added. `Player` loads are not registered and return nothing.
    pub fn spawn(
        &self,
        event: ReadyEvent<SpawnRequest>,
        registry: &mut EntityRegistry,
    ) -> Vec<EntityId> {
        let ReadyEvent { request, mut model, .. } = event;
        let layout = &self.world.layout;

        let entities = match request {
            SpawnRequest::Player => Vec::new(),
            SpawnRequest::Animal {
                name,
                spec,
                position,
                yaw,
            } => match self.world.animals.get(spec) {
                Some(spec) => {
                    model.place(position, yaw, spec.scale);
                    let mut harvestable = Harvestable::new(spec.health, ResourceYield::meat(spec.meat));
                    if model.has_clip(&spec.idle_clip) {
                        harvestable = harvestable.with_idle(spec.idle_clip.clone());
                    } else {
                        log::warn!("{name}: model has no clip `{}`", spec.idle_clip);
                    }
                    vec![Entity::from_model(name, &model, EntityKind::Harvestable(harvestable))]
                }
                None => {
                    log::warn!("{name}: unknown animal spec {spec}");
                    Vec::new()
                }
            },
            SpawnRequest::Tree { name, position, yaw } => {
                let trees = &self.world.trees;
                model.place(position, yaw, trees.scale);
                let harvestable = Harvestable::new(trees.health, ResourceYield::lumber(trees.lumber));
                vec![Entity::from_model(name, &model, EntityKind::Harvestable(harvestable))]
            }
            SpawnRequest::Boat { offer } => {
                model.place(self.boat_position(), -FRAC_PI_2, Vec3::ONE);
                let merchant = Merchant {
                    offer,
                    interaction_radius: self.economy.interaction_radius,
                };
                vec![Entity::from_model(BOAT_NAME, &model, EntityKind::Merchant(merchant))]
            }
            SpawnRequest::Docks => dock_row(&model, layout),
            SpawnRequest::Buildings(row) => {
                let mut buildings = building_row(&model, layout, row);
                if self.swapped {
                    buildings.retain(|building| !building.is_removable());
                }
                buildings
            }
            SpawnRequest::Station => {
                model.place(layout.station_position, 0.0, Vec3::ONE);
                vec![decorative("train-station", &model, false)]
            }
            SpawnRequest::Rails => rail_row(&model, layout),
            SpawnRequest::Train => {
                model.place(layout.train_position, -FRAC_PI_2, layout.train_scale);
                vec![decorative("train", &model, false)]
            }
        };

        entities
            .into_iter()
            .filter_map(|entity| match registry.add(entity) {
                Ok(id) => Some(id),
                Err(err) => {
                    log::warn!("spawn skipped: {err}");
                    None
                }
            })
            .collect()
    }

    /// Remove the removable buildings and start loading their replacements.
    ///
    /// Runs once; later calls do nothing. Building rows that finish loading
    /// after the swap spawn without their removable tiles.
    pub fn begin_win_swap(
        &mut self,
        registry: &mut EntityRegistry,
        loader: &mut dyn ModelLoader,
        queue: &mut AssetQueue<SpawnRequest>,
    ) -> Vec<Entity> {
        if self.swapped {
            return Vec::new();
        }
        self.swapped = true;

        let removed = registry.remove_where(Entity::is_removable);
        log::info!("removed {} buildings for the train station", removed.len());

        let layout = &self.world.layout;
        queue.submit(loader, &layout.station_model, SpawnRequest::Station);
        queue.submit(loader, &layout.rail_model, SpawnRequest::Rails);
        queue.submit(loader, &layout.train_model, SpawnRequest::Train);
        removed
    }
}

fn decorative(name: impl Into<String>, model: &ModelHandle, removable: bool) -> Entity {
    Entity::from_model(name, model, EntityKind::Decorative(Decorative { removable }))
}

/// Number of tiles of `step` that fit in `span`, or `None` for a degenerate model.
fn tile_count(span: f32, step: f32) -> Option<usize> {
    if step <= f32::EPSILON || !step.is_finite() {
        return None;
    }
    Some(((span / step).floor().max(0.0) as usize).min(MAX_ROW_TILES))
}

fn dock_row(template: &ModelHandle, layout: &LayoutConfig) -> Vec<Entity> {
    // Docks are rotated a quarter turn, so their depth runs along X
    let depth = template.scaled_size().z;
    let Some(count) = tile_count(layout.game_bounds.width(), depth) else {
        log::warn!("dock model has no depth; skipping docks");
        return Vec::new();
    };

    let z = layout.game_bounds.max_z - layout.dock_inset;
    (0..count)
        .map(|i| {
            let mut dock = template.clone();
            let x = layout.game_bounds.min_x + i as f32 * depth;
            dock.place(Vec3::new(x, layout.dock_ground_offset, z), -FRAC_PI_2, Vec3::ONE);
            decorative(format!("dock-{i}"), &dock, false)
        })
        .collect()
}

fn building_row(template: &ModelHandle, layout: &LayoutConfig, row: BuildingRow) -> Vec<Entity> {
    let width = template.scaled_size().x;
    let Some(count) = tile_count(layout.map_bounds.width(), width) else {
        log::warn!("building model has no width; skipping {:?} row", row);
        return Vec::new();
    };

    let z = match row {
        BuildingRow::Front => layout.city_bounds.max_z,
        BuildingRow::Back => layout.city_bounds.max_z - layout.back_row_offset,
    };
    let (first_removable, last_removable) = layout.removable_front;

    (0..count)
        .map(|i| {
            let mut building = template.clone();
            let x = layout.map_bounds.min_x + i as f32 * (width + layout.road_width);
            building.place(Vec3::new(x, layout.building_ground_offset, z), 0.0, Vec3::ONE);
            let removable = row == BuildingRow::Front
                && (first_removable..=last_removable).contains(&(i as u32));
            decorative(format!("{}-{i}", row.prefix()), &building, removable)
        })
        .collect()
}

fn rail_row(template: &ModelHandle, layout: &LayoutConfig) -> Vec<Entity> {
    // Spacing uses the unscaled rail, matching how the track was laid out
    let depth = template.local_bounds.size().z;
    if depth <= f32::EPSILON {
        log::warn!("rail model has no depth; skipping rails");
        return Vec::new();
    }

    let z = layout.city_bounds.max_z - depth - layout.rail_setback;
    (0..layout.rail_count.min(MAX_ROW_TILES as u32))
        .map(|i| {
            let mut rail = template.clone();
            let x = layout.rail_start_x + i as f32 * (depth + layout.rail_gap);
            rail.place(Vec3::new(x, 0.0, z), -FRAC_PI_2, layout.rail_scale);
            decorative(format!("rail-{i}"), &rail, false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::assets::ScriptedLoader;
    use crate::game::entities::EntityClass;
    use crate::physics::{Aabb, planar_distance};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn model(path: &str, size: Vec3) -> ModelHandle {
        ModelHandle::new(path, Aabb::new(Vec3::ZERO, size))
    }

    fn loader_for(world: &WorldConfig) -> ScriptedLoader {
        let layout = &world.layout;
        let mut loader = ScriptedLoader::new()
            .with_model(model("player.glb", Vec3::ONE))
            .with_model(model(&layout.dock_model, Vec3::new(4.0, 1.0, 20.0)))
            .with_model(model(&layout.building_model, Vec3::new(30.0, 40.0, 20.0)))
            .with_model(model(&layout.boat_model, Vec3::new(10.0, 4.0, 4.0)))
            .with_model(model(&layout.station_model, Vec3::new(60.0, 30.0, 30.0)))
            .with_model(model(&layout.rail_model, Vec3::new(1.0, 0.5, 5.0)))
            .with_model(model(&layout.train_model, Vec3::new(10.0, 8.0, 60.0)))
            .with_model(model(&world.trees.model, Vec3::new(2.0, 10.0, 2.0)));
        for animal in &world.animals {
            loader.register(model(&animal.model, Vec3::new(2.0, 2.0, 3.0)).with_clips([animal.idle_clip.clone()]));
        }
        loader
    }

    fn populated() -> (WorldSetup, EntityRegistry, ScriptedLoader, AssetQueue<SpawnRequest>) {
        let world = WorldConfig::default();
        let setup = WorldSetup::new(world.clone(), EconomyConfig::default());
        let mut loader = loader_for(&world);
        let mut queue = AssetQueue::new();
        let mut rng = StdRng::seed_from_u64(11);
        setup.populate(&mut rng, &mut loader, &mut queue, "player.glb").unwrap();

        assert!(queue.poll().is_empty());
        let mut registry = EntityRegistry::new();
        for event in queue.drain_ready() {
            setup.spawn(event, &mut registry);
        }
        (setup, registry, loader, queue)
    }

    #[test]
    fn test_populate_spawns_everything() {
        let (_, registry, _, _) = populated();
        let world = WorldConfig::default();

        assert_eq!(registry.count(EntityClass::Harvestable), world.harvestable_count() as usize);
        assert_eq!(registry.count(EntityClass::Merchant), 1);
        // 200 / 20 docks, 2 rows of floor(370 / 30) buildings
        assert_eq!(registry.iter().filter(|(_, e)| e.name.starts_with("dock-")).count(), 10);
        assert_eq!(registry.iter().filter(|(_, e)| e.name.starts_with("front-building-")).count(), 12);
        assert_eq!(registry.iter().filter(|(_, e)| e.name.starts_with("back-building-")).count(), 12);
    }

    #[test]
    fn test_harvestables_are_separated() {
        let (_, registry, _, _) = populated();
        let positions: Vec<Vec3> = registry
            .iter()
            .filter(|(_, e)| e.class() == EntityClass::Harvestable)
            .map(|(_, e)| e.position)
            .collect();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!(planar_distance(*a, *b) >= 10.0);
            }
        }
    }

    #[test]
    fn test_building_rows_layout() {
        let (_, registry, _, _) = populated();
        let front3 = registry.by_name("front-building-3").unwrap();
        assert_eq!(front3.position, Vec3::new(-200.0 + 3.0 * 40.0, -1.0, -50.0));
        assert!(front3.is_removable());
        assert!(!registry.by_name("front-building-2").unwrap().is_removable());
        assert!(!registry.by_name("back-building-4").unwrap().is_removable());
        assert_eq!(registry.by_name("back-building-0").unwrap().position.z, -115.0);
    }

    #[test]
    fn test_boat_is_merchant_on_river() {
        let (_, registry, _, _) = populated();
        let (boat, merchant) = registry.merchant().unwrap();
        assert_eq!(boat.name, BOAT_NAME);
        assert_eq!(boat.position, Vec3::new(0.0, 0.0, 57.0));
        assert!((5..11).contains(&merchant.offer.meat_wanted));
        assert_eq!(merchant.interaction_radius, 15.0);
    }

    #[test]
    fn test_win_swap_replaces_buildings() {
        let (mut setup, mut registry, mut loader, mut queue) = populated();

        let removed = setup.begin_win_swap(&mut registry, &mut loader, &mut queue);
        assert_eq!(removed.len(), 3);
        assert!(registry.by_name("front-building-4").is_none());

        queue.poll();
        for event in queue.drain_ready() {
            setup.spawn(event, &mut registry);
        }
        assert!(registry.by_name("train-station").is_some());
        assert_eq!(registry.by_name("train").unwrap().position, Vec3::new(0.0, 0.2, -58.0));

        let rail0 = registry.by_name("rail-0").unwrap();
        let rail1 = registry.by_name("rail-1").unwrap();
        assert_eq!(rail0.position, Vec3::new(-30.0, 0.0, -50.0 - 5.0 - 4.5));
        assert_eq!(rail1.position.x, -30.0 + 5.0 + 3.0);
        assert!(registry.by_name("rail-7").is_some());
        assert!(registry.by_name("rail-8").is_none());

        // Second call is a no-op
        assert!(setup.begin_win_swap(&mut registry, &mut loader, &mut queue).is_empty());
        assert!(queue.is_idle());
    }

    #[test]
    fn test_buildings_loading_after_swap_skip_removable() {
        let world = WorldConfig::default();
        let mut setup = WorldSetup::new(world.clone(), EconomyConfig::default());
        let mut loader = loader_for(&world);
        let mut queue = AssetQueue::new();
        let mut registry = EntityRegistry::new();

        assert!(setup.begin_win_swap(&mut registry, &mut loader, &mut queue).is_empty());
        assert!(setup.is_swapped());

        let event = ReadyEvent {
            path: world.layout.building_model.clone(),
            request: SpawnRequest::Buildings(BuildingRow::Front),
            model: model(&world.layout.building_model, Vec3::new(30.0, 40.0, 20.0)),
        };
        let ids = setup.spawn(event, &mut registry);
        assert_eq!(ids.len(), 12 - 3);
        assert!(registry.by_name("front-building-2").is_some());
        assert!(registry.by_name("front-building-4").is_none());
        assert!(registry.iter().all(|(_, e)| !e.is_removable()));
    }

    #[test]
    fn test_missing_clip_spawns_without_idle() {
        let world = WorldConfig::default();
        let setup = WorldSetup::new(world.clone(), EconomyConfig::default());
        let mut registry = EntityRegistry::new();
        let event = ReadyEvent {
            path: world.animals[0].model.clone(),
            request: SpawnRequest::Animal {
                name: "deer-9".to_string(),
                spec: 0,
                position: Vec3::ZERO,
                yaw: 0.0,
            },
            model: model(&world.animals[0].model, Vec3::ONE),
        };
        let ids = setup.spawn(event, &mut registry);
        assert_eq!(ids.len(), 1);
        let deer = registry.get(ids[0]).and_then(Entity::as_harvestable).unwrap();
        assert!(deer.idle.is_none());
    }

    #[test]
    fn test_saturated_area_is_hard_error() {
        let mut world = WorldConfig::default();
        world.trees.count = 500;
        let setup = WorldSetup::new(world.clone(), EconomyConfig::default());
        let mut loader = loader_for(&world);
        let mut queue = AssetQueue::new();
        let mut rng = StdRng::seed_from_u64(3);

        let err = setup
            .populate(&mut rng, &mut loader, &mut queue, "player.glb")
            .unwrap_err();
        assert!(matches!(err, crate::error::SimError::PlacementExhausted { .. }));
    }
}
