//! World Tests - Placement, Registry Index, and the Win Swap
//!
//! Spawn separation under the rejection sampler, index rebuild behaviour of
//! the entity registry, and the full win transition driven through the
//! simulation loop.

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use riverside_engine::SimError;
use riverside_engine::game::{
    Decorative, Entity, EntityClass, EntityKind, EntityRegistry, Harvestable, Inventory,
    ManualLoader, ModelHandle, ResourceYield, ScriptedLoader, SimConfig, Simulation,
};
use riverside_engine::physics::{Aabb, planar_distance};
use riverside_engine::world::{PlacementConfig, PlanarBounds, place_many};

fn unit_box(center: Vec3) -> Aabb {
    Aabb::from_center_half_extents(center, Vec3::splat(0.5))
}

fn tree(name: &str, center: Vec3) -> Entity {
    Entity::with_bounds(
        name,
        unit_box(center),
        EntityKind::Harvestable(Harvestable::new(3, ResourceYield::lumber(2))),
    )
}

fn cube(path: &str, size: Vec3) -> ModelHandle {
    ModelHandle::new(path, Aabb::new(Vec3::ZERO, size))
}

fn full_loader(config: &SimConfig) -> ScriptedLoader {
    let layout = &config.world.layout;
    let mut loader = ScriptedLoader::new()
        .with_model(cube(&config.player.model, Vec3::ONE))
        .with_model(cube(&layout.dock_model, Vec3::new(4.0, 1.0, 20.0)))
        .with_model(cube(&layout.building_model, Vec3::new(30.0, 40.0, 20.0)))
        .with_model(cube(&layout.boat_model, Vec3::new(10.0, 4.0, 4.0)))
        .with_model(cube(&layout.station_model, Vec3::new(60.0, 30.0, 30.0)))
        .with_model(cube(&layout.rail_model, Vec3::new(1.0, 0.5, 5.0)))
        .with_model(cube(&layout.train_model, Vec3::new(10.0, 8.0, 60.0)))
        .with_model(cube(&config.world.trees.model, Vec3::new(1.0, 4.0, 1.0)));
    for animal in &config.world.animals {
        loader.register(cube(&animal.model, Vec3::new(2.0, 2.0, 3.0)));
    }
    loader
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_placement_separation_across_seeds() {
    let config = PlacementConfig::default();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let placed = place_many(&mut rng, &[], 15, &config).unwrap();
        for (i, a) in placed.iter().enumerate() {
            assert!(config.bounds.contains(*a));
            for b in &placed[i + 1..] {
                assert!(
                    planar_distance(*a, *b) >= config.min_distance,
                    "seed {seed}: {a} and {b} too close"
                );
            }
        }
    }
}

#[test]
fn test_placement_exhaustion_is_error() {
    let config = PlacementConfig {
        bounds: PlanarBounds::new(0.0, 5.0, 0.0, 5.0),
        min_distance: 10.0,
        max_attempts: 50,
    };
    let mut rng = StdRng::seed_from_u64(4);
    let err = place_many(&mut rng, &[], 2, &config).unwrap_err();
    assert!(matches!(err, SimError::PlacementExhausted { attempts: 50, .. }));
}

#[test]
fn test_same_seed_same_world() {
    let config = SimConfig::default().with_seed(42);
    let mut a = Simulation::new(config.clone(), full_loader(&config)).unwrap();
    let mut b = Simulation::new(config.clone(), full_loader(&config)).unwrap();
    a.tick(0.016);
    b.tick(0.016);

    for i in 0..config.world.trees.count {
        let name = format!("tree-{i}");
        assert_eq!(
            a.registry().by_name(&name).map(|e| e.position),
            b.registry().by_name(&name).map(|e| e.position)
        );
    }
    assert_eq!(a.hud().trade, b.hud().trade);
}

// ============================================================================
// Registry index
// ============================================================================

#[test]
fn test_rebuild_is_idempotent() {
    let mut registry = EntityRegistry::new();
    registry.add(tree("tree-0", Vec3::ZERO)).unwrap();
    registry.add(tree("tree-1", Vec3::X * 5.0)).unwrap();
    registry
        .add(Entity::with_bounds(
            "dock-0",
            unit_box(Vec3::Z * 5.0),
            EntityKind::Decorative(Decorative { removable: false }),
        ))
        .unwrap();

    let before = registry.index().to_vec();
    registry.rebuild_index();
    registry.rebuild_index();
    assert_eq!(registry.index(), before.as_slice());
    assert_eq!(registry.index().len(), 3);
}

#[test]
fn test_index_tracks_membership() {
    let mut registry = EntityRegistry::new();
    let a = registry.add(tree("tree-0", Vec3::ZERO)).unwrap();
    let b = registry.add(tree("tree-1", Vec3::X * 5.0)).unwrap();

    registry.remove(a);
    assert!(registry.index().iter().all(|entry| entry.id != a));
    assert_eq!(registry.harvestable_boxes().count(), 1);
    assert!(registry.get(a).is_none());

    // Reused slot gets a new generation; the stale id stays dead
    let c = registry.add(tree("tree-2", Vec3::Z * 5.0)).unwrap();
    assert_ne!(a, c);
    assert!(registry.get(a).is_none());
    assert!(registry.contains(b));
    assert!(registry.contains(c));
}

#[test]
fn test_duplicate_name_rejected() {
    let mut registry = EntityRegistry::new();
    registry.add(tree("tree-0", Vec3::ZERO)).unwrap();
    let err = registry.add(tree("tree-0", Vec3::X)).unwrap_err();
    assert!(matches!(err, SimError::DuplicateName(name) if name == "tree-0"));
    assert_eq!(registry.len(), 1);
}

// ============================================================================
// Win transition
// ============================================================================

#[test]
fn test_win_fires_once_and_swaps_buildings() {
    let config = SimConfig::default().with_seed(8);
    let mut sim = Simulation::new(config.clone(), full_loader(&config)).unwrap();
    sim.tick(0.016);
    assert!(sim.registry().by_name("front-building-4").is_some());

    let win = config.economy.win;
    let inventory = sim.inventory_mut();
    inventory.meat = win.meat;
    inventory.lumber = win.lumber;
    inventory.metal = win.metal;

    let report = sim.tick(0.016);
    assert!(report.won);
    assert!(sim.has_won());
    for i in 3..=5 {
        assert!(sim.registry().by_name(&format!("front-building-{i}")).is_none());
    }
    assert!(sim.registry().by_name("front-building-2").is_some());

    // Replacements are polled at the end of the win tick and spawn on the next
    let report = sim.tick(0.016);
    assert!(!report.won);
    assert_eq!(report.spawned, 1 + 1 + config.world.layout.rail_count as usize);
    assert!(sim.registry().by_name("train-station").is_some());
    assert!(sim.registry().by_name("train").is_some());

    for _ in 0..10 {
        assert!(!sim.tick(0.016).won);
    }
    assert!(sim.hud().won);
    assert_eq!(sim.registry().count(EntityClass::Merchant), 1);
}

#[test]
fn test_late_building_row_respects_win_swap() {
    let config = SimConfig::default().with_seed(8);
    let layout = config.world.layout.clone();
    let mut sim = Simulation::new(config.clone(), ManualLoader::new()).unwrap();
    sim.tick(0.016);

    let win = config.economy.win;
    *sim.inventory_mut() = Inventory::new(win.meat, win.lumber, win.metal);
    assert!(sim.tick(0.016).won);

    // Both building rows and the station finish loading after the swap began
    let building = cube(&layout.building_model, Vec3::new(30.0, 40.0, 20.0));
    assert_eq!(sim.loader_mut().resolve_path(&layout.building_model, &building), 2);
    let station = cube(&layout.station_model, Vec3::new(60.0, 30.0, 30.0));
    assert_eq!(sim.loader_mut().resolve_path(&layout.station_model, &station), 1);
    for _ in 0..3 {
        assert!(!sim.tick(0.016).won);
    }

    assert!(sim.registry().by_name("train-station").is_some());
    assert!(sim.registry().by_name("front-building-2").is_some());
    assert!(sim.registry().by_name("back-building-4").is_some());
    for i in 3..=5 {
        assert!(sim.registry().by_name(&format!("front-building-{i}")).is_none());
    }
    assert!(sim.registry().iter().all(|(_, entity)| !entity.is_removable()));
}
