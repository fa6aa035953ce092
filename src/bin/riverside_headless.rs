//! Riverside - headless run
//!
//! Drives the simulation without a window: stand-in box models replace the
//! GLTF files, and a scripted player harvests everything, trades at the boat
//! and prints the final HUD.
//!
//! Usage: `riverside_headless [config.json]`
//! Set `RUST_LOG=debug` for per-hit logging.

use glam::Vec3;
use winit::keyboard::KeyCode;

use riverside_engine::game::{
    BOAT_NAME, EntityClass, ModelHandle, ScriptedLoader, SimConfig, Simulation,
};
use riverside_engine::input::{InputEvent, KeyBindings, MouseButton};
use riverside_engine::physics::Aabb;
use riverside_engine::player::AnimationState;

const DT: f32 = 0.1;
const MAX_SWING_TICKS: usize = 200;

fn stand_in(path: &str, size: Vec3) -> ModelHandle {
    ModelHandle::new(path, Aabb::from_center_half_extents(Vec3::Y * size.y / 2.0, size / 2.0))
}

fn stand_in_loader(config: &SimConfig) -> ScriptedLoader {
    let layout = &config.world.layout;
    let mut loader = ScriptedLoader::new()
        .with_model(
            stand_in(&config.player.model, Vec3::splat(1.0))
                .with_clips(AnimationState::ALL.map(|state| state.clip_name())),
        )
        .with_model(stand_in(&layout.dock_model, Vec3::new(4.0, 1.0, 20.0)))
        .with_model(stand_in(&layout.building_model, Vec3::new(30.0, 40.0, 20.0)))
        .with_model(stand_in(&layout.boat_model, Vec3::new(12.0, 5.0, 5.0)))
        .with_model(stand_in(&layout.station_model, Vec3::new(60.0, 30.0, 30.0)))
        .with_model(stand_in(&layout.rail_model, Vec3::new(1.0, 0.5, 5.0)))
        .with_model(stand_in(&layout.train_model, Vec3::new(10.0, 8.0, 60.0)))
        .with_model(stand_in(&config.world.trees.model, Vec3::new(1.0, 4.0, 1.0)));
    for animal in &config.world.animals {
        loader.register(
            stand_in(&animal.model, Vec3::new(2.0, 2.0, 3.0)).with_clips([animal.idle_clip.clone()]),
        );
    }
    loader
}

/// Stand over a harvestable and swing until it is gone.
fn harvest(sim: &mut Simulation<ScriptedLoader>, name: &str) -> bool {
    let Some(center) = sim.registry().by_name(name).map(|e| e.bounds().center()) else {
        // Taken down by an earlier swing
        return true;
    };
    // The turned arms model spans two units toward -X and -Z of the body
    sim.controller_mut().set_position(center + Vec3::new(1.0, 0.0, 1.0));

    sim.handle_input(InputEvent::MouseDown(MouseButton::Left));
    let mut destroyed = false;
    for _ in 0..MAX_SWING_TICKS {
        sim.tick(DT);
        if sim.registry().by_name(name).is_none() {
            destroyed = true;
            break;
        }
    }
    sim.handle_input(InputEvent::MouseUp(MouseButton::Left));
    sim.tick(DT);
    destroyed
}

/// Walk to the boat and press the interact key until the merchant refuses.
fn trade_until_refused(sim: &mut Simulation<ScriptedLoader>, bindings: &KeyBindings) -> u32 {
    let Some(boat) = sim.registry().by_name(BOAT_NAME).map(|e| e.position) else {
        log::warn!("no boat to trade with");
        return 0;
    };
    let Some(interact) = bindings.get_action(KeyCode::KeyE) else {
        return 0;
    };
    sim.controller_mut().set_position(Vec3::new(boat.x, 0.0, boat.z - 5.0));

    let mut trades = 0;
    loop {
        sim.handle_input(InputEvent::KeyDown(interact));
        let report = sim.tick(DT);
        sim.handle_input(InputEvent::KeyUp(interact));
        sim.tick(DT);

        match report.trade {
            Some(outcome) if outcome.is_completed() => trades += 1,
            Some(outcome) => {
                log::info!("merchant refused: {outcome:?}");
                break;
            }
            None => break,
        }
        if sim.has_won() {
            break;
        }
    }
    trades
}

fn main() -> riverside_engine::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let loader = stand_in_loader(&config);
    let mut sim = Simulation::new(config, loader)?;
    sim.tick(DT);

    log::info!(
        "spawned {} entities ({} harvestable)",
        sim.registry().len(),
        sim.registry().count(EntityClass::Harvestable)
    );

    let bindings = KeyBindings::new();
    let targets: Vec<String> = sim
        .registry()
        .iter()
        .filter(|(_, entity)| entity.class() == EntityClass::Harvestable)
        .map(|(_, entity)| entity.name.clone())
        .collect();

    let mut harvested = 0;
    for name in &targets {
        if harvest(&mut sim, name) {
            harvested += 1;
        } else {
            log::warn!("{name} survived {MAX_SWING_TICKS} ticks");
        }
    }
    log::info!("harvested {harvested}/{}", targets.len());

    let trades = trade_until_refused(&mut sim, &bindings);
    log::info!("completed {trades} trade(s)");

    // Let the station models arrive after a win
    sim.tick(DT);
    sim.tick(DT);
    if sim.has_won() {
        let station = sim.registry().by_name("train-station").is_some();
        log::info!("won after {:.1}s; station built: {station}", sim.elapsed());
    }

    println!("{}", sim.hud().to_json()?);
    Ok(())
}
