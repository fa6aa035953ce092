//! Simulation Loop
//!
//! Owns every piece of mutable game state and advances it one host frame at a
//! time. Tick order:
//!
//! 1. Spawn entities for model loads that completed last tick
//! 2. Advance the melee cooldown
//! 3. Movement controller: look, animation, translation, look-at raycast
//! 4. Melee resolution (Hit animation only)
//! 5. Trade on a fresh Interact press
//! 6. Win check; on the first win, swap the removable buildings
//! 7. Advance idle animations
//! 8. Roll input snapshots
//! 9. Poll in-flight model loads
//!
//! # Example
//!
//! ```rust,ignore
//! use riverside_engine::game::{SimConfig, Simulation, ScriptedLoader};
//!
//! let mut sim = Simulation::new(SimConfig::default().with_seed(1), loader)?;
//! loop {
//!     for event in host_events() {
//!         sim.handle_input(event);
//!     }
//!     let report = sim.tick(dt);
//!     renderer.draw(&sim.render_frame());
//!     hud.show(&sim.hud());
//! }
//! ```

use std::f32::consts::PI;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::camera::LookAtTarget;
use crate::error::Result;
use crate::game::assets::{AssetQueue, ModelHandle, ModelLoader};
use crate::game::combat::{CombatOutcome, CombatResolver};
use crate::game::config::SimConfig;
use crate::game::economy::{Inventory, TradeOutcome, WinTracker, attempt_trade, within_reach};
use crate::game::entities::EntityKind;
use crate::game::hud::HudSnapshot;
use crate::game::registry::{EntityId, EntityRegistry};
use crate::game::render::{
    INSTANCE_DECORATIVE, INSTANCE_HARVESTABLE, INSTANCE_MERCHANT, INSTANCE_PLAYER, InstanceRaw,
    RenderFrame,
};
use crate::game::world_setup::{SpawnRequest, WorldSetup};
use crate::input::{InputAction, InputEvent, InputState, Viewport};
use crate::physics::Aabb;
use crate::player::{AnimationState, MovementController};

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Entities registered from completed loads
    pub spawned: usize,
    pub look_at: LookAtTarget<EntityId>,
    pub animation: AnimationState,
    pub combat: CombatOutcome,
    /// Set when Interact was pressed this tick
    pub trade: Option<TradeOutcome>,
    /// True only on the tick the win condition first held
    pub won: bool,
    /// Model loads that failed while polling
    pub load_failures: usize,
}

/// All mutable game state
pub struct Simulation<L: ModelLoader> {
    config: SimConfig,
    rng: StdRng,
    loader: L,
    assets: AssetQueue<SpawnRequest>,
    setup: WorldSetup,
    registry: EntityRegistry,
    input: InputState,
    controller: MovementController,
    combat: CombatResolver,
    inventory: Inventory,
    win: WinTracker,
    player_model: Option<ModelHandle>,
    elapsed: f32,
    frames: u64,
}

impl<L: ModelLoader> Simulation<L> {
    /// Build the simulation and submit every initial model load.
    ///
    /// Fails only if spawn placement is exhausted.
    pub fn new(config: SimConfig, loader: L) -> Result<Self> {
        Self::with_viewport(config, loader, Viewport::default())
    }

    pub fn with_viewport(config: SimConfig, loader: L, viewport: Viewport) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let setup = WorldSetup::new(config.world.clone(), config.economy);

        let mut sim = Self {
            rng,
            loader,
            assets: AssetQueue::new(),
            setup,
            registry: EntityRegistry::new(),
            input: InputState::new(viewport),
            controller: MovementController::with_settings(config.player.movement),
            combat: CombatResolver::new(config.player.hit_cooldown),
            inventory: config.player.starting_inventory,
            win: WinTracker::new(config.economy.win),
            player_model: None,
            elapsed: 0.0,
            frames: 0,
            config,
        };

        sim.setup.populate(
            &mut sim.rng,
            &mut sim.loader,
            &mut sim.assets,
            &sim.config.player.model,
        )?;
        // Loaders that resolve immediately are ready for the first tick
        sim.assets.poll();
        log::info!("world populated; {} model loads in flight", sim.assets.in_flight() + sim.assets.ready_len());
        Ok(sim)
    }

    /// Feed one decoded host event.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.input.handle_event(event);
    }

    /// Advance one frame.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let spawned = self.spawn_ready();

        self.combat.tick(dt);

        let look_at = self.controller.update(dt, &self.input, self.registry.occluders());
        let animation = self.controller.current_animation();

        let combat = if animation == AnimationState::Hit {
            let melee = self.player_bounds();
            self.combat.resolve(animation, &melee, &mut self.registry, &mut self.inventory)
        } else {
            CombatOutcome::default()
        };

        let trade = if self.input.just_pressed(InputAction::Interact) {
            Some(self.try_trade())
        } else {
            None
        };

        let won = self.win.check(&self.inventory);
        if won {
            self.setup
                .begin_win_swap(&mut self.registry, &mut self.loader, &mut self.assets);
        }

        self.registry.update(dt);
        self.input.end_frame();
        let load_failures = self.assets.poll().len();

        self.elapsed += dt;
        self.frames += 1;

        TickReport {
            spawned,
            look_at,
            animation,
            combat,
            trade,
            won,
            load_failures,
        }
    }

    fn spawn_ready(&mut self) -> usize {
        let mut spawned = 0;
        for event in self.assets.drain_ready() {
            if event.request == SpawnRequest::Player {
                let mut model = event.model;
                model.scale = self.config.player.model_scale;
                log::debug!("player model ready with clips {:?}", model.clips);
                self.player_model = Some(model);
                continue;
            }
            spawned += self.setup.spawn(event, &mut self.registry).len();
        }
        spawned
    }

    /// Model yaw that turns the +Z facing arms model along the view.
    fn player_yaw(&self) -> f32 {
        self.controller.yaw() + PI
    }

    /// World bounds of the player body at the current position.
    ///
    /// Uses the loaded player model; before it arrives the configured half
    /// extents stand in, centred on the body.
    pub fn player_bounds(&self) -> Aabb {
        match &self.player_model {
            Some(model) => model.local_bounds.transformed(
                self.controller.position(),
                self.player_yaw(),
                model.scale,
            ),
            None => self.controller.melee_box(self.config.player.melee_half_extents),
        }
    }

    /// Attempt the merchant trade from the player's current position.
    pub fn try_trade(&mut self) -> TradeOutcome {
        let merchant = self
            .registry
            .merchant()
            .map(|(entity, merchant)| (entity.position, merchant.offer, merchant.interaction_radius));
        attempt_trade(&mut self.inventory, self.controller.position(), merchant)
    }

    /// Whether the player stands within reach of the merchant.
    pub fn trade_available(&self) -> bool {
        self.registry.merchant().is_some_and(|(entity, merchant)| {
            within_reach(self.controller.position(), entity.position, merchant.interaction_radius)
        })
    }

    /// Move the player in front of a named entity and look at it.
    pub fn focus_on(&mut self, name: &str) -> bool {
        let Some(bounds) = self.registry.by_name(name).map(|entity| entity.bounds()) else {
            return false;
        };
        self.controller
            .focus_on(&bounds, self.config.world.placement.min_distance);
        true
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            inventory: self.inventory,
            win: *self.win.condition(),
            trade: self.registry.merchant().map(|(_, merchant)| merchant.offer.into()),
            trade_available: self.trade_available(),
            won: self.win.has_won(),
            animation: self.controller.current_animation(),
        }
    }

    /// Camera and instance transforms for the renderer.
    pub fn render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.controller.camera_pose());

        if let Some(player) = &self.player_model {
            let instance = InstanceRaw::new(
                self.controller.position(),
                self.player_yaw(),
                player.scale,
                INSTANCE_PLAYER,
                self.controller.mixer().clip(self.controller.current_animation()).time,
            );
            frame.push(player.path.clone(), instance);
        }

        for (_, entity) in self.registry.iter() {
            let (kind, clip_time) = match &entity.kind {
                EntityKind::Harvestable(h) => (
                    INSTANCE_HARVESTABLE,
                    h.idle.as_ref().map_or(0.0, |idle| idle.time),
                ),
                EntityKind::Merchant(_) => (INSTANCE_MERCHANT, 0.0),
                EntityKind::Decorative(_) => (INSTANCE_DECORATIVE, 0.0),
            };
            let instance = InstanceRaw::new(entity.position, entity.yaw, entity.scale, kind, clip_time);
            frame.push(entity.model.clone(), instance);
        }

        frame
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn controller(&self) -> &MovementController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MovementController {
        &mut self.controller
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn combat(&self) -> &CombatResolver {
        &self.combat
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn player_model(&self) -> Option<&ModelHandle> {
        self.player_model.as_ref()
    }

    pub fn has_won(&self) -> bool {
        self.win.has_won()
    }

    /// Model loads not yet spawned (in flight or waiting for the next tick).
    pub fn pending_loads(&self) -> usize {
        self.assets.in_flight() + self.assets.ready_len()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
