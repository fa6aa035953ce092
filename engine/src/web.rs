//! Browser bindings
//!
//! Exposes the simulation to a JavaScript host. The host owns the canvas,
//! the GLTF decoder and the DOM overlay; it forwards input, answers model
//! requests and reads back HUD JSON and instance buffers each frame.
//!
//! ```js
//! const sim = new WebSimulation(null, canvas.width, canvas.height);
//! for (const [id, path] of JSON.parse(sim.pending_loads_json())) {
//!     loadGltf(path).then((m) => sim.resolve_model(id, JSON.stringify(m)));
//! }
//! requestAnimationFrame(function frame(t) {
//!     sim.tick(dt);
//!     hud.render(JSON.parse(sim.hud_json()));
//!     renderer.draw(sim.camera_bytes(), sim.instance_bytes(), JSON.parse(sim.models_json()));
//!     requestAnimationFrame(frame);
//! });
//! ```

use glam::Vec3;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::game::{LoadError, ManualLoader, ModelHandle, SimConfig, Simulation};
use crate::input::{InputAction, InputEvent, MouseButton, Viewport};
use crate::physics::Aabb;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

/// Decoded model summary sent by the host
#[derive(Debug, Deserialize)]
struct ModelDescriptor {
    min: [f32; 3],
    max: [f32; 3],
    #[serde(default)]
    clips: Vec<String>,
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebSimulation {
    sim: Simulation<ManualLoader>,
}

#[wasm_bindgen]
impl WebSimulation {
    /// `config_json` may be omitted for the default map.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, width: f32, height: f32) -> Result<WebSimulation, JsValue> {
        let config = match config_json {
            Some(json) => SimConfig::from_json_str(&json).map_err(to_js)?,
            None => SimConfig::default(),
        };
        let sim = Simulation::with_viewport(config, ManualLoader::new(), Viewport::new(width, height))
            .map_err(to_js)?;
        Ok(Self { sim })
    }

    pub fn tick(&mut self, dt: f32) {
        self.sim.tick(dt);
    }

    /// `KeyboardEvent.key`; unbound keys are ignored.
    pub fn key_down(&mut self, key: &str) {
        if let Some(action) = InputAction::from_key_name(key) {
            self.sim.handle_input(InputEvent::KeyDown(action));
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(action) = InputAction::from_key_name(key) {
            self.sim.handle_input(InputEvent::KeyUp(action));
        }
    }

    /// Absolute page coordinates.
    pub fn mouse_move(&mut self, x: f32, y: f32) {
        self.sim.handle_input(InputEvent::MouseMove { x, y });
    }

    /// `movementX`/`movementY` under pointer lock.
    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        self.sim.handle_input(InputEvent::MouseMotion { dx, dy });
    }

    /// `MouseEvent.button` with `clientX` / `clientY`
    pub fn mouse_down(&mut self, button: i16, x: f32, y: f32) {
        let button = MouseButton::from_dom_index(button);
        self.sim.handle_input(InputEvent::MouseDownAt { button, x, y });
    }

    pub fn mouse_up(&mut self, button: i16, x: f32, y: f32) {
        let button = MouseButton::from_dom_index(button);
        self.sim.handle_input(InputEvent::MouseUpAt { button, x, y });
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.handle_input(InputEvent::Resize { width, height });
    }

    /// Trade button. Returns whether the trade went through.
    pub fn try_trade(&mut self) -> bool {
        self.sim.try_trade().is_completed()
    }

    pub fn focus_on(&mut self, name: &str) -> bool {
        self.sim.focus_on(name)
    }

    pub fn hud_json(&self) -> Result<String, JsValue> {
        self.sim.hud().to_json().map_err(to_js)
    }

    /// `[[id, path], ...]` of loads waiting on the host.
    pub fn pending_loads_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.sim.loader().pending()).map_err(to_js)
    }

    /// Complete a load with `{ "min": [x,y,z], "max": [x,y,z], "clips": [...] }`.
    pub fn resolve_model(&mut self, id: u32, descriptor_json: &str) -> Result<bool, JsValue> {
        let descriptor: ModelDescriptor = serde_json::from_str(descriptor_json).map_err(to_js)?;
        let Some((_, path)) = self
            .sim
            .loader()
            .pending()
            .into_iter()
            .find(|(pending, _)| *pending == id)
        else {
            return Ok(false);
        };

        let bounds = Aabb::new(Vec3::from_array(descriptor.min), Vec3::from_array(descriptor.max));
        let model = ModelHandle::new(path, bounds).with_clips(descriptor.clips);
        Ok(self.sim.loader_mut().resolve(id, Ok(model)))
    }

    /// Fail a load; the entity it was for is never created.
    pub fn fail_model(&mut self, id: u32, message: String) -> bool {
        self.sim.loader_mut().resolve(id, Err(LoadError::Decode(message)))
    }

    pub fn camera_bytes(&self) -> Vec<u8> {
        self.sim.render_frame().camera_bytes().to_vec()
    }

    pub fn instance_bytes(&self) -> Vec<u8> {
        self.sim.render_frame().instance_bytes().to_vec()
    }

    /// Model path per instance, same order as `instance_bytes`.
    pub fn models_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.sim.render_frame().models).map_err(to_js)
    }

    pub fn has_won(&self) -> bool {
        self.sim.has_won()
    }
}
