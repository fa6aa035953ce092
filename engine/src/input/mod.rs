//! Input Module
//!
//! Aggregates decoded host input (logical keys, mouse buttons, cursor position)
//! into a current snapshot and the previous frame's snapshot. Consumers read
//! stable state for the whole tick; [`InputState::end_frame`] rolls the current
//! snapshot into the previous one.
//!
//! # Example
//!
//! ```rust,ignore
//! use riverside_engine::input::{InputAction, InputEvent, InputState, MouseButton, Viewport};
//!
//! let mut input = InputState::new(Viewport::new(1280.0, 720.0));
//! input.handle_event(InputEvent::KeyDown(InputAction::MoveForward));
//! input.handle_event(InputEvent::MouseMove { x: 700.0, y: 360.0 });
//! input.handle_event(InputEvent::MouseDown(MouseButton::Left));
//!
//! // ...tick reads input.delta(), input.is_mouse_down()...
//! input.end_frame();
//! ```

pub mod bindings;
pub mod keyboard;
pub mod mouse;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::ActionSet;
pub use mouse::{ButtonState, MouseButton, Position};

use serde::{Deserialize, Serialize};

/// Size of the host's drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// One decoded input event from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(InputAction),
    KeyUp(InputAction),
    /// Absolute cursor position in page coordinates.
    MouseMove { x: f32, y: f32 },
    /// Relative motion (pointer-locked hosts).
    MouseMotion { dx: f32, dy: f32 },
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    /// Button press carrying the cursor position in page coordinates.
    MouseDownAt { button: MouseButton, x: f32, y: f32 },
    MouseUpAt { button: MouseButton, x: f32, y: f32 },
    Resize { width: f32, height: f32 },
}

/// Everything held during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Held logical actions
    pub actions: ActionSet,
    /// Mouse button flags
    pub buttons: ButtonState,
    /// Cursor position relative to the viewport centre
    pub mouse: Position,
}

/// Current/previous input snapshots plus the sprint toggle.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: InputSnapshot,
    previous: InputSnapshot,
    /// Set once the first cursor movement has been observed
    mouse_seen: bool,
    /// Flipped on every Sprint press
    sprint_toggle: bool,
    viewport: Viewport,
}

impl InputState {
    /// Create an input state with nothing held and no cursor observed.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Apply one host event to the current snapshot.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(action) => self.set_action(action, true),
            InputEvent::KeyUp(action) => self.set_action(action, false),
            InputEvent::MouseMove { x, y } => self.move_cursor(self.centered(x, y)),
            InputEvent::MouseMotion { dx, dy } => {
                let moved = Position::new(self.current.mouse.x + dx, self.current.mouse.y + dy);
                self.move_cursor(moved);
            }
            InputEvent::MouseDown(button) => self.current.buttons.set(button, true),
            InputEvent::MouseUp(button) => self.current.buttons.set(button, false),
            InputEvent::MouseDownAt { button, x, y } => {
                self.move_cursor(self.centered(x, y));
                self.current.buttons.set(button, true);
            }
            InputEvent::MouseUpAt { button, x, y } => {
                self.move_cursor(self.centered(x, y));
                self.current.buttons.set(button, false);
            }
            InputEvent::Resize { width, height } => self.viewport = Viewport::new(width, height),
        }
    }

    fn set_action(&mut self, action: InputAction, pressed: bool) {
        // Key repeat delivers KeyDown while held; only the first press toggles
        if action == InputAction::Sprint && pressed && !self.current.actions.contains(action) {
            self.sprint_toggle = !self.sprint_toggle;
        }
        self.current.actions.set(action, pressed);
    }

    /// Page coordinates relative to the viewport centre.
    fn centered(&self, x: f32, y: f32) -> Position {
        Position::new(x - self.viewport.width / 2.0, y - self.viewport.height / 2.0)
    }

    fn move_cursor(&mut self, position: Position) {
        self.current.mouse = position;
        if !self.mouse_seen {
            // Baseline: the first observed position produces a zero delta
            self.previous.mouse = position;
            self.mouse_seen = true;
        }
    }

    /// True once the first mouse movement has been observed.
    pub fn is_ready(&self) -> bool {
        self.mouse_seen
    }

    /// Left or right button held.
    pub fn is_mouse_down(&self) -> bool {
        self.current.buttons.attack_held()
    }

    /// Check whether an action is held this frame.
    pub fn is_held(&self, action: InputAction) -> bool {
        self.current.actions.contains(action)
    }

    /// Held this frame but not in the previous one.
    pub fn just_pressed(&self, action: InputAction) -> bool {
        self.current.actions.contains(action) && !self.previous.actions.contains(action)
    }

    /// Whether the run toggle is on.
    pub fn sprint_toggled(&self) -> bool {
        self.sprint_toggle
    }

    /// Cursor movement since the previous frame: `current.mouse - previous.mouse`.
    pub fn delta(&self) -> Position {
        self.current.mouse - self.previous.mouse
    }

    /// Roll the current snapshot into the previous one. Call once at the end of each tick.
    pub fn end_frame(&mut self) {
        self.previous = self.current;
    }

    /// Snapshot being built this frame.
    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    /// Snapshot of the previous frame.
    pub fn previous(&self) -> &InputSnapshot {
        &self.previous
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Release all keys and buttons (e.g. on focus loss). Cursor and toggle survive.
    pub fn release_all(&mut self) {
        self.current.actions.clear();
        self.current.buttons.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InputState {
        InputState::new(Viewport::new(800.0, 600.0))
    }

    #[test]
    fn test_not_ready_until_mouse_moves() {
        let mut input = input();
        assert!(!input.is_ready());
        assert_eq!(input.delta(), Position::default());

        input.handle_event(InputEvent::MouseMove { x: 500.0, y: 100.0 });
        assert!(input.is_ready());
        // First observed position is the baseline
        assert_eq!(input.delta(), Position::default());
        assert_eq!(input.current().mouse, Position::new(100.0, -200.0));
    }

    #[test]
    fn test_delta_then_roll() {
        let mut input = input();
        input.handle_event(InputEvent::MouseMove { x: 400.0, y: 300.0 });
        input.end_frame();

        input.handle_event(InputEvent::MouseMove { x: 410.0, y: 295.0 });
        input.handle_event(InputEvent::MouseMove { x: 430.0, y: 290.0 });
        assert_eq!(input.delta(), Position::new(30.0, -10.0));

        input.end_frame();
        assert_eq!(input.delta(), Position::default());
        assert_eq!(input.previous(), input.current());
    }

    #[test]
    fn test_relative_motion_accumulates() {
        let mut input = input();
        input.handle_event(InputEvent::MouseMotion { dx: 5.0, dy: 5.0 });
        assert_eq!(input.delta(), Position::default());
        input.handle_event(InputEvent::MouseMotion { dx: 3.0, dy: -1.0 });
        assert_eq!(input.delta(), Position::new(3.0, -1.0));
    }

    #[test]
    fn test_mouse_down_either_button() {
        let mut input = input();
        assert!(!input.is_mouse_down());
        input.handle_event(InputEvent::MouseDown(MouseButton::Right));
        assert!(input.is_mouse_down());
        input.handle_event(InputEvent::MouseUp(MouseButton::Right));
        input.handle_event(InputEvent::MouseDown(MouseButton::Left));
        assert!(input.is_mouse_down());
        input.handle_event(InputEvent::MouseUp(MouseButton::Left));
        assert!(!input.is_mouse_down());
    }

    #[test]
    fn test_button_events_move_cursor() {
        let mut input = input();
        input.handle_event(InputEvent::MouseMove { x: 400.0, y: 300.0 });
        input.end_frame();

        input.handle_event(InputEvent::MouseDownAt {
            button: MouseButton::Left,
            x: 410.0,
            y: 295.0,
        });
        assert!(input.is_mouse_down());
        assert_eq!(input.delta(), Position::new(10.0, -5.0));
        input.end_frame();

        input.handle_event(InputEvent::MouseUpAt {
            button: MouseButton::Left,
            x: 420.0,
            y: 295.0,
        });
        assert!(!input.is_mouse_down());
        assert_eq!(input.delta(), Position::new(10.0, 0.0));
    }

    #[test]
    fn test_first_button_press_sets_cursor_baseline() {
        let mut input = input();
        input.handle_event(InputEvent::MouseDownAt {
            button: MouseButton::Right,
            x: 700.0,
            y: 100.0,
        });
        assert!(input.is_mouse_down());
        assert_eq!(input.delta(), Position::new(0.0, 0.0));
    }

    #[test]
    fn test_sprint_toggles_on_press_only() {
        let mut input = input();
        input.handle_event(InputEvent::KeyDown(InputAction::Sprint));
        assert!(input.sprint_toggled());
        // Key repeat does not toggle again
        input.handle_event(InputEvent::KeyDown(InputAction::Sprint));
        assert!(input.sprint_toggled());
        input.handle_event(InputEvent::KeyUp(InputAction::Sprint));
        assert!(input.sprint_toggled());
        input.handle_event(InputEvent::KeyDown(InputAction::Sprint));
        assert!(!input.sprint_toggled());
    }

    #[test]
    fn test_just_pressed_edges() {
        let mut input = input();
        input.handle_event(InputEvent::KeyDown(InputAction::Interact));
        assert!(input.just_pressed(InputAction::Interact));
        input.end_frame();
        assert!(input.is_held(InputAction::Interact));
        assert!(!input.just_pressed(InputAction::Interact));
    }

    #[test]
    fn test_resize_recenters_next_move() {
        let mut input = input();
        input.handle_event(InputEvent::Resize { width: 200.0, height: 100.0 });
        input.handle_event(InputEvent::MouseMove { x: 100.0, y: 50.0 });
        assert_eq!(input.current().mouse, Position::default());
        assert_eq!(input.viewport().aspect_ratio(), 2.0);
    }

    #[test]
    fn test_release_all() {
        let mut input = input();
        input.handle_event(InputEvent::KeyDown(InputAction::MoveLeft));
        input.handle_event(InputEvent::MouseDown(MouseButton::Left));
        input.release_all();
        assert!(!input.is_held(InputAction::MoveLeft));
        assert!(!input.is_mouse_down());
    }
}
