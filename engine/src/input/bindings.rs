//! Input Bindings Module
//!
//! Maps host key identifiers to logical actions. Native hosts deliver
//! `winit` physical key codes; the browser host delivers `KeyboardEvent.key`
//! strings. Both resolve to the same [`InputAction`].

use std::collections::HashMap;

use winit::keyboard::KeyCode;

/// Logical input actions the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W)
    MoveForward,
    /// Move backward (default: S)
    MoveBack,
    /// Strafe left (default: A)
    MoveLeft,
    /// Strafe right (default: D)
    MoveRight,
    /// Toggles between walking and running (default: Shift)
    Sprint,
    /// Trade with the merchant (default: E)
    Interact,
}

impl InputAction {
    /// Every action, in bit order.
    pub const ALL: [InputAction; 6] = [
        InputAction::MoveForward,
        InputAction::MoveBack,
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::Sprint,
        InputAction::Interact,
    ];

    /// Bit used by [`super::keyboard::ActionSet`].
    pub const fn bit(self) -> u8 {
        match self {
            InputAction::MoveForward => 1 << 0,
            InputAction::MoveBack => 1 << 1,
            InputAction::MoveLeft => 1 << 2,
            InputAction::MoveRight => 1 << 3,
            InputAction::Sprint => 1 << 4,
            InputAction::Interact => 1 << 5,
        }
    }

    /// True for the four directional actions.
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            InputAction::MoveForward
                | InputAction::MoveBack
                | InputAction::MoveLeft
                | InputAction::MoveRight
        )
    }

    /// Resolve a browser `KeyboardEvent.key` value (case-insensitive).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Some(InputAction::MoveForward),
            "s" | "arrowdown" => Some(InputAction::MoveBack),
            "a" | "arrowleft" => Some(InputAction::MoveLeft),
            "d" | "arrowright" => Some(InputAction::MoveRight),
            "shift" => Some(InputAction::Sprint),
            "e" => Some(InputAction::Interact),
            _ => None,
        }
    }
}

/// Maps physical keys to logical actions, supporting customizable key bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, InputAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create bindings with the default layout.
    ///
    /// - W / ArrowUp = MoveForward
    /// - S / ArrowDown = MoveBack
    /// - A / ArrowLeft = MoveLeft
    /// - D / ArrowRight = MoveRight
    /// - Shift (either) = Sprint
    /// - E = Interact
    pub fn new() -> Self {
        let mut bindings = Self {
            key_to_action: HashMap::new(),
        };

        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBack);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBack);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Sprint);
        bindings.bind(KeyCode::ShiftRight, InputAction::Sprint);
        bindings.bind(KeyCode::KeyE, InputAction::Interact);

        bindings
    }

    /// Bind a key to an action, replacing any previous binding of that key.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.key_to_action.insert(key, action);
    }

    /// Remove the binding for a key.
    pub fn unbind(&mut self, key: KeyCode) {
        self.key_to_action.remove(&key);
    }

    /// Get the action bound to a key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// All keys bound to `action`.
    pub fn keys_for(&self, action: InputAction) -> Vec<KeyCode> {
        self.key_to_action
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.get_action(KeyCode::KeyW), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::ShiftRight), Some(InputAction::Sprint));
        assert_eq!(bindings.get_action(KeyCode::KeyE), Some(InputAction::Interact));
        assert_eq!(bindings.get_action(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_rebind() {
        let mut bindings = KeyBindings::new();
        bindings.bind(KeyCode::KeyZ, InputAction::MoveForward);
        bindings.unbind(KeyCode::KeyW);
        assert_eq!(bindings.get_action(KeyCode::KeyW), None);
        let mut keys = bindings.keys_for(InputAction::MoveForward);
        keys.sort_by_key(|k| format!("{k:?}"));
        assert_eq!(keys, vec![KeyCode::ArrowUp, KeyCode::KeyZ]);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(InputAction::from_key_name("W"), Some(InputAction::MoveForward));
        assert_eq!(InputAction::from_key_name("Shift"), Some(InputAction::Sprint));
        assert_eq!(InputAction::from_key_name("ArrowLeft"), Some(InputAction::MoveLeft));
        assert_eq!(InputAction::from_key_name("q"), None);
    }

    #[test]
    fn test_bits_are_distinct() {
        let mut seen = 0u8;
        for action in InputAction::ALL {
            assert_eq!(seen & action.bit(), 0);
            seen |= action.bit();
        }
    }
}
