//! Keyboard Input Module
//!
//! The set of held logical actions. It is `Copy` so whole-frame snapshots are
//! plain value copies.

use super::bindings::InputAction;

/// Set of currently held actions, one bit per [`InputAction`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action pressed or released.
    pub fn set(&mut self, action: InputAction, pressed: bool) {
        if pressed {
            self.0 |= action.bit();
        } else {
            self.0 &= !action.bit();
        }
    }

    /// Check whether an action is held.
    pub fn contains(&self, action: InputAction) -> bool {
        self.0 & action.bit() != 0
    }

    /// True when no action is held.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Check if any directional key is held.
    pub fn any_movement(&self) -> bool {
        InputAction::ALL
            .iter()
            .any(|a| a.is_movement() && self.contains(*a))
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.contains(InputAction::MoveForward) as i32)
            - (self.contains(InputAction::MoveBack) as i32)
    }

    /// Get the strafe direction (-1, 0, or 1); positive is left.
    pub fn strafe_axis(&self) -> i32 {
        (self.contains(InputAction::MoveLeft) as i32)
            - (self.contains(InputAction::MoveRight) as i32)
    }

    /// Release everything.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterate over held actions.
    pub fn iter(&self) -> impl Iterator<Item = InputAction> + '_ {
        InputAction::ALL.into_iter().filter(|a| self.contains(*a))
    }
}
