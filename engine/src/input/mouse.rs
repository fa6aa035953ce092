//! Mouse Input Module
//!
//! Button flags and cursor coordinates. Decoupled from the host: the winit
//! and browser buttons both convert into [`MouseButton`].

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

impl MouseButton {
    /// Convert a DOM `MouseEvent.button` index.
    pub fn from_dom_index(index: i16) -> Self {
        match index {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            other => MouseButton::Other(other.max(0) as u16),
        }
    }
}

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Back => MouseButton::Other(3),
            winit::event::MouseButton::Forward => MouseButton::Other(4),
            winit::event::MouseButton::Other(n) => MouseButton::Other(n),
        }
    }
}

/// State of all mouse buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    /// Create a new button state with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update button state for a specific button.
    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Other(_) => {}
        }
    }

    /// Check if a specific button is pressed.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => false,
        }
    }

    /// The attack buttons: left or right.
    pub fn attack_held(&self) -> bool {
        self.left || self.right
    }

    /// Reset all buttons to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 2D position, used for mouse coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert to tuple.
    pub fn to_tuple(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Position {
    fn from(tuple: (f32, f32)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_state() {
        let mut buttons = ButtonState::new();
        assert!(!buttons.attack_held());

        buttons.set(MouseButton::Right, true);
        assert!(buttons.attack_held());
        assert!(buttons.is_pressed(MouseButton::Right));

        buttons.set(MouseButton::Right, false);
        buttons.set(MouseButton::Middle, true);
        assert!(!buttons.attack_held());

        buttons.set(MouseButton::Other(5), true);
        assert!(!buttons.is_pressed(MouseButton::Other(5)));
    }

    #[test]
    fn test_dom_index() {
        assert_eq!(MouseButton::from_dom_index(0), MouseButton::Left);
        assert_eq!(MouseButton::from_dom_index(2), MouseButton::Right);
        assert_eq!(MouseButton::from_dom_index(4), MouseButton::Other(4));
    }

    #[test]
    fn test_winit_conversion() {
        assert_eq!(MouseButton::from(winit::event::MouseButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(winit::event::MouseButton::Other(7)), MouseButton::Other(7));
    }

    #[test]
    fn test_position_sub() {
        let d = Position::new(5.0, 2.0) - Position::new(1.0, 4.0);
        assert_eq!(d.to_tuple(), (4.0, -2.0));
    }
}
