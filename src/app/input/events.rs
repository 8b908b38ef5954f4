//! Semantic input events

/// Semantic input events generated from raw state changes
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Mouse button pressed
    Click {
        button: MouseButton,
        /// Screen position in logical pixels, if the cursor is inside the window
        pos: Option<[f32; 2]>,
    },

    /// Mouse button released
    Release { button: MouseButton },

    /// Key press event
    KeyPress {
        key: KeyCode,
        modifiers: super::state::Modifiers,
    },

    /// Key release event
    KeyRelease { key: KeyCode },
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    Enter,
    Escape,
    Backquote,

    // Arrows
    Left,
    Right,
    Up,
    Down,

    // Other
    Other,
}

/// Convert from winit key code
impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as WK;
        match key {
            WK::Space => Self::Space,
            WK::Enter | WK::NumpadEnter => Self::Enter,
            WK::Escape => Self::Escape,
            WK::Backquote => Self::Backquote,

            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,
            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,

            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winit_key_mapping() {
        use winit::keyboard::KeyCode as WK;
        assert_eq!(KeyCode::from(WK::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WK::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WK::ArrowUp), KeyCode::Up);
        assert_eq!(KeyCode::from(WK::KeyQ), KeyCode::Other);
    }
}
