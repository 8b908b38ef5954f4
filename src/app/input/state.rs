//! Raw input state

use std::collections::HashMap;

use super::events::KeyCode;

/// Raw input state snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mouse: MouseState,
    pub keyboard: KeyboardState,
}

/// Mouse input state
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// DPI-scaled logical coordinates (screen space)
    pub screen_pos: Option<[f32; 2]>,
    /// Mouse button states
    pub buttons: MouseButtons,
}

/// State of all mouse buttons
#[derive(Debug, Clone, Default)]
pub struct MouseButtons {
    pub left: ButtonState,
    pub right: ButtonState,
    pub middle: ButtonState,
}

impl MouseButtons {
    /// Returns true while any tracked button is down
    pub fn any_down(&self) -> bool {
        self.left.is_down() || self.right.is_down() || self.middle.is_down()
    }
}

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
    /// Pressed and released within the same frame (both edges)
    Tapped,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased | Self::Tapped => Self::Released,
            state => state,
        }
    }

    /// State after a press event; repeats while held keep `Pressed`
    pub fn pressed(self) -> Self {
        if self.is_down() {
            self
        } else {
            Self::JustPressed
        }
    }

    /// State after a release event; a press from the same frame is kept as a tap
    pub fn released(self) -> Self {
        match self {
            Self::JustPressed => Self::Tapped,
            Self::Pressed => Self::JustReleased,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns true if button was just pressed this frame
    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed | Self::Tapped)
    }

    /// Returns true if button was just released this frame
    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased | Self::Tapped)
    }
}

/// Keyboard input state
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Keys seen since startup; released keys settle back to `Released`
    pub keys: HashMap<KeyCode, ButtonState>,
    pub modifiers: Modifiers,
}

impl KeyboardState {
    pub fn key(&self, key: KeyCode) -> ButtonState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.key(key).is_down()
    }

    pub fn is_just_pressed(&self, key: KeyCode) -> bool {
        self.key(key).is_just_pressed()
    }

    /// Records a press; held keys stay `Pressed` under OS key repeat
    pub fn press(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        *state = state.pressed();
    }

    pub fn release(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        *state = state.released();
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl InputState {
    /// Creates a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all button states for next frame
    pub fn advance_frame(&mut self) {
        self.mouse.buttons.left = self.mouse.buttons.left.advance();
        self.mouse.buttons.right = self.mouse.buttons.right.advance();
        self.mouse.buttons.middle = self.mouse.buttons.middle.advance();

        for state in self.keyboard.keys.values_mut() {
            *state = state.advance();
        }
    }

    /// Drops every held key and button, e.g. after the window loses focus
    pub fn release_all(&mut self) {
        for state in self.keyboard.keys.values_mut() {
            *state = state.released();
        }
        for button in [
            &mut self.mouse.buttons.left,
            &mut self.mouse.buttons.right,
            &mut self.mouse.buttons.middle,
        ] {
            *button = button.released();
        }
    }
}
