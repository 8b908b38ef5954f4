//! Input handlers for the flight game

use super::events::{InputEvent, KeyCode};
use super::handler::InputHandler;
use super::state::InputState;
use crate::sim::flight::FlightControls;

/// Maps the fixed key and mouse bindings onto [`FlightControls`]
///
/// Space, ArrowUp or any mouse button held gives thrust; Enter confirms.
#[derive(Debug, Default)]
pub struct FlightInputHandler {
    thrust: bool,
    confirm: bool,
}

impl FlightInputHandler {
    pub const NAME: &'static str = "flight";

    pub fn new() -> Self {
        Self::default()
    }

    /// Controls for the current frame; the confirm edge is consumed
    pub fn take_controls(&mut self) -> FlightControls {
        FlightControls {
            thrust: self.thrust,
            confirm: std::mem::take(&mut self.confirm),
        }
    }
}

impl InputHandler for FlightInputHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        50
    }

    fn handle_event(&mut self, event: &InputEvent, _state: &InputState) -> bool {
        match event {
            InputEvent::KeyPress {
                key: KeyCode::Enter,
                ..
            } => {
                self.confirm = true;
                true
            }
            _ => false,
        }
    }

    fn update(&mut self, state: &InputState) {
        self.thrust = state.keyboard.is_down(KeyCode::Space)
            || state.keyboard.is_down(KeyCode::Up)
            || state.mouse.buttons.any_down();
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Debug overlay hotkey (Backquote)
#[derive(Debug, Default)]
pub struct DebugHotkeyHandler {
    toggle_requested: bool,
}

impl DebugHotkeyHandler {
    pub const NAME: &'static str = "debug_hotkeys";

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once per Backquote press
    pub fn take_toggle(&mut self) -> bool {
        std::mem::take(&mut self.toggle_requested)
    }
}

impl InputHandler for DebugHotkeyHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        200
    }

    fn handle_event(&mut self, event: &InputEvent, _state: &InputState) -> bool {
        if let InputEvent::KeyPress {
            key: KeyCode::Backquote,
            ..
        } = event
        {
            self.toggle_requested = true;
            return true;
        }
        false
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::InputContext;
    use crate::app::input::state::ButtonState;

    fn take_controls(context: &mut InputContext) -> FlightControls {
        context
            .get_handler_mut(FlightInputHandler::NAME)
            .and_then(|h| h.as_any_mut().downcast_mut::<FlightInputHandler>())
            .map(FlightInputHandler::take_controls)
            .unwrap_or_default()
    }

    fn context() -> InputContext {
        let mut context = InputContext::new();
        context.register_handler(Box::new(FlightInputHandler::new()));
        context.register_handler(Box::new(DebugHotkeyHandler::new()));
        context
    }

    #[test]
    fn test_thrust_from_any_binding() {
        let bindings: [fn(&mut InputState); 3] = [
            |s| s.keyboard.press(KeyCode::Space),
            |s| s.keyboard.press(KeyCode::Up),
            |s| s.mouse.buttons.middle = ButtonState::JustPressed,
        ];
        for press in bindings {
            let mut context = context();
            let mut state = InputState::new();
            press(&mut state);

            context.update_state(state.clone());
            context.process();
            assert!(take_controls(&mut context).thrust);

            // Still held on the following frame
            state.advance_frame();
            context.update_state(state);
            context.process();
            assert!(take_controls(&mut context).thrust);
        }
    }

    #[test]
    fn test_confirm_fires_once_per_press() {
        let mut context = context();
        let mut state = InputState::new();
        state.keyboard.press(KeyCode::Enter);

        context.update_state(state.clone());
        context.process();
        let controls = take_controls(&mut context);
        assert!(controls.confirm);
        assert!(!controls.thrust);
        assert!(!take_controls(&mut context).confirm);

        state.advance_frame();
        context.update_state(state);
        context.process();
        assert!(!take_controls(&mut context).confirm);
    }

    #[test]
    fn test_enter_tapped_between_frames_still_confirms() {
        let mut context = context();
        let mut state = InputState::new();
        state.keyboard.press(KeyCode::Enter);
        state.keyboard.release(KeyCode::Enter);

        context.update_state(state.clone());
        context.process();
        assert!(take_controls(&mut context).confirm);

        state.advance_frame();
        context.update_state(state);
        context.process();
        assert!(!take_controls(&mut context).confirm);
    }

    #[test]
    fn test_backquote_does_not_reach_game() {
        let mut context = context();
        let mut state = InputState::new();
        state.keyboard.press(KeyCode::Backquote);
        context.update_state(state);
        context.process();

        let toggled = context
            .get_handler_mut(DebugHotkeyHandler::NAME)
            .and_then(|h| h.as_any_mut().downcast_mut::<DebugHotkeyHandler>())
            .map(DebugHotkeyHandler::take_toggle);
        assert_eq!(toggled, Some(true));
        assert_eq!(take_controls(&mut context), FlightControls::default());
    }
}
