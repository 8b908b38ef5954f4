//! Raw input collection from winit events

use super::events::KeyCode;
use super::state::{InputState, Modifiers};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Collects raw input from winit events and maintains InputState
pub struct InputCollector {
    state: InputState,
    scale_factor: f32,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            scale_factor: 1.0,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.state.mouse.screen_pos = Some([
                    position.x as f32 / self.scale_factor,
                    position.y as f32 / self.scale_factor,
                ]);
            }

            WindowEvent::CursorLeft { .. } => {
                self.state.mouse.screen_pos = None;
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let buttons = &mut self.state.mouse.buttons;
                let slot = match button {
                    winit::event::MouseButton::Left => &mut buttons.left,
                    winit::event::MouseButton::Right => &mut buttons.right,
                    winit::event::MouseButton::Middle => &mut buttons.middle,
                    _ => return,
                };
                *slot = match state {
                    ElementState::Pressed => slot.pressed(),
                    ElementState::Released => slot.released(),
                };
            }

            WindowEvent::ModifiersChanged(modifiers_state) => {
                self.state.keyboard.modifiers = Modifiers {
                    shift: modifiers_state.state().shift_key(),
                    ctrl: modifiers_state.state().control_key(),
                    alt: modifiers_state.state().alt_key(),
                    meta: modifiers_state.state().super_key(),
                };
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let key = KeyCode::from(code);
                    match event.state {
                        ElementState::Pressed => self.state.keyboard.press(key),
                        ElementState::Released => self.state.keyboard.release(key),
                    }
                }
            }

            // Releases are not delivered to unfocused windows
            WindowEvent::Focused(false) => {
                self.state.release_all();
            }

            _ => {}
        }
    }

    /// Advance to next frame (transitions edge states to steady states)
    pub fn advance_frame(&mut self) {
        self.state.advance_frame();
    }

    /// Get current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Snapshot for the handlers; held keys stay in the collector
    pub fn clone_state(&self) -> InputState {
        self.state.clone()
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::state::ButtonState;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, MouseButton};

    fn device() -> DeviceId {
        DeviceId::dummy()
    }

    fn click(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_cursor_position_is_logical() {
        let mut collector = InputCollector::new();
        collector.set_scale_factor(2.0);
        collector.handle_window_event(&WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(200.0, 100.0),
        });
        assert_eq!(collector.state().mouse.screen_pos, Some([100.0, 50.0]));

        collector.handle_window_event(&WindowEvent::CursorLeft {
            device_id: device(),
        });
        assert_eq!(collector.state().mouse.screen_pos, None);
    }

    #[test]
    fn test_click_edges_settle_after_advance() {
        let mut collector = InputCollector::new();
        collector.handle_window_event(&click(ElementState::Pressed));
        assert_eq!(collector.state().mouse.buttons.left, ButtonState::JustPressed);

        collector.advance_frame();
        assert_eq!(collector.state().mouse.buttons.left, ButtonState::Pressed);

        collector.handle_window_event(&click(ElementState::Released));
        collector.advance_frame();
        assert_eq!(collector.state().mouse.buttons.left, ButtonState::Released);
    }

    #[test]
    fn test_click_released_in_same_frame_is_a_tap() {
        let mut collector = InputCollector::new();
        collector.handle_window_event(&click(ElementState::Pressed));
        collector.handle_window_event(&click(ElementState::Released));

        let left = collector.state().mouse.buttons.left;
        assert_eq!(left, ButtonState::Tapped);
        assert!(left.is_just_pressed());
    }

    #[test]
    fn test_focus_loss_releases_held_buttons() {
        let mut collector = InputCollector::new();
        collector.handle_window_event(&click(ElementState::Pressed));
        collector.advance_frame();

        collector.handle_window_event(&WindowEvent::Focused(false));
        assert_eq!(collector.state().mouse.buttons.left, ButtonState::JustReleased);
        assert!(!collector.state().mouse.buttons.any_down());
    }
}
