//! Input event routing and distribution

use super::events::{InputEvent, MouseButton};
use super::handler::InputHandler;
use super::state::InputState;

/// Central input routing and distribution system
pub struct InputContext {
    /// Registered input handlers, sorted by priority (highest first)
    handlers: Vec<Box<dyn InputHandler>>,
    /// Current input state
    state: InputState,
    /// Debug: Events generated last frame
    last_events: Vec<String>,
}

impl InputContext {
    /// Creates a new input context
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            state: InputState::new(),
            last_events: Vec::new(),
        }
    }

    /// Register an input handler
    ///
    /// Handlers are automatically sorted by priority (highest first).
    pub fn register_handler(&mut self, handler: Box<dyn InputHandler>) {
        self.handlers.push(handler);
        self.handlers
            .sort_by_key(|h| std::cmp::Reverse(h.priority()));
    }

    /// Update input state from collector
    pub fn update_state(&mut self, state: InputState) {
        self.state = state;
    }

    /// Process input and dispatch events to handlers
    ///
    /// This is the main entry point for input processing.
    /// Call this once per frame after updating state.
    pub fn process(&mut self) {
        self.last_events.clear();

        for handler in &mut self.handlers {
            handler.begin_frame();
        }

        let events = self.generate_events();

        for event in &events {
            self.last_events.push(format!("{:?}", event));
        }

        // Dispatch events to handlers in priority order
        for event in events {
            for handler in &mut self.handlers {
                if handler.handle_event(&event, &self.state) {
                    // Event consumed, stop propagation
                    break;
                }
            }
        }

        // Update all handlers with current state
        for handler in &mut self.handlers {
            handler.update(&self.state);
        }
    }

    /// Generate semantic events from edge states
    fn generate_events(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let mouse = &self.state.mouse;

        for (button, state) in [
            (MouseButton::Left, mouse.buttons.left),
            (MouseButton::Right, mouse.buttons.right),
            (MouseButton::Middle, mouse.buttons.middle),
        ] {
            if state.is_just_pressed() {
                events.push(InputEvent::Click {
                    button,
                    pos: mouse.screen_pos,
                });
            }
            if state.is_just_released() {
                events.push(InputEvent::Release { button });
            }
        }

        let keyboard = &self.state.keyboard;
        for (&key, state) in &keyboard.keys {
            if state.is_just_pressed() {
                events.push(InputEvent::KeyPress {
                    key,
                    modifiers: keyboard.modifiers,
                });
            }
            if state.is_just_released() {
                events.push(InputEvent::KeyRelease { key });
            }
        }

        events
    }

    /// Get current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Get number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Get a mutable reference to a handler by name
    ///
    /// This allows access to handler-specific state or methods.
    pub fn get_handler_mut(&mut self, name: &str) -> Option<&mut (dyn InputHandler + '_)> {
        if let Some(boxed) = self.handlers.iter_mut().find(|h| h.name() == name) {
            Some(boxed.as_mut())
        } else {
            None
        }
    }

    /// Get debug information about all handlers
    pub fn debug_handlers(&self) -> Vec<(String, u32)> {
        self.handlers
            .iter()
            .map(|h| (h.name().to_string(), h.priority()))
            .collect()
    }

    /// Get events generated last frame (for debugging)
    pub fn debug_last_events(&self) -> &[String] {
        &self.last_events
    }
}

impl Default for InputContext {
    fn default() -> Self {
        Self::new()
    }
}
