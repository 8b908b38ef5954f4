//! Input handling system
//!
//! Provides a priority-based input routing system that:
//! - Collects raw input from winit events
//! - Tracks key and button edges (just pressed, held, just released)
//! - Generates semantic input events (clicks, key presses)
//! - Routes events to handlers in priority order
//! - Supports event consumption to prevent input conflicts
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → InputCollector → InputState
//!                                          ↓
//!                                    InputContext
//!                                    (generates events)
//!                                          ↓
//!                                   InputHandlers
//!                                   (by priority)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // In App::new()
//! let mut input_context = InputContext::new();
//! input_context.register_handler(Box::new(FlightInputHandler::new()));
//!
//! // In window_event()
//! collector.handle_window_event(&event);
//!
//! // Each frame, before simulation update
//! input_context.update_state(collector.clone_state());
//! input_context.process();
//! collector.advance_frame();
//! ```

mod collector;
mod context;
mod events;
mod game_handler;
mod handler;
mod state;

// Re-export public API
pub use collector::InputCollector;
pub use context::InputContext;
pub use events::{InputEvent, KeyCode, MouseButton};
pub use game_handler::{DebugHotkeyHandler, FlightInputHandler};
pub use handler::InputHandler;
pub use state::{ButtonState, InputState, KeyboardState, Modifiers, MouseButtons, MouseState};
