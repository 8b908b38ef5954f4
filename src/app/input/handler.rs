//! Input handler trait for subsystems

use super::events::InputEvent;
use super::state::InputState;

/// Trait for subsystems that handle input
///
/// Handlers are called in priority order (highest first).
/// When a handler consumes an event (returns true), propagation stops.
pub trait InputHandler {
    /// Name of this handler for debugging
    fn name(&self) -> &str;

    /// Priority for input routing (higher = earlier)
    ///
    /// Priority ranges:
    /// - 200+: Critical system handlers (debug overlays)
    /// - 50-99: Game/simulation handlers
    /// - 0-49: Global/fallback handlers
    fn priority(&self) -> u32;

    /// Handle an input event
    ///
    /// # Returns
    /// * `true` if the event was consumed (stops propagation to lower priority handlers)
    /// * `false` if the event was not handled (continues to next handler)
    fn handle_event(&mut self, event: &InputEvent, state: &InputState) -> bool;

    /// Called every frame with current input state, after all events
    ///
    /// Useful for continuous input like held keys.
    fn update(&mut self, _state: &InputState) {}

    /// Called at the start of each frame, before events are generated
    fn begin_frame(&mut self) {}

    /// Downcast to concrete type for accessing handler-specific methods
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
