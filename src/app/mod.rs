//! Game application module
//!
//! Handles windowing, rendering, and user input.

pub mod debug_ui;
pub mod geometry;
pub mod input;
pub mod rect_renderer;
pub mod renderer;
mod runner;
pub mod shader_system;
mod window;

pub use runner::{App, StartupError};
pub use window::window_attributes_from_config;
