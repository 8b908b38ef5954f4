//! Window attributes from configuration

use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

use crate::config::WindowConfig;

/// Smallest window the letterboxed scene stays readable in
pub const MIN_WINDOW_SIZE: LogicalSize<f64> = LogicalSize::new(320.0, 180.0);

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let size = LogicalSize::new(
        config.width.max(MIN_WINDOW_SIZE.width),
        config.height.max(MIN_WINDOW_SIZE.height),
    );

    WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(size)
        .with_min_inner_size(MIN_WINDOW_SIZE)
        .with_resizable(config.resizable)
        .with_decorations(config.decorated)
        .with_fullscreen(config.fullscreen.then_some(Fullscreen::Borderless(None)))
}
