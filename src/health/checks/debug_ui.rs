//! Debug UI health check

use std::thread;
use std::time::Duration;

use crate::app::debug_ui::DebugUIState;
use crate::health::check::{CheckResult, Details, SystemCheck};

/// Checks debug overlay defaults, toggling and frame timing
pub struct DebugUICheck;

impl DebugUICheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DebugUICheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for DebugUICheck {
    fn name(&self) -> &'static str {
        "Debug UI"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates debug overlay state and frame timing calculations")
    }

    fn check(&self) -> CheckResult {
        let mut details = Details::new();
        let mut ui_state = DebugUIState::default();

        if ui_state.show_window != cfg!(debug_assertions) {
            details.fail("Overlay visibility does not match build type");
            return details.finish("Incorrect default state");
        }
        details.ok(format!(
            "Default visibility: {} (expected for build type)",
            if ui_state.show_window { "visible" } else { "hidden" }
        ));

        let initial = ui_state.show_window;
        ui_state.toggle_window();
        let flipped = ui_state.show_window != initial;
        ui_state.toggle_window();
        if flipped && ui_state.show_window == initial {
            details.ok("Toggle flips and restores visibility");
        } else {
            details.fail("Toggle did not flip visibility");
        }

        if ui_state.fps() != 0.0 || ui_state.last_frame_ms() != 0.0 {
            details.fail("Frame timing should start empty");
            return details.finish("Incorrect initial FPS");
        }
        details.ok("Initial FPS: 0.0");

        for _ in 0..3 {
            thread::sleep(Duration::from_millis(17));
            ui_state.update_frame_time();
        }

        let fps = ui_state.fps();
        if fps <= 0.0 {
            details.fail("FPS calculation failed");
        } else if !(30.0..=120.0).contains(&fps) {
            // Sleep granularity under load skews the sample
            details.warn(format!("FPS calculation seems off: {fps:.1} (expected ~60)"));
        } else {
            details.ok(format!(
                "Frame timing: {fps:.1} FPS, last frame {:.1} ms",
                ui_state.last_frame_ms()
            ));
        }

        let message = if details.status().is_fail() {
            "Debug UI checks failed"
        } else {
            "All debug UI systems operational"
        };
        details.finish(message)
    }
}
