//! Debug UI state and rendering

use std::collections::VecDeque;
use std::time::Instant;

use sysinfo::System;

use super::renderer::RenderTier;
use crate::build_info;
use crate::sim::World;

const FRAME_SAMPLES: usize = 100;

/// Renderer facts shown in the overlay
#[derive(Debug, Clone)]
pub struct RendererSummary {
    pub tier: RenderTier,
    pub adapter: String,
    pub backend: wgpu::Backend,
    pub surface_size: [u32; 2],
    pub surface_format: wgpu::TextureFormat,
    pub present_mode: wgpu::PresentMode,
}

/// Host facts, gathered once on first display
#[derive(Debug, Clone)]
struct SystemSummary {
    os: String,
    kernel: String,
    logical_cores: usize,
    memory_gb: f64,
}

impl SystemSummary {
    fn gather() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        Self {
            os: format!(
                "{} {}",
                System::name().unwrap_or_else(|| "Unknown".to_string()),
                System::os_version().unwrap_or_default()
            ),
            kernel: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
            logical_cores: sys.cpus().len(),
            memory_gb: sys.total_memory() as f64 / 1_073_741_824.0,
        }
    }
}

/// Debug UI state for toggling different panels
#[derive(Debug, Clone)]
pub struct DebugUIState {
    pub show_window: bool,
    pub show_fps: bool,
    pub show_world_state: bool,
    pub show_run_state: bool,
    pub show_debug_info: bool,
    pub show_system_info: bool,
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
    system: Option<SystemSummary>,
}

impl Default for DebugUIState {
    fn default() -> Self {
        Self {
            show_window: cfg!(debug_assertions),
            show_fps: true,
            show_world_state: true,
            show_run_state: true,
            show_debug_info: true,
            show_system_info: false,
            frame_times: VecDeque::with_capacity(FRAME_SAMPLES),
            last_frame_time: Instant::now(),
            system: None,
        }
    }
}

impl DebugUIState {
    /// Toggles the debug window visibility
    pub fn toggle_window(&mut self) {
        self.show_window = !self.show_window;
    }

    /// Updates frame timing information
    pub fn update_frame_time(&mut self) {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FRAME_SAMPLES {
            self.frame_times.pop_front();
        }
    }

    /// Gets the current FPS
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg_frame_time: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// Most recent frame time in milliseconds
    pub fn last_frame_ms(&self) -> f32 {
        self.frame_times.back().map_or(0.0, |t| t * 1000.0)
    }

    /// Renders the debug UI
    ///
    /// The world is mutable so the overlay can pause it and change its time
    /// scale.
    pub fn render(&mut self, ctx: &egui::Context, world: &mut World, renderer: &RendererSummary) {
        // Frame timing is tracked even while hidden so the FPS is warm on open
        self.update_frame_time();

        if !self.show_window {
            return;
        }

        if self.show_system_info && self.system.is_none() {
            self.system = Some(SystemSummary::gather());
        }

        egui::Window::new("Debug Info")
            .default_pos([10.0, 40.0])
            .default_width(300.0)
            .resizable(true)
            .scroll([false, true])
            .show(ctx, |ui| {
                ui.heading("Categories");
                ui.separator();

                ui.checkbox(&mut self.show_fps, "FPS");
                ui.checkbox(&mut self.show_world_state, "World State");
                ui.checkbox(&mut self.show_run_state, "Run State");
                ui.checkbox(&mut self.show_debug_info, "Renderer Info");
                ui.checkbox(&mut self.show_system_info, "System Info");

                ui.separator();

                if self.show_fps {
                    ui.heading("FPS");
                    ui.label(format!("FPS: {:.1}", self.fps()));
                    ui.label(format!("Frame time: {:.2}ms", self.last_frame_ms()));
                    ui.separator();
                }

                if self.show_world_state {
                    ui.heading("World State");
                    ui.label(format!("Simulation time: {:.2}s", world.sim_time()));
                    ui.label(format!("Tick count: {}", world.tick_count()));
                    ui.label(format!("Seed: {}", world.rng_seed()));

                    let mut paused = world.is_paused();
                    if ui.checkbox(&mut paused, "Paused").changed() {
                        world.toggle_pause();
                    }
                    let mut time_scale = world.time_scale();
                    if ui
                        .add(egui::Slider::new(&mut time_scale, 0.0..=2.0).text("Time scale"))
                        .changed()
                    {
                        world.set_time_scale(time_scale);
                    }
                    ui.separator();
                }

                if self.show_run_state {
                    ui.heading("Run State");
                    match world.flight() {
                        Some(flight) => {
                            ui.label(format!("Phase: {:?}", flight.phase()));
                            ui.label(format!("Run: {}", flight.runs_started()));
                            ui.label(format!(
                                "Distance left: {:.0} ({:.1}%)",
                                flight.distance_left(),
                                flight.progress() * 100.0
                            ));
                            ui.label(format!("Difficulty: {:.3}", flight.difficulty()));
                            ui.label(format!("World speed: {:.2}", flight.world_speed()));
                            ui.label(format!(
                                "Spawn: {:.0} / {:.0} ms",
                                flight.spawn_timer_ms(),
                                flight.spawn_interval_ms()
                            ));
                            ui.label(format!("Obstacles: {}", flight.obstacles().len()));
                            ui.label(format!(
                                "Craft: y={:.1} vy={:.2}{}",
                                flight.craft().y,
                                flight.craft().vy,
                                if flight.is_thrusting() { " (thrust)" } else { "" }
                            ));
                        }
                        None => {
                            ui.label("No flight simulation");
                        }
                    }
                    ui.separator();
                }

                if self.show_debug_info {
                    ui.heading("Renderer Info");
                    ui.label(format!("Tier: {}", renderer.tier));
                    ui.label(format!(
                        "Adapter: {} ({:?})",
                        renderer.adapter, renderer.backend
                    ));
                    ui.label(format!(
                        "Surface: {}x{} {:?}",
                        renderer.surface_size[0], renderer.surface_size[1], renderer.surface_format
                    ));
                    ui.label(format!("Present mode: {:?}", renderer.present_mode));
                    ui.label(format!("Build: {}", build_info::version_string()));
                    ui.separator();
                }

                if self.show_system_info
                    && let Some(system) = &self.system
                {
                    ui.heading("System Info");
                    ui.label(format!("OS: {}", system.os));
                    ui.label(format!("Kernel: {}", system.kernel));
                    ui.label(format!("Logical cores: {}", system.logical_cores));
                    ui.label(format!("Memory: {:.1} GB", system.memory_gb));
                    ui.separator();
                }
            });
    }
}
