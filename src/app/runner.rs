//! Main application handler for the game

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use super::debug_ui::{DebugUIState, RendererSummary};
use super::geometry;
use super::input::{DebugHotkeyHandler, FlightInputHandler, InputCollector, InputContext};
use super::renderer::{Renderer, RendererError, viewport};
use super::window::window_attributes_from_config;
use crate::config::AppConfig;
use crate::sim::World;

/// Fatal startup failures
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Main game application
pub struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    world: World,
    debug_ui: DebugUIState,
    started: Instant,
    last_update: Option<Instant>,
    fatal: Option<StartupError>,
    // Input system
    input_collector: InputCollector,
    input_context: InputContext,
}

impl App {
    /// Creates a new game application with the provided configuration
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting game");
        info!(?config.window, "Window configuration");

        let mut input_context = InputContext::new();
        input_context.register_handler(Box::new(FlightInputHandler::new()));
        if cfg!(debug_assertions) {
            input_context.register_handler(Box::new(DebugHotkeyHandler::new()));
        }

        let world = World::with_flight(config.game.clone());
        info!(seed = world.rng_seed(), "World created");

        Self {
            config,
            window: None,
            renderer: None,
            world,
            debug_ui: DebugUIState::default(),
            started: Instant::now(),
            last_update: None,
            fatal: None,
            input_collector: InputCollector::new(),
            input_context,
        }
    }

    /// Creates a new game application with configuration loaded from environment
    pub fn from_env() -> Self {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::default()
        });
        Self::new(config.into_playable())
    }

    /// The error that stopped the event loop, if any
    pub fn fatal_error(&self) -> Option<&StartupError> {
        self.fatal.as_ref()
    }

    /// Creates the window and renderer
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), StartupError> {
        let window = event_loop.create_window(window_attributes_from_config(&self.config.window))?;
        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            "Window created successfully"
        );
        let window = Arc::new(window);
        self.input_collector
            .set_scale_factor(window.scale_factor() as f32);

        let arena = &self.config.game.arena;
        let scene_size = [arena.width.max(1.0) as u32, arena.height.max(1.0) as u32];

        // winit's event loop is synchronous; the runtime only drives device setup
        let runtime = tokio::runtime::Runtime::new()?;
        let renderer = runtime.block_on(Renderer::new(
            window.clone(),
            &self.config.window,
            &self.config.renderer,
            scene_size,
        ))?;

        info!(tier = %renderer.tier(), "Renderer initialized successfully");
        self.renderer = Some(renderer);
        self.window = Some(window);
        self.last_update = Some(Instant::now());
        Ok(())
    }

    /// Samples input handlers into controls for the flight simulation
    fn process_input(&mut self) {
        // Clone state BEFORE advancing so handlers see edge transitions
        self.input_context
            .update_state(self.input_collector.clone_state());
        self.input_context.process();
        self.input_collector.advance_frame();

        let controls = self
            .input_context
            .get_handler_mut(FlightInputHandler::NAME)
            .and_then(|h| h.as_any_mut().downcast_mut::<FlightInputHandler>())
            .map(FlightInputHandler::take_controls);
        if let (Some(controls), Some(flight)) = (controls, self.world.flight_mut()) {
            flight.apply_controls(controls);
        }

        let toggle = self
            .input_context
            .get_handler_mut(DebugHotkeyHandler::NAME)
            .and_then(|h| h.as_any_mut().downcast_mut::<DebugHotkeyHandler>())
            .is_some_and(DebugHotkeyHandler::take_toggle);
        if toggle {
            self.debug_ui.toggle_window();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };
        let Some(flight) = self.world.flight() else {
            return;
        };

        let t_ms = self.started.elapsed().as_millis() as u64;
        let scene = geometry::build_scene(flight, t_ms);

        let summary = RendererSummary {
            tier: renderer.tier(),
            adapter: renderer.adapter_info().name.clone(),
            backend: renderer.adapter_info().backend,
            surface_size: [renderer.config().width, renderer.config().height],
            surface_format: renderer.config().format,
            present_mode: renderer.config().present_mode,
        };
        let debug_ui = &mut self.debug_ui;
        let world = &mut self.world;

        let result = renderer.draw(window, &scene, |ctx, texture_id, scene_size| {
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
                .show(ctx, |ui| {
                    let rect = viewport::letterbox(scene_size, ui.max_rect());
                    ui.painter().image(
                        texture_id,
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                });

            debug_ui.render(ctx, world, &summary);
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                renderer.resize(window.inner_size());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => {
                warn!(error = %e, "Render error");
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.fatal.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            error!(error = %e, "Failed to initialize, exiting");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };
        let now = Instant::now();
        let delta_time = (now - last_update).as_secs_f32();
        self.last_update = Some(now);

        // Input BEFORE simulation update
        self.process_input();
        self.world.tick(delta_time);

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Feed events to input collector FIRST (before egui)
        self.input_collector.handle_window_event(&event);

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            let _ = renderer.handle_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.input_collector.set_scale_factor(scale_factor as f32);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
