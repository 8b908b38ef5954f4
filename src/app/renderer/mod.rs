//! Rendering module for the game scene and egui UI with a wgpu backend
//!
//! ## Architecture
//!
//! - `sim`: renders the scene to a fixed logical-size offscreen texture
//! - `viewport`: offscreen texture management and the letterbox fit used to
//!   display it in egui
//!
//! Device setup walks a chain of [`RenderTier`]s, from a high-performance
//! adapter down to the software fallback, and keeps the first one that works.

use std::fmt;
use std::sync::Arc;

use egui::Context;
use thiserror::Error;
use tracing::{info, warn};
use wgpu::{Adapter, Device, Queue, Surface, SurfaceConfiguration};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::app::geometry::Scene;
use crate::config::{RendererConfig, WindowConfig};

pub mod sim;
pub mod viewport;
use sim::SimRenderer;

/// Renderer initialization errors
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("no usable graphics adapter ({tiers})")]
    NoAdapter { tiers: String },

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats on adapter {adapter}")]
    UnsupportedSurface { adapter: String },
}

/// Adapter selection strategy, tried in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTier {
    /// High-performance hardware adapter, vsync as configured
    Accelerated,
    /// Any hardware adapter, vsync forced on
    VsyncOnly,
    /// Software rasterizer
    Software,
}

impl RenderTier {
    pub const ALL: [RenderTier; 3] = [
        RenderTier::Accelerated,
        RenderTier::VsyncOnly,
        RenderTier::Software,
    ];

    /// Tiers to attempt for the given configuration
    pub fn chain(force_software: bool) -> &'static [RenderTier] {
        if force_software {
            &Self::ALL[2..]
        } else {
            &Self::ALL
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RenderTier::Accelerated => "accelerated",
            RenderTier::VsyncOnly => "vsync-only",
            RenderTier::Software => "software",
        }
    }

    pub fn adapter_options<'a>(
        self,
        surface: Option<&'a Surface<'static>>,
    ) -> wgpu::RequestAdapterOptions<'a, 'static> {
        wgpu::RequestAdapterOptions {
            power_preference: match self {
                RenderTier::Accelerated => wgpu::PowerPreference::HighPerformance,
                RenderTier::VsyncOnly | RenderTier::Software => wgpu::PowerPreference::default(),
            },
            compatible_surface: surface,
            force_fallback_adapter: self == RenderTier::Software,
        }
    }

    /// Only the accelerated tier honours a vsync-off request
    pub fn present_mode(self, vsync: bool) -> wgpu::PresentMode {
        match self {
            RenderTier::Accelerated if !vsync => wgpu::PresentMode::AutoNoVsync,
            _ => wgpu::PresentMode::AutoVsync,
        }
    }
}

impl fmt::Display for RenderTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Creates the wgpu instance used for rendering and adapter probing
pub fn create_instance() -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

/// Renderer handles wgpu setup, the scene texture and egui rendering
pub struct Renderer {
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    tier: RenderTier,
    adapter_info: wgpu::AdapterInfo,
    egui_ctx: Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    sim_renderer: SimRenderer,
}

impl Renderer {
    /// Returns a reference to the surface configuration
    pub fn config(&self) -> &SurfaceConfiguration {
        &self.config
    }

    /// The tier that produced the device
    pub fn tier(&self) -> RenderTier {
        self.tier
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    /// Logical size of the scene texture
    pub fn scene_size(&self) -> [f32; 2] {
        self.sim_renderer.size()
    }

    /// Creates a new renderer for the given window
    ///
    /// `scene_size` is the logical resolution the game is drawn at before
    /// being scaled into the window.
    pub async fn new(
        window: Arc<Window>,
        window_config: &WindowConfig,
        renderer_config: &RendererConfig,
        scene_size: [u32; 2],
    ) -> Result<Self, RendererError> {
        info!("Initializing wgpu renderer");

        let instance = create_instance();
        let surface = instance.create_surface(window.clone())?;

        let (tier, adapter, device, queue) =
            Self::select_tier(&instance, &surface, renderer_config.force_software).await?;
        let adapter_info = adapter.get_info();

        // Configure surface
        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let Some(&first_format) = surface_caps.formats.first() else {
            return Err(RendererError::UnsupportedSurface {
                adapter: adapter_info.name.clone(),
            });
        };
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(first_format);

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: tier.present_mode(window_config.vsync),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        info!(
            surface.width = config.width,
            surface.height = config.height,
            surface.format = ?config.format,
            surface.present_mode = ?config.present_mode,
            "Surface configured"
        );

        // Initialize egui
        let egui_ctx = Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let mut egui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                ..Default::default()
            },
        );

        let sim_renderer =
            SimRenderer::new(&device, &mut egui_renderer, scene_size[0], scene_size[1]);

        info!("egui initialized successfully");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            tier,
            adapter_info,
            egui_ctx,
            egui_state,
            egui_renderer,
            sim_renderer,
        })
    }

    /// Walks the tier chain and returns the first adapter that yields a device
    async fn select_tier(
        instance: &wgpu::Instance,
        surface: &Surface<'static>,
        force_software: bool,
    ) -> Result<(RenderTier, Adapter, Device, Queue), RendererError> {
        let mut failures = Vec::new();

        for &tier in RenderTier::chain(force_software) {
            match Self::try_tier(instance, surface, tier).await {
                Ok((adapter, device, queue)) => {
                    let info = adapter.get_info();
                    info!(
                        tier = %tier,
                        adapter.name = info.name,
                        adapter.backend = ?info.backend,
                        "Found GPU adapter"
                    );
                    return Ok((tier, adapter, device, queue));
                }
                Err(e) => {
                    warn!(tier = %tier, error = %e, "Render tier unavailable, falling back");
                    failures.push(format!("{tier}: {e}"));
                }
            }
        }

        Err(RendererError::NoAdapter {
            tiers: failures.join("; "),
        })
    }

    async fn try_tier(
        instance: &wgpu::Instance,
        surface: &Surface<'static>,
        tier: RenderTier,
    ) -> Result<(Adapter, Device, Queue), RendererError> {
        let adapter = instance
            .request_adapter(&tier.adapter_options(Some(surface)))
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                experimental_features: Default::default(),
            })
            .await?;

        Ok((adapter, device, queue))
    }

    /// Handles window events for egui
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Resizes the surface; the scene texture keeps its logical size
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            info!(
                width = new_size.width,
                height = new_size.height,
                "Surface resized"
            );
        }
    }

    /// Renders a frame: the scene to its texture, then egui to the surface
    ///
    /// `render_ui` receives the scene texture and its logical size and is
    /// expected to place it.
    pub fn draw(
        &mut self,
        window: &Window,
        scene: &Scene,
        mut render_ui: impl FnMut(&Context, egui::TextureId, egui::Vec2),
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Draw the scene first (to offscreen texture)
        self.sim_renderer
            .draw(&mut encoder, &self.device, &self.queue, scene);

        let [scene_w, scene_h] = self.sim_renderer.size();
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            render_ui(
                ctx,
                self.sim_renderer.texture_id(),
                egui::vec2(scene_w, scene_h),
            );
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        // Render pass - use forget_lifetime() for egui_wgpu compatibility
        {
            let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Letterbox bars
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer
                .render(&mut rpass.forget_lifetime(), &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_chain_order() {
        assert_eq!(
            RenderTier::chain(false),
            [
                RenderTier::Accelerated,
                RenderTier::VsyncOnly,
                RenderTier::Software
            ]
        );
        assert_eq!(RenderTier::chain(true), [RenderTier::Software]);
    }

    #[test]
    fn test_tier_adapter_options() {
        let accelerated = RenderTier::Accelerated.adapter_options(None);
        assert_eq!(
            accelerated.power_preference,
            wgpu::PowerPreference::HighPerformance
        );
        assert!(!accelerated.force_fallback_adapter);

        assert!(RenderTier::Software.adapter_options(None).force_fallback_adapter);
        assert!(!RenderTier::VsyncOnly.adapter_options(None).force_fallback_adapter);
    }

    #[test]
    fn test_present_mode_per_tier() {
        assert_eq!(
            RenderTier::Accelerated.present_mode(false),
            wgpu::PresentMode::AutoNoVsync
        );
        assert_eq!(
            RenderTier::Accelerated.present_mode(true),
            wgpu::PresentMode::AutoVsync
        );
        assert_eq!(
            RenderTier::VsyncOnly.present_mode(false),
            wgpu::PresentMode::AutoVsync
        );
        assert_eq!(
            RenderTier::Software.present_mode(false),
            wgpu::PresentMode::AutoVsync
        );
    }

    #[test]
    fn test_error_messages() {
        let err = RendererError::NoAdapter {
            tiers: "software: not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no usable graphics adapter (software: not found)"
        );
    }
}
