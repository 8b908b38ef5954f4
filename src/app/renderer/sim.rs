use super::viewport::Viewport;
use crate::app::geometry::Scene;
use crate::app::rect_renderer::RectRenderer;
use crate::app::shader_system::ShaderRegistry;

/// Renders a [`Scene`] into a fixed logical-size offscreen texture
pub struct SimRenderer {
    viewport: Viewport,
    shader_registry: ShaderRegistry,
}

impl SimRenderer {
    /// Creates a new simulation renderer for a `width` x `height` logical area
    pub fn new(
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
        width: u32,
        height: u32,
    ) -> Self {
        let viewport = Viewport::new(device, egui_renderer, width, height, "Scene Texture");

        let mut shader_registry = ShaderRegistry::new();
        shader_registry.register(Box::new(RectRenderer::new()));
        shader_registry.init_all(device, Viewport::FORMAT, viewport.size());

        Self {
            viewport,
            shader_registry,
        }
    }

    /// Returns the texture ID for egui
    pub fn texture_id(&self) -> egui::TextureId {
        self.viewport.texture_id
    }

    /// Logical size of the scene texture
    pub fn size(&self) -> [f32; 2] {
        self.viewport.size()
    }

    /// Draws the scene to the texture
    pub fn draw(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
    ) {
        if let Some(rects) = self
            .shader_registry
            .get_typed_mut::<RectRenderer>(RectRenderer::NAME)
        {
            for quad in &scene.quads {
                rects.draw_quad(quad);
            }
        }

        self.shader_registry.begin_frame(device, queue);

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.viewport.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(scene.clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.shader_registry.render_all(&mut rpass);
        }

        self.shader_registry.end_frame();
    }
}
