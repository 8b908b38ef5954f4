/// A viewport is a fixed-size render target texture that egui can display
pub struct Viewport {
    /// Texture ID for egui to display
    pub texture_id: egui::TextureId,
    /// The underlying wgpu texture
    pub texture: wgpu::Texture,
    /// The view of the texture for rendering
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Color format of every viewport texture
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Creates a new viewport
    ///
    /// The texture is sampled with nearest filtering so single-pixel details
    /// stay crisp when scaled up.
    pub fn new(
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let (texture, view) = Self::create_texture(device, width, height, label);

        let texture_id =
            egui_renderer.register_native_texture(device, &view, wgpu::FilterMode::Nearest);

        Self {
            texture_id,
            texture,
            view,
            width,
            height,
        }
    }

    /// Texture size as floating point, for uniforms and layout
    pub fn size(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }

    /// Creates the wgpu texture and view
    fn create_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        label: &str,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        (texture, view)
    }
}

/// Largest rect with the aspect ratio of `content` that fits in `area`,
/// centred on it
///
/// Degenerate content or areas collapse to a zero-size rect at the area
/// centre.
pub fn letterbox(content: egui::Vec2, area: egui::Rect) -> egui::Rect {
    if content.x <= 0.0 || content.y <= 0.0 || area.width() <= 0.0 || area.height() <= 0.0 {
        return egui::Rect::from_center_size(area.center(), egui::Vec2::ZERO);
    }

    let scale = (area.width() / content.x).min(area.height() / content.y);
    egui::Rect::from_center_size(area.center(), content * scale)
}
