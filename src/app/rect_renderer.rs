//! Filled rectangle renderer
//!
//! Draws alpha-blended, axis-aligned rectangles given in logical pixels. Each
//! rectangle becomes a quad (two triangles) with a flat vertex color.

use wgpu::{
    BindGroup, Buffer, Device, Queue, RenderPass, RenderPipeline, TextureFormat, util::DeviceExt,
};

use super::geometry::Quad;
use super::shader_system::Shader;

/// WGSL shader code for rectangle rendering
const RECT_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

struct Uniforms {
    screen_size: vec2<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;

    // Screen coordinates: (0, 0) at top-left, (width, height) at bottom-right
    // Clip space: (-1, -1) at bottom-left, (1, 1) at top-right
    let clip_x = (in.position.x / uniforms.screen_size.x) * 2.0 - 1.0;
    let clip_y = 1.0 - (in.position.y / uniforms.screen_size.y) * 2.0;

    out.clip_position = vec4<f32>(clip_x, clip_y, 0.0, 1.0);
    out.color = in.color;

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Vertex data for rectangle rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    /// Linear RGBA
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Uniform buffer for screen size
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    screen_size: [f32; 2],
}

/// Two triangles covering `quad`; empty or inverted rectangles produce none
pub fn quad_vertices(quad: &Quad) -> Option<[Vertex; 6]> {
    if quad.w <= 0.0 || quad.h <= 0.0 {
        return None;
    }

    let color = quad.color.to_linear();
    let (x0, y0) = (quad.x, quad.y);
    let (x1, y1) = (quad.x + quad.w, quad.y + quad.h);
    let v = |x: f32, y: f32| Vertex {
        position: [x, y],
        color,
    };

    Some([
        v(x0, y0),
        v(x0, y1),
        v(x1, y1),
        v(x0, y0),
        v(x1, y1),
        v(x1, y0),
    ])
}

/// Rectangle renderer shader
pub struct RectRenderer {
    pipeline: Option<RenderPipeline>,
    bind_group: Option<BindGroup>,
    uniform_buffer: Option<Buffer>,
    vertex_buffer: Option<Buffer>,
    /// Vertices the current vertex buffer can hold
    vertex_capacity: usize,
    vertices: Vec<Vertex>,
    vertex_count: u32,
    screen_size: [f32; 2],
}

impl RectRenderer {
    pub const NAME: &'static str = "rect";

    /// Creates a new rectangle renderer
    pub fn new() -> Self {
        Self {
            pipeline: None,
            bind_group: None,
            uniform_buffer: None,
            vertex_buffer: None,
            vertex_capacity: 0,
            vertices: Vec::new(),
            vertex_count: 0,
            screen_size: [960.0, 540.0],
        }
    }

    /// Queues a rectangle for this frame
    pub fn draw_quad(&mut self, quad: &Quad) {
        if let Some(vertices) = quad_vertices(quad) {
            self.vertices.extend_from_slice(&vertices);
        }
    }

    /// Number of vertices queued for the next frame
    pub fn queued_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Clears all queued rectangles
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.vertex_count = 0;
    }

    /// Uploads queued vertices, growing the buffer when needed
    fn update_vertex_buffer(&mut self, device: &Device, queue: &Queue) {
        self.vertex_count = self.vertices.len() as u32;

        if self.vertices.is_empty() {
            return;
        }

        match &self.vertex_buffer {
            Some(buffer) if self.vertices.len() <= self.vertex_capacity => {
                queue.write_buffer(buffer, 0, bytemuck::cast_slice(&self.vertices));
            }
            _ => {
                self.vertex_buffer = Some(device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("Rect Vertex Buffer"),
                        contents: bytemuck::cast_slice(&self.vertices),
                        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    },
                ));
                self.vertex_capacity = self.vertices.len();
            }
        }
    }

    /// Updates the uniform buffer with current screen size
    fn update_uniform_buffer(&mut self, queue: &Queue) {
        if let Some(buffer) = &self.uniform_buffer {
            let uniforms = Uniforms {
                screen_size: self.screen_size,
            };
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(&[uniforms]));
        }
    }
}

impl Default for RectRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Shader for RectRenderer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn init(&mut self, device: &Device, format: TextureFormat, target_size: [f32; 2]) {
        self.screen_size = target_size;

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rect Uniform Buffer"),
            contents: bytemuck::cast_slice(&[Uniforms {
                screen_size: self.screen_size,
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Rect Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Rect Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Rect Shader"),
            source: wgpu::ShaderSource::Wgsl(RECT_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Rect Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Rect Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
        self.uniform_buffer = Some(uniform_buffer);
        self.vertex_buffer = None;
        self.vertex_capacity = 0;
    }

    fn begin_frame(&mut self, device: &Device, queue: &Queue) {
        self.update_uniform_buffer(queue);
        self.update_vertex_buffer(device, queue);
    }

    fn render<'rpass>(&'rpass self, rpass: &mut RenderPass<'rpass>) {
        if self.vertex_count == 0 {
            return;
        }

        if let (Some(pipeline), Some(bind_group), Some(vertex_buffer)) =
            (&self.pipeline, &self.bind_group, &self.vertex_buffer)
        {
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_vertex_buffer(0, vertex_buffer.slice(..));
            rpass.draw(0..self.vertex_count, 0..1);
        }
    }

    fn end_frame(&mut self) {
        self.clear();
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::geometry::Color;

    #[test]
    fn test_quad_covers_rectangle() {
        let quad = Quad::new(10.0, 20.0, 30.0, 40.0, Color::rgb(255, 0, 0));
        let vertices = quad_vertices(&quad).unwrap();

        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
        assert!(vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_empty_quads_are_skipped() {
        let mut renderer = RectRenderer::new();
        renderer.draw_quad(&Quad::new(0.0, 0.0, 0.0, 10.0, Color::rgb(1, 2, 3)));
        renderer.draw_quad(&Quad::point(5.0, 5.0, Color::rgb(1, 2, 3)));

        assert_eq!(renderer.queued_vertices(), 6);
        renderer.end_frame();
        assert_eq!(renderer.queued_vertices(), 0);
    }
}
