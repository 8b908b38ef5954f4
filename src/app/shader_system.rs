//! Pluggable shader system
//!
//! Shaders register once, receive their per-frame data through downcasting,
//! and draw in registration order inside a shared render pass.

use std::collections::HashMap;
use wgpu::{Device, Queue, RenderPass, TextureFormat};

/// Trait that all shaders must implement
pub trait Shader: Send + Sync {
    /// Returns the shader's unique name
    fn name(&self) -> &str;

    /// Creates GPU resources for a render target of the given format and size
    fn init(&mut self, device: &Device, format: TextureFormat, target_size: [f32; 2]);

    /// Begins a new frame, uploading whatever was queued since the last one
    fn begin_frame(&mut self, device: &Device, queue: &Queue);

    /// Renders the shader's contents to the given render pass
    fn render<'rpass>(&'rpass self, rpass: &mut RenderPass<'rpass>);

    /// Ends the frame, allowing cleanup
    fn end_frame(&mut self);

    /// Allows downcasting to concrete types
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Registry for managing shaders
pub struct ShaderRegistry {
    shaders: HashMap<String, Box<dyn Shader>>,
    render_order: Vec<String>,
}

impl ShaderRegistry {
    /// Creates a new empty shader registry
    pub fn new() -> Self {
        Self {
            shaders: HashMap::new(),
            render_order: Vec::new(),
        }
    }

    /// Registers a shader with the registry
    ///
    /// Shaders are rendered in the order they are registered. Registering a
    /// second shader under an existing name replaces the first.
    pub fn register(&mut self, shader: Box<dyn Shader>) {
        let name = shader.name().to_string();
        if self.shaders.insert(name.clone(), shader).is_none() {
            self.render_order.push(name);
        }
    }

    /// Initializes all registered shaders
    pub fn init_all(&mut self, device: &Device, format: TextureFormat, target_size: [f32; 2]) {
        for shader in self.shaders.values_mut() {
            shader.init(device, format, target_size);
        }
    }

    /// Gets a mutable reference to a shader by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Shader + '_)> {
        if let Some(shader) = self.shaders.get_mut(name) {
            Some(shader.as_mut())
        } else {
            None
        }
    }

    /// Gets a shader by name, downcast to its concrete type
    pub fn get_typed_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_mut(name)
            .and_then(|shader| shader.as_any_mut().downcast_mut::<T>())
    }

    /// Shader names in render order
    pub fn names(&self) -> &[String] {
        &self.render_order
    }

    /// Begins a new frame for all shaders
    pub fn begin_frame(&mut self, device: &Device, queue: &Queue) {
        for shader in self.shaders.values_mut() {
            shader.begin_frame(device, queue);
        }
    }

    /// Renders all shaders in registration order
    pub fn render_all<'rpass>(&'rpass self, rpass: &mut RenderPass<'rpass>) {
        for name in &self.render_order {
            if let Some(shader) = self.shaders.get(name) {
                shader.render(rpass);
            }
        }
    }

    /// Ends the frame for all shaders
    pub fn end_frame(&mut self) {
        for shader in self.shaders.values_mut() {
            shader.end_frame();
        }
    }
}

impl Default for ShaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop {
        name: &'static str,
        frames_ended: u32,
    }

    impl Shader for Noop {
        fn name(&self) -> &str {
            self.name
        }

        fn init(&mut self, _device: &Device, _format: TextureFormat, _target_size: [f32; 2]) {}

        fn begin_frame(&mut self, _device: &Device, _queue: &Queue) {}

        fn render<'rpass>(&'rpass self, _rpass: &mut RenderPass<'rpass>) {}

        fn end_frame(&mut self) {
            self.frames_ended += 1;
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    fn noop(name: &'static str) -> Box<Noop> {
        Box::new(Noop {
            name,
            frames_ended: 0,
        })
    }

    #[test]
    fn test_render_order_follows_registration() {
        let mut registry = ShaderRegistry::new();
        registry.register(noop("background"));
        registry.register(noop("rect"));
        registry.register(noop("background"));

        assert_eq!(registry.names(), ["background", "rect"]);
    }

    #[test]
    fn test_typed_lookup() {
        let mut registry = ShaderRegistry::new();
        registry.register(noop("rect"));
        registry.end_frame();

        let shader = registry.get_typed_mut::<Noop>("rect").unwrap();
        assert_eq!(shader.frames_ended, 1);
        assert!(registry.get_typed_mut::<Noop>("missing").is_none());
    }
}
