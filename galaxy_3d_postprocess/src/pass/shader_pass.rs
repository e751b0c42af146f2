/// Generic full-screen shader pass.
///
/// One configurable pass type covers every single-draw effect: a compiled
/// effect kernel, the name of its input-texture uniform, and a data-driven
/// resize policy describing how the resolution reaches the kernel.
/// Specialized effects are factory functions producing configured instances
/// (see `pass::effects`), not subtypes.

use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::fx_err;
use crate::renderer::{
    device_pixels, EffectKernel, Effect, RenderTarget, Renderer, UniformValue,
};
use super::{Pass, PassOptions};

/// How a shader pass feeds resolution changes into its kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Resolution-independent kernel: set_size is a no-op
    None,
    /// Uniform receives the logical size `(width, height)`
    LogicalResolution { uniform: &'static str },
    /// Uniform receives the device size `(width * ratio, height * ratio)`
    DeviceResolution { uniform: &'static str },
    /// Uniform receives the reciprocal device size `(1/dw, 1/dh)`
    InverseDeviceResolution { uniform: &'static str },
}

/// Full-screen shader pass over one effect kernel
pub struct ShaderPass {
    options: PassOptions,
    effect: Box<dyn Effect>,
    texture_uniform: &'static str,
    resize: ResizePolicy,
}

impl ShaderPass {
    /// Compile `kernel` and wrap it in a pass
    ///
    /// # Errors
    ///
    /// Fails when the backend does not provide the kernel's shader. The
    /// error is fatal; there is nothing to retry.
    pub fn new(
        renderer: &Arc<Mutex<dyn Renderer>>,
        kernel: &EffectKernel,
        resize: ResizePolicy,
    ) -> Result<Self> {
        let effect = renderer
            .lock()
            .map_err(|_| fx_err!("galaxy3d::ShaderPass", "Renderer lock poisoned"))?
            .create_effect(kernel)?;
        Ok(Self {
            options: PassOptions::default(),
            effect,
            texture_uniform: "t_diffuse",
            resize,
        })
    }

    /// Use a different uniform name for the input texture
    pub fn with_texture_uniform(mut self, uniform: &'static str) -> Self {
        self.texture_uniform = uniform;
        self
    }

    /// Name of the backend shader behind this pass
    pub fn shader(&self) -> &str {
        self.effect.shader()
    }

    /// Set a kernel uniform
    pub fn set_uniform(&mut self, name: &str, value: impl Into<UniformValue>) {
        self.effect.set_uniform(name, value.into());
    }

    /// Get a kernel uniform
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.effect.uniform(name)
    }
}

impl Pass for ShaderPass {
    fn options(&self) -> &PassOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut PassOptions {
        &mut self.options
    }

    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        match self.resize {
            ResizePolicy::None => {}
            ResizePolicy::LogicalResolution { uniform } => {
                self.effect
                    .set_uniform(uniform, UniformValue::Vec2([width as f32, height as f32]));
            }
            ResizePolicy::DeviceResolution { uniform } => {
                let (dw, dh) = device_pixels(width, height, pixel_ratio);
                self.effect
                    .set_uniform(uniform, UniformValue::Vec2([dw as f32, dh as f32]));
            }
            ResizePolicy::InverseDeviceResolution { uniform } => {
                let (dw, dh) = device_pixels(width, height, pixel_ratio);
                self.effect.set_uniform(
                    uniform,
                    UniformValue::Vec2([1.0 / dw as f32, 1.0 / dh as f32]),
                );
            }
        }
    }

    fn execute(
        &mut self,
        renderer: &mut dyn Renderer,
        write: &Arc<dyn RenderTarget>,
        read: &Arc<dyn RenderTarget>,
        _delta: f32,
        _mask_active: bool,
    ) -> Result<()> {
        self.effect.set_uniform(
            self.texture_uniform,
            UniformValue::Texture(Some(read.texture())),
        );
        if self.options.render_to_screen {
            renderer.render_effect(&*self.effect, None, self.options.clear)
        } else {
            renderer.render_effect(&*self.effect, Some(write), self.options.clear)
        }
    }

    fn as_shader_pass(&self) -> Option<&ShaderPass> {
        Some(self)
    }

    fn as_shader_pass_mut(&mut self) -> Option<&mut ShaderPass> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "shader_pass_tests.rs"]
mod tests;
