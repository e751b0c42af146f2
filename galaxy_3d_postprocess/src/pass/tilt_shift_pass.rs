/// Tilt-shift pass.
///
/// Separable blur whose strength grows with distance from a center band.
/// Runs the kernel twice per frame: horizontally into the write buffer,
/// then vertically back into the read buffer (or the screen), so the chain
/// continues from the read buffer and no swap is needed.

use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::fx_err;
use crate::renderer::{
    EffectKernel, Effect, RenderTarget, Renderer, UniformValue,
};
use super::{Pass, PassOptions};

/// Tilt-shift configuration
#[derive(Debug, Clone)]
pub struct TiltShiftDesc {
    /// Kernel tap count, baked in as a define
    pub size: u32,
    /// Blur radius at the band edge
    pub radius: f32,
    /// Maximum blur radius far from the band (default: radius * 2)
    pub radius_max: Option<f32>,
    /// Band center offset in normalized coordinates
    pub center: f32,
    /// Falloff scale
    pub scale: f32,
}

impl Default for TiltShiftDesc {
    fn default() -> Self {
        Self {
            size: 9,
            radius: 3.0,
            radius_max: None,
            center: 0.0,
            scale: 1024.0,
        }
    }
}

pub struct TiltShiftPass {
    options: PassOptions,
    effect: Box<dyn Effect>,
}

impl TiltShiftPass {
    pub fn new(renderer: &Arc<Mutex<dyn Renderer>>, desc: &TiltShiftDesc) -> Result<Self> {
        let radius_max = desc.radius_max.unwrap_or(desc.radius * 2.0);
        let kernel = EffectKernel::new("tilt_shift")
            .define("KERNEL_SIZE", desc.size)
            .uniform("t_diffuse", UniformValue::Texture(None))
            .uniform("resolution", UniformValue::Vec2([256.0, 256.0]))
            .uniform("direction", UniformValue::Vec2([0.0, 0.0]))
            .uniform("radius", desc.radius)
            .uniform("radius_max", radius_max)
            .uniform("center", desc.center)
            .uniform("scale", desc.scale);
        let effect = renderer
            .lock()
            .map_err(|_| fx_err!("galaxy3d::TiltShiftPass", "Renderer lock poisoned"))?
            .create_effect(&kernel)?;
        Ok(Self {
            options: PassOptions {
                needs_swap: false,
                ..PassOptions::default()
            },
            effect,
        })
    }

    /// Get a kernel uniform
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.effect.uniform(name)
    }

    // Parameters

    pub fn radius(&self) -> f32 {
        self.effect.uniform("radius").and_then(|u| u.as_float()).unwrap_or(0.0)
    }

    pub fn set_radius(&mut self, value: f32) {
        self.effect.set_uniform("radius", UniformValue::Float(value));
    }

    pub fn radius_max(&self) -> f32 {
        self.effect.uniform("radius_max").and_then(|u| u.as_float()).unwrap_or(0.0)
    }

    pub fn set_radius_max(&mut self, value: f32) {
        self.effect.set_uniform("radius_max", UniformValue::Float(value));
    }

    pub fn center(&self) -> f32 {
        self.effect.uniform("center").and_then(|u| u.as_float()).unwrap_or(0.0)
    }

    pub fn set_center(&mut self, value: f32) {
        self.effect.set_uniform("center", UniformValue::Float(value));
    }

    pub fn scale(&self) -> f32 {
        self.effect.uniform("scale").and_then(|u| u.as_float()).unwrap_or(0.0)
    }

    pub fn set_scale(&mut self, value: f32) {
        self.effect.set_uniform("scale", UniformValue::Float(value));
    }
}

impl Pass for TiltShiftPass {
    fn options(&self) -> &PassOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut PassOptions {
        &mut self.options
    }

    fn set_size(&mut self, width: u32, height: u32, _pixel_ratio: f32) {
        self.effect.set_uniform(
            "resolution",
            UniformValue::Vec2([width as f32, height as f32]),
        );
    }

    fn execute(
        &mut self,
        renderer: &mut dyn Renderer,
        write: &Arc<dyn RenderTarget>,
        read: &Arc<dyn RenderTarget>,
        _delta: f32,
        _mask_active: bool,
    ) -> Result<()> {
        // Horizontal step into the write buffer.
        self.effect.set_uniform(
            "t_diffuse",
            UniformValue::Texture(Some(read.texture())),
        );
        self.effect
            .set_uniform("direction", UniformValue::Vec2([1.0, 0.0]));
        renderer.render_effect(&*self.effect, Some(write), self.options.clear)?;

        // Vertical step back into the read buffer, or out to the screen.
        self.effect.set_uniform(
            "t_diffuse",
            UniformValue::Texture(Some(write.texture())),
        );
        self.effect
            .set_uniform("direction", UniformValue::Vec2([0.0, 1.0]));
        if self.options.render_to_screen {
            renderer.render_effect(&*self.effect, None, self.options.clear)
        } else {
            renderer.render_effect(&*self.effect, Some(read), self.options.clear)
        }
    }

    fn as_tilt_shift_pass(&self) -> Option<&TiltShiftPass> {
        Some(self)
    }

    fn as_tilt_shift_pass_mut(&mut self) -> Option<&mut TiltShiftPass> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "tilt_shift_pass_tests.rs"]
mod tests;
