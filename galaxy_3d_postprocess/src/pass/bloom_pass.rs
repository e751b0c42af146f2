/// Bloom pass.
///
/// Drives the backend's bloom kernel (bright-pass, mip blur chain, and
/// composite all live behind the kernel) and blends the result additively
/// over the chain's current frame. The input can be redirected to a
/// separately rendered target so only layer-tagged objects bloom; the
/// facade owns that separate render.

use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::fx_err;
use crate::renderer::{
    EffectKernel, Effect, LayerMask, RenderTarget, Renderer, StateGuard, UniformValue,
};
use super::{Pass, PassOptions};

/// Bloom configuration
#[derive(Debug, Clone)]
pub struct BloomDesc {
    /// Additive blend strength
    pub strength: f32,
    /// Blur radius across the mip chain
    pub radius: f32,
    /// Luminance threshold for the bright pass
    pub threshold: f32,
}

impl Default for BloomDesc {
    fn default() -> Self {
        Self {
            strength: 1.0,
            radius: 0.5,
            threshold: 0.5,
        }
    }
}

pub struct BloomPass {
    options: PassOptions,
    effect: Box<dyn Effect>,
    /// When set, the facade renders layer-tagged objects into a dedicated
    /// target each frame and this pass reads from it instead of the chain
    pub needs_separate_render: bool,
    /// Layers selected for the separate render
    pub layers: LayerMask,
    read_buffer: Option<Arc<dyn RenderTarget>>,
}

impl BloomPass {
    /// Compile the bloom kernel at the given logical size
    pub fn new(
        renderer: &Arc<Mutex<dyn Renderer>>,
        width: u32,
        height: u32,
        desc: &BloomDesc,
    ) -> Result<Self> {
        // The kernel halves the resolution for its bright target and largest
        // mip, which makes light bleeding very visible. Hand it twice the
        // resolution to minimize that.
        let kernel = EffectKernel::new("bloom")
            .uniform("t_diffuse", UniformValue::Texture(None))
            .uniform(
                "resolution",
                UniformValue::Vec2([(width * 2) as f32, (height * 2) as f32]),
            )
            .uniform("strength", desc.strength)
            .uniform("radius", desc.radius)
            .uniform("threshold", desc.threshold)
            .uniform("smooth_width", 0.01);
        let effect = renderer
            .lock()
            .map_err(|_| fx_err!("galaxy3d::BloomPass", "Renderer lock poisoned"))?
            .create_effect(&kernel)?;
        Ok(Self {
            options: PassOptions {
                needs_swap: false,
                ..PassOptions::default()
            },
            effect,
            needs_separate_render: false,
            layers: LayerMask::default(),
            read_buffer: None,
        })
    }

    /// Get a kernel uniform
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.effect.uniform(name)
    }

    // Parameters

    pub fn strength(&self) -> f32 {
        self.effect.uniform("strength").and_then(|u| u.as_float()).unwrap_or(0.0)
    }

    pub fn set_strength(&mut self, value: f32) {
        self.effect.set_uniform("strength", UniformValue::Float(value));
    }

    pub fn radius(&self) -> f32 {
        self.effect.uniform("radius").and_then(|u| u.as_float()).unwrap_or(0.0)
    }

    pub fn set_radius(&mut self, value: f32) {
        self.effect.set_uniform("radius", UniformValue::Float(value));
    }

    pub fn threshold(&self) -> f32 {
        self.effect.uniform("threshold").and_then(|u| u.as_float()).unwrap_or(0.0)
    }

    pub fn set_threshold(&mut self, value: f32) {
        self.effect.set_uniform("threshold", UniformValue::Float(value));
    }

    pub fn smooth_width(&self) -> f32 {
        self.effect.uniform("smooth_width").and_then(|u| u.as_float()).unwrap_or(0.0)
    }

    pub fn set_smooth_width(&mut self, value: f32) {
        self.effect.set_uniform("smooth_width", UniformValue::Float(value));
    }

    /// Input override; None reads from the chain's read buffer
    pub fn read_buffer(&self) -> Option<&Arc<dyn RenderTarget>> {
        self.read_buffer.as_ref()
    }

    pub fn set_read_buffer(&mut self, buffer: Option<Arc<dyn RenderTarget>>) {
        self.read_buffer = buffer;
    }
}

impl Pass for BloomPass {
    fn options(&self) -> &PassOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut PassOptions {
        &mut self.options
    }

    fn set_size(&mut self, width: u32, height: u32, _pixel_ratio: f32) {
        // Same resolution doubling as in the constructor.
        self.effect.set_uniform(
            "resolution",
            UniformValue::Vec2([(width * 2) as f32, (height * 2) as f32]),
        );
    }

    fn execute(
        &mut self,
        renderer: &mut dyn Renderer,
        _write: &Arc<dyn RenderTarget>,
        read: &Arc<dyn RenderTarget>,
        _delta: f32,
        mask_active: bool,
    ) -> Result<()> {
        let mut guard = StateGuard::new(renderer);
        guard.set_auto_clear(false);
        guard.set_clear_color([0.0, 0.0, 0.0, 0.0]);

        // The kernel's internal bright-pass and mip targets must not be
        // confined by an active mask; only the final blend honors it.
        if mask_active {
            guard.set_stencil_test(false);
        }

        let source = self
            .read_buffer
            .clone()
            .unwrap_or_else(|| read.clone());
        self.effect.set_uniform(
            "t_diffuse",
            UniformValue::Texture(Some(source.texture())),
        );

        if mask_active {
            guard.set_stencil_test(true);
        }

        // Blend additively over the input frame; never clear it away.
        if self.options.render_to_screen {
            guard.render_effect(&*self.effect, None, false)
        } else {
            guard.render_effect(&*self.effect, Some(read), false)
        }
    }

    fn dispose(&mut self) {
        self.read_buffer = None;
    }

    fn as_bloom_pass(&self) -> Option<&BloomPass> {
        Some(self)
    }

    fn as_bloom_pass_mut(&mut self) -> Option<&mut BloomPass> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "bloom_pass_tests.rs"]
mod tests;
