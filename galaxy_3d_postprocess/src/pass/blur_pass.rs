/// Separable blur pass.
///
/// Wraps a full-screen blur kernel with the amount/denominator convention:
/// the kernel's `amount` uniform always holds `amount / denominator`,
/// independent of the target resolution. Direction is baked into the kernel
/// (see `effects::blur_horizontal` / `effects::blur_vertical`).

use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::renderer::{EffectKernel, RenderTarget, Renderer, UniformValue};
use super::{Pass, PassOptions, ResizePolicy, ShaderPass};

/// Blur configuration
#[derive(Debug, Clone)]
pub struct BlurDesc {
    /// Kernel tap count, baked in as a define
    pub size: u32,
    /// Blur strength before the denominator is applied
    pub amount: f32,
}

impl Default for BlurDesc {
    fn default() -> Self {
        Self {
            size: 9,
            amount: 9.0,
        }
    }
}

pub struct BlurPass {
    inner: ShaderPass,
    amount: f32,
    denominator: f32,
}

impl BlurPass {
    pub(crate) fn new(
        renderer: &Arc<Mutex<dyn Renderer>>,
        kernel: &EffectKernel,
        desc: &BlurDesc,
    ) -> Result<Self> {
        let inner = ShaderPass::new(renderer, kernel, ResizePolicy::None)?;
        let mut pass = Self {
            inner,
            amount: desc.amount,
            denominator: 1000.0,
        };
        pass.sync_amount();
        Ok(pass)
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Get a kernel uniform of the wrapped shader pass
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.inner.uniform(name)
    }

    pub fn set_amount(&mut self, amount: f32) {
        self.amount = amount;
        self.sync_amount();
    }

    fn sync_amount(&mut self) {
        self.inner
            .set_uniform("amount", UniformValue::Float(self.amount / self.denominator));
    }
}

impl Pass for BlurPass {
    fn options(&self) -> &PassOptions {
        self.inner.options()
    }

    fn options_mut(&mut self) -> &mut PassOptions {
        self.inner.options_mut()
    }

    fn set_size(&mut self, _width: u32, _height: u32, _pixel_ratio: f32) {
        self.sync_amount();
    }

    fn execute(
        &mut self,
        renderer: &mut dyn Renderer,
        write: &Arc<dyn RenderTarget>,
        read: &Arc<dyn RenderTarget>,
        delta: f32,
        mask_active: bool,
    ) -> Result<()> {
        self.inner.execute(renderer, write, read, delta, mask_active)
    }

    fn as_blur_pass(&self) -> Option<&BlurPass> {
        Some(self)
    }

    fn as_blur_pass_mut(&mut self) -> Option<&mut BlurPass> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "blur_pass_tests.rs"]
mod tests;
