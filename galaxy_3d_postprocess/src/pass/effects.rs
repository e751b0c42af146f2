/// Effect pass factories.
///
/// Every single-draw effect is a configured [`ShaderPass`] over a
/// backend-provided kernel; these factories hold the per-effect wiring
/// (kernel name, defines, initial uniforms, resize policy) that the
/// original effects baked into subclasses.

use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::renderer::{EffectKernel, Renderer, UniformValue};
use super::{BlurDesc, BlurPass, ResizePolicy, ShaderPass};

/// FXAA configuration
#[derive(Debug, Clone)]
pub struct FxaaDesc {
    /// FXAA quality preset baked in as a define
    pub quality: u32,
    /// Sub-pixel aliasing removal amount
    pub subpix: f32,
    /// Minimum local contrast required to apply the algorithm
    pub edge_threshold: f32,
    /// Darkness threshold below which edges are ignored
    pub edge_threshold_min: f32,
}

impl Default for FxaaDesc {
    fn default() -> Self {
        Self {
            quality: 12,
            subpix: 0.75,
            edge_threshold: 0.125,
            edge_threshold_min: 0.0625,
        }
    }
}

/// Plain copy of the read buffer; also used by the composer for the
/// stencil-correction step
pub fn copy(renderer: &Arc<Mutex<dyn Renderer>>) -> Result<ShaderPass> {
    let kernel = EffectKernel::new("copy").uniform("t_diffuse", UniformValue::Texture(None));
    ShaderPass::new(renderer, &kernel, ResizePolicy::None)
}

/// FXAA antialiasing pass
pub fn fxaa(renderer: &Arc<Mutex<dyn Renderer>>, desc: &FxaaDesc) -> Result<ShaderPass> {
    let kernel = EffectKernel::new("fxaa")
        .define("FXAA_QUALITY_PRESET", desc.quality)
        .uniform("t_diffuse", UniformValue::Texture(None))
        .uniform("resolution", UniformValue::Vec2([1.0 / 256.0, 1.0 / 256.0]))
        .uniform("subpix", desc.subpix)
        .uniform("edge_threshold", desc.edge_threshold)
        .uniform("edge_threshold_min", desc.edge_threshold_min);
    ShaderPass::new(
        renderer,
        &kernel,
        ResizePolicy::InverseDeviceResolution {
            uniform: "resolution",
        },
    )
}

/// SMAA antialiasing pass
///
/// The area/search lookup tables are compiled into the backend kernel.
pub fn smaa(renderer: &Arc<Mutex<dyn Renderer>>) -> Result<ShaderPass> {
    let kernel = EffectKernel::new("smaa")
        .uniform("t_diffuse", UniformValue::Texture(None))
        .uniform("resolution", UniformValue::Vec2([1.0 / 256.0, 1.0 / 256.0]));
    ShaderPass::new(
        renderer,
        &kernel,
        ResizePolicy::InverseDeviceResolution {
            uniform: "resolution",
        },
    )
}

/// Noise-modulated vignette pass
///
/// The `t_noise` slot is left unbound; callers provide a library-owned
/// noise texture.
pub fn vignette(renderer: &Arc<Mutex<dyn Renderer>>, amount: f32) -> Result<ShaderPass> {
    let kernel = EffectKernel::new("vignette")
        .uniform("t_diffuse", UniformValue::Texture(None))
        .uniform("t_noise", UniformValue::Texture(None))
        .uniform("resolution", UniformValue::Vec2([256.0, 256.0]))
        .uniform("amount", amount);
    ShaderPass::new(
        renderer,
        &kernel,
        ResizePolicy::DeviceResolution {
            uniform: "resolution",
        },
    )
}

/// Resolution-reduction (pixelation) pass
pub fn resolution(renderer: &Arc<Mutex<dyn Renderer>>) -> Result<ShaderPass> {
    let kernel = EffectKernel::new("resolution")
        .uniform("t_diffuse", UniformValue::Texture(None))
        .uniform("t_noise", UniformValue::Texture(None))
        .uniform("size", UniformValue::Vec2([0.0, 0.0]))
        .uniform("amount", 1.0);
    ShaderPass::new(
        renderer,
        &kernel,
        ResizePolicy::LogicalResolution { uniform: "size" },
    )
}

/// Horizontal separable blur pass
pub fn blur_horizontal(renderer: &Arc<Mutex<dyn Renderer>>, desc: &BlurDesc) -> Result<BlurPass> {
    let kernel = EffectKernel::new("blur_horizontal")
        .define("KERNEL_SIZE", desc.size)
        .uniform("t_diffuse", UniformValue::Texture(None))
        .uniform("amount", 1.0 / 512.0);
    BlurPass::new(renderer, &kernel, desc)
}

/// Vertical separable blur pass
pub fn blur_vertical(renderer: &Arc<Mutex<dyn Renderer>>, desc: &BlurDesc) -> Result<BlurPass> {
    let kernel = EffectKernel::new("blur_vertical")
        .define("KERNEL_SIZE", desc.size)
        .uniform("t_diffuse", UniformValue::Texture(None))
        .uniform("amount", 1.0 / 512.0);
    BlurPass::new(renderer, &kernel, desc)
}

#[cfg(test)]
#[path = "effects_tests.rs"]
mod tests;
