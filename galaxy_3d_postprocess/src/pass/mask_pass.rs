/// Stencil mask passes.
///
/// `MaskPass` draws a scene into both pooled buffers' stencil attachments
/// (color writes off), establishing the region later passes are confined
/// to. `ClearMaskPass` ends that region. The composer reacts to the pass
/// *kind*, so these two are the only places mask state can change.

use std::sync::Arc;
use crate::error::Result;
use crate::renderer::{Camera, RenderTarget, Renderer, Scene, StencilFunc, StencilOp};
use super::{Pass, PassKind, PassOptions};

/// Begins a stencil-masked region
pub struct MaskPass {
    options: PassOptions,
    scene: Arc<dyn Scene>,
    camera: Arc<dyn Camera>,
    /// Invert the mask: later passes draw *outside* the scene's coverage
    pub inverse: bool,
}

impl MaskPass {
    pub fn new(scene: Arc<dyn Scene>, camera: Arc<dyn Camera>) -> Self {
        Self {
            options: PassOptions {
                clear: true,
                needs_swap: false,
                ..PassOptions::default()
            },
            scene,
            camera,
            inverse: false,
        }
    }
}

impl Pass for MaskPass {
    fn options(&self) -> &PassOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut PassOptions {
        &mut self.options
    }

    fn kind(&self) -> PassKind {
        PassKind::MaskPush
    }

    fn execute(
        &mut self,
        renderer: &mut dyn Renderer,
        write: &Arc<dyn RenderTarget>,
        read: &Arc<dyn RenderTarget>,
        _delta: f32,
        _mask_active: bool,
    ) -> Result<()> {
        let (write_value, clear_value) = if self.inverse { (0, 1) } else { (1, 0) };

        // Draw the mask scene into the stencil of both buffers, color writes off.
        renderer.set_color_write(false);
        renderer.set_stencil_test(true);
        renderer.stencil_op(StencilOp::Replace, StencilOp::Replace, StencilOp::Replace);
        renderer.stencil_func(StencilFunc::Always, write_value, 0xffff_ffff);

        renderer.clear_stencil(Some(read), clear_value)?;
        renderer.clear_stencil(Some(write), clear_value)?;
        renderer.render_scene(&*self.scene, &*self.camera, Some(read), self.options.clear)?;
        renderer.render_scene(&*self.scene, &*self.camera, Some(write), self.options.clear)?;

        // Confine subsequent draws to the masked region.
        renderer.set_color_write(true);
        renderer.stencil_func(StencilFunc::Equal, 1, 0xffff_ffff);
        renderer.stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Keep);
        Ok(())
    }
}

/// Ends the stencil-masked region
pub struct ClearMaskPass {
    options: PassOptions,
}

impl ClearMaskPass {
    pub fn new() -> Self {
        Self {
            options: PassOptions {
                needs_swap: false,
                ..PassOptions::default()
            },
        }
    }
}

impl Default for ClearMaskPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for ClearMaskPass {
    fn options(&self) -> &PassOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut PassOptions {
        &mut self.options
    }

    fn kind(&self) -> PassKind {
        PassKind::MaskPop
    }

    fn execute(
        &mut self,
        renderer: &mut dyn Renderer,
        _write: &Arc<dyn RenderTarget>,
        _read: &Arc<dyn RenderTarget>,
        _delta: f32,
        _mask_active: bool,
    ) -> Result<()> {
        renderer.set_stencil_test(false);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mask_pass_tests.rs"]
mod tests;
