/// Scissor passes.
///
/// `ScissorPass` confines every subsequent draw to a rectangle by setting
/// the scissor state on both pooled buffers; `ClearScissorPass` removes it.
/// Neither draws anything itself.

use std::sync::Arc;
use glam::Vec4;
use crate::error::Result;
use crate::renderer::{Rect2D, RenderTarget, Renderer};
use super::{Pass, PassOptions};

/// Scissor rectangle specification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScissorRegion {
    /// Raw rectangle `(x, y, width, height)` in window units with a
    /// lower-left origin, scaled by the pixel ratio at apply time
    Raw(Vec4),
    /// Window rectangle with a top-left origin; flipped against the
    /// renderer's logical height, then scaled by the pixel ratio
    Window {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

impl ScissorRegion {
    /// Resolve to device pixels against the renderer's current size
    fn resolve(&self, renderer: &dyn Renderer) -> Rect2D {
        let (x, y, w, h) = match *self {
            ScissorRegion::Raw(v) => (v.x, v.y, v.z, v.w),
            ScissorRegion::Window {
                x,
                y,
                width,
                height,
            } => {
                let (_, screen_height) = renderer.drawing_size();
                (x, screen_height as f32 - y - height, width, height)
            }
        };
        let ratio = renderer.pixel_ratio();
        Rect2D {
            x: (x * ratio).round() as i32,
            y: (y * ratio).round() as i32,
            width: (w * ratio).round() as u32,
            height: (h * ratio).round() as u32,
        }
    }
}

/// Enables a scissor region on both pooled buffers
pub struct ScissorPass {
    options: PassOptions,
    /// Region to apply; None leaves the buffers untouched
    pub scissor: Option<ScissorRegion>,
}

impl ScissorPass {
    pub fn new(scissor: Option<ScissorRegion>) -> Self {
        Self {
            options: PassOptions {
                needs_swap: false,
                ..PassOptions::default()
            },
            scissor,
        }
    }
}

impl Pass for ScissorPass {
    fn options(&self) -> &PassOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut PassOptions {
        &mut self.options
    }

    fn execute(
        &mut self,
        renderer: &mut dyn Renderer,
        write: &Arc<dyn RenderTarget>,
        read: &Arc<dyn RenderTarget>,
        _delta: f32,
        _mask_active: bool,
    ) -> Result<()> {
        if let Some(region) = self.scissor {
            let rect = region.resolve(renderer);
            read.set_scissor(Some(rect));
            write.set_scissor(Some(rect));
        }
        Ok(())
    }
}

/// Disables the scissor region on both pooled buffers
pub struct ClearScissorPass {
    options: PassOptions,
}

impl ClearScissorPass {
    pub fn new() -> Self {
        Self {
            options: PassOptions {
                needs_swap: false,
                ..PassOptions::default()
            },
        }
    }
}

impl Default for ClearScissorPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for ClearScissorPass {
    fn options(&self) -> &PassOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut PassOptions {
        &mut self.options
    }

    fn execute(
        &mut self,
        _renderer: &mut dyn Renderer,
        write: &Arc<dyn RenderTarget>,
        read: &Arc<dyn RenderTarget>,
        _delta: f32,
        _mask_active: bool,
    ) -> Result<()> {
        read.set_scissor(None);
        write.set_scissor(None);
        Ok(())
    }
}

#[cfg(test)]
#[path = "scissor_pass_tests.rs"]
mod tests;
