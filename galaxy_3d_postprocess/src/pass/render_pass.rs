/// Scene render pass.
///
/// Draws a caller-supplied scene through a camera into the read buffer so
/// the rest of the chain has a frame to work on. Does not swap: the result
/// lands directly in the buffer the next pass reads.

use std::sync::Arc;
use crate::error::Result;
use crate::renderer::{Camera, RenderTarget, Renderer, RendererStats, Scene, StateGuard};
use super::{Pass, PassOptions};

pub struct RenderPass {
    options: PassOptions,
    scene: Arc<dyn Scene>,
    camera: Arc<dyn Camera>,
    /// Clear color override while this pass draws (None = renderer's current)
    pub clear_color: Option<[f32; 4]>,
    /// Whether to clear the depth buffer before drawing
    pub clear_depth: bool,
    /// Renderer statistics captured after the last draw
    pub info: RendererStats,
}

impl RenderPass {
    pub fn new(scene: Arc<dyn Scene>, camera: Arc<dyn Camera>) -> Self {
        Self {
            options: PassOptions {
                clear: true,
                needs_swap: false,
                ..PassOptions::default()
            },
            scene,
            camera,
            clear_color: None,
            clear_depth: false,
            info: RendererStats::default(),
        }
    }

    /// Replace the scene handle drawn by this pass
    pub fn set_scene(&mut self, scene: Arc<dyn Scene>) {
        self.scene = scene;
    }

    /// Replace the camera handle drawn through
    pub fn set_camera(&mut self, camera: Arc<dyn Camera>) {
        self.camera = camera;
    }
}

impl Pass for RenderPass {
    fn options(&self) -> &PassOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut PassOptions {
        &mut self.options
    }

    fn execute(
        &mut self,
        renderer: &mut dyn Renderer,
        _write: &Arc<dyn RenderTarget>,
        read: &Arc<dyn RenderTarget>,
        _delta: f32,
        _mask_active: bool,
    ) -> Result<()> {
        let mut guard = StateGuard::new(renderer);
        guard.set_auto_clear(false);
        if let Some(color) = self.clear_color {
            guard.set_clear_color(color);
        }
        if self.clear_depth {
            guard.clear_depth()?;
        }

        let destination = if self.options.render_to_screen {
            None
        } else {
            Some(read)
        };
        guard.render_scene(&*self.scene, &*self.camera, destination, self.options.clear)?;
        self.info = guard.stats();
        Ok(())
    }

    fn as_render_pass(&self) -> Option<&RenderPass> {
        Some(self)
    }

    fn as_render_pass_mut(&mut self) -> Option<&mut RenderPass> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "render_pass_tests.rs"]
mod tests;
