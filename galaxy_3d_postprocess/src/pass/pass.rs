/// Pass trait - the contract every effect stage satisfies
///
/// The composer drives passes uniformly: it skips disabled passes, feeds
/// each executed pass the current read/write buffers, and decides swaps
/// from the pass options. Mask state transitions are driven purely by the
/// pass *kind*, a closed enum, so the composer's mask handling is a total
/// match rather than a chain of type checks.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::renderer::{RenderTarget, Renderer};
use super::{BloomPass, BlurPass, RenderPass, ShaderPass, TiltShiftPass};

/// Kind of a pass, as seen by the composer's mask gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Ordinary pass: no effect on mask state
    Normal,
    /// Begins a stencil-masked region affecting later passes this frame
    MaskPush,
    /// Ends the stencil-masked region
    MaskPop,
}

/// Per-pass scheduling flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOptions {
    /// Disabled passes are skipped entirely during the frame walk
    pub enabled: bool,
    /// Whether the buffer roles swap after this pass executes
    pub needs_swap: bool,
    /// Whether the pass clears its destination before drawing
    pub clear: bool,
    /// Whether the pass draws to the visible screen instead of the write buffer
    pub render_to_screen: bool,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            needs_swap: true,
            clear: false,
            render_to_screen: false,
        }
    }
}

/// Unit-of-work contract driven by the composer
///
/// Concrete passes must implement `execute`; the default body fails with a
/// programmer error so an unspecialized pass can never silently draw.
pub trait Pass: Send + Sync {
    /// Scheduling flags for this pass
    fn options(&self) -> &PassOptions;

    /// Mutable scheduling flags (enable/disable, render-to-screen routing)
    fn options_mut(&mut self) -> &mut PassOptions;

    /// Kind of this pass for mask-state transitions
    fn kind(&self) -> PassKind {
        PassKind::Normal
    }

    /// Reconfigure resolution-dependent state
    ///
    /// Called when the pass is attached to a composer and on every composer
    /// resize, regardless of the enabled flag. Safe to call before the
    /// first execute. Default: no-op.
    ///
    /// # Arguments
    ///
    /// * `width` - Logical width in window units
    /// * `height` - Logical height in window units
    /// * `pixel_ratio` - Device pixels per window unit
    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        let _ = (width, height, pixel_ratio);
    }

    /// Perform this pass's GPU work
    ///
    /// Reads from `read` and writes into `write` (or the screen when
    /// `render_to_screen` is set). A pass that mutates shared renderer
    /// state (clear color, auto-clear, stencil test) must restore it before
    /// returning; see [`StateGuard`](crate::renderer::StateGuard).
    ///
    /// # Errors
    ///
    /// The default body fails with `Error::NotImplemented` - concrete pass
    /// types must override this.
    fn execute(
        &mut self,
        renderer: &mut dyn Renderer,
        write: &Arc<dyn RenderTarget>,
        read: &Arc<dyn RenderTarget>,
        delta: f32,
        mask_active: bool,
    ) -> Result<()> {
        let _ = (renderer, write, read, delta, mask_active);
        Err(Error::NotImplemented(
            "Pass::execute must be implemented by the concrete pass type".to_string(),
        ))
    }

    /// Release pass-owned resources. Default: no-op.
    fn dispose(&mut self) {}

    // ===== CONVENIENCE ACCESSORS =====

    /// Whether this pass participates in the frame walk
    fn enabled(&self) -> bool {
        self.options().enabled
    }

    /// Whether the buffer roles swap after this pass
    fn needs_swap(&self) -> bool {
        self.options().needs_swap
    }

    /// Whether this pass draws to the visible screen
    fn render_to_screen(&self) -> bool {
        self.options().render_to_screen
    }

    // ===== DOWNCASTS =====

    /// Downcast to ShaderPass (returns None for other types)
    fn as_shader_pass(&self) -> Option<&ShaderPass> {
        None
    }

    /// Downcast to mutable ShaderPass (returns None for other types)
    fn as_shader_pass_mut(&mut self) -> Option<&mut ShaderPass> {
        None
    }

    /// Downcast to RenderPass (returns None for other types)
    fn as_render_pass(&self) -> Option<&RenderPass> {
        None
    }

    /// Downcast to mutable RenderPass (returns None for other types)
    fn as_render_pass_mut(&mut self) -> Option<&mut RenderPass> {
        None
    }

    /// Downcast to BlurPass (returns None for other types)
    fn as_blur_pass(&self) -> Option<&BlurPass> {
        None
    }

    /// Downcast to mutable BlurPass (returns None for other types)
    fn as_blur_pass_mut(&mut self) -> Option<&mut BlurPass> {
        None
    }

    /// Downcast to TiltShiftPass (returns None for other types)
    fn as_tilt_shift_pass(&self) -> Option<&TiltShiftPass> {
        None
    }

    /// Downcast to mutable TiltShiftPass (returns None for other types)
    fn as_tilt_shift_pass_mut(&mut self) -> Option<&mut TiltShiftPass> {
        None
    }

    /// Downcast to BloomPass (returns None for other types)
    fn as_bloom_pass(&self) -> Option<&BloomPass> {
        None
    }

    /// Downcast to mutable BloomPass (returns None for other types)
    fn as_bloom_pass_mut(&mut self) -> Option<&mut BloomPass> {
        None
    }
}

#[cfg(test)]
#[path = "pass_tests.rs"]
mod tests;
