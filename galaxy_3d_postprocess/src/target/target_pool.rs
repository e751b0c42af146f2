/// Ping-pong render target pool.
///
/// Owns exactly two same-sized, same-format color buffers and the logical
/// "read"/"write" roles layered over them. Swapping exchanges the roles,
/// never the pixels. Both buffers are created from one shared descriptor,
/// so format and filtering always match.

use std::sync::Arc;
use crate::error::Result;
use crate::renderer::{RenderTarget, Renderer, TargetDesc};

/// The two pooled buffers and their current role assignment.
///
/// Invariant: `read` and `write` always refer to two distinct buffers.
pub struct TargetPool {
    read: Arc<dyn RenderTarget>,
    write: Arc<dyn RenderTarget>,
    desc: TargetDesc,
}

impl TargetPool {
    /// Allocate both buffers from one descriptor
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses either allocation. This is
    /// fatal; the pool is not constructed.
    pub fn new(renderer: &mut dyn Renderer, desc: TargetDesc) -> Result<Self> {
        let write = renderer.create_render_target(desc.clone())?;
        let read = renderer.create_render_target(desc.clone())?;
        Ok(Self { read, write, desc })
    }

    /// The buffer currently holding the "read" role
    pub fn read(&self) -> &Arc<dyn RenderTarget> {
        &self.read
    }

    /// The buffer currently holding the "write" role
    pub fn write(&self) -> &Arc<dyn RenderTarget> {
        &self.write
    }

    /// The descriptor both buffers were created from
    pub fn desc(&self) -> &TargetDesc {
        &self.desc
    }

    /// Exchange the read and write roles. O(1), no pixels move.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.read, &mut self.write);
    }

    /// Resize both buffers in place, preserving the role assignment
    ///
    /// # Arguments
    ///
    /// * `width` - New width in device pixels
    /// * `height` - New height in device pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses a reallocation; the error
    /// propagates without any retry.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.read.set_size(width, height)?;
        self.write.set_size(width, height)?;
        self.desc.width = width;
        self.desc.height = height;
        Ok(())
    }

    /// Release both buffers
    pub fn dispose(&self) {
        self.read.dispose();
        self.write.dispose();
    }
}

#[cfg(test)]
#[path = "target_pool_tests.rs"]
mod tests;
