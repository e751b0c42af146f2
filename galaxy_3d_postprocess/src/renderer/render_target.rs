/// RenderTarget trait and descriptor - off-screen color buffers

use std::sync::Arc;
use crate::error::Result;
use crate::renderer::{Texture, TextureFormat};

/// Texture filtering mode for a render target's sampled view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Axis-aligned pixel rectangle (device pixels, lower-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Descriptor for creating a render target
///
/// Two targets created from the same descriptor are guaranteed to have
/// matching format and filtering, which is what the ping-pong pool relies on.
#[derive(Debug, Clone)]
pub struct TargetDesc {
    /// Width in device pixels
    pub width: u32,
    /// Height in device pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Minification filter
    pub min_filter: FilterMode,
    /// Magnification filter
    pub mag_filter: FilterMode,
    /// Whether the target carries a stencil attachment (required for mask passes)
    pub stencil_buffer: bool,
}

impl TargetDesc {
    /// Create a descriptor with linear filtering and a stencil attachment
    pub fn new(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            format,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
            stencil_buffer: true,
        }
    }
}

/// Render target trait
///
/// An opaque, owned, resizable, disposable GPU color buffer created by the
/// external rendering library. Implementations are internally synchronized:
/// mutators take `&self` so handles can be shared across the pass list.
pub trait RenderTarget: Send + Sync {
    /// Get the width of the render target in device pixels
    fn width(&self) -> u32;

    /// Get the height of the render target in device pixels
    fn height(&self) -> u32;

    /// Get the pixel format of the render target
    fn format(&self) -> TextureFormat;

    /// Resize the target in place
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the reallocation. This is
    /// fatal for the pipeline; no retry is attempted.
    fn set_size(&self, width: u32, height: u32) -> Result<()>;

    /// Get the sampled view of this target's color attachment
    fn texture(&self) -> Arc<dyn Texture>;

    /// Get the current scissor region (None = scissor test disabled)
    fn scissor(&self) -> Option<Rect2D>;

    /// Set the scissor region (None disables the scissor test)
    fn set_scissor(&self, region: Option<Rect2D>);

    /// Release the GPU memory backing this target
    ///
    /// Must not be called twice in normal operation.
    fn dispose(&self);
}

/// Scale a logical size to device pixels
pub fn device_pixels(width: u32, height: u32, pixel_ratio: f32) -> (u32, u32) {
    (
        (width as f32 * pixel_ratio).round() as u32,
        (height as f32 * pixel_ratio).round() as u32,
    )
}
