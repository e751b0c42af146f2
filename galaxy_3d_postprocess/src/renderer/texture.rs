/// Texture trait and texture format

/// Pixel format for pooled color buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    B8G8R8A8_SRGB,
    B8G8R8A8_UNORM,
    R16G16B16A16_FLOAT,
}

/// Sampled texture view trait
///
/// An opaque handle to the sampled view of a render target or library-owned
/// texture (noise textures, lookup tables, etc.). Implemented by
/// backend-specific texture types. Identity is handle identity: two views
/// are the same texture iff their `Arc`s are pointer-equal.
pub trait Texture: Send + Sync {
    /// Get the width of the texture in pixels
    fn width(&self) -> u32;

    /// Get the height of the texture in pixels
    fn height(&self) -> u32;

    /// Get the pixel format of the texture
    fn format(&self) -> TextureFormat;
}
