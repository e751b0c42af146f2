/// Scene graph handles - opaque collaborators owned by the caller
///
/// Scene and camera construction belongs entirely to the external rendering
/// library; the pipeline only forwards these handles into
/// `Renderer::render_scene`. The one piece of camera state the pipeline
/// touches is the layer mask, used by the facade to render bloom-tagged
/// objects into a separate target.

use bitflags::bitflags;

bitflags! {
    /// Scene-graph layer membership mask
    ///
    /// Objects and cameras carry a layer mask; a render only draws objects
    /// whose mask intersects the camera's.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LayerMask: u32 {
        /// The default layer every object starts on
        const DEFAULT = 1 << 0;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::DEFAULT
    }
}

impl LayerMask {
    /// Mask selecting a single layer by index (0..32)
    pub fn layer(index: u32) -> Self {
        LayerMask::from_bits_retain(1 << index)
    }
}

/// Opaque scene graph handle
///
/// The pipeline never inspects scene contents; it only submits the handle
/// back to the renderer that understands it.
pub trait Scene: Send + Sync {}

/// Opaque camera handle
///
/// Implementations are internally synchronized: the layer mask setter takes
/// `&self` so the facade can swap masks on a shared handle mid-frame.
pub trait Camera: Send + Sync {
    /// Get the camera's layer mask
    fn layers(&self) -> LayerMask;

    /// Replace the camera's layer mask
    fn set_layers(&self, layers: LayerMask);
}
