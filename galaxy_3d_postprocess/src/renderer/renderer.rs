/// Renderer trait - the narrow interface to the external rendering library

use std::sync::Arc;
use std::sync::Mutex;
use rustc_hash::FxHashMap;
use winit::window::Window;

use crate::error::{Error, Result};
use crate::renderer::{Effect, EffectKernel, Camera, RenderTarget, Scene, TargetDesc};

// ============================================================================
// Common types
// ============================================================================

/// Stencil comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Stencil buffer operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    Increment,
    Decrement,
    Invert,
}

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable validation/debug layers
    pub enable_validation: bool,
    /// Application name
    pub app_name: String,
    /// Application version (major, minor, patch)
    pub app_version: (u32, u32, u32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            app_name: "Galaxy3D Application".to_string(),
            app_version: (1, 0, 0),
        }
    }
}

/// Renderer statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct RendererStats {
    /// Number of draw calls this frame
    pub draw_calls: u32,
    /// Number of triangles drawn this frame
    pub triangles: u32,
    /// GPU memory used (bytes)
    pub gpu_memory_used: u64,
}

// ============================================================================
// Renderer trait
// ============================================================================

/// Main renderer trait
///
/// The pipeline's only boundary to the GPU. A destination of `None` in the
/// submission methods means "draw to the visible screen".
///
/// Clear color, auto-clear, color write, and stencil configuration are a
/// single mutable register shared by every pass in sequence: a pass that
/// changes them must restore them before returning (see
/// [`StateGuard`](crate::renderer::StateGuard)).
pub trait Renderer: Send + Sync {
    /// Create an off-screen render target
    ///
    /// # Arguments
    ///
    /// * `desc` - Render target descriptor
    ///
    /// # Errors
    ///
    /// An allocation refusal (unsupported format, out of memory) is a fatal
    /// construction-time error; no retry is attempted.
    fn create_render_target(&mut self, desc: TargetDesc) -> Result<Arc<dyn RenderTarget>>;

    /// Compile an effect kernel into a full-screen effect instance
    ///
    /// # Errors
    ///
    /// Fails when the library does not provide the kernel's named shader.
    fn create_effect(&mut self, kernel: &EffectKernel) -> Result<Box<dyn Effect>>;

    /// Draw a scene through a camera into a target (or the screen)
    ///
    /// # Arguments
    ///
    /// * `scene` - Opaque scene graph handle
    /// * `camera` - Opaque camera handle
    /// * `destination` - Target buffer, or None for the visible screen
    /// * `clear` - Whether to clear the destination first
    fn render_scene(
        &mut self,
        scene: &dyn Scene,
        camera: &dyn Camera,
        destination: Option<&Arc<dyn RenderTarget>>,
        clear: bool,
    ) -> Result<()>;

    /// Draw a full-screen effect into a target (or the screen)
    ///
    /// # Arguments
    ///
    /// * `effect` - Compiled effect instance with its current uniforms
    /// * `destination` - Target buffer, or None for the visible screen
    /// * `clear` - Whether to clear the destination first
    fn render_effect(
        &mut self,
        effect: &dyn Effect,
        destination: Option<&Arc<dyn RenderTarget>>,
        clear: bool,
    ) -> Result<()>;

    /// Clear a target's color attachment (or the screen)
    fn clear_target(&mut self, destination: Option<&Arc<dyn RenderTarget>>) -> Result<()>;

    /// Clear a target's stencil attachment to `value`
    fn clear_stencil(
        &mut self,
        destination: Option<&Arc<dyn RenderTarget>>,
        value: u32,
    ) -> Result<()>;

    /// Clear the current depth buffer
    fn clear_depth(&mut self) -> Result<()>;

    /// Logical drawing size in window units (device pixels = size * pixel ratio)
    fn drawing_size(&self) -> (u32, u32);

    /// Device pixel ratio of the drawing surface
    fn pixel_ratio(&self) -> f32;

    /// Current clear color as RGBA
    fn clear_color(&self) -> [f32; 4];

    /// Set the clear color as RGBA
    fn set_clear_color(&mut self, color: [f32; 4]);

    /// Whether the renderer clears the destination before every draw
    fn auto_clear(&self) -> bool;

    /// Enable or disable automatic clearing
    fn set_auto_clear(&mut self, auto_clear: bool);

    /// Enable or disable color channel writes
    fn set_color_write(&mut self, enabled: bool);

    /// Enable or disable the stencil test
    fn set_stencil_test(&mut self, enabled: bool);

    /// Set the stencil comparison function, reference value, and read mask
    fn stencil_func(&mut self, func: StencilFunc, reference: u32, mask: u32);

    /// Set the stencil operations for fail / depth-fail / pass
    fn stencil_op(&mut self, fail: StencilOp, z_fail: StencilOp, z_pass: StencilOp);

    /// Get statistics about the renderer
    fn stats(&self) -> RendererStats;
}

// ============================================================================
// Plugin system for registering renderer backends
// ============================================================================

/// Renderer plugin factory function type
type RendererPluginFactory =
    Box<dyn Fn(&Window, Config) -> Result<Arc<Mutex<dyn Renderer>>> + Send + Sync>;

/// Plugin registry for renderer backends
pub struct RendererPluginRegistry {
    plugins: FxHashMap<&'static str, RendererPluginFactory>,
}

impl RendererPluginRegistry {
    /// Create a new plugin registry
    fn new() -> Self {
        Self {
            plugins: FxHashMap::default(),
        }
    }

    /// Register a plugin
    ///
    /// # Arguments
    ///
    /// * `name` - Plugin name (e.g., "vulkan")
    /// * `factory` - Factory function to create the plugin
    pub fn register_plugin<F>(&mut self, name: &'static str, factory: F)
    where
        F: Fn(&Window, Config) -> Result<Arc<Mutex<dyn Renderer>>> + Send + Sync + 'static,
    {
        self.plugins.insert(name, Box::new(factory));
    }

    /// Whether a plugin with this name has been registered
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Number of registered plugins
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Create a renderer using a registered plugin
    ///
    /// # Arguments
    ///
    /// * `plugin_name` - Name of the plugin to use
    /// * `window` - Window to render to
    /// * `config` - Renderer configuration
    ///
    /// # Returns
    ///
    /// A shared, thread-safe renderer instance
    pub fn create_renderer(
        &self,
        plugin_name: &str,
        window: &Window,
        config: Config,
    ) -> Result<Arc<Mutex<dyn Renderer>>> {
        self.plugins
            .get(plugin_name)
            .ok_or_else(|| {
                Error::InitializationFailed(format!("Plugin '{}' not found", plugin_name))
            })?(window, config)
    }
}

static RENDERER_REGISTRY: Mutex<Option<RendererPluginRegistry>> = Mutex::new(None);

/// Get the global renderer plugin registry
pub fn renderer_plugin_registry() -> &'static Mutex<Option<RendererPluginRegistry>> {
    // Initialize on first access
    let mut registry = RENDERER_REGISTRY.lock().unwrap();
    if registry.is_none() {
        *registry = Some(RendererPluginRegistry::new());
    }
    drop(registry);
    &RENDERER_REGISTRY
}

/// Register a renderer plugin in the global registry
///
/// # Arguments
///
/// * `name` - Plugin name
/// * `factory` - Factory function
pub fn register_renderer_plugin<F>(name: &'static str, factory: F)
where
    F: Fn(&Window, Config) -> Result<Arc<Mutex<dyn Renderer>>> + Send + Sync + 'static,
{
    renderer_plugin_registry()
        .lock()
        .unwrap()
        .as_mut()
        .unwrap()
        .register_plugin(name, factory);
}
