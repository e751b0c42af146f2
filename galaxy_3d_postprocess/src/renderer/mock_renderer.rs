/// Mock renderer for unit tests (no GPU required)
///
/// This mock renderer allows testing the composer, the pass library, and the
/// facade without a real GPU or graphics backend. Every submission and every
/// shared-state change is journaled as a `RenderEvent` so tests can assert
/// on exact buffer routing and state restoration.

#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[cfg(test)]
use rustc_hash::FxHashMap;

#[cfg(test)]
use crate::error::{Error, Result};
#[cfg(test)]
use crate::renderer::{
    Camera, Effect, EffectKernel, FilterMode, LayerMask, Rect2D, RenderTarget, Renderer,
    RendererStats, Scene, StencilFunc, StencilOp, TargetDesc, Texture, TextureFormat,
    UniformValue,
};

// ============================================================================
// Mock Texture
// ============================================================================

#[cfg(test)]
pub struct MockTexture {
    pub label: String,
    size: Mutex<(u32, u32)>,
    format: TextureFormat,
}

#[cfg(test)]
impl MockTexture {
    pub fn new(label: &str, width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            label: label.to_string(),
            size: Mutex::new((width, height)),
            format,
        }
    }

    fn resize(&self, width: u32, height: u32) {
        *self.size.lock().unwrap() = (width, height);
    }
}

#[cfg(test)]
impl Texture for MockTexture {
    fn width(&self) -> u32 {
        self.size.lock().unwrap().0
    }

    fn height(&self) -> u32 {
        self.size.lock().unwrap().1
    }

    fn format(&self) -> TextureFormat {
        self.format
    }
}

// ============================================================================
// Mock RenderTarget
// ============================================================================

#[cfg(test)]
pub struct MockRenderTarget {
    pub label: String,
    texture: Arc<MockTexture>,
    scissor: Mutex<Option<Rect2D>>,
    dispose_count: AtomicUsize,
    fail_resize: AtomicBool,
    #[allow(dead_code)]
    min_filter: FilterMode,
    #[allow(dead_code)]
    mag_filter: FilterMode,
}

#[cfg(test)]
impl MockRenderTarget {
    pub fn new(label: &str, desc: &TargetDesc) -> Self {
        Self {
            label: label.to_string(),
            texture: Arc::new(MockTexture::new(label, desc.width, desc.height, desc.format)),
            scissor: Mutex::new(None),
            dispose_count: AtomicUsize::new(0),
            fail_resize: AtomicBool::new(false),
            min_filter: desc.min_filter,
            mag_filter: desc.mag_filter,
        }
    }

    /// Number of times dispose() has been called
    pub fn dispose_count(&self) -> usize {
        self.dispose_count.load(Ordering::SeqCst)
    }

    /// Make the next set_size() calls fail, simulating an allocation refusal
    pub fn set_fail_resize(&self, fail: bool) {
        self.fail_resize.store(fail, Ordering::SeqCst);
    }
}

#[cfg(test)]
impl RenderTarget for MockRenderTarget {
    fn width(&self) -> u32 {
        self.texture.width()
    }

    fn height(&self) -> u32 {
        self.texture.height()
    }

    fn format(&self) -> TextureFormat {
        self.texture.format()
    }

    fn set_size(&self, width: u32, height: u32) -> Result<()> {
        if self.fail_resize.load(Ordering::SeqCst) {
            return Err(Error::OutOfMemory);
        }
        self.texture.resize(width, height);
        Ok(())
    }

    fn texture(&self) -> Arc<dyn Texture> {
        self.texture.clone()
    }

    fn scissor(&self) -> Option<Rect2D> {
        *self.scissor.lock().unwrap()
    }

    fn set_scissor(&self, region: Option<Rect2D>) {
        *self.scissor.lock().unwrap() = region;
    }

    fn dispose(&self) {
        self.dispose_count.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Effect
// ============================================================================

#[cfg(test)]
pub struct MockEffect {
    pub shader_name: String,
    uniforms: FxHashMap<String, UniformValue>,
}

#[cfg(test)]
impl MockEffect {
    pub fn new(kernel: &EffectKernel) -> Self {
        let mut uniforms = FxHashMap::default();
        for (name, value) in &kernel.uniforms {
            uniforms.insert(name.clone(), value.clone());
        }
        Self {
            shader_name: kernel.shader.to_string(),
            uniforms,
        }
    }
}

#[cfg(test)]
impl Effect for MockEffect {
    fn shader(&self) -> &str {
        &self.shader_name
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms.insert(name.to_string(), value);
    }

    fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms.get(name).cloned()
    }
}

// ============================================================================
// Mock Scene / Camera
// ============================================================================

#[cfg(test)]
pub struct MockScene;

#[cfg(test)]
impl Scene for MockScene {}

#[cfg(test)]
pub struct MockCamera {
    layers: Mutex<LayerMask>,
}

#[cfg(test)]
impl MockCamera {
    pub fn new() -> Self {
        Self {
            layers: Mutex::new(LayerMask::default()),
        }
    }
}

#[cfg(test)]
impl Camera for MockCamera {
    fn layers(&self) -> LayerMask {
        *self.layers.lock().unwrap()
    }

    fn set_layers(&self, layers: LayerMask) {
        *self.layers.lock().unwrap() = layers;
    }
}

// ============================================================================
// Render event journal
// ============================================================================

/// One recorded renderer interaction
#[cfg(test)]
#[derive(Clone)]
pub enum RenderEvent {
    SceneDraw {
        destination: Option<Arc<dyn RenderTarget>>,
        clear: bool,
    },
    EffectDraw {
        shader: String,
        destination: Option<Arc<dyn RenderTarget>>,
        clear: bool,
        /// Value of the effect's `t_diffuse` uniform at submission time
        input: Option<Arc<dyn Texture>>,
    },
    ClearTarget {
        destination: Option<Arc<dyn RenderTarget>>,
    },
    ClearStencil {
        destination: Option<Arc<dyn RenderTarget>>,
        value: u32,
    },
    ClearDepth,
    ClearColor([f32; 4]),
    AutoClear(bool),
    ColorWrite(bool),
    StencilTest(bool),
    StencilFunc {
        func: StencilFunc,
        reference: u32,
        mask: u32,
    },
    StencilOp {
        fail: StencilOp,
        z_fail: StencilOp,
        z_pass: StencilOp,
    },
}

// ============================================================================
// Mock Renderer
// ============================================================================

/// Mock Renderer journaling every submission and state change
#[cfg(test)]
pub struct MockRenderer {
    /// Journal of all interactions, in order
    pub events: Vec<RenderEvent>,
    /// Shaders the fake backend "provides"
    pub known_shaders: Vec<&'static str>,
    /// Logical drawing size
    pub width: u32,
    pub height: u32,
    /// Device pixel ratio
    pub ratio: f32,
    /// Shared-state register
    pub clear_color_value: [f32; 4],
    pub auto_clear_value: bool,
    pub color_write_value: bool,
    pub stencil_test_value: bool,
    /// Make the next create_render_target fail
    pub fail_allocation: bool,
    /// Every target created through this renderer, in creation order
    pub created_targets: Vec<Arc<MockRenderTarget>>,
    draw_calls: u32,
    target_counter: usize,
}

#[cfg(test)]
impl MockRenderer {
    pub fn new() -> Self {
        Self::with_size(640, 480, 1.0)
    }

    pub fn with_size(width: u32, height: u32, ratio: f32) -> Self {
        Self {
            events: Vec::new(),
            known_shaders: vec![
                "copy",
                "fxaa",
                "smaa",
                "vignette",
                "resolution",
                "blur_horizontal",
                "blur_vertical",
                "tilt_shift",
                "bloom",
            ],
            width,
            height,
            ratio,
            clear_color_value: [0.0, 0.0, 0.0, 1.0],
            auto_clear_value: true,
            color_write_value: true,
            stencil_test_value: false,
            fail_allocation: false,
            created_targets: Vec::new(),
            draw_calls: 0,
            target_counter: 0,
        }
    }

    /// Number of draw submissions recorded (scene + effect)
    pub fn draw_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    RenderEvent::SceneDraw { .. } | RenderEvent::EffectDraw { .. }
                )
            })
            .count()
    }

    /// Shaders drawn, in submission order
    pub fn drawn_shaders(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::EffectDraw { shader, .. } => Some(shader.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Renderer for MockRenderer {
    fn create_render_target(&mut self, desc: TargetDesc) -> Result<Arc<dyn RenderTarget>> {
        if self.fail_allocation {
            return Err(Error::OutOfMemory);
        }
        let label = format!("target_{}", self.target_counter);
        self.target_counter += 1;
        let target = Arc::new(MockRenderTarget::new(&label, &desc));
        self.created_targets.push(target.clone());
        Ok(target)
    }

    fn create_effect(&mut self, kernel: &EffectKernel) -> Result<Box<dyn Effect>> {
        if !self.known_shaders.contains(&kernel.shader) {
            return Err(Error::InvalidResource(format!(
                "Shader '{}' not provided by backend",
                kernel.shader
            )));
        }
        Ok(Box::new(MockEffect::new(kernel)))
    }

    fn render_scene(
        &mut self,
        _scene: &dyn Scene,
        _camera: &dyn Camera,
        destination: Option<&Arc<dyn RenderTarget>>,
        clear: bool,
    ) -> Result<()> {
        self.draw_calls += 1;
        self.events.push(RenderEvent::SceneDraw {
            destination: destination.cloned(),
            clear,
        });
        Ok(())
    }

    fn render_effect(
        &mut self,
        effect: &dyn Effect,
        destination: Option<&Arc<dyn RenderTarget>>,
        clear: bool,
    ) -> Result<()> {
        self.draw_calls += 1;
        self.events.push(RenderEvent::EffectDraw {
            shader: effect.shader().to_string(),
            destination: destination.cloned(),
            clear,
            input: effect.uniform("t_diffuse").and_then(|u| u.as_texture()),
        });
        Ok(())
    }

    fn clear_target(&mut self, destination: Option<&Arc<dyn RenderTarget>>) -> Result<()> {
        self.events.push(RenderEvent::ClearTarget {
            destination: destination.cloned(),
        });
        Ok(())
    }

    fn clear_stencil(
        &mut self,
        destination: Option<&Arc<dyn RenderTarget>>,
        value: u32,
    ) -> Result<()> {
        self.events.push(RenderEvent::ClearStencil {
            destination: destination.cloned(),
            value,
        });
        Ok(())
    }

    fn clear_depth(&mut self) -> Result<()> {
        self.events.push(RenderEvent::ClearDepth);
        Ok(())
    }

    fn drawing_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel_ratio(&self) -> f32 {
        self.ratio
    }

    fn clear_color(&self) -> [f32; 4] {
        self.clear_color_value
    }

    fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color_value = color;
        self.events.push(RenderEvent::ClearColor(color));
    }

    fn auto_clear(&self) -> bool {
        self.auto_clear_value
    }

    fn set_auto_clear(&mut self, auto_clear: bool) {
        self.auto_clear_value = auto_clear;
        self.events.push(RenderEvent::AutoClear(auto_clear));
    }

    fn set_color_write(&mut self, enabled: bool) {
        self.color_write_value = enabled;
        self.events.push(RenderEvent::ColorWrite(enabled));
    }

    fn set_stencil_test(&mut self, enabled: bool) {
        self.stencil_test_value = enabled;
        self.events.push(RenderEvent::StencilTest(enabled));
    }

    fn stencil_func(&mut self, func: StencilFunc, reference: u32, mask: u32) {
        self.events.push(RenderEvent::StencilFunc {
            func,
            reference,
            mask,
        });
    }

    fn stencil_op(&mut self, fail: StencilOp, z_fail: StencilOp, z_pass: StencilOp) {
        self.events.push(RenderEvent::StencilOp {
            fail,
            z_fail,
            z_pass,
        });
    }

    fn stats(&self) -> RendererStats {
        RendererStats {
            draw_calls: self.draw_calls,
            triangles: 0,
            gpu_memory_used: 0,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_renderer_tests.rs"]
mod tests;
