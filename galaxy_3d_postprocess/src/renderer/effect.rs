/// Effect kernels - the opaque shader/uniform data behind each visual effect
///
/// An `EffectKernel` is pure data: it names a full-screen shader that the
/// external rendering library must provide, plus preprocessor defines and
/// initial uniform values. The library compiles it into an `Effect`
/// instance whose uniforms the pass library mutates frame to frame. The
/// shader *math* never lives in this crate.

use std::fmt;
use std::sync::Arc;
use crate::renderer::Texture;

// ===== UNIFORM VALUES =====

/// A typed uniform value for an effect kernel
#[derive(Clone)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Int(i32),
    UInt(u32),
    /// Sampled texture slot (None = not yet bound)
    Texture(Option<Arc<dyn Texture>>),
}

impl UniformValue {
    /// Scalar accessor, None if the value is not a Float
    pub fn as_float(&self) -> Option<f32> {
        match self {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Vector accessor, None if the value is not a Vec2
    pub fn as_vec2(&self) -> Option<[f32; 2]> {
        match self {
            UniformValue::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    /// Texture accessor, None if the value is not a bound texture slot
    pub fn as_texture(&self) -> Option<Arc<dyn Texture>> {
        match self {
            UniformValue::Texture(Some(t)) => Some(t.clone()),
            _ => None,
        }
    }

    /// Raw bytes of a numeric value, for backends uploading uniform blocks.
    /// Texture slots have no byte representation and return None.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        match self {
            UniformValue::Float(v) => Some(bytemuck::bytes_of(v).to_vec()),
            UniformValue::Vec2(v) => Some(bytemuck::cast_slice(v).to_vec()),
            UniformValue::Vec3(v) => Some(bytemuck::cast_slice(v).to_vec()),
            UniformValue::Vec4(v) => Some(bytemuck::cast_slice(v).to_vec()),
            UniformValue::Int(v) => Some(bytemuck::bytes_of(v).to_vec()),
            UniformValue::UInt(v) => Some(bytemuck::bytes_of(v).to_vec()),
            UniformValue::Texture(_) => None,
        }
    }
}

impl fmt::Debug for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformValue::Float(v) => write!(f, "Float({})", v),
            UniformValue::Vec2(v) => write!(f, "Vec2({:?})", v),
            UniformValue::Vec3(v) => write!(f, "Vec3({:?})", v),
            UniformValue::Vec4(v) => write!(f, "Vec4({:?})", v),
            UniformValue::Int(v) => write!(f, "Int({})", v),
            UniformValue::UInt(v) => write!(f, "UInt({})", v),
            UniformValue::Texture(Some(_)) => write!(f, "Texture(bound)"),
            UniformValue::Texture(None) => write!(f, "Texture(unbound)"),
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<glam::Vec2> for UniformValue {
    fn from(v: glam::Vec2) -> Self {
        UniformValue::Vec2(v.to_array())
    }
}

impl From<glam::Vec4> for UniformValue {
    fn from(v: glam::Vec4) -> Self {
        UniformValue::Vec4(v.to_array())
    }
}

// ===== EFFECT KERNEL =====

/// Descriptor for one visual effect's shader configuration
///
/// `shader` names a full-screen shader the backend must provide
/// ("copy", "fxaa", "vignette", ...). A backend that does not provide the
/// named shader fails `Renderer::create_effect` at construction time.
#[derive(Debug, Clone)]
pub struct EffectKernel {
    /// Name of the backend-provided shader
    pub shader: &'static str,
    /// Preprocessor defines baked into the compiled kernel
    pub defines: Vec<(String, String)>,
    /// Initial uniform values
    pub uniforms: Vec<(String, UniformValue)>,
}

impl EffectKernel {
    /// Create a kernel referencing a backend shader, with no defines or uniforms
    pub fn new(shader: &'static str) -> Self {
        Self {
            shader,
            defines: Vec::new(),
            uniforms: Vec::new(),
        }
    }

    /// Add a preprocessor define
    pub fn define(mut self, key: &str, value: impl ToString) -> Self {
        self.defines.push((key.to_string(), value.to_string()));
        self
    }

    /// Add an initial uniform value
    pub fn uniform(mut self, name: &str, value: impl Into<UniformValue>) -> Self {
        self.uniforms.push((name.to_string(), value.into()));
        self
    }
}

// ===== EFFECT TRAIT =====

/// A compiled effect kernel instance
///
/// Created by `Renderer::create_effect` from an `EffectKernel`. Holds the
/// kernel's mutable uniform state; the pass library updates uniforms each
/// frame (input texture, blur direction, resolution) before submission.
pub trait Effect: Send + Sync {
    /// Name of the backend shader this effect was compiled from
    fn shader(&self) -> &str;

    /// Set a uniform value (unknown names are inserted)
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Get the current value of a uniform
    fn uniform(&self, name: &str) -> Option<UniformValue>;
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
