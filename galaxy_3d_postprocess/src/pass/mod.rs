//! Pass module - the unit-of-work contract and the built-in pass library
//!
//! A pass is one discrete GPU stage in the post-processing chain. The
//! composer drives every pass through the same narrow contract; the
//! concrete passes here are thin wiring around opaque effect kernels
//! compiled by the rendering backend.

mod pass;
mod shader_pass;
mod render_pass;
mod mask_pass;
mod scissor_pass;
mod blur_pass;
mod tilt_shift_pass;
mod bloom_pass;
pub mod effects;

pub use pass::{Pass, PassKind, PassOptions};
pub use effects::FxaaDesc;
pub use shader_pass::{ResizePolicy, ShaderPass};
pub use render_pass::RenderPass;
pub use mask_pass::{ClearMaskPass, MaskPass};
pub use scissor_pass::{ClearScissorPass, ScissorPass, ScissorRegion};
pub use blur_pass::{BlurDesc, BlurPass};
pub use tilt_shift_pass::{TiltShiftDesc, TiltShiftPass};
pub use bloom_pass::{BloomDesc, BloomPass};
