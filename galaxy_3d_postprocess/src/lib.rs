/*!
# Galaxy 3D Postprocess

Post-processing pass pipeline for the Galaxy 3D rendering stack.

This crate provides the platform-agnostic scheduler that chains full-screen
effect passes (bloom, FXAA, tilt-shift, vignette, scissor clears, stencil
masks) through a pair of ping-pong render targets. The GPU itself is reached
only through trait-based dynamic polymorphism: backend implementations
provide the renderer, render targets, and compiled effect kernels at runtime.

## Architecture

- **Renderer**: narrow capability trait for the external rendering library
- **RenderTarget / Texture**: opaque, resizable, disposable GPU buffer handles
- **TargetPool**: the two ping-pong buffers and their read/write roles
- **Pass**: the unit-of-work contract every effect stage satisfies
- **Composer**: the per-frame walk over the ordered pass list
- **Postprocess**: facade pre-wiring the default pipeline

Backend implementations provide concrete types that implement the renderer
traits; the crate ships a mock backend for unit tests only.
*/

// Internal modules
mod error;
mod postprocess;
pub mod log;
pub mod renderer;
pub mod target;
pub mod pass;
pub mod composer;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Facade
    pub use crate::postprocess::Postprocess;

    // Composer
    pub use crate::composer::{Composer, MaskGate};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        pub use crate::log::{set_logger, reset_logger, dispatch, dispatch_detailed};
    }

    // Render sub-module with all renderer-boundary types
    pub mod render {
        pub use crate::renderer::*;
    }

    // Pass sub-module with the pass capability and the pass library
    pub mod pass {
        pub use crate::pass::*;
    }

    // Target sub-module
    pub mod target {
        pub use crate::target::*;
    }
}

// Re-export math library at crate root
pub use glam;
