/// Renderer module - the boundary to the external rendering library

// Module declarations
pub mod renderer;
pub mod render_target;
pub mod texture;
pub mod effect;
pub mod scene;
pub mod state_guard;

#[cfg(test)]
pub mod mock_renderer;

// Re-export everything from renderer.rs
pub use renderer::*;

// Re-export from other modules
pub use render_target::*;
pub use texture::*;
pub use effect::*;
pub use scene::*;
pub use state_guard::*;
