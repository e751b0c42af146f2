//! Render target pool module
//!
//! Provides the pair of ping-pong color buffers the composer routes
//! passes through. The buffers themselves belong to the rendering
//! backend; this module only manages their read/write roles.

mod target_pool;

pub use target_pool::TargetPool;
