//! Composer module - the per-frame pass pipeline scheduler
//!
//! Owns the ordered pass list and the ping-pong target pool, and drives
//! the frame walk: execute each enabled pass, route buffers, swap roles,
//! and track the stencil-mask state across the list.

mod composer;
mod mask_gate;

pub use composer::Composer;
pub use mask_gate::MaskGate;
