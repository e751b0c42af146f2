/// Scoped save/restore of shared renderer state
///
/// Clear color and auto-clear are a mutable register shared by every pass in
/// the frame walk. A pass that changes them must restore them before
/// returning control to the composer, including on error paths. `StateGuard`
/// turns that contract into a structural guarantee: it snapshots the
/// register at construction and restores it on drop.

use std::ops::{Deref, DerefMut};
use crate::renderer::Renderer;

/// Scoped borrow of the renderer that restores clear color and auto-clear
/// when it goes out of scope.
///
/// Derefs to `dyn Renderer`, so the guarded renderer is used exactly like
/// the unguarded one:
///
/// ```ignore
/// let mut guard = StateGuard::new(renderer);
/// guard.set_auto_clear(false);
/// guard.render_scene(scene, camera, destination, clear)?;
/// // guard drops here; clear color and auto-clear are restored
/// ```
pub struct StateGuard<'a> {
    renderer: &'a mut dyn Renderer,
    clear_color: [f32; 4],
    auto_clear: bool,
}

impl<'a> StateGuard<'a> {
    /// Snapshot the renderer's clear color and auto-clear flag
    pub fn new(renderer: &'a mut dyn Renderer) -> Self {
        let clear_color = renderer.clear_color();
        let auto_clear = renderer.auto_clear();
        Self {
            renderer,
            clear_color,
            auto_clear,
        }
    }
}

impl<'a> Deref for StateGuard<'a> {
    type Target = dyn Renderer + 'a;

    fn deref(&self) -> &Self::Target {
        self.renderer
    }
}

impl<'a> DerefMut for StateGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.renderer
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        self.renderer.set_clear_color(self.clear_color);
        self.renderer.set_auto_clear(self.auto_clear);
    }
}

#[cfg(test)]
#[path = "state_guard_tests.rs"]
mod tests;
