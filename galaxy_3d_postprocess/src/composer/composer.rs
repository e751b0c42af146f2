/// Pass pipeline scheduler.
///
/// Executes the ordered pass list once per frame. List order is render
/// order; nothing is ever reordered. After each pass that requests a swap,
/// the read/write buffer roles are exchanged, so buffer routing after pass
/// *i* is fully determined by the `needs_swap` flags of passes `0..i`.
///
/// While a stencil mask is active, a swapping pass has only written the
/// masked region of the write buffer; the pixels outside the mask still
/// live in the old read buffer. Before such a swap the composer copies the
/// outside-mask region forward (stencil comparison `NotEqual` against
/// reference 1), so the swap never loses frame content.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::Result;
use crate::{fx_debug, fx_err, fx_info};
use crate::pass::{effects, Pass, ShaderPass};
use crate::renderer::{
    device_pixels, RenderTarget, Renderer, StencilFunc, TargetDesc, TextureFormat,
};
use crate::target::TargetPool;
use super::MaskGate;

fn lock_renderer(renderer: &Mutex<dyn Renderer>) -> Result<MutexGuard<'_, dyn Renderer + 'static>> {
    renderer
        .lock()
        .map_err(|_| fx_err!("galaxy3d::Composer", "Renderer lock poisoned"))
}

pub struct Composer {
    renderer: Arc<Mutex<dyn Renderer>>,
    targets: TargetPool,
    passes: Vec<Box<dyn Pass>>,
    /// Internal copy pass used only for the stencil-correction step
    copy_pass: ShaderPass,
    width: u32,
    height: u32,
    pixel_ratio: f32,
}

impl Composer {
    /// Create a composer with pooled buffers sized to the renderer's
    /// current drawing size
    ///
    /// # Errors
    ///
    /// Fails if the backend refuses a buffer allocation or does not provide
    /// the copy shader. Both are fatal; the composer is not constructed.
    pub fn new(renderer: Arc<Mutex<dyn Renderer>>) -> Result<Self> {
        let desc = {
            let guard = lock_renderer(&renderer)?;
            let (width, height) = guard.drawing_size();
            let ratio = guard.pixel_ratio();
            let (device_width, device_height) = device_pixels(width, height, ratio);
            TargetDesc::new(device_width, device_height, TextureFormat::R8G8B8A8_UNORM)
        };
        Self::with_target_desc(renderer, desc)
    }

    /// Create a composer with an explicit pooled-buffer descriptor
    pub fn with_target_desc(renderer: Arc<Mutex<dyn Renderer>>, desc: TargetDesc) -> Result<Self> {
        let (width, height, pixel_ratio, targets) = {
            let mut guard = lock_renderer(&renderer)?;
            let (width, height) = guard.drawing_size();
            let pixel_ratio = guard.pixel_ratio();
            let targets = TargetPool::new(&mut *guard, desc)?;
            (width, height, pixel_ratio, targets)
        };
        let copy_pass = effects::copy(&renderer)?;
        fx_info!(
            "galaxy3d::Composer",
            "Composer created ({}x{} @ {}x)",
            width,
            height,
            pixel_ratio
        );
        Ok(Self {
            renderer,
            targets,
            passes: Vec::new(),
            copy_pass,
            width,
            height,
            pixel_ratio,
        })
    }

    /// Execute every enabled pass, in list order
    ///
    /// # Arguments
    ///
    /// * `delta` - Frame delta time in seconds, forwarded to each pass
    ///
    /// # Errors
    ///
    /// The first pass failure aborts the frame and propagates; no partial
    /// recovery is attempted.
    pub fn render(&mut self, delta: f32) -> Result<()> {
        let mut renderer = lock_renderer(&self.renderer)?;
        let mut mask = MaskGate::new();

        for pass in &mut self.passes {
            if !pass.options().enabled {
                continue;
            }

            pass.execute(
                &mut *renderer,
                self.targets.write(),
                self.targets.read(),
                delta,
                mask.is_active(),
            )?;

            if pass.options().needs_swap {
                if mask.is_active() {
                    // Copy the outside-mask region of the old frame forward
                    // before the roles swap, or those pixels are lost.
                    renderer.stencil_func(StencilFunc::NotEqual, 1, 0xffff_ffff);
                    self.copy_pass.execute(
                        &mut *renderer,
                        self.targets.write(),
                        self.targets.read(),
                        delta,
                        true,
                    )?;
                    renderer.stencil_func(StencilFunc::Equal, 1, 0xffff_ffff);
                }
                self.targets.swap();
            }

            mask.observe(pass.kind());
        }
        Ok(())
    }

    /// Append a pass to the end of the list
    ///
    /// The pass is immediately sized to the composer's last-known size, so
    /// it is never left unsized even while disabled.
    pub fn add_pass(&mut self, mut pass: Box<dyn Pass>) {
        pass.set_size(self.width, self.height, self.pixel_ratio);
        self.passes.push(pass);
    }

    /// Splice a pass into the list at `index`
    ///
    /// Order is caller-controlled and semantically meaningful (a tone-map
    /// pass must run after a bloom pass). An index past the end appends.
    pub fn insert_pass(&mut self, mut pass: Box<dyn Pass>, index: usize) {
        pass.set_size(self.width, self.height, self.pixel_ratio);
        let index = index.min(self.passes.len());
        self.passes.insert(index, pass);
    }

    /// Remove and return the pass at `index`, or None if out of range
    pub fn remove_pass(&mut self, index: usize) -> Option<Box<dyn Pass>> {
        if index < self.passes.len() {
            Some(self.passes.remove(index))
        } else {
            None
        }
    }

    /// Resize the pooled buffers and every pass in the list
    ///
    /// Disabled passes are resized too, so a later enable finds them at the
    /// right resolution.
    ///
    /// # Arguments
    ///
    /// * `width` - Logical width in window units
    /// * `height` - Logical height in window units
    /// * `pixel_ratio` - Device pixels per window unit
    pub fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32) -> Result<()> {
        let (device_width, device_height) = device_pixels(width, height, pixel_ratio);
        self.targets.resize(device_width, device_height)?;

        for pass in &mut self.passes {
            pass.set_size(width, height, pixel_ratio);
        }

        self.width = width;
        self.height = height;
        self.pixel_ratio = pixel_ratio;
        fx_debug!(
            "galaxy3d::Composer",
            "Resized to {}x{} @ {}x",
            width,
            height,
            pixel_ratio
        );
        Ok(())
    }

    /// Release both pooled buffers and every pass's resources
    pub fn dispose(&mut self) {
        self.targets.dispose();
        for pass in &mut self.passes {
            pass.dispose();
        }
        self.copy_pass.dispose();
        fx_debug!("galaxy3d::Composer", "Composer disposed");
    }

    // ===== ACCESSORS =====

    /// The pass list, in render order
    pub fn passes(&self) -> &[Box<dyn Pass>] {
        &self.passes
    }

    /// Mutable view of the pass list (flags only; order is fixed here)
    pub fn passes_mut(&mut self) -> &mut [Box<dyn Pass>] {
        &mut self.passes
    }

    /// Pass at `index`, or None if out of range
    pub fn pass(&self, index: usize) -> Option<&dyn Pass> {
        self.passes.get(index).map(|p| p.as_ref())
    }

    /// Mutable pass at `index`, or None if out of range
    pub fn pass_mut(&mut self, index: usize) -> Option<&mut (dyn Pass + 'static)> {
        self.passes.get_mut(index).map(|p| p.as_mut())
    }

    /// Number of passes in the list
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// The buffer currently holding the "read" role
    pub fn read_target(&self) -> &Arc<dyn RenderTarget> {
        self.targets.read()
    }

    /// The buffer currently holding the "write" role
    pub fn write_target(&self) -> &Arc<dyn RenderTarget> {
        self.targets.write()
    }

    /// The renderer this composer drives
    pub fn renderer(&self) -> &Arc<Mutex<dyn Renderer>> {
        &self.renderer
    }

    /// Last-known logical width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Last-known logical height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Last-known device pixel ratio
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }
}

#[cfg(test)]
#[path = "composer_tests.rs"]
mod tests;
