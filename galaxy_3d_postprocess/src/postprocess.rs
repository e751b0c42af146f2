/// Postprocess facade.
///
/// Pre-wires the opinionated default pipeline - scene render, FXAA, bloom,
/// tilt-shift, vignette - on top of a composer, and keeps the screen-target
/// invariant: after any structural or enablement change, exactly the last
/// enabled pass in list order draws to the visible screen.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::error::Result;
use crate::{fx_err, fx_info};
use crate::composer::Composer;
use crate::pass::{
    effects, BloomDesc, BloomPass, FxaaDesc, Pass, RenderPass, ShaderPass, TiltShiftDesc,
    TiltShiftPass,
};
use crate::renderer::{
    device_pixels, Camera, RenderTarget, Renderer, RendererStats, Scene, TargetDesc,
    TextureFormat,
};

pub struct Postprocess {
    composer: Composer,
    /// Off-screen target for the bloom separate render
    bloom_target: Arc<dyn RenderTarget>,
    // Positions of the wired passes in the composer's list; inserts shift them.
    render_index: usize,
    fxaa_index: usize,
    bloom_index: usize,
    tilt_shift_index: usize,
    vignette_index: usize,
    last_frame: Option<Instant>,
}

impl Postprocess {
    /// Wire the default pipeline against a renderer
    ///
    /// FXAA and bloom start disabled; tilt-shift and vignette start enabled,
    /// with vignette drawing to the screen.
    ///
    /// # Errors
    ///
    /// Fails if the backend refuses a buffer allocation or lacks one of the
    /// default kernels. The facade is not constructed.
    pub fn new(
        renderer: Arc<Mutex<dyn Renderer>>,
        scene: Arc<dyn Scene>,
        camera: Arc<dyn Camera>,
    ) -> Result<Self> {
        let mut composer = Composer::new(renderer.clone())?;

        // Another off-screen render target is required for the bloom
        // separate render.
        let (width, height, bloom_target) = {
            let mut guard = renderer
                .lock()
                .map_err(|_| fx_err!("galaxy3d::Postprocess", "Renderer lock poisoned"))?;
            let (width, height) = guard.drawing_size();
            let ratio = guard.pixel_ratio();
            let (device_width, device_height) = device_pixels(width, height, ratio);
            let desc = TargetDesc {
                stencil_buffer: false,
                ..TargetDesc::new(device_width, device_height, TextureFormat::R8G8B8A8_UNORM)
            };
            (width, height, guard.create_render_target(desc)?)
        };

        let render_pass = RenderPass::new(scene, camera);

        let mut fxaa_pass = effects::fxaa(&renderer, &FxaaDesc::default())?;
        fxaa_pass.options_mut().enabled = false;

        let mut bloom_pass = BloomPass::new(&renderer, width, height, &BloomDesc::default())?;
        bloom_pass.options_mut().enabled = false;
        bloom_pass.set_smooth_width(0.1);
        bloom_pass.set_read_buffer(Some(bloom_target.clone()));

        let tilt_shift_pass = TiltShiftPass::new(&renderer, &TiltShiftDesc::default())?;
        let vignette_pass = effects::vignette(&renderer, 1.0)?;

        composer.add_pass(Box::new(render_pass));
        composer.add_pass(Box::new(fxaa_pass));
        composer.add_pass(Box::new(bloom_pass));
        composer.add_pass(Box::new(tilt_shift_pass));
        composer.add_pass(Box::new(vignette_pass));

        let mut postprocess = Self {
            composer,
            bloom_target,
            render_index: 0,
            fxaa_index: 1,
            bloom_index: 2,
            tilt_shift_index: 3,
            vignette_index: 4,
            last_frame: None,
        };
        postprocess.ensure_render_to_screen();
        postprocess.set_size(width, height)?;
        fx_info!("galaxy3d::Postprocess", "Default pipeline wired");
        Ok(postprocess)
    }

    /// Render one frame of the pipeline
    ///
    /// When bloom is enabled and flagged for a separate render, the
    /// bloom-tagged layers are first drawn into the dedicated bloom target
    /// through the same camera, whose layer mask is restored afterwards.
    pub fn render(&mut self, scene: &Arc<dyn Scene>, camera: &Arc<dyn Camera>) -> Result<()> {
        let now = Instant::now();
        let delta = self
            .last_frame
            .map(|t| now.duration_since(t).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        if let Some(render_pass) = self
            .composer
            .pass_mut(self.render_index)
            .and_then(|p| p.as_render_pass_mut())
        {
            render_pass.set_scene(scene.clone());
            render_pass.set_camera(camera.clone());
        }

        let separate = self
            .bloom()
            .filter(|bloom| bloom.enabled() && bloom.needs_separate_render)
            .map(|bloom| bloom.layers);
        if let Some(layers) = separate {
            let saved_layers = camera.layers();
            camera.set_layers(layers);
            {
                let renderer = self.composer.renderer().clone();
                let mut guard = renderer
                    .lock()
                    .map_err(|_| fx_err!("galaxy3d::Postprocess", "Renderer lock poisoned"))?;
                guard.clear_target(Some(&self.bloom_target))?;
                guard.render_scene(&**scene, &**camera, Some(&self.bloom_target), false)?;
            }
            let bloom_target = self.bloom_target.clone();
            if let Some(bloom) = self.bloom_mut() {
                bloom.set_read_buffer(Some(bloom_target));
            }
            camera.set_layers(saved_layers);
        }

        self.composer.render(delta)
    }

    /// Resize the composer, every pass, and the bloom target
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        let ratio = {
            let guard = self
                .composer
                .renderer()
                .lock()
                .map_err(|_| fx_err!("galaxy3d::Postprocess", "Renderer lock poisoned"))?;
            guard.pixel_ratio()
        };
        self.composer.set_size(width, height, ratio)?;
        let (device_width, device_height) = device_pixels(width, height, ratio);
        self.bloom_target.set_size(device_width, device_height)
    }

    /// Append a pass and re-establish the screen-target invariant
    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        self.composer.add_pass(pass);
        self.ensure_render_to_screen();
    }

    /// Splice a pass into the list and re-establish the screen-target invariant
    pub fn insert_pass(&mut self, pass: Box<dyn Pass>, index: usize) {
        let index = index.min(self.composer.pass_count());
        self.composer.insert_pass(pass, index);
        for wired in [
            &mut self.render_index,
            &mut self.fxaa_index,
            &mut self.bloom_index,
            &mut self.tilt_shift_index,
            &mut self.vignette_index,
        ] {
            if *wired >= index {
                *wired += 1;
            }
        }
        self.ensure_render_to_screen();
    }

    /// Force `render_to_screen` onto exactly the last enabled pass
    ///
    /// Never assumed to hold after a caller flips an enabled flag directly;
    /// re-run after any enablement or ordering change.
    pub fn ensure_render_to_screen(&mut self) {
        let mut last_enabled = None;
        for (index, pass) in self.composer.passes_mut().iter_mut().enumerate() {
            pass.options_mut().render_to_screen = false;
            if pass.options().enabled {
                last_enabled = Some(index);
            }
        }
        if let Some(index) = last_enabled {
            if let Some(pass) = self.composer.pass_mut(index) {
                pass.options_mut().render_to_screen = true;
            }
        }
    }

    /// Renderer statistics captured by the scene render pass
    pub fn info(&self) -> RendererStats {
        self.render_pass().map(|p| p.info).unwrap_or_default()
    }

    // ===== ENABLEMENT =====

    pub fn set_fxaa_enabled(&mut self, enabled: bool) {
        self.set_pass_enabled(self.fxaa_index, enabled);
    }

    pub fn set_bloom_enabled(&mut self, enabled: bool) {
        self.set_pass_enabled(self.bloom_index, enabled);
    }

    pub fn set_tilt_shift_enabled(&mut self, enabled: bool) {
        self.set_pass_enabled(self.tilt_shift_index, enabled);
    }

    pub fn set_vignette_enabled(&mut self, enabled: bool) {
        self.set_pass_enabled(self.vignette_index, enabled);
    }

    fn set_pass_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(pass) = self.composer.pass_mut(index) {
            pass.options_mut().enabled = enabled;
        }
        self.ensure_render_to_screen();
    }

    // ===== WIRED PASS ACCESS =====

    pub fn render_pass(&self) -> Option<&RenderPass> {
        self.composer.pass(self.render_index)?.as_render_pass()
    }

    pub fn render_pass_mut(&mut self) -> Option<&mut RenderPass> {
        self.composer.pass_mut(self.render_index)?.as_render_pass_mut()
    }

    pub fn fxaa(&self) -> Option<&ShaderPass> {
        self.composer.pass(self.fxaa_index)?.as_shader_pass()
    }

    pub fn fxaa_mut(&mut self) -> Option<&mut ShaderPass> {
        self.composer.pass_mut(self.fxaa_index)?.as_shader_pass_mut()
    }

    pub fn bloom(&self) -> Option<&BloomPass> {
        self.composer.pass(self.bloom_index)?.as_bloom_pass()
    }

    pub fn bloom_mut(&mut self) -> Option<&mut BloomPass> {
        self.composer.pass_mut(self.bloom_index)?.as_bloom_pass_mut()
    }

    pub fn tilt_shift(&self) -> Option<&TiltShiftPass> {
        self.composer.pass(self.tilt_shift_index)?.as_tilt_shift_pass()
    }

    pub fn tilt_shift_mut(&mut self) -> Option<&mut TiltShiftPass> {
        self.composer.pass_mut(self.tilt_shift_index)?.as_tilt_shift_pass_mut()
    }

    pub fn vignette(&self) -> Option<&ShaderPass> {
        self.composer.pass(self.vignette_index)?.as_shader_pass()
    }

    pub fn vignette_mut(&mut self) -> Option<&mut ShaderPass> {
        self.composer.pass_mut(self.vignette_index)?.as_shader_pass_mut()
    }

    /// The bloom separate-render target
    pub fn bloom_target(&self) -> &Arc<dyn RenderTarget> {
        &self.bloom_target
    }

    /// The underlying composer
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// The underlying composer, mutable
    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Release the pooled buffers, the bloom target, and every pass
    pub fn dispose(&mut self) {
        self.composer.dispose();
        self.bloom_target.dispose();
    }
}

#[cfg(test)]
#[path = "postprocess_tests.rs"]
mod tests;
