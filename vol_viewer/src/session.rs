use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use nalgebra::Point3;
use winit::window::Window;

use raymarch_lib::{
    pipeline::ShaderError,
    volumetric::{self, VolumeTexture},
    BoundingProxy, OrbitCamera, RenderPipeline, TransferFunction,
};

use crate::{defaults, gpu::GpuContext};

/// Volume currently resident on the GPU, with its pipeline binding.
struct LoadedVolume {
    // the bind group references the texture, keep both together
    _texture: VolumeTexture,
    bind_group: wgpu::BindGroup,
}

/// Top-level owner of all viewer state.
///
/// Created once after the GPU context; proxy geometry and shader
/// program at startup, the volume replaced on demand, everything
/// released together at session end. All access is from the single
/// event-loop thread.
pub struct Session {
    pub camera: OrbitCamera,
    pub transfer: TransferFunction,
    pub light_pos: Point3<f32>,
    proxy: BoundingProxy,
    pipeline: RenderPipeline,
    volume: Option<LoadedVolume>,
    window: Arc<Window>,
}

impl Session {
    /// Shader build failure here is fatal: the session cannot render.
    pub fn new(gpu: &GpuContext, window: Arc<Window>) -> Result<Session> {
        let pipeline = RenderPipeline::new(
            &gpu.device,
            gpu.config.format,
            Path::new(defaults::SHADER_PATH),
        )
        .context("building the ray-march shader program")?;

        let proxy = BoundingProxy::new(&gpu.device);

        let mut camera = OrbitCamera::new();
        let size = window.inner_size();
        camera.set_viewport(0.0, 0.0, size.width as f32, size.height as f32);
        camera.set_projection(defaults::FIELD_OF_VIEW, defaults::Z_NEAR, defaults::Z_FAR);

        Ok(Session {
            camera,
            transfer: TransferFunction::new(),
            light_pos: defaults::LIGHT_POS,
            proxy,
            pipeline,
            volume: None,
            window,
        })
    }

    /// Load a volume file and replace the resident texture.
    ///
    /// Parsing happens before any state is touched; on failure the
    /// previous volume stays bound and intact.
    pub fn load_volume(&mut self, gpu: &GpuContext, path: &Path) -> Result<(), &'static str> {
        let data = volumetric::from_file(path)?;

        let texture = VolumeTexture::from_data(&gpu.device, &gpu.queue, &data);
        let bind_group = self.pipeline.bind_volume(&gpu.device, &texture);
        self.camera.update_model(&texture.bounds());
        self.volume = Some(LoadedVolume {
            _texture: texture,
            bind_group,
        });

        log::info!("loaded volume from {}", path.display());
        self.request_redraw();
        Ok(())
    }

    /// Hot-reload the shader program in place (build-then-swap).
    pub fn reload_shaders(&mut self, gpu: &GpuContext) -> Result<(), ShaderError> {
        self.pipeline.reload(&gpu.device)?;
        self.request_redraw();
        Ok(())
    }

    pub fn resize(&mut self, gpu: &mut GpuContext, width: u32, height: u32) {
        gpu.resize(width, height);
        self.camera
            .set_viewport(0.0, 0.0, width as f32, height as f32);
        self.request_redraw();
    }

    /// Render one frame into the swapchain.
    pub fn render(&self, gpu: &GpuContext) -> Result<(), wgpu::SurfaceError> {
        let frame = gpu.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.pipeline.render(
            &gpu.device,
            &gpu.queue,
            &view,
            gpu.depth_view(),
            &self.camera,
            &self.transfer,
            self.light_pos,
            &self.proxy,
            self.volume.as_ref().map(|v| &v.bind_group),
        );

        frame.present();
        Ok(())
    }

    /// Mark the frame dirty; the host event loop redraws later.
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
