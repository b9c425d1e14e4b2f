//! Render context for the particle demo
//!
//! Owns every GPU object the demo creates: surface, device, the linked
//! particle pipeline, the particle buffers and the bind group tying them
//! together, plus the orbit camera that drives the per-frame transform.
//! Dropping it releases all of them.

use std::sync::Arc;

use winit::window::Window;

use crate::{
    camera::OrbitCamera,
    config::DemoConfig,
    error::CrateResult,
    graphics::{
        buffers::ParticleBuffers,
        device::{request_device, select_adapter},
        error::GraphicsError,
        pipeline::{create_bind_group, ParticlePipeline, ShaderPipelineBuilder},
    },
    particles::ParticleStaging,
};

/// What happened to a frame handed to [`ParticleRenderer::render`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// The surface was unavailable this frame; nothing was drawn
    Skipped,
}

pub struct ParticleRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    pipeline: ParticlePipeline,
    buffers: ParticleBuffers,
    bind_group: wgpu::BindGroup,
    camera: OrbitCamera,
}

impl ParticleRenderer {
    /// Create the device and surface for `window`, build the pipeline from the
    /// shader files, then generate and upload the particles.
    pub async fn new(window: Arc<Window>, config: &DemoConfig) -> CrateResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let adapter = select_adapter(&instance, &surface).await?;
        let (device, queue) = request_device(&adapter, config.num_particles).await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(GraphicsError::NoSurfaceFormat)?;

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: config.window.present_mode(),
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let pipeline = ShaderPipelineBuilder::new(
            "Particle Pipeline",
            config.vertex_shader_path.clone(),
            config.fragment_shader_path.clone(),
        )
        .with_sources()
        .compile()?
        .link(&device, format)?;

        let staging = ParticleStaging::generate(config.num_particles, config.seed);
        let buffers = ParticleBuffers::upload(&device, staging);
        let bind_group = create_bind_group(&device, pipeline.bind_group_layout(), &buffers);

        let aspect = surface_config.width as f32 / surface_config.height as f32;
        let camera = OrbitCamera::new(config.orbit, aspect);

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            pipeline,
            buffers,
            bind_group,
            camera,
        })
    }

    pub fn num_particles(&self) -> u32 {
        self.buffers.num_particles
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Advance the camera one frame
    pub fn update(&mut self) {
        self.camera.update();
    }

    /// Upload the uniforms, draw every particle as a point, wait for the GPU
    /// to finish and present.
    pub fn render(&mut self) -> CrateResult<FrameOutcome> {
        self.buffers
            .write_uniforms(&self.queue, self.camera.mvp().to_cols_array());

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                tracing::debug!("Surface outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(FrameOutcome::Skipped);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("Timed out acquiring the next surface texture");
                return Ok(FrameOutcome::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Particle Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Particle Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(self.pipeline.pipeline());
            pass.set_bind_group(0, &self.bind_group, &[]);
            // one point per particle; the vertex shader reads its own slot by vertex_index
            pass.draw(0..self.buffers.num_particles, 0..1);
        }

        self.queue.submit(Some(encoder.finish()));

        // wait for the GPU before presenting
        if let Err(e) = self.device.poll(wgpu::PollType::Wait) {
            tracing::warn!("Device poll failed: {e}");
        }

        frame.present();
        Ok(FrameOutcome::Presented)
    }

    /// Reconfigure the surface and camera for a new window size.
    /// Zero-sized (minimized) windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.camera.set_aspect(width as f32 / height as f32);
    }
}
