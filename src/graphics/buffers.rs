//! GPU-resident particle and uniform buffers

use shared::{
    particles::{position_buffer_size, velocity_buffer_size},
    ParticleUniforms,
};
use wgpu::util::DeviceExt;

use crate::particles::ParticleStaging;

/// Buffers bound by the particle pipeline.
///
/// Position and velocity buffers keep their length for the life of the demo;
/// the vertex shader overwrites their contents in place every frame.
#[derive(Debug)]
pub struct ParticleBuffers {
    pub position_buffer: wgpu::Buffer,
    pub velocity_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    /// CPU copy of the uniform block; the wind table never changes after upload
    pub uniforms: ParticleUniforms,
    pub num_particles: u32,
}

impl ParticleBuffers {
    /// Upload the staging data. The staging vectors are dropped on return.
    pub fn upload(device: &wgpu::Device, staging: ParticleStaging) -> Self {
        let num_particles = staging.num_particles();

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Position Buffer"),
            contents: bytemuck::cast_slice(&staging.positions),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });
        debug_assert_eq!(position_buffer.size(), position_buffer_size(num_particles));

        let velocity_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Velocity Buffer"),
            contents: bytemuck::cast_slice(&staging.velocities),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });
        debug_assert_eq!(velocity_buffer.size(), velocity_buffer_size(num_particles));

        let uniforms = ParticleUniforms::new(staging.wind);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Uniform Buffer"),
            contents: uniforms.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        tracing::info!(
            "Uploaded {num_particles} particles ({} MiB positions, {} MiB velocities)",
            position_buffer.size() >> 20,
            velocity_buffer.size() >> 20,
        );

        Self {
            position_buffer,
            velocity_buffer,
            uniform_buffer,
            uniforms,
            num_particles,
        }
    }

    /// Store the new transform and upload the whole uniform block
    pub fn write_uniforms(&mut self, queue: &wgpu::Queue, mvp: [f32; 16]) {
        self.uniforms.set_mvp(mvp);
        queue.write_buffer(&self.uniform_buffer, 0, self.uniforms.as_bytes());
    }
}
