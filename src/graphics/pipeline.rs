//! Render pipeline creation for the particle pass
//!
//! The vertex stage reads and writes the particle buffers through storage
//! bindings and emits one point per particle; the fragment stage shades the
//! points with additive blending.

use std::{num::NonZeroU64, path::PathBuf};

use shared::{
    ParticleUniforms, FRAGMENT_ENTRY_POINT, POSITION_BINDING, UNIFORM_BINDING,
    VELOCITY_BINDING, VERTEX_ENTRY_POINT,
};

use crate::{
    error::CrateResult,
    graphics::{
        buffers::ParticleBuffers,
        error::ShaderError,
        shader::{compile_shader, read_shader, CompiledShader, ShaderStage},
    },
};

/// Builder for the particle pipeline.
///
/// Each step consumes the builder and returns it in the next state, so a
/// pipeline can only be linked once both stages have compiled.
#[derive(Clone, Debug)]
pub struct ShaderPipelineBuilder<S> {
    spec: ShaderPipelineSpec,
    builder_state: S,
}

#[derive(Clone, Debug)]
struct ShaderPipelineSpec {
    label: String,
    vertex_path: PathBuf,
    fragment_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct InitialSpec {}

#[derive(Clone, Debug)]
pub struct HasSources {
    vertex_source: String,
    fragment_source: String,
}

#[derive(Clone, Debug)]
pub struct HasModules {
    vertex: CompiledShader,
    fragment: CompiledShader,
}

/// Linked pipeline and the layout its bind group must match
#[derive(Debug)]
pub struct Ready {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

// transition methods

impl ShaderPipelineBuilder<InitialSpec> {
    pub fn new(
        label: &str,
        vertex_path: impl Into<PathBuf>,
        fragment_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            spec: ShaderPipelineSpec {
                label: label.to_string(),
                vertex_path: vertex_path.into(),
                fragment_path: fragment_path.into(),
            },
            builder_state: InitialSpec {},
        }
    }

    /// Read both stages from disk; unreadable files become empty sources
    pub fn with_sources(self) -> ShaderPipelineBuilder<HasSources> {
        let vertex_source = read_shader(&self.spec.vertex_path);
        let fragment_source = read_shader(&self.spec.fragment_path);
        self.with_source_text(vertex_source, fragment_source)
    }

    pub fn with_source_text(
        self,
        vertex_source: String,
        fragment_source: String,
    ) -> ShaderPipelineBuilder<HasSources> {
        ShaderPipelineBuilder {
            spec: self.spec,
            builder_state: HasSources {
                vertex_source,
                fragment_source,
            },
        }
    }
}

impl ShaderPipelineBuilder<HasSources> {
    /// Compile both stages. The fragment stage is compiled even if the vertex
    /// stage failed so that both diagnostics are logged.
    pub fn compile(self) -> Result<ShaderPipelineBuilder<HasModules>, ShaderError> {
        let HasSources {
            vertex_source,
            fragment_source,
        } = self.builder_state;

        let vertex = compile_shader(
            &self.spec.vertex_path.display().to_string(),
            vertex_source,
            ShaderStage::Vertex,
            VERTEX_ENTRY_POINT,
        );
        let fragment = compile_shader(
            &self.spec.fragment_path.display().to_string(),
            fragment_source,
            ShaderStage::Fragment,
            FRAGMENT_ENTRY_POINT,
        );

        Ok(ShaderPipelineBuilder {
            spec: self.spec,
            builder_state: HasModules {
                vertex: vertex?,
                fragment: fragment?,
            },
        })
    }
}

impl ShaderPipelineBuilder<HasModules> {
    pub fn vertex(&self) -> &CompiledShader {
        &self.builder_state.vertex
    }

    pub fn fragment(&self) -> &CompiledShader {
        &self.builder_state.fragment
    }

    /// Create the GPU shader modules and link them into a render pipeline.
    ///
    /// Validation errors raised by wgpu while linking are captured and
    /// returned as [`ShaderError::Link`].
    pub fn link(
        self,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> CrateResult<ShaderPipelineBuilder<Ready>> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_module = self.builder_state.vertex.create_module(device);
        let fragment_module = self.builder_state.fragment.create_module(device);
        let bind_group_layout = create_bind_group_layout(device);
        let pipeline = create_render_pipeline(
            device,
            &self.spec.label,
            &bind_group_layout,
            &vertex_module,
            &fragment_module,
            surface_format,
        );

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            let e = ShaderError::Link {
                diagnostic: err.to_string(),
            };
            tracing::error!("{e}");
            return Err(e.into());
        }

        tracing::info!("Linked pipeline {}", self.spec.label);

        Ok(ShaderPipelineBuilder {
            spec: self.spec,
            builder_state: Ready {
                pipeline,
                bind_group_layout,
            },
        })
    }
}

impl ShaderPipelineBuilder<Ready> {
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.builder_state.pipeline
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.builder_state.bind_group_layout
    }
}

/// Particle pipeline that has been linked
pub type ParticlePipeline = ShaderPipelineBuilder<Ready>;

/// Group 0: uniform block, positions, velocities; all vertex-visible
pub fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let storage = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: false },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Particle Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: UNIFORM_BINDING,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(
                        std::mem::size_of::<ParticleUniforms>() as u64
                    ),
                },
                count: None,
            },
            storage(POSITION_BINDING),
            storage(VELOCITY_BINDING),
        ],
    })
}

/// Bind the particle buffers to the slots declared in the layout
pub fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffers: &ParticleBuffers,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Particle Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: UNIFORM_BINDING,
                resource: buffers.uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: POSITION_BINDING,
                resource: buffers.position_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: VELOCITY_BINDING,
                resource: buffers.velocity_buffer.as_entire_binding(),
            },
        ],
    })
}

/// Additive blending, `src * 1 + dst * 1`
pub const ADDITIVE_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

fn create_render_pipeline(
    device: &wgpu::Device,
    label: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    vertex_module: &wgpu::ShaderModule,
    fragment_module: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Particle Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        // No vertex buffers: the shader indexes the storage buffers by vertex_index
        vertex: wgpu::VertexState {
            module: vertex_module,
            entry_point: Some(VERTEX_ENTRY_POINT),
            compilation_options: Default::default(),
            buffers: &[],
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::PointList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: fragment_module,
            entry_point: Some(FRAGMENT_ENTRY_POINT),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(ADDITIVE_BLEND),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        multiview: None,
        cache: None,
    })
}
