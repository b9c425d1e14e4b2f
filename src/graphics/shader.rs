//! Loading and compiling the WGSL shader stages
//!
//! Shaders are plain text files read at startup. They are parsed and validated
//! on the CPU with `naga` before anything reaches the GPU, so a broken shader
//! is reported with the compiler's own diagnostic and a clear error instead of
//! a validation panic inside wgpu.

use std::path::Path;

use crate::graphics::error::ShaderError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

/// A shader stage that parsed and validated
#[derive(Clone, Debug)]
pub struct CompiledShader {
    pub label: String,
    pub stage: ShaderStage,
    pub entry_point: String,
    pub source: String,
}

impl CompiledShader {
    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&self.label),
            source: wgpu::ShaderSource::Wgsl(self.source.as_str().into()),
        })
    }
}

/// Read a whole shader file as text.
///
/// A file that cannot be read is logged and yields an empty string; the
/// empty source is rejected later by [`compile_shader`].
pub fn read_shader(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!("Can't read file: {} ({e})", path.display());
            String::new()
        }
    }
}

/// Parse and validate `source`, and check it has a `stage` entry point named
/// `entry_point`.
///
/// Failures are logged with the compiler diagnostic before being returned.
pub fn compile_shader(
    label: &str,
    source: String,
    stage: ShaderStage,
    entry_point: &str,
) -> Result<CompiledShader, ShaderError> {
    let result = validate_source(label, &source, stage, entry_point);
    match result {
        Ok(()) => {
            tracing::debug!("Compiled {label} ({stage:?}, entry `{entry_point}`)");
            Ok(CompiledShader {
                label: label.to_string(),
                stage,
                entry_point: entry_point.to_string(),
                source,
            })
        }
        Err(e) => {
            tracing::error!("The shader failed to compile with the error:\n{e}");
            Err(e)
        }
    }
}

fn validate_source(
    label: &str,
    source: &str,
    stage: ShaderStage,
    entry_point: &str,
) -> Result<(), ShaderError> {
    if source.trim().is_empty() {
        return Err(ShaderError::EmptySource {
            label: label.to_string(),
        });
    }

    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Parse {
        label: label.to_string(),
        diagnostic: e.emit_to_string(source),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| ShaderError::Validation {
            label: label.to_string(),
            diagnostic: e.emit_to_string(source),
        })?;

    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry_point && ep.stage == stage.naga_stage());
    if !has_entry {
        return Err(ShaderError::MissingEntryPoint {
            label: label.to_string(),
            stage,
            entry_point: entry_point.to_string(),
        });
    }

    Ok(())
}
