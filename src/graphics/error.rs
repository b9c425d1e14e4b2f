use thiserror::Error;

use crate::graphics::shader::ShaderStage;

#[derive(Error, Debug)]
pub enum GraphicsError {
    #[error("Adapter {adapter} does not support required features {missing:?}")]
    MissingFeatures {
        adapter: String,
        missing: wgpu::Features,
    },

    #[error("Adapter limit {name} is {available}, need {required}")]
    LimitTooLow {
        name: &'static str,
        available: u64,
        required: u64,
    },

    #[error("Surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Failures while loading, compiling or linking the particle shaders.
///
/// Every variant carries the rendered compiler diagnostic where one exists.
#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("{label}: shader source is empty")]
    EmptySource { label: String },

    #[error("{label}: failed to parse:\n{diagnostic}")]
    Parse { label: String, diagnostic: String },

    #[error("{label}: failed validation:\n{diagnostic}")]
    Validation { label: String, diagnostic: String },

    #[error("{label}: no {stage:?} entry point named `{entry_point}`")]
    MissingEntryPoint {
        label: String,
        stage: ShaderStage,
        entry_point: String,
    },

    #[error("failed to link render pipeline:\n{diagnostic}")]
    Link { diagnostic: String },
}
