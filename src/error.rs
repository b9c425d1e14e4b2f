//! Error types for the library

use thiserror::Error;

use crate::graphics::error::{GraphicsError, ShaderError};

/// Error types for the particles demo
#[derive(Error, Debug)]
pub enum ParticlesError {
    #[error("No suitable GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("wgpu RequestDeviceError: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("wgpu CreateSurfaceError: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("wgpu SurfaceError: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("winit OsError: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("winit EventLoopError: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Graphics error: {0}")]
    Graphics(#[from] GraphicsError),

    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),

    #[error("Other error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with [`ParticlesError`]
pub type CrateResult<T> = std::result::Result<T, ParticlesError>;
