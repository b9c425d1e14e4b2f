//! Graphics module for rendering the particles
//!
//! This module provides the GPU side of the demo:
//! - Adapter/device selection with the features the particle shader needs
//! - Loading and compiling the WGSL shader stages from disk
//! - Linking them into a point-list render pipeline
//! - Uploading the particle buffers and issuing the per-frame draw

pub mod buffers;
pub mod device;
pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod shader;

pub use renderer::{FrameOutcome, ParticleRenderer};
