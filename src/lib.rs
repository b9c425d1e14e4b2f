//! Vertex-shader particles
//!
//! Four million point particles whose motion is integrated on the GPU by the
//! vertex shader, which writes each particle's new position and velocity back
//! into storage buffers before emitting the point.

pub mod app;
pub mod camera;
pub mod config;
pub mod error;
pub mod graphics;
pub mod particles;
pub mod timing;

pub use app::ParticlesApp;
pub use config::DemoConfig;
pub use error::{CrateResult, ParticlesError};
