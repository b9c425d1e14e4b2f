//! Types and constants shared between the host and the WGSL shaders.
//!
//! Everything in here describes bytes the GPU reads: changing a constant or a
//! `#[repr(C)]` layout means changing `ParticleShader.wgsl` as well.
#![cfg_attr(not(test), no_std)]

pub mod particles;
pub mod uniforms;

pub use particles::{PackedVelocity, ParticlePosition};
pub use uniforms::{ParticleUniforms, WindEntry};

/// Number of particles simulated by the demo
pub const N_PARTICLES: u32 = 4_000_000;

/// Number of entries in the wind lookup table
pub const WIND_TABLE_LEN: usize = 512;
/// Wind values are drawn from `0..WIND_VALUE_RANGE`
pub const WIND_VALUE_RANGE: i32 = 1000;
/// Seed for all particle and wind generation
pub const DEFAULT_SEED: u64 = 49770;

/// Positions are `(r / POSITION_DIVISOR) - POSITION_OFFSET` with `r` in `0..POSITION_STEPS`
pub const POSITION_STEPS: u32 = 1000;
pub const POSITION_DIVISOR: f32 = 50.0;
pub const POSITION_OFFSET: f32 = 10.0;

// camera orbit

/// Orbit angle advance per frame, in radians
pub const ORBIT_STEP: f32 = 0.005;
pub const ORBIT_RADIUS: f32 = 30.5;
pub const ORBIT_HEIGHT: f32 = 20.0;

/// Frames per console timing report
pub const REPORT_INTERVAL: u32 = 100;

// window

pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 900;
pub const WINDOW_TITLE: &str = "Particles!";

// bindings in group 0 (see ParticleShader.wgsl)

pub const UNIFORM_BINDING: u32 = 0;
pub const POSITION_BINDING: u32 = 1;
pub const VELOCITY_BINDING: u32 = 2;

pub const VERTEX_ENTRY_POINT: &str = "vs_main";
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";
