//! Demo configuration.
//!
//! Every value comes from a compile-time constant in `shared`; there is no
//! command line, environment or file input. Tests build smaller configs by
//! overriding fields.

use std::path::PathBuf;

use shared::{
    DEFAULT_SEED, N_PARTICLES, ORBIT_HEIGHT, ORBIT_RADIUS, ORBIT_STEP, REPORT_INTERVAL,
    WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH,
};

pub const VERTEX_SHADER_FILE: &str = "ParticleShader.wgsl";
pub const FRAGMENT_SHADER_FILE: &str = "FragmentShader.wgsl";

#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Present with `Fifo`, i.e. swap interval 1
    pub vsync: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConfig {
    /// Radians added to the orbit angle every frame
    pub step: f32,
    pub radius: f32,
    pub height: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Debug)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub orbit: OrbitConfig,
    pub num_particles: u32,
    pub seed: u64,
    pub vertex_shader_path: PathBuf,
    pub fragment_shader_path: PathBuf,
    /// Frames between timing reports
    pub report_interval: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            vsync: true,
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            step: ORBIT_STEP,
            radius: ORBIT_RADIUS,
            height: ORBIT_HEIGHT,
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            orbit: OrbitConfig::default(),
            num_particles: N_PARTICLES,
            seed: DEFAULT_SEED,
            vertex_shader_path: PathBuf::from(VERTEX_SHADER_FILE),
            fragment_shader_path: PathBuf::from(FRAGMENT_SHADER_FILE),
            report_interval: REPORT_INTERVAL,
        }
    }
}

impl WindowConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_constants() {
        let config = DemoConfig::default();
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.window.height, 900);
        assert_eq!(config.window.title, "Particles!");
        assert_eq!(config.num_particles, 4_000_000);
        assert_eq!(config.seed, 49770);
        assert_eq!(config.report_interval, 100);
        assert_eq!(config.vertex_shader_path, PathBuf::from("ParticleShader.wgsl"));
        assert_eq!(config.fragment_shader_path, PathBuf::from("FragmentShader.wgsl"));
    }

    #[test]
    fn vsync_selects_fifo() {
        let mut window = WindowConfig::default();
        assert_eq!(window.present_mode(), wgpu::PresentMode::Fifo);
        window.vsync = false;
        assert_eq!(window.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn aspect_ratio_is_four_thirds() {
        let window = WindowConfig::default();
        assert!((window.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }
}
