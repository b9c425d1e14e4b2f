use glam::{Mat4, Vec3};

use crate::config::OrbitConfig;

/// Camera circling the origin at a fixed radius and height.
///
/// The angle advances by a fixed step per call to [`OrbitCamera::update`], so
/// orbit speed follows the frame rate.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub angle: f32,
    config: OrbitConfig,
    aspect: f32,
    model: Mat4,
    projection: Mat4,
    view: Mat4,
    mvp: Mat4,
}

impl OrbitCamera {
    pub fn new(config: OrbitConfig, aspect: f32) -> Self {
        let mut camera = Self {
            angle: 0.0,
            config,
            aspect,
            model: Mat4::from_translation(Vec3::ZERO),
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            mvp: Mat4::IDENTITY,
        };
        camera.projection = camera.build_projection();
        camera.recompute();
        camera
    }

    /// Advance one frame and rebuild the MVP
    pub fn update(&mut self) {
        self.angle += self.config.step;
        self.recompute();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.projection = self.build_projection();
        self.recompute();
    }

    pub fn eye(&self) -> Vec3 {
        let OrbitConfig { radius, height, .. } = self.config;
        Vec3::new(
            self.angle.sin() * radius,
            height,
            -self.angle.cos() * radius,
        )
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn mvp(&self) -> Mat4 {
        self.mvp
    }

    fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_y,
            self.aspect,
            self.config.near,
            self.config.far,
        )
    }

    fn recompute(&mut self) {
        self.view = Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y);
        self.mvp = self.projection * self.view * self.model;
    }
}
