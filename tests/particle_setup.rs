// Startup data and per-frame CPU state, exercised the way the app drives them
// but without a window or device.

use std::time::{Duration, Instant};

use shared::{uniforms::WIND_OFFSET, ParticleUniforms, DEFAULT_SEED, REPORT_INTERVAL};
use vertex_particles::{
    camera::OrbitCamera, particles::ParticleStaging, timing::FrameStats, DemoConfig,
};

#[test]
fn ten_particles_are_reproducible() {
    let a = ParticleStaging::generate(10, DEFAULT_SEED);
    let b = ParticleStaging::generate(10, DEFAULT_SEED);

    assert_eq!(a.num_particles(), 10);
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.velocities, b.velocities);
    assert_eq!(a.wind, b.wind);
    assert!(a.velocities.iter().all(|v| v.is_zero()));
}

#[test]
fn staged_wind_lands_in_uniform_bytes() {
    let staging = ParticleStaging::generate(4, DEFAULT_SEED);
    let uniforms = ParticleUniforms::new(staging.wind);
    let bytes = uniforms.as_bytes();

    for (i, entry) in staging.wind.iter().enumerate() {
        let at = WIND_OFFSET + i * 16;
        let value = i32::from_ne_bytes(bytes[at..at + 4].try_into().unwrap());
        assert_eq!(value, entry.value);
    }
}

#[test]
fn a_report_interval_of_frames_prints_once() {
    let config = DemoConfig::default();
    let mut camera = OrbitCamera::new(config.orbit, config.window.aspect_ratio());
    let mut stats = FrameStats::new(config.report_interval);

    let mut now = Instant::now();
    let mut reports = Vec::new();
    for _ in 0..REPORT_INTERVAL {
        let frame_start = now;
        stats.begin_frame(frame_start);
        camera.update();
        now += Duration::from_millis(10);
        if let Some(report) = stats.end_frame(frame_start, now) {
            reports.push(report);
        }
    }

    assert_eq!(reports.len(), 1);
    assert!(reports[0].to_string().contains(" Avg : "));
    assert!(reports[0].to_string().ends_with(" Longest"));
    let expected_angle = config.orbit.step * REPORT_INTERVAL as f32;
    assert!((camera.angle - expected_angle).abs() < 1e-4);
}
