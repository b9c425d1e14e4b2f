//! Draws four million point particles whose motion is integrated in the
//! vertex shader, with an average/longest frame report every 100 frames.

use anyhow::Result;
use tracing::Level;
use vertex_particles::{DemoConfig, ParticlesApp};
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> Result<()> {
    // diagnostics on stderr; stdout carries the frame reports
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::default();
    tracing::info!(
        "=== Vertex-shader particles: {} particles, {}x{} ===",
        config.num_particles,
        config.window.width,
        config.window.height
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ParticlesApp::new(config);
    event_loop.run_app(&mut app)?;

    app.into_result()?;
    Ok(())
}
