//! Window event handling and the per-frame loop

use std::{sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::{
    config::DemoConfig,
    error::{CrateResult, ParticlesError},
    graphics::ParticleRenderer,
    timing::FrameStats,
};

/// Lifecycle of the demo
pub enum AppState {
    /// No window or GPU resources yet
    Uninitialized,
    Running {
        window: Arc<Window>,
        renderer: ParticleRenderer,
    },
    /// Resources released; the event loop is exiting
    ShuttingDown,
}

pub struct ParticlesApp {
    config: DemoConfig,
    state: AppState,
    stats: FrameStats,
    failure: Option<ParticlesError>,
}

impl ParticlesApp {
    pub fn new(config: DemoConfig) -> Self {
        let stats = FrameStats::new(config.report_interval);
        Self {
            config,
            state: AppState::Uninitialized,
            stats,
            failure: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The error that stopped the demo, if any
    pub fn into_result(self) -> CrateResult<()> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> CrateResult<()> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.config.window.title.clone())
                    .with_inner_size(PhysicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    )),
            )?,
        );

        let renderer = pollster::block_on(ParticleRenderer::new(window.clone(), &self.config))?;
        tracing::info!(
            "Setup complete, rendering {} particles",
            renderer.num_particles()
        );

        window.request_redraw();
        self.state = AppState::Running { window, renderer };
        Ok(())
    }

    /// Drop every GPU resource and the window, then stop the event loop
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        if let AppState::Running { .. } = self.state {
            tracing::info!(
                "Window closed after {} frames, releasing GPU resources",
                self.stats.frames()
            );
        }
        self.state = AppState::ShuttingDown;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: ParticlesError) {
        tracing::error!("{e}");
        self.failure = Some(e);
        self.shut_down(event_loop);
    }

    fn redraw(&mut self) -> CrateResult<()> {
        let AppState::Running { window, renderer } = &mut self.state else {
            return Ok(());
        };

        let frame_start = Instant::now();
        self.stats.begin_frame(frame_start);

        renderer.update();
        renderer.render()?;

        if let Some(report) = self.stats.end_frame(frame_start, Instant::now()) {
            println!("{report}");
        }

        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for ParticlesApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !matches!(self.state, AppState::Uninitialized) {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shut_down(event_loop),
            WindowEvent::Resized(size) => {
                if let AppState::Running { renderer, .. } = &mut self.state {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized_without_failure() {
        let app = ParticlesApp::new(DemoConfig::default());
        assert!(matches!(app.state(), AppState::Uninitialized));
        assert!(app.into_result().is_ok());
    }

    #[test]
    fn stored_failure_is_returned() {
        let mut app = ParticlesApp::new(DemoConfig::default());
        app.failure = Some(ParticlesError::Other("no adapter".to_string()));
        let err = app.into_result().unwrap_err();
        assert!(err.to_string().contains("no adapter"));
    }

    #[test]
    fn redraw_before_start_is_a_no_op() {
        let mut app = ParticlesApp::new(DemoConfig::default());
        app.redraw().unwrap();
        assert_eq!(app.stats.frames(), 0);
    }
}
