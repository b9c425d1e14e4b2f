//! Frame timing statistics printed to the console

use std::{
    fmt,
    time::{Duration, Instant},
};

/// Guards the divisions below against a zero duration
const EPSILON_SECS: f64 = 0.000_001;

/// Timing summary over one report interval
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Frames per second averaged over the interval
    pub average_fps: f64,
    /// The longest frame of the interval, expressed as frames per second
    pub longest_fps: f64,
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Avg : {} Longest", self.average_fps, self.longest_fps)
    }
}

/// Accumulates per-frame durations and yields a [`FrameReport`] every
/// `interval` frames
#[derive(Debug)]
pub struct FrameStats {
    interval: u32,
    frame_counter: u64,
    interval_start: Option<Instant>,
    longest_frame: Duration,
}

impl FrameStats {
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            frame_counter: 0,
            interval_start: None,
            longest_frame: Duration::ZERO,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frame_counter
    }

    /// Call at the start of a frame; opens a new interval when one is due
    pub fn begin_frame(&mut self, now: Instant) {
        if self.frame_counter % self.interval as u64 == 0 {
            self.interval_start = Some(now);
            self.longest_frame = Duration::ZERO;
        }
    }

    /// Call after presenting; returns a report on the last frame of an interval
    pub fn end_frame(&mut self, frame_start: Instant, now: Instant) -> Option<FrameReport> {
        let frame_time = now.saturating_duration_since(frame_start);
        self.longest_frame = self.longest_frame.max(frame_time);

        let interval = self.interval as u64;
        let report = if self.frame_counter % interval == interval - 1 {
            let start = self.interval_start.unwrap_or(frame_start);
            let elapsed = now.saturating_duration_since(start).as_secs_f64();
            Some(FrameReport {
                average_fps: (interval - 1) as f64 / (elapsed + EPSILON_SECS),
                longest_fps: 1.0 / (self.longest_frame.as_secs_f64() + EPSILON_SECS),
            })
        } else {
            None
        };

        self.frame_counter += 1;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs `frames` back to back starting at `t0`
    fn run_frames(stats: &mut FrameStats, t0: Instant, frames: &[Duration]) -> Vec<FrameReport> {
        let mut now = t0;
        let mut reports = Vec::new();
        for frame in frames {
            stats.begin_frame(now);
            let start = now;
            now += *frame;
            if let Some(report) = stats.end_frame(start, now) {
                reports.push(report);
            }
        }
        reports
    }

    #[test]
    fn reports_once_per_interval() {
        let mut stats = FrameStats::new(100);
        let frames = vec![Duration::from_millis(10); 250];
        let reports = run_frames(&mut stats, Instant::now(), &frames);
        assert_eq!(reports.len(), 2);
        assert_eq!(stats.frames(), 250);
    }

    #[test]
    fn average_uses_interval_minus_one_frames() {
        let mut stats = FrameStats::new(100);
        let frames = vec![Duration::from_millis(10); 100];
        let reports = run_frames(&mut stats, Instant::now(), &frames);
        let report = reports[0];

        // 99 frames over one second
        assert!((report.average_fps - 99.0 / (1.0 + EPSILON_SECS)).abs() < 1e-6);
        assert!((report.longest_fps - 1.0 / (0.01 + EPSILON_SECS)).abs() < 1e-6);
    }

    #[test]
    fn longest_frame_resets_each_interval() {
        let mut stats = FrameStats::new(4);
        let mut frames = vec![Duration::from_millis(5); 8];
        frames[1] = Duration::from_millis(50);
        let reports = run_frames(&mut stats, Instant::now(), &frames);

        assert_eq!(reports.len(), 2);
        assert!((reports[0].longest_fps - 1.0 / (0.05 + EPSILON_SECS)).abs() < 1e-6);
        assert!((reports[1].longest_fps - 1.0 / (0.005 + EPSILON_SECS)).abs() < 1e-6);
    }

    #[test]
    fn report_formats_like_console_line() {
        let report = FrameReport {
            average_fps: 60.5,
            longest_fps: 30.25,
        };
        assert_eq!(report.to_string(), "60.5 Avg : 30.25 Longest");
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut stats = FrameStats::new(0);
        let reports = run_frames(&mut stats, Instant::now(), &[Duration::from_millis(1); 3]);
        assert_eq!(reports.len(), 3);
    }
}
