use std::time::{Duration, Instant};

use tracing::debug;

/// Decides when the window should request the next redraw.
///
/// Without a cap every `ready_for_frame` call says yes and presentation is
/// paced by vsync. With a cap, frames are spaced by `1 / fps` measured from
/// the last rendered frame.
#[derive(Debug, Clone)]
pub(crate) struct FramePacer {
    interval: Option<Duration>,
    last_rendered: Option<Instant>,
}

impl FramePacer {
    pub(crate) fn new(target_fps: Option<f32>) -> Self {
        let interval = target_fps
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .map(|fps| Duration::from_secs_f32(1.0 / fps));
        Self {
            interval,
            last_rendered: None,
        }
    }

    pub(crate) fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub(crate) fn ready_for_frame(&self, now: Instant) -> bool {
        match self.next_deadline() {
            Some(deadline) => now >= deadline,
            None => true,
        }
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        let interval = self.interval?;
        self.last_rendered.map(|last| last + interval)
    }

    pub(crate) fn mark_rendered(&mut self, now: Instant) {
        self.last_rendered = Some(now);
    }

    pub(crate) fn reset(&mut self) {
        self.last_rendered = None;
    }
}

/// Rolling frame counter that logs a line once per second.
#[derive(Debug, Clone)]
pub(crate) struct RenderStats {
    window_start: Instant,
    frames_in_window: u32,
    total_frames: u64,
    fps: f32,
}

impl RenderStats {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames_in_window: 0,
            total_frames: 0,
            fps: 0.0,
        }
    }

    pub(crate) fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Records one presented frame; returns the fps each time a full second
    /// of frames has been counted.
    pub(crate) fn record(&mut self, now: Instant, time: f32) -> Option<f32> {
        self.frames_in_window += 1;
        self.total_frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        self.fps = self.frames_in_window as f32 / elapsed.as_secs_f32();
        self.frames_in_window = 0;
        self.window_start = now;
        debug!(
            fps = self.fps.round(),
            frame_count = self.total_frames,
            time,
            "render stats"
        );
        Some(self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_pacer_is_always_ready() {
        let mut pacer = FramePacer::new(None);
        let now = Instant::now();
        assert!(pacer.ready_for_frame(now));
        pacer.mark_rendered(now);
        assert!(pacer.ready_for_frame(now));
        assert_eq!(pacer.next_deadline(), None);
    }

    #[test]
    fn capped_pacer_spaces_frames() {
        let mut pacer = FramePacer::new(Some(10.0));
        let now = Instant::now();
        assert!(pacer.ready_for_frame(now));
        pacer.mark_rendered(now);
        assert!(!pacer.ready_for_frame(now + Duration::from_millis(50)));
        assert!(pacer.ready_for_frame(now + Duration::from_millis(100)));
        assert_eq!(pacer.next_deadline(), Some(now + Duration::from_millis(100)));

        pacer.reset();
        assert!(pacer.ready_for_frame(now));
    }

    #[test]
    fn zero_fps_means_uncapped() {
        assert_eq!(FramePacer::new(Some(0.0)).interval(), None);
    }

    #[test]
    fn stats_report_once_per_second() {
        let start = Instant::now();
        let mut stats = RenderStats::new(start);
        for i in 1..60 {
            assert_eq!(
                stats.record(start + Duration::from_millis(i * 16), 0.0),
                None
            );
        }
        let fps = stats.record(start + Duration::from_secs(1), 0.0);
        assert_eq!(fps, Some(60.0));
        assert_eq!(stats.total_frames(), 60);
    }
}
