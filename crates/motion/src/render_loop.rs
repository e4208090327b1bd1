use tracing::debug;

use crate::uniforms::{RotationMode, UniformSet, UniformStore, TIME_STEP};

const IDLE_ROTATION_CENTER: f64 = 0.9;
const IDLE_ROTATION_AMPLITUDE: f64 = 0.1;
const IDLE_ROTATION_FREQUENCY: f64 = 0.5;

/// Rotation speed the scene drifts through while no transition owns it.
pub fn idle_rotation(time: f64) -> f32 {
    let speed =
        IDLE_ROTATION_CENTER + (time * IDLE_ROTATION_FREQUENCY).sin() * IDLE_ROTATION_AMPLITUDE;
    speed as f32
}

/// Consumer of one uniform snapshot per frame (the GPU draw).
pub trait FrameSink {
    type Error;

    fn draw(&mut self, uniforms: &UniformSet) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// The loop is paused; nothing was updated or drawn.
    Skipped,
}

/// Per-frame driver: advances time, applies idle rotation, draws.
#[derive(Debug, Clone, Default)]
pub struct RenderLoop {
    state: LoopState,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether the owner should schedule another frame.
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame<S: FrameSink>(
        &mut self,
        store: &mut UniformStore,
        sink: &mut S,
    ) -> Result<FrameOutcome, S::Error> {
        if self.state == LoopState::Paused {
            return Ok(FrameOutcome::Skipped);
        }

        let time = store.time() + TIME_STEP;
        store.set_time(time);
        if store.rotation_mode() == RotationMode::Idle {
            store.set_rotation_speed(idle_rotation(time));
        }

        self.frames += 1;
        sink.draw(store.values())?;
        Ok(FrameOutcome::Drawn)
    }

    pub fn stop(&mut self) {
        if self.state != LoopState::Paused {
            debug!(frames = self.frames, "render loop paused");
        }
        self.state = LoopState::Paused;
    }

    /// Resumes the loop and renders one frame straight away.
    pub fn play<S: FrameSink>(
        &mut self,
        store: &mut UniformStore,
        sink: &mut S,
    ) -> Result<FrameOutcome, S::Error> {
        if self.state != LoopState::Running {
            debug!(time = store.time(), "render loop resumed");
        }
        self.state = LoopState::Running;
        self.frame(store, sink)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        draws: Vec<UniformSet>,
    }

    impl FrameSink for RecordingSink {
        type Error = Infallible;

        fn draw(&mut self, uniforms: &UniformSet) -> Result<(), Infallible> {
            self.draws.push(*uniforms);
            Ok(())
        }
    }

    struct FailingSink;

    impl FrameSink for FailingSink {
        type Error = &'static str;

        fn draw(&mut self, _uniforms: &UniformSet) -> Result<(), &'static str> {
            Err("surface lost")
        }
    }

    #[test]
    fn time_advances_by_fixed_step_per_frame() {
        let mut store = UniformStore::new([0.0; 3]);
        let mut sink = RecordingSink::default();
        let mut render_loop = RenderLoop::new();
        for _ in 0..200 {
            render_loop.frame(&mut store, &mut sink).unwrap();
        }
        assert!((store.time() - 200.0 * TIME_STEP).abs() < 1e-3);
        assert_eq!(sink.draws.len(), 200);
        assert_eq!(render_loop.frames(), 200);
    }

    #[test]
    fn draw_sees_the_frame_updates() {
        let mut store = UniformStore::new([0.0; 3]);
        let mut sink = RecordingSink::default();
        let mut render_loop = RenderLoop::new();
        render_loop.frame(&mut store, &mut sink).unwrap();
        let drawn = sink.draws[0];
        assert_eq!(drawn.time, TIME_STEP as f32);
        assert_eq!(drawn.rotation_speed, idle_rotation(TIME_STEP));
    }

    #[test]
    fn time_keeps_advancing_after_long_sessions() {
        let mut store = UniformStore::new([0.0; 3]);
        store.set_time(1_048_576.0);
        let mut sink = RecordingSink::default();
        let mut render_loop = RenderLoop::new();

        let before = store.time();
        render_loop.frame(&mut store, &mut sink).unwrap();
        assert!((store.time() - before - TIME_STEP).abs() < 1e-6);

        for _ in 0..99 {
            render_loop.frame(&mut store, &mut sink).unwrap();
        }
        assert!((store.time() - (before + 100.0 * TIME_STEP)).abs() < 1e-6);
        assert!(sink.draws[99].time > sink.draws[0].time);
    }

    #[test]
    fn idle_rotation_stays_in_band() {
        let mut store = UniformStore::new([0.0; 3]);
        let mut sink = RecordingSink::default();
        let mut render_loop = RenderLoop::new();
        for _ in 0..2000 {
            render_loop.frame(&mut store, &mut sink).unwrap();
            let speed = store.rotation_speed();
            assert!((0.8..=1.0).contains(&speed), "speed {speed} left the idle band");
        }
    }

    #[test]
    fn transitioning_rotation_is_left_alone() {
        let mut store = UniformStore::new([0.0; 3]);
        store.set_rotation_mode(RotationMode::Transitioning);
        store.set_rotation_speed(0.25);
        let mut sink = RecordingSink::default();
        let mut render_loop = RenderLoop::new();
        render_loop.frame(&mut store, &mut sink).unwrap();
        assert_eq!(store.rotation_speed(), 0.25);
    }

    #[test]
    fn paused_loop_skips_frames_and_resume_continues_time() {
        let mut store = UniformStore::new([0.0; 3]);
        let mut sink = RecordingSink::default();
        let mut render_loop = RenderLoop::new();
        for _ in 0..4 {
            render_loop.frame(&mut store, &mut sink).unwrap();
        }
        let paused_at = store.time();

        render_loop.stop();
        for _ in 0..10 {
            assert_eq!(
                render_loop.frame(&mut store, &mut sink).unwrap(),
                FrameOutcome::Skipped
            );
        }
        assert_eq!(store.time(), paused_at);
        assert_eq!(sink.draws.len(), 4);

        assert_eq!(
            render_loop.play(&mut store, &mut sink).unwrap(),
            FrameOutcome::Drawn
        );
        assert!((store.time() - (paused_at + TIME_STEP)).abs() < 1e-6);
        assert!(render_loop.is_running());
    }

    #[test]
    fn sink_errors_propagate() {
        let mut store = UniformStore::new([0.0; 3]);
        let mut render_loop = RenderLoop::new();
        assert_eq!(
            render_loop.frame(&mut store, &mut FailingSink),
            Err("surface lost")
        );
    }
}
