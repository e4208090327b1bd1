//! Explicit timed tracks over uniform fields and caption styles.
//!
//! A [`Timeline`] owns a set of [`Track`]s that all share one origin
//! `Instant`. Each track waits out its delay (`Pending`), plays its chained
//! steps one after another (`Running`), and finally settles on the last
//! step's target (`Done`). Steps capture their start value when they become
//! active, so a chained step eases from wherever the previous one stopped.

use std::time::{Duration, Instant};

use tracing::{trace, warn};

use crate::easing::Easing;
use crate::text::{TextSlot, TextStyle, TextSurface};
use crate::uniforms::{RotationMode, UniformStore};

/// Mutable view over everything a track may write.
pub struct Stage<'a> {
    pub uniforms: &'a mut UniformStore,
    pub text: &'a mut dyn TextSurface,
}

impl<'a> Stage<'a> {
    pub fn new(uniforms: &'a mut UniformStore, text: &'a mut dyn TextSurface) -> Self {
        Self { uniforms, text }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RotationSpeed,
    ScaleIntensity,
    SphereSize,
    SphereColor,
    Text(TextSlot),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Scalar(f32),
    Color([f32; 3]),
    Text(TextStyle),
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Value {
    fn lerp(self, target: Value, t: f32) -> Value {
        match (self, target) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(mix(a, b, t)),
            (Value::Color(a), Value::Color(b)) => Value::Color([
                mix(a[0], b[0], t),
                mix(a[1], b[1], t),
                mix(a[2], b[2], t),
            ]),
            (Value::Text(a), Value::Text(b)) => Value::Text(TextStyle::new(
                mix(a.offset, b.offset, t),
                mix(a.opacity, b.opacity, t),
            )),
            (_, target) => target,
        }
    }
}

impl Field {
    pub fn read(self, stage: &Stage<'_>) -> Value {
        let uniforms = &stage.uniforms;
        match self {
            Field::RotationSpeed => Value::Scalar(uniforms.rotation_speed()),
            Field::ScaleIntensity => Value::Scalar(uniforms.scale_intensity()),
            Field::SphereSize => Value::Scalar(uniforms.sphere_size()),
            Field::SphereColor => Value::Color(uniforms.sphere_color()),
            Field::Text(slot) => Value::Text(stage.text.style(slot)),
        }
    }

    pub fn write(self, stage: &mut Stage<'_>, value: Value) {
        match (self, value) {
            (Field::RotationSpeed, Value::Scalar(v)) => {
                stage.uniforms.set_rotation_mode(RotationMode::Transitioning);
                stage.uniforms.set_rotation_speed(v);
            }
            (Field::ScaleIntensity, Value::Scalar(v)) => stage.uniforms.set_scale_intensity(v),
            (Field::SphereSize, Value::Scalar(v)) => stage.uniforms.set_sphere_size(v),
            (Field::SphereColor, Value::Color(c)) => stage.uniforms.set_sphere_color(c),
            (Field::Text(slot), Value::Text(style)) => stage.text.set_style(slot, style),
            (field, value) => warn!(?field, ?value, "ignoring mismatched track value"),
        }
    }

    /// Hands the field back to its idle owner once a track finishes.
    fn release(self, stage: &mut Stage<'_>) {
        if let Field::RotationSpeed = self {
            stage.uniforms.set_rotation_mode(RotationMode::Idle);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub target: Value,
    pub duration: Duration,
    pub easing: Easing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    Pending,
    Running,
    Done,
}

#[derive(Debug, Clone)]
pub struct Track {
    field: Field,
    delay: Duration,
    steps: Vec<Step>,
    state: TrackState,
    cursor: usize,
    step_started: Option<Instant>,
    from: Option<Value>,
}

impl Track {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            delay: Duration::ZERO,
            steps: Vec::new(),
            state: TrackState::Pending,
            cursor: 0,
            step_started: None,
            from: None,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Appends a step that eases toward `target` after the previous step ends.
    pub fn to(mut self, target: Value, duration: Duration, easing: Easing) -> Self {
        self.steps.push(Step {
            target,
            duration,
            easing,
        });
        self
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    /// Total time from the timeline origin until this track settles.
    pub fn span(&self) -> Duration {
        self.delay + self.steps.iter().map(|step| step.duration).sum::<Duration>()
    }

    fn advance(&mut self, origin: Instant, now: Instant, stage: &mut Stage<'_>) -> TrackState {
        if self.state == TrackState::Done {
            return TrackState::Done;
        }

        let begin = origin + self.delay;
        if now < begin {
            return TrackState::Pending;
        }
        if self.state == TrackState::Pending {
            self.state = TrackState::Running;
            self.cursor = 0;
            self.step_started = Some(begin);
            self.from = None;
        }

        loop {
            let Some(step) = self.steps.get(self.cursor).copied() else {
                self.state = TrackState::Done;
                self.field.release(stage);
                trace!(field = ?self.field, "track finished");
                return TrackState::Done;
            };
            let started = self.step_started.unwrap_or(begin);
            let from = match self.from {
                Some(value) => value,
                None => {
                    let value = self.field.read(stage);
                    self.from = Some(value);
                    value
                }
            };

            let elapsed = now.saturating_duration_since(started);
            if elapsed >= step.duration {
                self.field.write(stage, step.target);
                self.cursor += 1;
                self.step_started = Some(started + step.duration);
                self.from = None;
                continue;
            }

            let progress = elapsed.as_secs_f32() / step.duration.as_secs_f32().max(f32::EPSILON);
            let value = from.lerp(step.target, step.easing.sample(progress));
            self.field.write(stage, value);
            return TrackState::Running;
        }
    }
}

/// A group of tracks started together.
#[derive(Debug, Clone)]
pub struct Timeline {
    origin: Instant,
    tracks: Vec<Track>,
}

impl Timeline {
    pub fn new(origin: Instant) -> Self {
        Self {
            origin,
            tracks: Vec::new(),
        }
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn track(&self, field: Field) -> Option<&Track> {
        self.tracks.iter().find(|track| track.field == field)
    }

    pub fn is_finished(&self) -> bool {
        self.tracks
            .iter()
            .all(|track| track.state == TrackState::Done)
    }

    /// Instant at which the last track settles.
    pub fn end(&self) -> Instant {
        self.origin
            + self
                .tracks
                .iter()
                .map(Track::span)
                .max()
                .unwrap_or(Duration::ZERO)
    }

    /// Advances every track to `now`; returns `true` once all are done.
    pub fn tick(&mut self, now: Instant, stage: &mut Stage<'_>) -> bool {
        let origin = self.origin;
        let mut finished = true;
        for track in &mut self.tracks {
            if track.advance(origin, now, stage) != TrackState::Done {
                finished = false;
            }
        }
        finished
    }
}
