use std::time::{Duration, Instant};

use tracing::debug;

use crate::content::ContentItem;
use crate::easing::Easing;
use crate::text::{TextSlot, TextStyle};
use crate::timeline::{Field, Stage, Timeline, Track, Value};

const SCALE_PULSE_PEAK: f32 = 33.0;
const SCALE_PULSE_DIP: f32 = 12.0;
const SCALE_PULSE_SETTLE: f32 = 30.0;
const SIZE_PULSE_REST: f32 = 0.4;
const SIZE_PULSE_PEAK: f32 = 0.5;
const TEXT_ENTRY_OFFSET: f32 = 100.0;

/// Durations and easing shared by every transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTimings {
    pub rotation_dip: Duration,
    pub rotation_recover: Duration,
    /// Length of each half of the scale and size pulses.
    pub pulse: Duration,
    pub color: Duration,
    pub text: Duration,
    /// Delay of the subtitle entrance relative to the title.
    pub text_stagger: Duration,
    pub easing: Easing,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            rotation_dip: Duration::from_millis(800),
            rotation_recover: Duration::from_millis(1000),
            pulse: Duration::from_millis(1200),
            color: Duration::from_millis(1000),
            text: Duration::from_millis(1000),
            text_stagger: Duration::from_millis(320),
            easing: Easing::CircInOut,
        }
    }
}

/// Launches and advances the content-change animation.
///
/// Only one timeline is live at a time: starting a new transition drops the
/// tracks of the previous one, and the new tracks ease from whatever values
/// the old ones had reached.
#[derive(Debug, Clone, Default)]
pub struct TransitionOrchestrator {
    timings: TransitionTimings,
    active: Option<Timeline>,
    launched: u64,
}

impl TransitionOrchestrator {
    pub fn new(timings: TransitionTimings) -> Self {
        Self {
            timings,
            active: None,
            launched: 0,
        }
    }

    pub fn timings(&self) -> &TransitionTimings {
        &self.timings
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.active.as_ref()
    }

    /// Number of transitions started so far.
    pub fn launched(&self) -> u64 {
        self.launched
    }

    pub fn run_transition(&mut self, content: &ContentItem, stage: &mut Stage<'_>, now: Instant) {
        if self.active.take().is_some() {
            debug!("superseding in-flight transition");
        }

        stage.uniforms.set_scale_intensity(SCALE_PULSE_PEAK);
        stage.uniforms.set_sphere_size(SIZE_PULSE_REST);
        let hidden = TextStyle::new(TEXT_ENTRY_OFFSET, 0.0);
        for slot in TextSlot::ALL {
            stage.text.set_style(slot, hidden);
        }

        let t = self.timings;
        let ease = t.easing;
        let shown = Value::Text(TextStyle::new(0.0, 1.0));
        let mut timeline = Timeline::new(now)
            .with_track(
                Track::new(Field::RotationSpeed)
                    .to(Value::Scalar(0.0), t.rotation_dip, ease)
                    .to(Value::Scalar(1.0), t.rotation_recover, ease),
            )
            .with_track(
                Track::new(Field::ScaleIntensity)
                    .to(Value::Scalar(SCALE_PULSE_DIP), t.pulse, ease)
                    .to(Value::Scalar(SCALE_PULSE_SETTLE), t.pulse, ease),
            )
            .with_track(
                Track::new(Field::SphereSize)
                    .to(Value::Scalar(SIZE_PULSE_PEAK), t.pulse, ease)
                    .to(Value::Scalar(SIZE_PULSE_REST), t.pulse, ease),
            )
            .with_track(Track::new(Field::SphereColor).to(
                Value::Color(content.color),
                t.color,
                ease,
            ))
            .with_track(Track::new(Field::Text(TextSlot::Title)).to(shown, t.text, ease))
            .with_track(
                Track::new(Field::Text(TextSlot::Subtitle))
                    .delay(t.text_stagger)
                    .to(shown, t.text, ease),
            );

        self.launched += 1;
        debug!(
            title = %content.title,
            color = ?content.color,
            ends_in_ms = timeline.end().saturating_duration_since(now).as_millis() as u64,
            "transition started"
        );

        if !timeline.tick(now, stage) {
            self.active = Some(timeline);
        }
    }

    /// Advances the live timeline; returns `true` while it is still running.
    pub fn tick(&mut self, stage: &mut Stage<'_>, now: Instant) -> bool {
        let Some(timeline) = self.active.as_mut() else {
            return false;
        };
        if timeline.tick(now, stage) {
            debug!("transition finished");
            self.active = None;
            false
        } else {
            true
        }
    }
}
