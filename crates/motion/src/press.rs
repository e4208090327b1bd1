use std::time::{Duration, Instant};

use tracing::trace;

/// How long the pointer must stay down before the content advances.
pub const DEFAULT_HOLD: Duration = sketchconfig::DEFAULT_HOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressState {
    Idle,
    /// A press is in progress and fires once `deadline` passes.
    Pending { deadline: Instant },
}

/// Turns a sustained pointer press into a single advance request.
#[derive(Debug, Clone)]
pub struct PressHoldDetector {
    threshold: Duration,
    state: PressState,
}

impl Default for PressHoldDetector {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD)
    }
}

impl PressHoldDetector {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            state: PressState::Idle,
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, PressState::Pending { .. })
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            PressState::Pending { deadline } => Some(deadline),
            PressState::Idle => None,
        }
    }

    /// Starts the hold timer. A second press while one is pending keeps the
    /// original deadline.
    pub fn pointer_down(&mut self, now: Instant) {
        if let PressState::Idle = self.state {
            let deadline = now + self.threshold;
            trace!(hold_ms = self.threshold.as_millis() as u64, "press started");
            self.state = PressState::Pending { deadline };
        }
    }

    pub fn pointer_up(&mut self) {
        self.cancel("released");
    }

    pub fn pointer_leave(&mut self) {
        self.cancel("left surface");
    }

    /// Returns `true` exactly once per press that outlives the threshold.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            PressState::Pending { deadline } if now >= deadline => {
                self.state = PressState::Idle;
                true
            }
            _ => false,
        }
    }

    fn cancel(&mut self, reason: &'static str) {
        if self.is_pending() {
            trace!(reason, "press cancelled");
        }
        self.state = PressState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_press_never_fires() {
        let mut detector = PressHoldDetector::default();
        let start = Instant::now();
        detector.pointer_down(start);
        assert!(!detector.poll(start + Duration::from_millis(999)));
        detector.pointer_up();
        assert!(!detector.poll(start + Duration::from_secs(5)));
        assert_eq!(detector.state(), PressState::Idle);
    }

    #[test]
    fn held_press_fires_exactly_once() {
        let mut detector = PressHoldDetector::default();
        let start = Instant::now();
        detector.pointer_down(start);
        let fired = (0..50)
            .filter(|step| detector.poll(start + Duration::from_millis(100 * step)))
            .count();
        assert_eq!(fired, 1);
        assert!(!detector.is_pending());
    }

    #[test]
    fn leaving_the_surface_cancels_pending_press() {
        let mut detector = PressHoldDetector::default();
        let start = Instant::now();
        detector.pointer_down(start);
        detector.pointer_leave();
        assert!(!detector.poll(start + Duration::from_millis(1500)));
    }

    #[test]
    fn repeated_down_does_not_extend_deadline() {
        let mut detector = PressHoldDetector::default();
        let start = Instant::now();
        detector.pointer_down(start);
        detector.pointer_down(start + Duration::from_millis(600));
        assert_eq!(
            detector.next_deadline(),
            Some(start + Duration::from_millis(1000))
        );
        assert!(detector.poll(start + Duration::from_millis(1000)));
    }

    #[test]
    fn detector_is_ready_for_a_new_press_after_firing() {
        let mut detector = PressHoldDetector::new(Duration::from_millis(250));
        let start = Instant::now();
        detector.pointer_down(start);
        assert!(detector.poll(start + Duration::from_millis(250)));
        detector.pointer_up();
        let second = start + Duration::from_secs(1);
        detector.pointer_down(second);
        assert!(detector.poll(second + Duration::from_millis(300)));
    }
}
