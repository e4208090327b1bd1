use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::content::{default_content, ContentCycler, ContentItem};
use crate::pointer::PointerTracker;
use crate::press::{PressHoldDetector, DEFAULT_HOLD};
use crate::render_loop::{FrameOutcome, FrameSink, LoopState, RenderLoop};
use crate::text::TextSurface;
use crate::timeline::Stage;
use crate::transition::{TransitionOrchestrator, TransitionTimings};
use crate::uniforms::UniformStore;
use crate::viewport::{Framing, ViewportAdapter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchOptions {
    pub hold: Duration,
    pub timings: TransitionTimings,
    pub start_paused: bool,
}

impl Default for SketchOptions {
    fn default() -> Self {
        Self {
            hold: DEFAULT_HOLD,
            timings: TransitionTimings::default(),
            start_paused: false,
        }
    }
}

/// The whole interactive scene minus the GPU.
///
/// The renderer forwards window events here, calls [`Sketch::frame`] once per
/// redraw, and uploads whatever the [`FrameSink`] receives.
pub struct Sketch<T: TextSurface> {
    store: UniformStore,
    text: T,
    viewport: ViewportAdapter,
    pointer: PointerTracker,
    press: PressHoldDetector,
    cycler: ContentCycler,
    orchestrator: TransitionOrchestrator,
    render_loop: RenderLoop,
}

impl<T: TextSurface> Sketch<T> {
    /// Builds the scene and plays the entrance for the first item.
    pub fn new(items: Vec<ContentItem>, text: T, options: SketchOptions, now: Instant) -> Self {
        let initial_color = items
            .first()
            .or(default_content().first())
            .map(|item| item.color)
            .unwrap_or([1.0; 3]);

        let mut sketch = Self {
            store: UniformStore::new(initial_color),
            text,
            viewport: ViewportAdapter::new(),
            pointer: PointerTracker::new(),
            press: PressHoldDetector::new(options.hold),
            cycler: ContentCycler::new(items),
            orchestrator: TransitionOrchestrator::new(options.timings),
            render_loop: RenderLoop::new(),
        };

        info!(
            items = sketch.cycler.len(),
            hold_ms = options.hold.as_millis() as u64,
            "sketch ready"
        );

        let mut stage = Stage::new(&mut sketch.store, &mut sketch.text);
        sketch
            .cycler
            .present_current(&mut sketch.orchestrator, &mut stage, now);

        if options.start_paused {
            sketch.render_loop.stop();
        }
        sketch
    }

    pub fn uniforms(&self) -> &UniformStore {
        &self.store
    }

    pub fn text(&self) -> &T {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut T {
        &mut self.text
    }

    pub fn framing(&self) -> &Framing {
        self.viewport.framing()
    }

    pub fn viewport(&self) -> &ViewportAdapter {
        &self.viewport
    }

    pub fn cycler(&self) -> &ContentCycler {
        &self.cycler
    }

    pub fn orchestrator(&self) -> &TransitionOrchestrator {
        &self.orchestrator
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    pub fn state(&self) -> LoopState {
        self.render_loop.state()
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    /// Earliest instant at which [`Sketch::update`] has work to do, besides
    /// any running transition.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.press.next_deadline()
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.viewport.on_resize(width, height, &mut self.store)
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        let (width, height) = self.viewport.size();
        self.pointer
            .on_pointer_move(x, y, width, height, &mut self.store);
    }

    pub fn pointer_down(&mut self, now: Instant) {
        self.press.pointer_down(now);
    }

    pub fn pointer_up(&mut self) {
        self.press.pointer_up();
    }

    pub fn pointer_left(&mut self) {
        self.press.pointer_leave();
    }

    /// Moves to the next content item immediately.
    pub fn advance(&mut self, now: Instant) -> Option<usize> {
        let mut stage = Stage::new(&mut self.store, &mut self.text);
        self.cycler
            .advance(&mut self.orchestrator, &mut stage, now)
    }

    /// Fires an expired press-and-hold and advances the running transition.
    ///
    /// Returns `true` while a transition is still animating.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.press.poll(now) {
            debug!("press held; advancing content");
            self.advance(now);
        }
        let mut stage = Stage::new(&mut self.store, &mut self.text);
        self.orchestrator.tick(&mut stage, now)
    }

    /// Runs [`Sketch::update`] and then one render-loop frame.
    pub fn frame<S: FrameSink>(
        &mut self,
        now: Instant,
        sink: &mut S,
    ) -> Result<FrameOutcome, S::Error> {
        self.update(now);
        self.render_loop.frame(&mut self.store, sink)
    }

    pub fn stop(&mut self) {
        self.render_loop.stop();
    }

    pub fn play<S: FrameSink>(
        &mut self,
        now: Instant,
        sink: &mut S,
    ) -> Result<FrameOutcome, S::Error> {
        self.update(now);
        self.render_loop.play(&mut self.store, sink)
    }

    /// Flips between running and paused; returns the new state.
    pub fn toggle_pause<S: FrameSink>(
        &mut self,
        now: Instant,
        sink: &mut S,
    ) -> Result<LoopState, S::Error> {
        match self.render_loop.state() {
            LoopState::Running => self.stop(),
            LoopState::Paused => {
                self.play(now, sink)?;
            }
        }
        Ok(self.render_loop.state())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::text::{TextOverlay, TextSlot};
    use crate::uniforms::{UniformSet, TIME_STEP};

    #[derive(Default)]
    struct CountingSink {
        last: Option<UniformSet>,
        draws: usize,
    }

    impl FrameSink for CountingSink {
        type Error = Infallible;

        fn draw(&mut self, uniforms: &UniformSet) -> Result<(), Infallible> {
            self.last = Some(*uniforms);
            self.draws += 1;
            Ok(())
        }
    }

    fn sketch(now: Instant) -> Sketch<TextOverlay> {
        Sketch::new(
            default_content(),
            TextOverlay::new(),
            SketchOptions::default(),
            now,
        )
    }

    #[test]
    fn startup_plays_the_first_entrance() {
        let start = Instant::now();
        let mut sketch = sketch(start);
        assert_eq!(sketch.cycler().current_index(), 0);
        assert_eq!(sketch.text().region(TextSlot::Title).text, "BEHOLD!!");
        assert_eq!(sketch.uniforms().scale_intensity(), 33.0);
        assert_eq!(sketch.uniforms().sphere_color(), [0.1, 0.8, 0.1]);

        assert!(!sketch.update(start + Duration::from_secs(3)));
        assert_eq!(sketch.text().region(TextSlot::Title).style.opacity, 1.0);
        assert_eq!(sketch.uniforms().scale_intensity(), 30.0);
    }

    #[test]
    fn holding_past_threshold_advances_once() {
        let start = Instant::now();
        let mut sketch = sketch(start);
        sketch.update(start + Duration::from_secs(3));

        let down = start + Duration::from_secs(4);
        sketch.pointer_down(down);
        assert_eq!(sketch.next_deadline(), Some(down + DEFAULT_HOLD));
        sketch.update(down + Duration::from_millis(999));
        assert_eq!(sketch.cycler().current_index(), 0);

        sketch.update(down + DEFAULT_HOLD);
        assert_eq!(sketch.cycler().current_index(), 1);
        sketch.update(down + Duration::from_secs(5));
        assert_eq!(sketch.cycler().current_index(), 1);
        sketch.pointer_up();
        assert_eq!(sketch.next_deadline(), None);
    }

    #[test]
    fn releasing_early_does_not_advance() {
        let start = Instant::now();
        let mut sketch = sketch(start);
        sketch.pointer_down(start);
        sketch.pointer_left();
        sketch.update(start + Duration::from_secs(2));
        assert_eq!(sketch.cycler().current_index(), 0);
        assert_eq!(sketch.orchestrator().launched(), 1);
    }

    #[test]
    fn pointer_uses_current_viewport() {
        let start = Instant::now();
        let mut sketch = sketch(start);
        sketch.pointer_moved(10.0, 10.0);
        assert_eq!(sketch.uniforms().mouse(), [0.0, 0.0]);

        assert!(sketch.resize(800, 600));
        sketch.pointer_moved(800.0, 0.0);
        assert_eq!(sketch.uniforms().mouse(), [1.0, 1.0]);
        assert_eq!(sketch.uniforms().resolution()[0], 800.0);
    }

    #[test]
    fn pause_freezes_time_without_touching_content() {
        let start = Instant::now();
        let mut sketch = sketch(start);
        let mut sink = CountingSink::default();
        sketch.update(start + Duration::from_secs(3));
        for i in 0..5 {
            sketch
                .frame(start + Duration::from_secs(3) + Duration::from_millis(i), &mut sink)
                .unwrap();
        }
        let time = sketch.uniforms().time();
        let color = sketch.uniforms().sphere_color();

        let now = start + Duration::from_secs(4);
        assert_eq!(
            sketch.toggle_pause(now, &mut sink).unwrap(),
            LoopState::Paused
        );
        for _ in 0..5 {
            assert_eq!(
                sketch.frame(now, &mut sink).unwrap(),
                FrameOutcome::Skipped
            );
        }
        assert_eq!(sketch.uniforms().time(), time);
        assert_eq!(sketch.uniforms().sphere_color(), color);
        assert_eq!(sketch.cycler().current_index(), 0);
        assert_eq!(sink.draws, 5);

        assert_eq!(
            sketch.toggle_pause(now, &mut sink).unwrap(),
            LoopState::Running
        );
        assert_eq!(sink.draws, 6);
        assert!((sketch.uniforms().time() - (time + TIME_STEP)).abs() < 1e-6);
    }

    #[test]
    fn transitions_and_holds_keep_running_while_paused() {
        let start = Instant::now();
        let mut sketch = sketch(start);
        let mut sink = CountingSink::default();
        let settled = start + Duration::from_secs(3);
        sketch.update(settled);
        sketch.frame(settled, &mut sink).unwrap();

        assert_eq!(sketch.advance(settled), Some(1));
        sketch.update(settled + Duration::from_millis(200));
        sketch.stop();
        let time = sketch.uniforms().time();
        let paused_color = sketch.uniforms().sphere_color();
        assert_ne!(paused_color, [0.65, 0.2, 0.1]);

        assert_eq!(
            sketch
                .frame(settled + Duration::from_millis(500), &mut sink)
                .unwrap(),
            FrameOutcome::Skipped
        );
        assert_ne!(sketch.uniforms().sphere_color(), paused_color);

        sketch.update(settled + Duration::from_secs(1));
        let color = sketch.uniforms().sphere_color();
        for (got, want) in color.iter().zip([0.65, 0.2, 0.1]) {
            assert!((got - want).abs() < 1e-5, "color {color:?}");
        }

        let down = settled + Duration::from_secs(2);
        sketch.pointer_down(down);
        sketch.update(down + DEFAULT_HOLD);
        assert_eq!(sketch.cycler().current_index(), 2);

        assert_eq!(sketch.uniforms().time(), time);
        assert_eq!(sink.draws, 1);
        assert!(!sketch.is_running());
    }

    #[test]
    fn start_paused_draws_nothing_until_play() {
        let start = Instant::now();
        let options = SketchOptions {
            start_paused: true,
            ..SketchOptions::default()
        };
        let mut sketch = Sketch::new(default_content(), TextOverlay::new(), options, start);
        let mut sink = CountingSink::default();
        assert!(!sketch.is_running());
        sketch.frame(start, &mut sink).unwrap();
        assert_eq!(sink.draws, 0);

        sketch.play(start, &mut sink).unwrap();
        assert_eq!(sink.draws, 1);
        assert!(sink.last.is_some_and(|u| u.is_finite()));
    }

    #[test]
    fn empty_content_still_renders() {
        let start = Instant::now();
        let mut sketch = Sketch::new(
            Vec::new(),
            TextOverlay::new(),
            SketchOptions::default(),
            start,
        );
        let mut sink = CountingSink::default();
        assert_eq!(sketch.advance(start), None);
        assert!(!sketch.orchestrator().is_active());
        sketch.frame(start, &mut sink).unwrap();
        assert_eq!(sink.draws, 1);
        assert_eq!(sketch.uniforms().sphere_color(), [0.1, 0.8, 0.1]);
    }
}
