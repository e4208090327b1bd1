//! Parameter animation and frame scheduling for the raymarched sphere sketch.
//!
//! Everything here is plain in-memory state advanced by the window event loop
//! on a single thread. The flow for one frame looks like:
//!
//! ```text
//!   input events ──▶ PointerTracker ──────────────┐
//!        │                                        ▼
//!        └────────▶ PressHoldDetector ──▶ ContentCycler ──▶ TransitionOrchestrator
//!                                                                  │ Timeline tick
//!   window resize ──▶ ViewportAdapter ──▶ UniformStore ◀───────────┘
//!                                              │
//!                        RenderLoop::frame ────┴──▶ FrameSink::draw
//! ```
//!
//! [`Sketch`] owns one instance of every component and is the only type the
//! renderer talks to. Time is injected as `Instant`s so each component can be
//! driven deterministically from tests.

mod content;
mod easing;
mod pointer;
mod press;
mod render_loop;
mod sketch;
mod text;
mod timeline;
mod transition;
mod uniforms;
mod viewport;

pub use content::{default_content, ContentCycler, ContentItem};
pub use easing::Easing;
pub use pointer::{to_ndc, PointerTracker};
pub use press::{PressHoldDetector, PressState, DEFAULT_HOLD};
pub use render_loop::{idle_rotation, FrameOutcome, FrameSink, LoopState, RenderLoop};
pub use sketch::{Sketch, SketchOptions};
pub use text::{TextOverlay, TextRegion, TextSlot, TextStyle, TextSurface};
pub use timeline::{Field, Stage, Step, Timeline, Track, TrackState, Value};
pub use transition::{TransitionOrchestrator, TransitionTimings};
pub use uniforms::{RotationMode, UniformSet, UniformStore, TIME_STEP};
pub use viewport::{cover_scale, field_of_view, Framing, ViewportAdapter, CAMERA_DISTANCE};
