//! GPU side of the sketch.
//!
//! - `context` owns wgpu instance/device/surface wiring and rebuilds the
//!   swapchain when the window resizes.
//! - `pipeline` compiles the plane vertex shader and the wrapped fragment
//!   body into a single render pipeline.
//! - `uniforms` mirrors the GLSL uniform block as a `Pod` struct.
//! - `state` glues everything together and implements `motion::FrameSink`
//!   so the sketch can draw without knowing about wgpu.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
