//! Renderer crate for raysketch.
//!
//! Glues a `winit` window, the `wgpu` pipeline, and the [`motion::Sketch`]
//! state machine together. The overall flow is:
//!
//! ```text
//!   CLI / raysketch
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ WindowState ──▶ winit event loop
//!                         │                 │ pointer / resize / keys
//!                         │                 ▼
//!                         │            motion::Sketch ──▶ Sketch::frame()
//!                         │                                    │
//!                         └──────── GpuState (FrameSink) ◀─────┘ UniformSet ─▶ GPU UBO
//! ```
//!
//! `WindowState` owns the GPU resources and the sketch. The fragment shader is
//! a GLSL body defining `vec4 shade(vec2 uv)`; it is wrapped with the scene
//! uniform block at runtime and compiled through naga's GLSL frontend.

mod compile;
mod gpu;
mod runtime;
mod types;
mod window;

use anyhow::Result;
use tracing::info;

pub use types::{Antialiasing, RendererConfig};

/// Entry point that owns the configuration until the window loop starts.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the window and blocks until it is closed.
    pub fn run(self) -> Result<()> {
        let config = self.config;
        info!(
            width = config.surface_size.0,
            height = config.surface_size.1,
            fps = ?config.target_fps,
            antialiasing = ?config.antialiasing,
            items = config.content.len(),
            shader = ?config.shader_source,
            "starting sketch window"
        );
        window::run_window(config)
    }
}
