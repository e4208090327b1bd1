use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use motion::{FrameOutcome, Sketch, TextOverlay, TextSlot, TextStyle, TextSurface};
use tracing::{debug, error, info, warn};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::compile::RAYMARCH_FRAGMENT;
use crate::gpu::GpuState;
use crate::runtime::FramePacer;
use crate::types::RendererConfig;

const WINDOW_TITLE: &str = "raysketch";
const SOFTWARE_FPS_CAP: f32 = 15.0;
/// How often paused transitions are advanced while no frames are drawn.
const PAUSED_TICK: Duration = Duration::from_millis(16);

/// Window caption for the current title text.
fn caption_for(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        WINDOW_TITLE.to_string()
    } else {
        format!("{title} | {WINDOW_TITLE}")
    }
}

/// Caption text surface backed by the window title bar.
///
/// Offsets and opacity are tracked but only the text is visible.
struct CaptionSurface {
    window: Arc<Window>,
    overlay: TextOverlay,
}

impl CaptionSurface {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            overlay: TextOverlay::new(),
        }
    }
}

impl TextSurface for CaptionSurface {
    fn set_text(&mut self, slot: TextSlot, text: &str) {
        self.overlay.set_text(slot, text);
        if slot == TextSlot::Title {
            self.window.set_title(&caption_for(text));
        }
    }

    fn style(&self, slot: TextSlot) -> TextStyle {
        self.overlay.style(slot)
    }

    fn set_style(&mut self, slot: TextSlot, style: TextStyle) {
        self.overlay.set_style(slot, style);
    }
}

/// Everything the event loop touches. `gpu` is declared first so the surface
/// is dropped before the window it was created from.
struct WindowState {
    gpu: GpuState,
    sketch: Sketch<CaptionSurface>,
    pacer: FramePacer,
    window: Arc<Window>,
}

impl WindowState {
    fn new(window: Arc<Window>, config: &RendererConfig, fragment: &str) -> Result<Self> {
        let now = Instant::now();
        let caption = CaptionSurface::new(window.clone());
        let mut sketch = Sketch::new(config.content.clone(), caption, config.sketch, now);

        let size = window.inner_size();
        sketch.resize(size.width, size.height);

        let gpu = GpuState::new(
            window.as_ref(),
            size,
            config.antialiasing,
            fragment,
            sketch.uniforms().values(),
            sketch.framing(),
        )?;

        let profile = gpu.adapter_profile();
        let mut target_fps = config.target_fps;
        if profile.is_software() && target_fps.is_none() {
            warn!(
                adapter = %profile.name,
                backend = ?profile.backend,
                cap = SOFTWARE_FPS_CAP,
                "software rasterizer detected; capping frame rate (override with --fps)"
            );
            target_fps = Some(SOFTWARE_FPS_CAP);
        }
        let pacer = FramePacer::new(target_fps);
        if let Some(interval) = pacer.interval() {
            debug!(interval_ms = interval.as_millis() as u64, "frame cap active");
        }

        Ok(Self {
            gpu,
            sketch,
            pacer,
            window,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
        if self.sketch.resize(new_size.width, new_size.height) {
            self.gpu.set_framing(self.sketch.framing());
        }
    }

    fn redraw(&mut self, elwt: &EventLoopWindowTarget<()>) {
        let now = Instant::now();
        match self.sketch.frame(now, &mut self.gpu) {
            Ok(FrameOutcome::Drawn) => self.pacer.mark_rendered(now),
            Ok(FrameOutcome::Skipped) => {}
            Err(err) => self.handle_surface_error(err, elwt),
        }
    }

    fn toggle_pause(&mut self, elwt: &EventLoopWindowTarget<()>) {
        let now = Instant::now();
        match self.sketch.toggle_pause(now, &mut self.gpu) {
            Ok(state) => {
                info!(?state, time = self.sketch.uniforms().time(), "toggled render loop");
                self.pacer.reset();
                self.pacer.mark_rendered(now);
            }
            Err(err) => self.handle_surface_error(err, elwt),
        }
    }

    fn handle_surface_error(&mut self, err: wgpu::SurfaceError, elwt: &EventLoopWindowTarget<()>) {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                debug!(?err, "reconfiguring surface");
                self.gpu.reconfigure();
            }
            wgpu::SurfaceError::OutOfMemory => {
                error!("surface out of memory; exiting");
                elwt.exit();
            }
            wgpu::SurfaceError::Timeout => {
                warn!("surface timeout; retrying next frame");
            }
            other => {
                warn!(error = ?other, "surface error; retrying next frame");
            }
        }
    }

    fn schedule(&mut self, elwt: &EventLoopWindowTarget<()>) {
        let now = Instant::now();
        if self.sketch.is_running() {
            if self.pacer.ready_for_frame(now) {
                self.window.request_redraw();
                elwt.set_control_flow(ControlFlow::Wait);
            } else if let Some(deadline) = self.pacer.next_deadline() {
                elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            return;
        }

        // Paused: no frames, but a running transition and a pending hold
        // still need to be advanced.
        let animating = self.sketch.update(now);
        let wake = if animating {
            Some(now + PAUSED_TICK)
        } else {
            self.sketch.next_deadline()
        };
        match wake {
            Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => elwt.set_control_flow(ControlFlow::Wait),
        }
    }

    fn pointer_moved(&mut self, position: PhysicalPosition<f64>) {
        self.sketch.pointer_moved(position.x, position.y);
    }
}

fn load_fragment(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            info!(shader = %path.display(), "loading fragment shader override");
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read shader at {}", path.display()))
        }
        None => Ok(RAYMARCH_FRAGMENT.to_string()),
    }
}

pub(crate) fn run_window(config: RendererConfig) -> Result<()> {
    let fragment = load_fragment(config.shader_source.as_deref())?;

    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let (width, height) = config.surface_size;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(PhysicalSize::new(width, height))
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window, &config, &fragment)
        .context("failed to initialise window renderer")?;
    state.window.request_redraw();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == state.window.id() => {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        info!(
                            frames = state.gpu.frames_presented(),
                            index = state.sketch.cycler().current_index(),
                            "closing window"
                        );
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state != ElementState::Pressed || event.repeat {
                            return;
                        }
                        match event.logical_key {
                            Key::Named(NamedKey::Space) => state.toggle_pause(elwt),
                            Key::Character(ref value) if value.as_str() == " " => {
                                state.toggle_pause(elwt)
                            }
                            Key::Named(NamedKey::Escape) => elwt.exit(),
                            _ => {}
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => state.pointer_moved(position),
                    WindowEvent::CursorLeft { .. } => state.sketch.pointer_left(),
                    WindowEvent::MouseInput {
                        state: button_state,
                        button: MouseButton::Left,
                        ..
                    } => match button_state {
                        ElementState::Pressed => state.sketch.pointer_down(Instant::now()),
                        ElementState::Released => state.sketch.pointer_up(),
                    },
                    WindowEvent::Touch(touch) => {
                        state.pointer_moved(touch.location);
                        match touch.phase {
                            TouchPhase::Started => state.sketch.pointer_down(Instant::now()),
                            TouchPhase::Ended | TouchPhase::Cancelled => state.sketch.pointer_up(),
                            TouchPhase::Moved => {}
                        }
                    }
                    WindowEvent::Resized(new_size) => state.resize(new_size),
                    WindowEvent::ScaleFactorChanged {
                        mut inner_size_writer,
                        ..
                    } => {
                        let _ = inner_size_writer.request_inner_size(state.gpu.size());
                    }
                    WindowEvent::RedrawRequested => state.redraw(elwt),
                    _ => {}
                }
            }
            Event::AboutToWait => state.schedule(elwt),
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_mirrors_title() {
        assert_eq!(caption_for("RAYMARCHING"), "RAYMARCHING | raysketch");
        assert_eq!(caption_for("  "), "raysketch");
    }

    #[test]
    fn missing_override_is_an_error() {
        let err = load_fragment(Some(Path::new("/nonexistent/sketch.frag"))).unwrap_err();
        assert!(err.to_string().contains("failed to read shader"));
    }

    #[test]
    fn bundled_fragment_is_the_default() {
        assert_eq!(load_fragment(None).unwrap(), RAYMARCH_FRAGMENT);
    }
}
