use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use motion::{ContentItem, SketchOptions};
use renderer::{Antialiasing, Renderer, RendererConfig};
use sketchconfig::{SketchConfig, WindowSize};
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;
use crate::paths::{ConfigLocation, ConfigOrigin};

pub fn run(config_path: Option<&Path>, args: RunArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let renderer_config = build_renderer_config(&config, &args);
    tracing::info!(
        items = renderer_config.content.len(),
        hold_ms = renderer_config.sketch.hold.as_millis() as u64,
        paused = renderer_config.sketch.start_paused,
        "bootstrapping raysketch"
    );
    Renderer::new(renderer_config).run()
}

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the sketch configuration, falling back to defaults only when the
/// per-user file is absent.
pub fn load_config(explicit: Option<&Path>) -> Result<SketchConfig> {
    let location = ConfigLocation::resolve(explicit)?;
    match location.origin {
        ConfigOrigin::Explicit => {
            let config = SketchConfig::load(&location.path).with_context(|| {
                format!("failed to load config at {}", location.path.display())
            })?;
            tracing::info!(path = %location.path.display(), "loaded sketch config");
            Ok(config)
        }
        ConfigOrigin::Default => {
            match SketchConfig::load_optional(&location.path).with_context(|| {
                format!("failed to load config at {}", location.path.display())
            })? {
                Some(config) => {
                    tracing::info!(path = %location.path.display(), "loaded sketch config");
                    Ok(config)
                }
                None => {
                    tracing::debug!(
                        path = %location.path.display(),
                        "no config file present; using built-in defaults"
                    );
                    Ok(SketchConfig::default())
                }
            }
        }
    }
}

/// Command-line flags take precedence over the config file.
pub fn build_renderer_config(config: &SketchConfig, args: &RunArgs) -> RendererConfig {
    let size = args
        .size
        .or(config.window.size)
        .unwrap_or(WindowSize::DEFAULT);
    let target_fps = match args.fps.or(config.window.fps) {
        Some(fps) if fps > 0.0 => Some(fps),
        _ => None,
    };
    let antialiasing = args
        .antialias
        .or(config.window.antialias)
        .map(Antialiasing::from)
        .unwrap_or_default();
    let hold = args
        .hold_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.hold());
    let content: Vec<ContentItem> = config
        .content_entries()
        .iter()
        .map(ContentItem::from)
        .collect();

    RendererConfig {
        surface_size: (size.width, size.height),
        shader_source: args.shader.clone(),
        target_fps,
        antialiasing,
        content,
        sketch: SketchOptions {
            hold,
            start_paused: args.paused,
            ..SketchOptions::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_flags() -> RunArgs {
        RunArgs {
            size: None,
            fps: None,
            antialias: None,
            shader: None,
            hold_ms: None,
            paused: false,
        }
    }

    #[test]
    fn defaults_without_config_or_flags() {
        let config = build_renderer_config(&SketchConfig::default(), &no_flags());
        assert_eq!(config.surface_size, (1280, 720));
        assert_eq!(config.target_fps, None);
        assert_eq!(config.antialiasing, Antialiasing::Auto);
        assert_eq!(config.sketch.hold, Duration::from_secs(1));
        assert_eq!(config.content.len(), 3);
        assert_eq!(config.content[0].title, "BEHOLD!!");
    }

    #[test]
    fn flags_override_config() {
        let file = SketchConfig::from_toml_str(
            r#"
version = 1

[window]
size = "640x480"
fps = 24
antialias = "off"

[interaction]
hold = "2s"

[[content]]
title = "ONLY"
color = [0.5, 0.5, 0.5]
"#,
        )
        .unwrap();

        let from_file = build_renderer_config(&file, &no_flags());
        assert_eq!(from_file.surface_size, (640, 480));
        assert_eq!(from_file.target_fps, Some(24.0));
        assert_eq!(from_file.antialiasing, Antialiasing::Off);
        assert_eq!(from_file.sketch.hold, Duration::from_secs(2));
        assert_eq!(from_file.content.len(), 1);

        let args = RunArgs {
            size: Some(WindowSize {
                width: 320,
                height: 200,
            }),
            fps: Some(0.0),
            hold_ms: Some(300),
            paused: true,
            ..no_flags()
        };
        let merged = build_renderer_config(&file, &args);
        assert_eq!(merged.surface_size, (320, 200));
        assert_eq!(merged.target_fps, None);
        assert_eq!(merged.sketch.hold, Duration::from_millis(300));
        assert!(merged.sketch.start_paused);
        assert_eq!(merged.antialiasing, Antialiasing::Off);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/raysketch.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load config"));
    }
}
