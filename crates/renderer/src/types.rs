use std::path::PathBuf;

use motion::{ContentItem, SketchOptions};
use sketchconfig::AntialiasSetting;

/// Anti-aliasing policy for the render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Antialiasing {
    /// Pick the highest sample count supported by the surface format.
    #[default]
    Auto,
    /// Disable MSAA and render directly into the swapchain.
    Off,
    /// Request a specific MSAA sample count (clamped to what the device supports).
    Samples(u32),
}

impl From<AntialiasSetting> for Antialiasing {
    fn from(setting: AntialiasSetting) -> Self {
        match setting {
            AntialiasSetting::Auto => Antialiasing::Auto,
            AntialiasSetting::Off => Antialiasing::Off,
            AntialiasSetting::Samples2 => Antialiasing::Samples(2),
            AntialiasSetting::Samples4 => Antialiasing::Samples(4),
            AntialiasSetting::Samples8 => Antialiasing::Samples(8),
            AntialiasSetting::Samples16 => Antialiasing::Samples(16),
        }
    }
}

/// What we learned about the adapter wgpu picked.
#[derive(Debug, Clone)]
pub struct AdapterProfile {
    pub name: String,
    pub backend: wgpu::Backend,
    pub device_type: wgpu::DeviceType,
}

impl AdapterProfile {
    pub fn from_wgpu(info: &wgpu::AdapterInfo) -> Self {
        Self {
            name: info.name.clone(),
            backend: info.backend,
            device_type: info.device_type,
        }
    }

    pub fn is_software(&self) -> bool {
        matches!(self.device_type, wgpu::DeviceType::Cpu)
            || self.name.to_ascii_lowercase().contains("llvmpipe")
    }
}

/// Immutable configuration passed to the renderer at start-up.
///
/// Mirrors the CLI flags and config file: window size, optional fragment
/// override, frame cap, MSAA, and the content the sketch cycles through.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Fragment shader body replacing the bundled raymarcher.
    pub shader_source: Option<PathBuf>,
    /// Optional FPS cap; `None` renders every vblank.
    pub target_fps: Option<f32>,
    pub antialiasing: Antialiasing,
    pub content: Vec<ContentItem>,
    pub sketch: SketchOptions,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            shader_source: None,
            target_fps: None,
            antialiasing: Antialiasing::default(),
            content: motion::default_content(),
            sketch: SketchOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antialias_setting_maps_to_sample_counts() {
        assert_eq!(
            Antialiasing::from(AntialiasSetting::Samples4),
            Antialiasing::Samples(4)
        );
        assert_eq!(Antialiasing::from(AntialiasSetting::Off), Antialiasing::Off);
        assert_eq!(Antialiasing::from(AntialiasSetting::Auto), Antialiasing::Auto);
    }

    #[test]
    fn default_config_uses_builtin_content() {
        let config = RendererConfig::default();
        assert_eq!(config.content.len(), 3);
        assert!(config.shader_source.is_none());
    }
}
