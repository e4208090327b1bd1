use tracing::{debug, warn};

use crate::uniforms::UniformStore;

/// Aspect ratio of the square source the shader is framed for.
const IMAGE_ASPECT: f32 = 1.0;
/// Height of the display plane in world units.
const REFERENCE_PLANE_HEIGHT: f32 = 1.0;
/// Distance from the camera to the display plane.
pub const CAMERA_DISTANCE: f32 = 2.0;

/// Camera and mesh parameters that keep the display plane full bleed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub aspect: f32,
    pub fov_degrees: f32,
    pub camera_distance: f32,
    /// Scale applied to the unit plane on the x and y axes.
    pub mesh_scale: [f32; 2],
}

impl Default for Framing {
    fn default() -> Self {
        Self {
            aspect: 1.0,
            fov_degrees: field_of_view(CAMERA_DISTANCE),
            camera_distance: CAMERA_DISTANCE,
            mesh_scale: [1.0, 1.0],
        }
    }
}

/// Cover-fit scale factors for a source of `image_aspect` inside `width`x`height`.
pub fn cover_scale(width: f32, height: f32, image_aspect: f32) -> (f32, f32) {
    if height / width > image_aspect {
        ((width / height) * image_aspect, 1.0)
    } else {
        (1.0, (height / width) / image_aspect)
    }
}

/// Vertical field of view (degrees) that exactly fits the reference plane.
pub fn field_of_view(distance: f32) -> f32 {
    2.0 * (REFERENCE_PLANE_HEIGHT / (2.0 * distance)).atan().to_degrees()
}

/// Tracks the container size and derives aspect correction from it.
#[derive(Debug, Clone)]
pub struct ViewportAdapter {
    width: u32,
    height: u32,
    framing: Framing,
}

impl Default for ViewportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportAdapter {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            framing: Framing::default(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.framing.aspect
    }

    pub fn framing(&self) -> &Framing {
        &self.framing
    }

    /// Recomputes aspect, cover scale, and framing for a new container size.
    ///
    /// Returns `false` when the size is degenerate; the previous framing is
    /// kept in that case.
    pub fn on_resize(&mut self, width: u32, height: u32, store: &mut UniformStore) -> bool {
        if width == 0 || height == 0 {
            warn!(
                width,
                height, "ignoring zero-sized viewport; keeping previous aspect"
            );
            return false;
        }

        self.width = width;
        self.height = height;

        let w = width as f32;
        let h = height as f32;
        let aspect = w / h;
        let (a1, a2) = cover_scale(w, h, IMAGE_ASPECT);
        store.set_resolution([w, h, a1, a2]);

        let framing = &mut self.framing;
        framing.aspect = aspect;
        framing.fov_degrees = field_of_view(framing.camera_distance);
        if aspect > 1.0 {
            framing.mesh_scale[0] = aspect;
        } else {
            framing.mesh_scale[1] = 1.0 / aspect;
        }

        debug!(
            width,
            height,
            aspect,
            cover = ?(a1, a2),
            fov = framing.fov_degrees,
            mesh_scale = ?framing.mesh_scale,
            "viewport resized"
        );
        true
    }
}
