use crate::uniforms::UniformStore;

/// Maps a pointer position in pixels to normalized device coordinates.
///
/// The y axis is flipped so that the top of the viewport maps to `+1`.
/// Returns `None` for a degenerate viewport.
pub fn to_ndc(x: f64, y: f64, viewport_width: u32, viewport_height: u32) -> Option<[f32; 2]> {
    if viewport_width == 0 || viewport_height == 0 {
        return None;
    }
    let nx = (x / viewport_width as f64) * 2.0 - 1.0;
    let ny = -(y / viewport_height as f64) * 2.0 + 1.0;
    Some([nx as f32, ny as f32])
}

/// Writes every pointer move straight into the `mouse` uniform.
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    last: Option<[f32; 2]>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<[f32; 2]> {
        self.last
    }

    pub fn on_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        viewport_width: u32,
        viewport_height: u32,
        store: &mut UniformStore,
    ) {
        if let Some(ndc) = to_ndc(x, y, viewport_width, viewport_height) {
            self.last = Some(ndc);
            store.set_mouse(ndc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_ndc_extremes() {
        assert_eq!(to_ndc(0.0, 0.0, 800, 600), Some([-1.0, 1.0]));
        assert_eq!(to_ndc(800.0, 600.0, 800, 600), Some([1.0, -1.0]));
        assert_eq!(to_ndc(400.0, 300.0, 800, 600), Some([0.0, 0.0]));
    }

    #[test]
    fn move_updates_mouse_uniform() {
        let mut store = UniformStore::new([0.0; 3]);
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(200.0, 150.0, 800, 600, &mut store);
        assert_eq!(store.mouse(), [-0.5, 0.5]);
        assert_eq!(tracker.last(), Some([-0.5, 0.5]));
    }

    #[test]
    fn degenerate_viewport_keeps_previous_mouse() {
        let mut store = UniformStore::new([0.0; 3]);
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(600.0, 0.0, 800, 600, &mut store);
        tracker.on_pointer_move(10.0, 10.0, 0, 600, &mut store);
        assert_eq!(store.mouse(), [0.5, 1.0]);
    }
}
