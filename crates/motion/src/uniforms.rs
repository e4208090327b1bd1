/// Simulation time added by every rendered frame.
pub const TIME_STEP: f64 = 0.05;

const INITIAL_ROTATION_SPEED: f32 = 0.9;
const INITIAL_SCALE_INTENSITY: f32 = 13.0;
const INITIAL_SPHERE_SIZE: f32 = 0.4;
const UV_RATE: [f32; 2] = [1.0, 1.0];

/// Snapshot of every shader-facing parameter consumed by a draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSet {
    /// Narrowed from the store's `f64` clock for upload.
    pub time: f32,
    /// Last pointer position in normalized device coordinates.
    pub mouse: [f32; 2],
    /// `(width_px, height_px, cover_scale_x, cover_scale_y)`.
    pub resolution: [f32; 4],
    pub rotation_speed: f32,
    pub scale_intensity: f32,
    pub sphere_size: f32,
    pub sphere_color: [f32; 3],
    pub uv_rate: [f32; 2],
}

impl UniformSet {
    pub fn new(sphere_color: [f32; 3]) -> Self {
        Self {
            time: 0.0,
            mouse: [0.0, 0.0],
            resolution: [0.0, 0.0, 1.0, 1.0],
            rotation_speed: INITIAL_ROTATION_SPEED,
            scale_intensity: INITIAL_SCALE_INTENSITY,
            sphere_size: INITIAL_SPHERE_SIZE,
            sphere_color,
            uv_rate: UV_RATE,
        }
    }

    pub fn is_finite(&self) -> bool {
        let scalars = [
            self.time,
            self.rotation_speed,
            self.scale_intensity,
            self.sphere_size,
        ];
        scalars
            .iter()
            .chain(self.mouse.iter())
            .chain(self.resolution.iter())
            .chain(self.sphere_color.iter())
            .chain(self.uv_rate.iter())
            .all(|value| value.is_finite())
    }
}

/// Which writer currently owns `rotation_speed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// The render loop drives the idle auto-rotation band.
    #[default]
    Idle,
    /// A transition track is animating the value.
    Transitioning,
}

/// Canonical parameter state shared by the input handlers, the transition
/// timeline, and the render loop.
///
/// Writes are crate-private: only the components in this crate mutate it,
/// the renderer only reads snapshots.
#[derive(Debug, Clone)]
pub struct UniformStore {
    values: UniformSet,
    /// Accumulated in `f64`; an `f32` sum stops moving once 0.05 drops
    /// below half its spacing.
    time: f64,
    rotation_mode: RotationMode,
}

impl UniformStore {
    pub fn new(sphere_color: [f32; 3]) -> Self {
        Self {
            values: UniformSet::new(sphere_color),
            time: 0.0,
            rotation_mode: RotationMode::Idle,
        }
    }

    pub fn values(&self) -> &UniformSet {
        &self.values
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn mouse(&self) -> [f32; 2] {
        self.values.mouse
    }

    pub fn resolution(&self) -> [f32; 4] {
        self.values.resolution
    }

    pub fn rotation_speed(&self) -> f32 {
        self.values.rotation_speed
    }

    pub fn scale_intensity(&self) -> f32 {
        self.values.scale_intensity
    }

    pub fn sphere_size(&self) -> f32 {
        self.values.sphere_size
    }

    pub fn sphere_color(&self) -> [f32; 3] {
        self.values.sphere_color
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation_mode
    }

    pub(crate) fn set_time(&mut self, time: f64) {
        debug_assert!(time.is_finite(), "time must stay finite");
        self.time = time;
        self.values.time = time as f32;
    }

    pub(crate) fn set_mouse(&mut self, mouse: [f32; 2]) {
        self.values.mouse = mouse;
    }

    pub(crate) fn set_resolution(&mut self, resolution: [f32; 4]) {
        debug_assert!(resolution.iter().all(|v| v.is_finite()));
        self.values.resolution = resolution;
    }

    pub(crate) fn set_rotation_speed(&mut self, speed: f32) {
        debug_assert!(speed.is_finite(), "rotation speed must stay finite");
        self.values.rotation_speed = speed;
    }

    pub(crate) fn set_scale_intensity(&mut self, intensity: f32) {
        self.values.scale_intensity = intensity;
    }

    pub(crate) fn set_sphere_size(&mut self, size: f32) {
        self.values.sphere_size = size;
    }

    pub(crate) fn set_sphere_color(&mut self, color: [f32; 3]) {
        self.values.sphere_color = color;
    }

    pub(crate) fn set_rotation_mode(&mut self, mode: RotationMode) {
        self.rotation_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_documented_defaults() {
        let store = UniformStore::new([0.1, 0.8, 0.1]);
        let values = store.values();
        assert_eq!(values.time, 0.0);
        assert_eq!(store.time(), 0.0);
        assert_eq!(values.mouse, [0.0, 0.0]);
        assert_eq!(values.rotation_speed, 0.9);
        assert_eq!(values.scale_intensity, 13.0);
        assert_eq!(values.sphere_size, 0.4);
        assert_eq!(values.sphere_color, [0.1, 0.8, 0.1]);
        assert_eq!(values.uv_rate, [1.0, 1.0]);
        assert_eq!(store.rotation_mode(), RotationMode::Idle);
        assert!(values.is_finite());
    }

    #[test]
    fn set_time_narrows_into_the_snapshot() {
        let mut store = UniformStore::new([0.0; 3]);
        store.set_time(1_048_576.05);
        assert_eq!(store.time(), 1_048_576.05);
        assert_eq!(store.values().time, 1_048_576.05_f64 as f32);
    }

    #[test]
    fn detects_non_finite_fields() {
        let mut values = UniformSet::new([0.0; 3]);
        values.sphere_color[1] = f32::NAN;
        assert!(!values.is_finite());
    }
}
