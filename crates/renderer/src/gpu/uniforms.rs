use bytemuck::{Pod, Zeroable};
use motion::{Framing, UniformSet};

/// std140 mirror of the `SceneParams` block declared in `compile.rs`.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SceneUniforms {
    pub resolution: [f32; 4],
    pub mouse: [f32; 2],
    pub uv_rate: [f32; 2],
    pub sphere_color: [f32; 3],
    pub time: f32,
    pub rotation_speed: f32,
    pub scale_intensity: f32,
    pub sphere_size: f32,
    pub aspect: f32,
    pub mesh_scale: [f32; 2],
    pub fov: f32,
    pub camera_distance: f32,
}

unsafe impl Zeroable for SceneUniforms {}
unsafe impl Pod for SceneUniforms {}

impl SceneUniforms {
    pub fn new(values: &UniformSet, framing: &Framing) -> Self {
        let mut uniforms = Self::zeroed();
        uniforms.set_values(values);
        uniforms.set_framing(framing);
        uniforms
    }

    pub fn set_values(&mut self, values: &UniformSet) {
        self.resolution = values.resolution;
        self.mouse = values.mouse;
        self.uv_rate = values.uv_rate;
        self.sphere_color = values.sphere_color;
        self.time = values.time;
        self.rotation_speed = values.rotation_speed;
        self.scale_intensity = values.scale_intensity;
        self.sphere_size = values.sphere_size;
    }

    pub fn set_framing(&mut self, framing: &Framing) {
        self.aspect = framing.aspect;
        self.mesh_scale = framing.mesh_scale;
        self.fov = framing.fov_degrees;
        self.camera_distance = framing.camera_distance;
    }
}

#[cfg(test)]
mod tests {
    use std::mem::{offset_of, size_of};

    use super::*;

    #[test]
    fn layout_matches_std140_block() {
        assert_eq!(size_of::<SceneUniforms>(), 80);
        assert_eq!(offset_of!(SceneUniforms, mouse), 16);
        assert_eq!(offset_of!(SceneUniforms, sphere_color), 32);
        assert_eq!(offset_of!(SceneUniforms, time), 44);
        assert_eq!(offset_of!(SceneUniforms, mesh_scale), 64);
        assert_eq!(offset_of!(SceneUniforms, camera_distance), 76);
    }

    #[test]
    fn copies_values_and_framing() {
        let values = UniformSet::new([0.65, 0.2, 0.1]);
        let framing = Framing {
            aspect: 1.5,
            fov_degrees: 28.0,
            camera_distance: 2.0,
            mesh_scale: [1.5, 1.0],
        };
        let uniforms = SceneUniforms::new(&values, &framing);
        assert_eq!(uniforms.sphere_color, [0.65, 0.2, 0.1]);
        assert_eq!(uniforms.sphere_size, values.sphere_size);
        assert_eq!(uniforms.mesh_scale, [1.5, 1.0]);
        assert_eq!(uniforms.fov, 28.0);
        assert_eq!(bytemuck::bytes_of(&uniforms).len(), 80);
    }
}
