use std::borrow::Cow;

use anyhow::Result;
use wgpu::naga::ShaderStage;

/// Fragment body used when no `--shader` override is given.
pub(crate) const RAYMARCH_FRAGMENT: &str = include_str!("../shaders/raymarch.frag");

/// Compiles the plane vertex shader that applies mesh scale and camera framing.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("sketch plane vertex"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Owned(format!("{HEADER}\n{VERTEX_BODY}")),
            stage: ShaderStage::Vertex,
            defines: &[],
        },
    }))
}

/// Wraps a fragment body with the uniform prelude and compiles it as GLSL.
pub(crate) fn compile_fragment_shader(
    device: &wgpu::Device,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    let wrapped = wrap_fragment(source);
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("sketch fragment"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Owned(wrapped),
            stage: ShaderStage::Fragment,
            defines: &[],
        },
    }))
}

/// Produces a self-contained fragment shader from a body that defines
/// `vec4 shade(vec2 uv)`.
///
/// Any `#version` line and redeclared scene uniforms in the body are dropped
/// so the prelude stays the single source of truth for the uniform block.
fn wrap_fragment(source: &str) -> String {
    let mut body = String::with_capacity(source.len());
    for line in source.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("#version") {
            continue;
        }
        let redeclares_uniform = trimmed.starts_with("uniform ")
            && UNIFORM_NAMES.iter().any(|name| trimmed.contains(name));
        if redeclares_uniform {
            continue;
        }
        body.push_str(line);
        body.push('\n');
    }

    format!("{HEADER}\n{FRAGMENT_IO}\n#line 1\n{body}{FRAGMENT_FOOTER}")
}

const UNIFORM_NAMES: [&str; 8] = [
    "time",
    "mouse",
    "resolution",
    "rotationSpeed",
    "scaleIntensity",
    "sphereSize",
    "sphereColor",
    "uvRate",
];

/// Uniform block shared by both stages.
///
/// The layout must match `SceneUniforms` in `gpu/uniforms.rs`.
const HEADER: &str = r"#version 450

layout(std140, set = 0, binding = 0) uniform SceneParams {
    vec4 _resolution;
    vec2 _mouse;
    vec2 _uvRate;
    vec3 _sphereColor;
    float _time;
    float _rotationSpeed;
    float _scaleIntensity;
    float _sphereSize;
    float _aspect;
    vec2 _meshScale;
    float _fov;
    float _cameraDistance;
} scene;

#define resolution scene._resolution
#define mouse scene._mouse
#define uvRate scene._uvRate
#define sphereColor scene._sphereColor
#define time scene._time
#define rotationSpeed scene._rotationSpeed
#define scaleIntensity scene._scaleIntensity
#define sphereSize scene._sphereSize
";

const FRAGMENT_IO: &str = r"layout(location = 0) in vec2 vUv;
layout(location = 0) out vec4 outColor;
";

const FRAGMENT_FOOTER: &str = r"
void main() {
    outColor = shade(vUv);
}
";

/// Unit plane (two triangles) scaled by the mesh scale and seen through a
/// perspective camera placed `cameraDistance` in front of it.
const VERTEX_BODY: &str = r"layout(location = 0) out vec2 vUv;

const vec2 corners[6] = vec2[6](
    vec2(-0.5, -0.5),
    vec2(0.5, -0.5),
    vec2(0.5, 0.5),
    vec2(-0.5, -0.5),
    vec2(0.5, 0.5),
    vec2(-0.5, 0.5)
);

void main() {
    vec2 corner = corners[uint(gl_VertexIndex)];
    vUv = corner + 0.5;

    vec2 world = corner * scene._meshScale;
    float focal = 1.0 / tan(radians(scene._fov) * 0.5);
    float aspect = max(scene._aspect, 0.0001);
    gl_Position = vec4(world.x * focal / aspect, world.y * focal, 0.0, scene._cameraDistance);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_strips_version_and_uniform_redeclarations() {
        let source = r#"
            #version 300 es
            uniform float time;
            uniform vec3 sphereColor;
            vec4 shade(vec2 uv) {
                return vec4(sphereColor * uv.x, 1.0);
            }
        "#;

        let wrapped = wrap_fragment(source);
        assert!(!wrapped.contains("uniform float time"));
        assert!(!wrapped.contains("#version 300 es"));
        assert!(wrapped.starts_with("#version 450"));
        assert!(wrapped.contains("vec4 shade(vec2 uv)"));
        assert!(wrapped.contains("outColor = shade(vUv);"));
    }

    #[test]
    fn bundled_fragment_defines_shade() {
        assert!(RAYMARCH_FRAGMENT.contains("vec4 shade(vec2 uv)"));
        let wrapped = wrap_fragment(RAYMARCH_FRAGMENT);
        assert_eq!(wrapped.matches("#version").count(), 1);
    }
}
