//! GLSL version detection and the line-strip shaders.

use glium::CapabilitiesSource;

/// Shader dialects the line program ships in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlslVersion {
    Glsl140,
    Glsl120,
    GlslEs100,
}

/// Pick the best dialect the context supports, preferring GLSL 1.40, then
/// 1.20, then GLSL ES 1.00. `None` if none is available.
pub fn best_glsl_version(ctx: &impl CapabilitiesSource) -> Option<GlslVersion> {
    let glsl_versions = &ctx.get_capabilities().supported_glsl_versions;
    let supports = |api, major, minor| {
        glsl_versions
            .iter()
            .any(|v| *v == glium::Version(api, major, minor))
    };

    if supports(glium::Api::Gl, 1, 4) {
        Some(GlslVersion::Glsl140)
    } else if supports(glium::Api::Gl, 1, 2) {
        Some(GlslVersion::Glsl120)
    } else if supports(glium::Api::GlEs, 1, 0) {
        Some(GlslVersion::GlslEs100)
    } else {
        None
    }
}

impl GlslVersion {
    /// `(vertex, fragment)` sources for a flat-colored line strip.
    ///
    /// Uniforms: `projection` (mat4) and `color` (vec3). Attribute:
    /// `position` (vec2).
    pub fn line_shaders(self) -> (&'static str, &'static str) {
        match self {
            Self::Glsl140 => (
                r#"
                #version 140
                in vec2 position;
                uniform mat4 projection;
                void main() {
                    gl_Position = projection * vec4(position, 0.0, 1.0);
                }
                "#,
                r#"
                #version 140
                uniform vec3 color;
                out vec4 f_color;
                void main() {
                    f_color = vec4(color, 1.0);
                }
                "#,
            ),
            Self::Glsl120 => (
                r#"
                #version 120
                attribute vec2 position;
                uniform mat4 projection;
                void main() {
                    gl_Position = projection * vec4(position, 0.0, 1.0);
                }
                "#,
                r#"
                #version 120
                uniform vec3 color;
                void main() {
                    gl_FragColor = vec4(color, 1.0);
                }
                "#,
            ),
            Self::GlslEs100 => (
                r#"
                #version 100
                attribute vec2 position;
                uniform mat4 projection;
                void main() {
                    gl_Position = projection * vec4(position, 0.0, 1.0);
                }
                "#,
                r#"
                #version 100
                precision mediump float;
                uniform vec3 color;
                void main() {
                    gl_FragColor = vec4(color, 1.0);
                }
                "#,
            ),
        }
    }
}
