use std::borrow::Cow;

use lumen_engine::render::{AttributeKind, SceneConfig, UniformSpec, VertexLayout};

use crate::config::LessonsConfig;
use crate::uniforms::{TintUniform, TransformUniform, TINT_BLOCK, TRANSFORM_BLOCK};

/// The lessons, in the order the number keys select them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Lesson {
    /// Per-vertex colored triangle.
    Triangle,
    /// Rectangle from two indexed triangles; red channel pulses over time.
    Pulse,
    /// Textured rectangle tinted by vertex colors.
    Textured,
    /// Two textures mixed on one rectangle.
    Blend,
    /// Spinning, scalable textured cube with depth testing.
    Cube,
}

impl Lesson {
    pub const ALL: [Lesson; 5] = [
        Lesson::Triangle,
        Lesson::Pulse,
        Lesson::Textured,
        Lesson::Blend,
        Lesson::Cube,
    ];

    /// Lesson bound to number key `digit` (1-based).
    pub fn from_digit(digit: u8) -> Option<Self> {
        Self::ALL.get(usize::from(digit).checked_sub(1)?).copied()
    }

    pub fn digit(self) -> u8 {
        Self::ALL.iter().position(|l| *l == self).map_or(0, |i| i as u8 + 1)
    }

    pub fn title(self) -> &'static str {
        match self {
            Lesson::Triangle => "triangle",
            Lesson::Pulse => "pulse",
            Lesson::Textured => "textured quad",
            Lesson::Blend => "blended textures",
            Lesson::Cube => "cube",
        }
    }

    /// Scene description for this lesson.
    pub fn scene_config(self, config: &LessonsConfig) -> SceneConfig {
        let black = wgpu::Color::BLACK;
        match self {
            Lesson::Triangle => SceneConfig {
                label: self.title().to_string(),
                shader: Cow::Borrowed(include_str!("shaders/triangle.wgsl")),
                vertex_layout: VertexLayout::new(&[
                    AttributeKind::Float32x2,
                    AttributeKind::Float32x3,
                ]),
                vertices: TRIANGLE_VERTICES.to_vec(),
                indices: None,
                uniforms: vec![],
                textures: vec![],
                depth_test: false,
                clear_color: black,
            },

            Lesson::Pulse => SceneConfig {
                label: self.title().to_string(),
                shader: Cow::Borrowed(include_str!("shaders/pulse.wgsl")),
                vertex_layout: VertexLayout::position2(),
                vertices: RECT_POSITIONS.to_vec(),
                indices: Some(RECT_INDICES.to_vec()),
                uniforms: vec![UniformSpec::of::<TintUniform>(
                    TINT_BLOCK,
                    wgpu::ShaderStages::FRAGMENT,
                )],
                textures: vec![],
                depth_test: false,
                clear_color: black,
            },

            Lesson::Textured => SceneConfig {
                label: self.title().to_string(),
                shader: Cow::Borrowed(include_str!("shaders/textured.wgsl")),
                vertex_layout: VertexLayout::new(&[
                    AttributeKind::Float32x2,
                    AttributeKind::Float32x3,
                    AttributeKind::Float32x2,
                ]),
                vertices: TEXTURED_RECT_VERTICES.to_vec(),
                indices: Some(RECT_INDICES.to_vec()),
                uniforms: vec![],
                textures: vec![config.primary_texture.clone()],
                depth_test: false,
                clear_color: black,
            },

            Lesson::Blend => SceneConfig {
                label: self.title().to_string(),
                shader: Cow::Borrowed(include_str!("shaders/blend.wgsl")),
                vertex_layout: VertexLayout::position2_uv(),
                vertices: UV_RECT_VERTICES.to_vec(),
                indices: Some(RECT_INDICES.to_vec()),
                uniforms: vec![],
                textures: vec![config.primary_texture.clone(), config.secondary_texture.clone()],
                depth_test: false,
                clear_color: black,
            },

            Lesson::Cube => SceneConfig {
                label: self.title().to_string(),
                shader: Cow::Borrowed(include_str!("shaders/cube.wgsl")),
                vertex_layout: VertexLayout::position3_uv(),
                vertices: CUBE_VERTICES.to_vec(),
                indices: None,
                uniforms: vec![UniformSpec::of::<TransformUniform>(
                    TRANSFORM_BLOCK,
                    wgpu::ShaderStages::VERTEX,
                )],
                textures: vec![config.primary_texture.clone(), config.secondary_texture.clone()],
                depth_test: true,
                clear_color: wgpu::Color::WHITE,
            },
        }
    }
}

// ── geometry ──────────────────────────────────────────────────────────────

#[rustfmt::skip]
const TRIANGLE_VERTICES: [f32; 15] = [
//   x      y     r    g    b
     0.0,  0.5,  1.0, 0.0, 0.0,
     0.5, -0.5,  0.0, 1.0, 0.0,
    -0.5, -0.5,  0.0, 0.0, 1.0,
];

#[rustfmt::skip]
const RECT_POSITIONS: [f32; 8] = [
    -0.5,  0.5, // top-left
     0.5,  0.5, // top-right
     0.5, -0.5, // bottom-right
    -0.5, -0.5, // bottom-left
];

const RECT_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

#[rustfmt::skip]
const TEXTURED_RECT_VERTICES: [f32; 28] = [
//   x      y     r    g    b    u    v
    -0.5,  0.5,  1.0, 0.0, 0.0, 0.0, 0.0,
     0.5,  0.5,  0.0, 1.0, 0.0, 1.0, 0.0,
     0.5, -0.5,  0.0, 0.0, 1.0, 1.0, 1.0,
    -0.5, -0.5,  1.0, 1.0, 1.0, 0.0, 1.0,
];

#[rustfmt::skip]
const UV_RECT_VERTICES: [f32; 16] = [
//   x      y     u    v
    -0.5,  0.5,  0.0, 0.0,
     0.5,  0.5,  1.0, 0.0,
     0.5, -0.5,  1.0, 1.0,
    -0.5, -0.5,  0.0, 1.0,
];

#[rustfmt::skip]
const CUBE_VERTICES: [f32; 180] = [
//   x     y     z     u    v
    -0.5, -0.5, -0.5,  0.0, 0.0,
     0.5, -0.5, -0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.0,

    -0.5, -0.5,  0.5,  0.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,

    -0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5,  0.5,  1.0, 0.0,

     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5,  0.5,  0.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,

    -0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  1.0, 1.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,

    -0.5,  0.5, -0.5,  0.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
];

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_engine::render::UniformRegistry;

    #[test]
    fn every_lesson_validates() {
        let cfg = LessonsConfig::default();
        for lesson in Lesson::ALL {
            let scene = lesson.scene_config(&cfg);
            scene
                .validate()
                .unwrap_or_else(|e| panic!("lesson {} invalid: {e:#}", lesson.title()));
            assert!(scene.shader.contains("fn vs_main"));
            assert!(scene.shader.contains("fn fs_main"));
        }
    }

    #[test]
    fn digits_round_trip() {
        for lesson in Lesson::ALL {
            assert_eq!(Lesson::from_digit(lesson.digit()), Some(lesson));
        }
        assert_eq!(Lesson::from_digit(0), None);
        assert_eq!(Lesson::from_digit(6), None);
        assert_eq!(Lesson::from_digit(1), Some(Lesson::Triangle));
        assert_eq!(Lesson::from_digit(5), Some(Lesson::Cube));
    }

    #[test]
    fn vertex_counts() {
        let cfg = LessonsConfig::default();
        assert_eq!(Lesson::Triangle.scene_config(&cfg).draw_count(), 3);
        assert_eq!(Lesson::Pulse.scene_config(&cfg).vertex_count(), 4);
        assert_eq!(Lesson::Pulse.scene_config(&cfg).draw_count(), 6);
        assert_eq!(Lesson::Textured.scene_config(&cfg).vertex_layout.stride(), 28);
        assert_eq!(Lesson::Cube.scene_config(&cfg).draw_count(), 36);
    }

    #[test]
    fn only_cube_is_depth_tested() {
        let cfg = LessonsConfig::default();
        for lesson in Lesson::ALL {
            assert_eq!(lesson.scene_config(&cfg).depth_test, lesson == Lesson::Cube);
        }
    }

    #[test]
    fn animated_lessons_declare_their_blocks() {
        let cfg = LessonsConfig::default();

        let pulse = UniformRegistry::from_specs(&Lesson::Pulse.scene_config(&cfg).uniforms).unwrap();
        assert!(pulse.handle(TINT_BLOCK).is_some());

        let cube = UniformRegistry::from_specs(&Lesson::Cube.scene_config(&cfg).uniforms).unwrap();
        assert_eq!(cube.slot(cube.handle(TRANSFORM_BLOCK).unwrap()).unwrap().size, 192);
    }

    #[test]
    fn texture_counts_match_shader_bindings() {
        let cfg = LessonsConfig::default();
        assert_eq!(Lesson::Textured.scene_config(&cfg).textures.len(), 1);
        assert_eq!(Lesson::Blend.scene_config(&cfg).textures.len(), 2);
        assert_eq!(Lesson::Cube.scene_config(&cfg).textures.len(), 2);
        assert!(include_str!("shaders/cube.wgsl").contains("@binding(3) var samp"));
        assert!(include_str!("shaders/blend.wgsl").contains("@binding(2) var samp"));
        assert!(include_str!("shaders/textured.wgsl").contains("@binding(1) var samp"));
    }
}
