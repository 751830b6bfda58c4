use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use lumen_motion::OutputParameters;

/// Uniform block name of the pulse lesson.
pub const TINT_BLOCK: &str = "tint";
/// Uniform block name of the cube lesson.
pub const TRANSFORM_BLOCK: &str = "transform";

/// Camera position for the cube lesson; looks at the origin with +Z up.
pub const EYE: Vec3 = Vec3::new(1.2, 1.2, 1.2);
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 1.0;
pub const Z_FAR: f32 = 10.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TintUniform {
    pub color: [f32; 4],
}

impl TintUniform {
    /// Red channel carries the animated intensity.
    pub fn from_params(params: &OutputParameters) -> Self {
        Self {
            color: [params.color_intensity as f32, 0.0, 0.0, 1.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn from_params(params: &OutputParameters, aspect: f32) -> Self {
        Self {
            model: model_matrix(params).to_cols_array_2d(),
            view: view_matrix().to_cols_array_2d(),
            projection: projection_matrix(aspect).to_cols_array_2d(),
        }
    }
}

/// Rotation about +Z, then uniform scale.
pub fn model_matrix(params: &OutputParameters) -> Mat4 {
    Mat4::from_rotation_z(params.rotation_angle_radians as f32)
        * Mat4::from_scale(Vec3::splat(params.scale_factor as f32))
}

pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Z)
}

/// Right-handed perspective with a 0..1 depth range.
pub fn projection_matrix(aspect: f32) -> Mat4 {
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::f64::consts::FRAC_PI_2;

    fn params(angle: f64, scale: f64) -> OutputParameters {
        OutputParameters {
            color_intensity: 0.5,
            rotation_angle_radians: angle,
            scale_factor: scale,
        }
    }

    fn approx(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn block_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<TintUniform>(), 16);
        assert_eq!(std::mem::size_of::<TransformUniform>(), 192);
    }

    #[test]
    fn tint_puts_intensity_in_red() {
        let t = TintUniform::from_params(&params(0.0, 1.0));
        assert_eq!(t.color, [0.5, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn rest_pose_is_identity() {
        assert_eq!(model_matrix(&params(0.0, 1.0)), Mat4::IDENTITY);
    }

    #[test]
    fn quarter_turn_maps_x_to_y() {
        let m = model_matrix(&params(FRAC_PI_2, 1.0));
        assert!(approx(m * Vec4::new(1.0, 0.0, 0.0, 1.0), Vec4::new(0.0, 1.0, 0.0, 1.0)));
    }

    #[test]
    fn scale_applies_to_all_axes() {
        let m = model_matrix(&params(0.0, 2.0));
        assert!(approx(m * Vec4::new(0.5, -0.5, 0.5, 1.0), Vec4::new(1.0, -1.0, 1.0, 1.0)));
    }

    #[test]
    fn rotation_keeps_z() {
        let m = model_matrix(&params(1.234, 1.0));
        let p = m * Vec4::new(0.3, 0.4, 0.5, 1.0);
        assert!((p.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn origin_lands_in_front_of_camera() {
        let clip = projection_matrix(4.0 / 3.0) * view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn degenerate_aspect_falls_back() {
        assert_eq!(projection_matrix(0.0), projection_matrix(1.0));
        assert_eq!(projection_matrix(f32::NAN), projection_matrix(1.0));
    }
}
