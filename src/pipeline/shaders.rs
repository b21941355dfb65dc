pub mod combined;
pub mod pbr;
pub mod phong;

use nalgebra::{Point3, Vector3};
use serde::Deserialize;

/// Lighting model applied to every pixel of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Phong ambient, diffuse and specular terms each scaled by the
    /// Cook-Torrance radiance.
    #[default]
    PhongPbr,
    /// Plain Phong: ambient + diffuse + specular.
    Phong,
}

/// Unit direction vectors for one surface point.
///
/// `light_dir` and `view_dir` point away from the light and the eye;
/// `light` and `view` point back at them. Any vector whose endpoints coincide
/// is zero instead of NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingVectors {
    pub light_dir: Vector3<f32>,
    pub view_dir: Vector3<f32>,
    pub view: Vector3<f32>,
    pub light: Vector3<f32>,
    pub halfway: Vector3<f32>,
}

impl LightingVectors {
    pub fn new(world_pos: &Point3<f32>, eye: &Point3<f32>, light_pos: &Point3<f32>) -> Self {
        let light_dir = unit_or_zero(world_pos - light_pos);
        let view_dir = unit_or_zero(world_pos - eye);
        Self {
            light_dir,
            view_dir,
            view: unit_or_zero(eye - world_pos),
            light: unit_or_zero(light_pos - world_pos),
            halfway: unit_or_zero(view_dir + light_dir),
        }
    }
}

pub(crate) fn unit_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_point_the_right_way() {
        let v = LightingVectors::new(
            &Point3::origin(),
            &Point3::new(0.0, 0.0, 5.0),
            &Point3::new(3.0, 0.0, 0.0),
        );
        assert_eq!(v.view, Vector3::z());
        assert_eq!(v.view_dir, -Vector3::z());
        assert_eq!(v.light, Vector3::x());
        assert_eq!(v.light_dir, -Vector3::x());
        let expected = Vector3::new(-1.0, 0.0, -1.0).normalize();
        assert!((v.halfway - expected).norm() < 1e-6);
    }

    #[test]
    fn test_coincident_points_give_zero_vectors() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let v = LightingVectors::new(&p, &p, &p);
        assert_eq!(v.light_dir, Vector3::zeros());
        assert_eq!(v.halfway, Vector3::zeros());
    }

    #[test]
    fn test_shading_mode_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            shading: ShadingMode,
        }
        let w: Wrapper = toml::from_str("shading = \"phong_pbr\"").unwrap();
        assert_eq!(w.shading, ShadingMode::PhongPbr);
        let w: Wrapper = toml::from_str("shading = \"phong\"").unwrap();
        assert_eq!(w.shading, ShadingMode::Phong);

        use clap::ValueEnum;
        assert_eq!(
            ShadingMode::from_str("phong-pbr", true),
            Ok(ShadingMode::PhongPbr)
        );
    }
}
