use crate::scene::texture::{NormalMap, Texture};
use nalgebra::{Vector2, Vector3};
use std::sync::Arc;

/// Albedo used when no diffuse map is bound.
pub const FALLBACK_ALBEDO: Vector3<f32> = Vector3::new(235.0, 163.0, 9.0);
/// Specular color used when no specular map is bound.
pub const FALLBACK_SPECULAR: Vector3<f32> = Vector3::new(212.0, 21.0, 21.0);

/// Scalar lighting factors shared by every pixel of the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    /// Phong specular exponent.
    pub gloss: f32,
    /// Cook-Torrance roughness.
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: 1.0,
            diffuse: 1.0,
            specular: 0.2,
            gloss: 5.0,
            roughness: 0.1,
        }
    }
}

/// Optional images bound to the model.
#[derive(Debug, Clone, Default)]
pub struct MaterialMaps {
    pub albedo: Option<Arc<Texture>>,
    pub specular: Option<Arc<Texture>>,
    pub normal: Option<Arc<NormalMap>>,
}

/// Surface properties resolved for one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSample {
    /// 0..255 domain.
    pub albedo: Vector3<f32>,
    /// 0..255 domain.
    pub specular: Vector3<f32>,
    /// Unit length, or zero when the surface has no usable normal.
    pub normal: Vector3<f32>,
}

impl MaterialMaps {
    /// Resolves albedo, specular color and normal at `uv`.
    ///
    /// Without a normal map the interpolated vertex normal is renormalized.
    pub fn sample(&self, uv: Vector2<f32>, vertex_normal: Vector3<f32>) -> MaterialSample {
        let albedo = match &self.albedo {
            Some(tex) => tex.sample(uv.x, uv.y),
            None => FALLBACK_ALBEDO,
        };
        let specular = match &self.specular {
            Some(tex) => tex.sample(uv.x, uv.y),
            None => FALLBACK_SPECULAR,
        };
        let normal = match &self.normal {
            Some(map) => map.sample(uv.x, uv.y),
            None => vertex_normal
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(Vector3::zeros),
        };

        MaterialSample {
            albedo,
            specular,
            normal,
        }
    }
}
