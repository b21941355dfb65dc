use crate::core::geometry::Corner;
use nalgebra::{Point3, Vector2, Vector3};

/// Surface data interpolated for one pixel that survived the depth test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub world_pos: Point3<f32>,
    /// Interpolated vertex normal. Not unit length; shaders renormalize.
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
}

impl From<Corner> for Fragment {
    fn from(corner: Corner) -> Self {
        Self {
            world_pos: corner.world,
            normal: corner.normal,
            uv: corner.uv,
        }
    }
}

/// Per-pixel shading stage.
///
/// The returned color is in the 0..255 domain and may exceed it; the framebuffer
/// write clamps each channel.
pub trait Shader {
    fn shade(&self, fragment: &Fragment) -> Vector3<f32>;
}

impl<F> Shader for F
where
    F: Fn(&Fragment) -> Vector3<f32>,
{
    fn shade(&self, fragment: &Fragment) -> Vector3<f32> {
        self(fragment)
    }
}
