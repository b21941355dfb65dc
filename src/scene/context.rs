use crate::scene::light::PointLight;
use crate::scene::material::{Material, MaterialMaps};
use crate::scene::mesh::Model;
use nalgebra::Point3;

/// Everything one frame reads. Passed by reference into the renderer and the
/// shaders; nothing in it is mutated while rasterizing.
#[derive(Debug, Clone)]
pub struct SceneContext {
    /// Screen vertices must already match `width x height`.
    pub model: Model,
    pub material: Material,
    pub maps: MaterialMaps,
    pub eye: Point3<f32>,
    pub light: PointLight,
    pub width: usize,
    pub height: usize,
}

impl SceneContext {
    /// Builds a context. A zero width or height is clamped to 1.
    pub fn new(
        model: Model,
        eye: Point3<f32>,
        light: PointLight,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            model,
            material: Material::default(),
            maps: MaterialMaps::default(),
            eye,
            light,
            width: width.max(1),
            height: height.max(1),
        }
    }
}
