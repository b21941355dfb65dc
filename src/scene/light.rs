use nalgebra::{Point3, Vector3};

/// Color of the single scene light: white, in the 0..255 domain.
pub const LIGHT_COLOR: Vector3<f32> = Vector3::new(255.0, 255.0, 255.0);

/// A point light. Intensity is implicitly 1 and the color is `LIGHT_COLOR`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
}

impl PointLight {
    pub fn new(position: Point3<f32>) -> Self {
        Self { position }
    }
}
