use crate::core::math::transform::{TransformFactory, clip_to_screen};
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Perspective camera. Only the eye position matters to shading; the matrices
/// are used once per frame to project the model into screen space.
///
/// Parameters are fixed at construction so the cached matrices cannot go stale.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point3<f32>,
    target: Point3<f32>,
    up: Vector3<f32>,
    fov_y_rad: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,

    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new_perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y_rad: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut cam = Self {
            position,
            target,
            up,
            fov_y_rad,
            aspect_ratio,
            near,
            far,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::view(&self.position, &self.target, &self.up);
        self.projection_matrix =
            TransformFactory::perspective(self.aspect_ratio, self.fov_y_rad, self.near, self.far);
    }

    /// Projects world positions into a `width x height` pixel grid.
    pub fn project_all(
        &self,
        world: &[Point3<f32>],
        width: usize,
        height: usize,
    ) -> Vec<Vector4<f32>> {
        let view_proj = self.projection_matrix * self.view_matrix;
        world
            .iter()
            .map(|p| clip_to_screen(&(view_proj * p.to_homogeneous()), width as f32, height as f32))
            .collect()
    }
}
