use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Builders for the camera matrices used to project a model into screen space.
/// Right-handed, camera looking down -Z, NDC in [-1, 1].
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    pub fn translation(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, offset.x,
            0.0, 1.0, 0.0, offset.y,
            0.0, 0.0, 1.0, offset.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Look-at view matrix.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let back = (eye - target).normalize();
        let right = up.cross(&back).normalize();
        let true_up = back.cross(&right);

        let basis = Matrix4::new(
            right.x,   right.y,   right.z,   0.0,
            true_up.x, true_up.y, true_up.z, 0.0,
            back.x,    back.y,    back.z,    0.0,
            0.0,       0.0,       0.0,       1.0,
        );

        basis * Self::translation(&-eye.coords)
    }

    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let focal = 1.0 / (fov_y_rad * 0.5).tan();
        let inv_range = 1.0 / (near - far);

        Matrix4::new(
            focal / aspect_ratio, 0.0,   0.0,                       0.0,
            0.0,                  focal, 0.0,                       0.0,
            0.0,                  0.0,   (far + near) * inv_range,  2.0 * far * near * inv_range,
            0.0,                  0.0,   -1.0,                      0.0,
        )
    }
}

/// Projects a clip-space position to the rasterizer's screen convention:
/// `x`, `y` in pixels (y grows downwards), `z` the NDC depth, `w` the clip w.
///
/// Positions with `w` at zero collapse to the origin with infinite depth so the
/// depth test never accepts them.
#[inline]
pub fn clip_to_screen(clip: &Vector4<f32>, width: f32, height: f32) -> Vector4<f32> {
    let w = clip.w;
    if w.abs() <= 1e-6 {
        return Vector4::new(0.0, 0.0, f32::INFINITY, w);
    }
    let ndc = clip.xyz() / w;
    Vector4::new(
        (ndc.x + 1.0) * 0.5 * width,
        (1.0 - (ndc.y + 1.0) * 0.5) * height,
        ndc.z,
        w,
    )
}
