use crate::scene::mesh::Model;
use nalgebra::Point3;

/// Moves the model's bounding-box center to the origin and scales its largest
/// extent to 1.8, leaving a little room inside the [-1, 1] cube.
///
/// Returns the original center and the scale factor applied. Normals are left
/// untouched since the transform is a uniform scale plus a translation.
pub fn normalize_and_center_model(model: &mut Model) -> (Point3<f32>, f32) {
    let Some(first) = model.world_vertices.first().copied() else {
        return (Point3::origin(), 1.0);
    };

    let (min_bound, max_bound) = model
        .world_vertices
        .iter()
        .fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));

    let center = nalgebra::center(&min_bound, &max_bound);
    let extent = max_bound - min_bound;
    let max_dimension = extent.x.max(extent.y).max(extent.z);

    let scale_factor = if max_dimension > 1e-6 {
        1.8 / max_dimension
    } else {
        1.0
    };

    for p in &mut model.world_vertices {
        *p = Point3::from((*p - center) * scale_factor);
    }

    (center, scale_factor)
}
