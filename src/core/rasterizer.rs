use crate::core::color::{BYTES_PER_PIXEL, to_bgra};
use crate::core::framebuffer::{DepthBuffer, FrameBuffer};
use crate::core::geometry::{Corner, Triangle};
use crate::core::math::interpolation::{slope, step};
use crate::core::pipeline::{Fragment, Shader};
use std::ops::AddAssign;

#[derive(PartialEq, Copy, Clone, Debug, Default)]
pub enum CullMode {
    /// Discard triangles whose screen winding is not positive.
    #[default]
    Back,
    None,
}

/// Counters collected while rasterizing; cheap enough to keep on in release.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles: usize,
    pub culled: usize,
    /// Triangles skipped because they have no screen height.
    pub degenerate: usize,
    pub fragments_shaded: usize,
    pub depth_rejected: usize,
}

impl AddAssign for RasterStats {
    fn add_assign(&mut self, other: Self) {
        self.triangles += other.triangles;
        self.culled += other.culled;
        self.degenerate += other.degenerate;
        self.fragments_shaded += other.fragments_shaded;
        self.depth_rejected += other.depth_rejected;
    }
}

/// Scanline triangle rasterizer.
///
/// Each triangle is sorted top to bottom, its edges are walked one pixel row at
/// a time and every row is filled left to right. All corner attributes (screen
/// position, world position, normal, uv) are interpolated linearly in screen
/// space, with no perspective correction.
#[derive(Debug, Default, Clone)]
pub struct Rasterizer {
    pub cull_mode: CullMode,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Rasterizes every triangle of `triangles` in order.
    pub fn draw_triangles<S, I>(
        &self,
        triangles: I,
        shader: &S,
        framebuffer: &mut FrameBuffer,
        depth: &mut DepthBuffer,
    ) -> RasterStats
    where
        S: Shader + ?Sized,
        I: IntoIterator<Item = Triangle>,
    {
        let mut stats = RasterStats::default();
        for triangle in triangles {
            stats += self.draw_triangle(&triangle, shader, framebuffer, depth);
        }
        stats
    }

    /// Rasterizes a single triangle.
    ///
    /// Pixels are sampled at integer coordinates. Rows cover
    /// `ceil(top.y)..ceil(bottom.y)` and each row covers
    /// `ceil(left.x)..ceil(right.x)`, both clamped to the buffers.
    pub fn draw_triangle<S>(
        &self,
        triangle: &Triangle,
        shader: &S,
        framebuffer: &mut FrameBuffer,
        depth: &mut DepthBuffer,
    ) -> RasterStats
    where
        S: Shader + ?Sized,
    {
        let mut stats = RasterStats {
            triangles: 1,
            ..Default::default()
        };

        if self.cull_mode == CullMode::Back && triangle.is_back_facing() {
            stats.culled = 1;
            return stats;
        }

        let [top, mid, bottom] = triangle.sorted_by_y();

        // top -> bottom spans the whole height; without it there is nothing to fill.
        let Some(long_slope) = slope(top, bottom, bottom.screen.y - top.screen.y) else {
            stats.degenerate = 1;
            return stats;
        };
        // Either of these may be missing for flat-top or flat-bottom triangles.
        let upper_slope = slope(top, mid, mid.screen.y - top.screen.y);
        let lower_slope = slope(mid, bottom, bottom.screen.y - mid.screen.y);

        let width = framebuffer.width.min(depth.width);
        let height = framebuffer.height.min(depth.height);

        let min_y = clamp_coord(top.screen.y.ceil(), height);
        let max_y = clamp_coord(bottom.screen.y.ceil(), height);

        for y in min_y..max_y {
            let yf = y as f32;

            let short = match (yf < mid.screen.y, upper_slope, lower_slope) {
                (true, Some(s), _) | (false, Some(s), None) => step(top, s, top.screen.y, yf),
                (_, _, Some(s)) => step(mid, s, mid.screen.y, yf),
                (_, None, None) => continue,
            };
            let long = step(top, long_slope, top.screen.y, yf);

            let (left, right) = if short.screen.x > long.screen.x {
                (long, short)
            } else {
                (short, long)
            };

            let min_x = clamp_coord(left.screen.x.ceil(), width);
            let max_x = clamp_coord(right.screen.x.ceil(), width);
            if min_x >= max_x {
                continue;
            }

            let Some(span_slope) = slope(left, right, right.screen.x - left.screen.x) else {
                continue;
            };

            self.fill_span(
                y,
                min_x..max_x,
                &left,
                &span_slope,
                shader,
                framebuffer,
                depth,
                &mut stats,
            );
        }

        stats
    }

    /// Fills one row. `columns` is already clamped to the buffer width, so
    /// the row slices are indexed directly.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn fill_span<S>(
        &self,
        y: usize,
        columns: std::ops::Range<usize>,
        left: &Corner,
        span_slope: &Corner,
        shader: &S,
        framebuffer: &mut FrameBuffer,
        depth: &mut DepthBuffer,
        stats: &mut RasterStats,
    ) where
        S: Shader + ?Sized,
    {
        let color_row = framebuffer.row_mut(y);
        let depth_row = depth.row_mut(y);

        for x in columns {
            let point = step(*left, *span_slope, left.screen.x, x as f32);

            if !DepthBuffer::test_cell(&mut depth_row[x], point.screen.z) {
                stats.depth_rejected += 1;
                continue;
            }

            let color = shader.shade(&Fragment::from(point));
            let offset = x * BYTES_PER_PIXEL;
            color_row[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&to_bgra(color));
            stats.fragments_shaded += 1;
        }
    }
}

/// Clamps a ceiled coordinate into `0..=limit`. NaN maps to 0.
#[inline(always)]
fn clamp_coord(value: f32, limit: usize) -> usize {
    (value as i64).clamp(0, limit as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector2, Vector3, Vector4};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn corner(x: f32, y: f32, z: f32) -> Corner {
        Corner::new(
            Vector4::new(x, y, z, 1.0),
            Point3::new(x, y, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector2::new(x / 64.0, y / 64.0),
        )
    }

    fn solid(color: Vector3<f32>) -> impl Fn(&Fragment) -> Vector3<f32> {
        move |_: &Fragment| color
    }

    fn buffers(size: usize) -> (FrameBuffer, DepthBuffer) {
        (FrameBuffer::new(size, size), DepthBuffer::new(size, size))
    }

    fn front_triangle(z: f32) -> Triangle {
        Triangle::new(
            corner(10.0, 10.0, z),
            corner(30.0, 40.0, z),
            corner(50.0, 10.0, z),
        )
    }

    #[test]
    fn test_front_facing_triangle_is_filled() {
        let (mut fb, mut depth) = buffers(64);
        let stats = Rasterizer::new().draw_triangle(
            &front_triangle(0.5),
            &solid(Vector3::new(255.0, 0.0, 0.0)),
            &mut fb,
            &mut depth,
        );

        assert!(stats.fragments_shaded > 0);
        assert_eq!(stats.culled, 0);
        // centroid (30, 20) is inside, corners outside the hull are not
        assert_eq!(fb.pixel(30, 20), Some([0, 0, 255, 255]));
        assert_eq!(fb.pixel(5, 5), Some([0, 0, 0, 0]));
        assert_eq!(fb.pixel(30, 45), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_back_facing_triangle_shades_nothing() {
        let (mut fb, mut depth) = buffers(64);
        let tri = Triangle::new(
            corner(10.0, 10.0, 0.5),
            corner(50.0, 10.0, 0.5),
            corner(30.0, 40.0, 0.5),
        );
        let stats = Rasterizer::new().draw_triangle(
            &tri,
            &solid(Vector3::new(255.0, 255.0, 255.0)),
            &mut fb,
            &mut depth,
        );
        assert_eq!(stats.culled, 1);
        assert_eq!(stats.fragments_shaded, 0);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_random_non_positive_winding_is_always_culled() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let rasterizer = Rasterizer::new();

        for _ in 0..500 {
            let mut pick = || corner(rng.random_range(-8.0..72.0), rng.random_range(-8.0..72.0), 0.5);
            let tri = Triangle::new(pick(), pick(), pick());
            let (mut fb, mut depth) = buffers(64);
            let stats = rasterizer.draw_triangle(
                &tri,
                &solid(Vector3::new(200.0, 200.0, 200.0)),
                &mut fb,
                &mut depth,
            );
            if tri.winding() <= 0.0 {
                assert_eq!(stats.fragments_shaded, 0);
                assert!(fb.as_bytes().iter().all(|&b| b == 0));
            } else {
                assert_eq!(stats.culled, 0);
            }
        }
    }

    #[test]
    fn test_depth_buffer_holds_interpolated_depth() {
        // depth varies linearly as z = 0.01 * x + 0.005 * y
        let z = |x: f32, y: f32| 0.01 * x + 0.005 * y;
        let tri = Triangle::new(
            corner(4.0, 4.0, z(4.0, 4.0)),
            corner(20.0, 60.0, z(20.0, 60.0)),
            corner(60.0, 8.0, z(60.0, 8.0)),
        );
        let (mut fb, mut depth) = buffers(64);
        Rasterizer::new().draw_triangle(
            &tri,
            &solid(Vector3::new(1.0, 1.0, 1.0)),
            &mut fb,
            &mut depth,
        );

        for &(x, y) in &[(28usize, 24usize), (20, 10), (30, 30), (45, 12)] {
            let stored = depth.depth(x, y).unwrap();
            assert!(
                (stored - z(x as f32, y as f32)).abs() < 1e-4,
                "depth at ({x}, {y}) was {stored}"
            );
        }
        assert_eq!(depth.depth(2, 2), Some(f32::INFINITY));
    }

    #[test]
    fn test_attributes_are_interpolated_per_pixel() {
        let tri = front_triangle(0.5);
        let (mut fb, mut depth) = buffers(64);
        // encode the interpolated world position into the color channels;
        // +0.5 keeps truncation away from float noise around whole numbers
        let shader = |f: &Fragment| {
            Vector3::new(
                f.world_pos.x + 0.5,
                f.world_pos.y + 0.5,
                f.uv.x * 64.0 + 0.5,
            )
        };
        Rasterizer::new().draw_triangle(&tri, &shader, &mut fb, &mut depth);

        assert_eq!(fb.pixel(30, 20), Some([30, 20, 30, 255]));
        assert_eq!(fb.pixel(20, 12), Some([20, 12, 20, 255]));
        // the top-left vertex itself sits on the first row and column
        assert_eq!(fb.pixel(10, 10), Some([10, 10, 10, 255]));
    }

    #[test]
    fn test_closer_triangle_wins_overlap() {
        let rasterizer = Rasterizer::new();
        let (mut fb, mut depth) = buffers(64);
        rasterizer.draw_triangle(
            &front_triangle(0.3),
            &solid(Vector3::new(255.0, 0.0, 0.0)),
            &mut fb,
            &mut depth,
        );
        let stats = rasterizer.draw_triangle(
            &front_triangle(0.7),
            &solid(Vector3::new(0.0, 255.0, 0.0)),
            &mut fb,
            &mut depth,
        );
        assert_eq!(stats.fragments_shaded, 0);
        assert!(stats.depth_rejected > 0);
        assert_eq!(fb.pixel(30, 20), Some([0, 0, 255, 255]));

        rasterizer.draw_triangle(
            &front_triangle(0.1),
            &solid(Vector3::new(0.0, 0.0, 255.0)),
            &mut fb,
            &mut depth,
        );
        assert_eq!(fb.pixel(30, 20), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_equal_depth_last_write_wins() {
        let rasterizer = Rasterizer::new();
        let (mut fb, mut depth) = buffers(64);
        rasterizer.draw_triangle(
            &front_triangle(0.5),
            &solid(Vector3::new(255.0, 0.0, 0.0)),
            &mut fb,
            &mut depth,
        );
        rasterizer.draw_triangle(
            &front_triangle(0.5),
            &solid(Vector3::new(0.0, 255.0, 0.0)),
            &mut fb,
            &mut depth,
        );
        assert_eq!(fb.pixel(30, 20), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_flat_top_triangle_has_no_non_finite_output() {
        let (mut fb, mut depth) = buffers(64);
        // two corners share y = 10: the top -> mid edge has no height
        let stats = Rasterizer::new().draw_triangle(
            &front_triangle(0.5),
            &|f: &Fragment| f.normal * 100.0 + f.world_pos.coords,
            &mut fb,
            &mut depth,
        );
        assert!(stats.fragments_shaded > 0);
        for y in 0..64 {
            for x in 0..64 {
                let d = depth.depth(x, y).unwrap();
                assert!(d == f32::INFINITY || d.is_finite());
            }
        }
    }

    #[test]
    fn test_flat_bottom_triangle() {
        let (mut fb, mut depth) = buffers(64);
        let tri = Triangle::new(
            corner(30.0, 5.0, 0.5),
            corner(10.0, 40.0, 0.5),
            corner(50.0, 40.0, 0.5),
        );
        let stats = Rasterizer::new().draw_triangle(
            &tri,
            &solid(Vector3::new(9.0, 9.0, 9.0)),
            &mut fb,
            &mut depth,
        );
        assert!(stats.fragments_shaded > 0);
        assert_eq!(fb.pixel(30, 39), Some([9, 9, 9, 255]));
        assert_eq!(fb.pixel(30, 40), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_zero_height_triangle_is_skipped_even_without_culling() {
        let mut rasterizer = Rasterizer::new();
        rasterizer.set_cull_mode(CullMode::None);
        let (mut fb, mut depth) = buffers(64);
        let tri = Triangle::new(
            corner(10.0, 20.0, 0.5),
            corner(30.0, 20.0, 0.5),
            corner(50.0, 20.0, 0.5),
        );
        let stats = rasterizer.draw_triangle(
            &tri,
            &solid(Vector3::new(9.0, 9.0, 9.0)),
            &mut fb,
            &mut depth,
        );
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.fragments_shaded, 0);
    }

    #[test]
    fn test_cull_none_fills_back_facing_triangle() {
        let mut rasterizer = Rasterizer::new();
        rasterizer.set_cull_mode(CullMode::None);
        let (mut fb, mut depth) = buffers(64);
        let tri = Triangle::new(
            corner(10.0, 10.0, 0.5),
            corner(50.0, 10.0, 0.5),
            corner(30.0, 40.0, 0.5),
        );
        let stats = rasterizer.draw_triangle(
            &tri,
            &solid(Vector3::new(1.0, 2.0, 3.0)),
            &mut fb,
            &mut depth,
        );
        assert!(stats.fragments_shaded > 0);
        assert_eq!(fb.pixel(30, 20), Some([3, 2, 1, 255]));
    }

    #[test]
    fn test_triangle_partially_off_screen_is_clipped() {
        let (mut fb, mut depth) = buffers(32);
        let tri = Triangle::new(
            corner(-20.0, -20.0, 0.5),
            corner(10.0, 80.0, 0.5),
            corner(90.0, -10.0, 0.5),
        );
        let stats = Rasterizer::new().draw_triangle(
            &tri,
            &solid(Vector3::new(5.0, 5.0, 5.0)),
            &mut fb,
            &mut depth,
        );
        assert!(stats.fragments_shaded > 0);
        assert!(stats.fragments_shaded <= 32 * 32);
        assert_eq!(fb.pixel(0, 0), Some([5, 5, 5, 255]));
    }

    #[test]
    fn test_draw_triangles_accumulates_stats() {
        let (mut fb, mut depth) = buffers(64);
        let back = Triangle::new(
            corner(10.0, 10.0, 0.5),
            corner(50.0, 10.0, 0.5),
            corner(30.0, 40.0, 0.5),
        );
        let stats = Rasterizer::new().draw_triangles(
            [front_triangle(0.5), back],
            &solid(Vector3::new(1.0, 1.0, 1.0)),
            &mut fb,
            &mut depth,
        );
        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.culled, 1);
        assert!(stats.fragments_shaded > 0);
    }
}
