use nalgebra::{Point3, Vector2, Vector3, Vector4};
use std::ops::{Add, Mul, Sub};

/// Every attribute carried by one triangle corner.
///
/// The bundle is walked as a unit along edges and spans so the screen position,
/// world position, normal and texture coordinate can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Pixel x, pixel y, depth and the perspective w.
    pub screen: Vector4<f32>,
    pub world: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
}

impl Corner {
    pub fn new(
        screen: Vector4<f32>,
        world: Point3<f32>,
        normal: Vector3<f32>,
        uv: Vector2<f32>,
    ) -> Self {
        Self {
            screen,
            world,
            normal,
            uv,
        }
    }
}

// nalgebra points don't add to points, so world positions go through `coords`.
impl Add for Corner {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            screen: self.screen + other.screen,
            world: Point3::from(self.world.coords + other.world.coords),
            normal: self.normal + other.normal,
            uv: self.uv + other.uv,
        }
    }
}

impl Sub for Corner {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            screen: self.screen - other.screen,
            world: Point3::from(self.world - other.world),
            normal: self.normal - other.normal,
            uv: self.uv - other.uv,
        }
    }
}

impl Mul<f32> for Corner {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            screen: self.screen * scalar,
            world: Point3::from(self.world.coords * scalar),
            normal: self.normal * scalar,
            uv: self.uv * scalar,
        }
    }
}

/// A single triangle ready for rasterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub corners: [Corner; 3],
}

impl Triangle {
    pub fn new(a: Corner, b: Corner, c: Corner) -> Self {
        Self { corners: [a, b, c] }
    }

    /// 2D cross product of the screen edges (first -> third) x (first -> second).
    ///
    /// Positive for the front-facing winding of the source data.
    pub fn winding(&self) -> f32 {
        let [a, b, c] = &self.corners;
        let edge1 = c.screen - a.screen;
        let edge2 = b.screen - a.screen;
        edge1.x * edge2.y - edge1.y * edge2.x
    }

    /// Screen-space back-face test. Zero-area triangles count as back facing.
    ///
    /// A NaN winding also lands here, so broken projections never reach the
    /// scanline walk.
    pub fn is_back_facing(&self) -> bool {
        !(self.winding() > 0.0)
    }

    /// Corners reordered top to bottom by screen y.
    ///
    /// The sort is stable: corners sharing a y keep their input order.
    pub fn sorted_by_y(&self) -> [Corner; 3] {
        let mut order = [0usize, 1, 2];
        order.sort_by(|&i, &j| {
            self.corners[i]
                .screen
                .y
                .total_cmp(&self.corners[j].screen.y)
        });
        order.map(|i| self.corners[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner(x: f32, y: f32, tag: f32) -> Corner {
        Corner::new(
            Vector4::new(x, y, 0.5, 1.0),
            Point3::new(tag, tag, tag),
            Vector3::new(0.0, 0.0, tag),
            Vector2::new(tag, tag),
        )
    }

    #[test]
    fn test_front_facing_winding() {
        let tri = Triangle::new(
            corner(10.0, 10.0, 0.0),
            corner(30.0, 40.0, 1.0),
            corner(50.0, 10.0, 2.0),
        );
        assert!(tri.winding() > 0.0);
        assert!(!tri.is_back_facing());
    }

    #[test]
    fn test_reversed_winding_is_back_facing() {
        let tri = Triangle::new(
            corner(10.0, 10.0, 0.0),
            corner(50.0, 10.0, 1.0),
            corner(30.0, 40.0, 2.0),
        );
        assert!(tri.is_back_facing());
    }

    #[test]
    fn test_collinear_is_back_facing() {
        let tri = Triangle::new(
            corner(0.0, 0.0, 0.0),
            corner(5.0, 5.0, 1.0),
            corner(10.0, 10.0, 2.0),
        );
        assert!(tri.is_back_facing());
    }

    #[test]
    fn test_sort_carries_every_attribute() {
        let tri = Triangle::new(
            corner(0.0, 30.0, 0.0),
            corner(0.0, 10.0, 1.0),
            corner(0.0, 20.0, 2.0),
        );
        let sorted = tri.sorted_by_y();
        let tags: Vec<f32> = sorted.iter().map(|c| c.world.x).collect();
        assert_eq!(tags, vec![1.0, 2.0, 0.0]);
        for c in &sorted {
            assert_eq!(c.normal.z, c.world.x);
            assert_eq!(c.uv.x, c.world.x);
        }
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let tri = Triangle::new(
            corner(0.0, 5.0, 0.0),
            corner(1.0, 5.0, 1.0),
            corner(2.0, 0.0, 2.0),
        );
        let sorted = tri.sorted_by_y();
        assert_eq!(sorted[0].world.x, 2.0);
        assert_eq!(sorted[1].world.x, 0.0);
        assert_eq!(sorted[2].world.x, 1.0);
    }

    #[test]
    fn test_corner_arithmetic() {
        let a = corner(2.0, 4.0, 1.0);
        let b = corner(6.0, 8.0, 3.0);
        let mid = a + (b - a) * 0.5;
        assert_eq!(mid.screen.x, 4.0);
        assert_eq!(mid.world, Point3::new(2.0, 2.0, 2.0));
        assert_eq!(mid.uv, Vector2::new(2.0, 2.0));
    }
}
