use crate::core::geometry::{Corner, Triangle};
use crate::error::{RenderError, Result};
use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// One polygon corner. Each attribute stream is indexed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceCorner {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

impl FaceCorner {
    pub fn new(position: usize, texcoord: Option<usize>, normal: Option<usize>) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

/// An ordered polygon with at least three corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub corners: Vec<FaceCorner>,
}

impl Face {
    pub fn new(corners: Vec<FaceCorner>) -> Self {
        Self { corners }
    }

    /// Triangle fan sharing the first corner: (0, 1, 2), (0, 2, 3), ...
    /// Faces with fewer than three corners yield nothing.
    pub fn fan(&self) -> impl Iterator<Item = [FaceCorner; 3]> + '_ {
        let first = self.corners.first().copied();
        self.corners
            .windows(2)
            .skip(1)
            .filter_map(move |pair| first.map(|f| [f, pair[0], pair[1]]))
    }
}

/// A polygonal model with independent attribute streams.
///
/// `screen_vertices` are indexed exactly like `world_vertices` and must be
/// refreshed whenever the camera or the output size changes.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub world_vertices: Vec<Point3<f32>>,
    pub screen_vertices: Vec<Vector4<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub texcoords: Vec<Vector2<f32>>,
    pub faces: Vec<Face>,
}

impl Model {
    pub fn new(
        world_vertices: Vec<Point3<f32>>,
        normals: Vec<Vector3<f32>>,
        texcoords: Vec<Vector2<f32>>,
        faces: Vec<Face>,
    ) -> Self {
        Self {
            world_vertices,
            screen_vertices: Vec::new(),
            normals,
            texcoords,
            faces,
        }
    }

    /// A square in the XY plane facing +Z, `size` units wide, as one four-corner face.
    pub fn create_quad(size: f32) -> Self {
        let h = size * 0.5;
        let world_vertices = vec![
            Point3::new(-h, -h, 0.0),
            Point3::new(h, -h, 0.0),
            Point3::new(h, h, 0.0),
            Point3::new(-h, h, 0.0),
        ];
        let texcoords = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ];
        let normals = vec![Vector3::z()];
        let corners = (0..4)
            .map(|i| FaceCorner::new(i, Some(i), Some(0)))
            .collect();

        Self::new(world_vertices, normals, texcoords, vec![Face::new(corners)])
    }

    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.corners.len().saturating_sub(2))
            .sum()
    }

    /// Checks every face index against its stream, including the screen positions.
    pub fn validate(&self) -> Result<()> {
        let positions = self.world_vertices.len().min(self.screen_vertices.len());
        for (face_idx, face) in self.faces.iter().enumerate() {
            for corner in &face.corners {
                check_index(face_idx, "position", corner.position, positions)?;
                if let Some(t) = corner.texcoord {
                    check_index(face_idx, "texcoord", t, self.texcoords.len())?;
                }
                if let Some(n) = corner.normal {
                    check_index(face_idx, "normal", n, self.normals.len())?;
                }
            }
        }
        Ok(())
    }

    /// Every face decomposed into fan triangles with resolved attributes.
    ///
    /// Triangles touching an out-of-range index are dropped; call `validate`
    /// first to turn that into an error instead.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces
            .iter()
            .flat_map(|face| face.fan())
            .filter_map(move |corners| self.resolve(&corners))
    }

    fn resolve(&self, corners: &[FaceCorner; 3]) -> Option<Triangle> {
        let world = [
            *self.world_vertices.get(corners[0].position)?,
            *self.world_vertices.get(corners[1].position)?,
            *self.world_vertices.get(corners[2].position)?,
        ];
        // used for corners without a normal index
        let flat_normal = (world[1] - world[0])
            .cross(&(world[2] - world[0]))
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros);

        let mut resolved = [Corner::new(
            Vector4::zeros(),
            Point3::origin(),
            Vector3::zeros(),
            Vector2::zeros(),
        ); 3];

        for (i, fc) in corners.iter().enumerate() {
            let screen = *self.screen_vertices.get(fc.position)?;
            let normal = match fc.normal {
                Some(n) => self
                    .normals
                    .get(n)?
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::zeros),
                None => flat_normal,
            };
            let uv = match fc.texcoord {
                Some(t) => *self.texcoords.get(t)?,
                None => Vector2::zeros(),
            };
            resolved[i] = Corner::new(screen, world[i], normal, uv);
        }

        let [a, b, c] = resolved;
        Some(Triangle::new(a, b, c))
    }
}

fn check_index(face: usize, stream: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(RenderError::IndexOutOfRange {
            face,
            stream,
            index,
            len,
        })
    }
}
