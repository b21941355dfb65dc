use crate::error::{RenderError, Result};
use crate::scene::mesh::{Face, FaceCorner, Model};
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file into a single `Model`.
///
/// Polygons keep their original corner count and the position, texcoord and
/// normal streams keep separate indices; fan triangulation happens later in
/// `Face::fan`. Sub-objects are merged into one model and materials are
/// ignored.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    info!("Loading OBJ file: {}", path.display());

    let load_options = tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ..Default::default()
    };

    let (models, _materials) =
        tobj::load_obj(path, &load_options).map_err(|source| RenderError::ObjLoad {
            path: path.display().to_string(),
            source,
        })?;

    let mut out = Model::default();

    for model in models {
        let mesh = &model.mesh;

        let position_offset = out.world_vertices.len();
        let texcoord_offset = out.texcoords.len();
        let normal_offset = out.normals.len();

        out.world_vertices.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Point3::new(p[0], p[1], p[2])),
        );
        out.texcoords.extend(
            mesh.texcoords
                .chunks_exact(2)
                .map(|t| Vector2::new(t[0], t[1])),
        );
        out.normals.extend(
            mesh.normals
                .chunks_exact(3)
                .map(|n| Vector3::new(n[0], n[1], n[2])),
        );

        let has_texcoords = mesh.texcoord_indices.len() == mesh.indices.len();
        let has_normals = mesh.normal_indices.len() == mesh.indices.len();
        if !has_normals {
            warn!(
                "Mesh '{}' has no per-corner normals; using face normals.",
                model.name
            );
        }

        let corner = |i: usize| {
            FaceCorner::new(
                mesh.indices[i] as usize + position_offset,
                has_texcoords.then(|| mesh.texcoord_indices[i] as usize + texcoord_offset),
                has_normals.then(|| mesh.normal_indices[i] as usize + normal_offset),
            )
        };

        // an empty arity list means every face is a triangle
        let arities: Vec<usize> = if mesh.face_arities.is_empty() {
            vec![3; mesh.indices.len() / 3]
        } else {
            mesh.face_arities.iter().map(|&a| a as usize).collect()
        };

        let mut start = 0;
        for arity in arities {
            let end = (start + arity).min(mesh.indices.len());
            out.faces.push(Face::new((start..end).map(&corner).collect()));
            start = end;
        }
    }

    info!(
        "Loaded {} vertices, {} faces ({} triangles)",
        out.world_vertices.len(),
        out.faces.len(),
        out.triangle_count()
    );

    Ok(out)
}
