use crate::error::Result;
use crate::io::config::Config;
use crate::io::obj_loader::load_obj;
use crate::scene::camera::Camera;
use crate::scene::context::SceneContext;
use crate::scene::light::PointLight;
use crate::scene::material::{Material, MaterialMaps};
use crate::scene::mesh::Model;
use crate::scene::texture::{NormalMap, Texture};
use crate::scene::utils::normalize_and_center_model;
use log::{info, warn};
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

/// Builds a ready-to-render scene from `config`.
///
/// Asset problems never abort: a missing OBJ falls back to a quad and a
/// missing texture falls back to the constant colors. Index errors in the
/// loaded model are reported.
pub fn build_scene(config: &Config) -> Result<SceneContext> {
    let width = config.render.width.max(1);
    let height = config.render.height.max(1);

    let mut model = match config.model.path.as_deref() {
        Some(path) => load_obj(path).unwrap_or_else(|e| {
            warn!("{e}; rendering a quad instead");
            Model::create_quad(2.0)
        }),
        None => {
            info!("No model configured, rendering a quad");
            Model::create_quad(2.0)
        }
    };

    if config.model.normalize {
        let (center, scale) = normalize_and_center_model(&mut model);
        info!("Model normalized. Center: {center:?}, Scale: {scale:.4}");
    }

    let maps = MaterialMaps {
        albedo: load_optional(config.model.albedo_texture.as_deref(), "albedo", |p| {
            Texture::load(p)
        }),
        specular: load_optional(config.model.specular_texture.as_deref(), "specular", |p| {
            Texture::load(p)
        }),
        normal: load_optional(config.model.normal_texture.as_deref(), "normal", |p| {
            NormalMap::load(p)
        }),
    };

    let cam = &config.camera;
    let camera = Camera::new_perspective(
        Point3::from(cam.eye),
        Point3::from(cam.target),
        Vector3::from(cam.up),
        cam.fov.to_radians(),
        width as f32 / height as f32,
        cam.near,
        cam.far,
    );
    model.screen_vertices = camera.project_all(&model.world_vertices, width, height);
    model.validate()?;

    let mut scene = SceneContext::new(
        model,
        camera.position(),
        PointLight::new(Point3::from(config.light.position)),
        width,
        height,
    );
    scene.material = Material::from(&config.material);
    scene.maps = maps;
    Ok(scene)
}

fn load_optional<T, F>(path: Option<&str>, kind: &str, load: F) -> Option<Arc<T>>
where
    F: FnOnce(&str) -> Result<T>,
{
    let path = path?;
    match load(path) {
        Ok(map) => Some(Arc::new(map)),
        Err(e) => {
            warn!("{e}; using the fallback {kind} value");
            None
        }
    }
}
