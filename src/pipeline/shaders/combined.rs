use crate::core::pipeline::{Fragment, Shader};
use crate::pipeline::shaders::LightingVectors;
use crate::pipeline::shaders::pbr::cook_torrance_shade;
use crate::pipeline::shaders::phong::phong_terms;
use crate::scene::context::SceneContext;
use nalgebra::Vector3;

/// Default shader: every Phong term is scaled per channel by the Cook-Torrance
/// radiance, then the three are summed.
///
/// The light response is applied twice. Output brightness depends on that, so
/// neither model is dropped.
pub struct PhongPbrShader<'a> {
    scene: &'a SceneContext,
}

impl<'a> PhongPbrShader<'a> {
    pub fn new(scene: &'a SceneContext) -> Self {
        Self { scene }
    }
}

impl Shader for PhongPbrShader<'_> {
    fn shade(&self, fragment: &Fragment) -> Vector3<f32> {
        let scene = self.scene;
        let sample = scene.maps.sample(fragment.uv, fragment.normal);
        let vectors = LightingVectors::new(&fragment.world_pos, &scene.eye, &scene.light.position);

        let terms = phong_terms(&scene.material, &sample, &vectors);
        let shade = cook_torrance_shade(scene.material.roughness, &sample, &vectors);

        terms.ambient.component_mul(&shade)
            + terms.diffuse.component_mul(&shade)
            + terms.specular.component_mul(&shade)
    }
}
