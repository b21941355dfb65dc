use crate::core::pipeline::{Fragment, Shader};
use crate::pipeline::shaders::{LightingVectors, unit_or_zero};
use crate::scene::context::SceneContext;
use crate::scene::material::{Material, MaterialSample};
use nalgebra::Vector3;

/// The three Phong contributions for one pixel, 0..255 domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongTerms {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl PhongTerms {
    pub fn sum(&self) -> Vector3<f32> {
        self.ambient + self.diffuse + self.specular
    }
}

/// Mirrors `incident` about `normal`.
pub fn reflect(incident: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * incident.dot(normal))
}

/// Evaluates ambient, diffuse and specular terms, each clamped to be non-negative.
pub fn phong_terms(
    material: &Material,
    sample: &MaterialSample,
    vectors: &LightingVectors,
) -> PhongTerms {
    let n = sample.normal;

    let ambient = sample.albedo * material.ambient;

    let intensity = n.dot(&-vectors.light_dir).max(0.0);
    let attenuation = 1.0 / vectors.light_dir.norm_squared().max(0.01);
    let diffuse = sample.albedo * (material.diffuse * intensity * attenuation);

    let reflected = unit_or_zero(reflect(&vectors.light_dir, &n));
    let rv = reflected.dot(&-vectors.view_dir).max(0.0);
    let specular = sample.specular * (material.specular * rv.powf(material.gloss));

    PhongTerms {
        ambient: non_negative(ambient),
        diffuse: non_negative(diffuse),
        specular: non_negative(specular),
    }
}

fn non_negative(v: Vector3<f32>) -> Vector3<f32> {
    v.map(|c| c.max(0.0))
}

/// Plain Phong: ambient + diffuse + specular.
pub struct PhongShader<'a> {
    scene: &'a SceneContext,
}

impl<'a> PhongShader<'a> {
    pub fn new(scene: &'a SceneContext) -> Self {
        Self { scene }
    }
}

impl Shader for PhongShader<'_> {
    fn shade(&self, fragment: &Fragment) -> Vector3<f32> {
        let sample = self.scene.maps.sample(fragment.uv, fragment.normal);
        let vectors =
            LightingVectors::new(&fragment.world_pos, &self.scene.eye, &self.scene.light.position);
        phong_terms(&self.scene.material, &sample, &vectors).sum()
    }
}
