use crate::pipeline::shaders::LightingVectors;
use crate::scene::light::LIGHT_COLOR;
use crate::scene::material::MaterialSample;
use nalgebra::Vector3;
use std::f32::consts::PI;

/// Floor for every denominator in the BRDF.
pub const EPSILON: f32 = 1e-6;

// --- Cook-Torrance terms ---

/// Normal distribution term.
///
/// `r² / (π · max((NdotH² · r² − 1)², ε))`. This is a Trowbridge-Reitz variant
/// without the usual `+1` reshaping; rendered output depends on this exact form.
pub fn distribution(n_dot_h: f32, roughness: f32) -> f32 {
    let r2 = roughness * roughness;
    let x = n_dot_h * n_dot_h * r2 - 1.0;
    r2 / (PI * (x * x).max(EPSILON))
}

/// Schlick-Beckmann geometry term for one direction.
pub fn schlick_beckmann(normal: &Vector3<f32>, dir: &Vector3<f32>, roughness: f32) -> f32 {
    let k = roughness / 2.0;
    let n_dot_x = normal.dot(dir).max(0.0);
    n_dot_x / (n_dot_x * (1.0 - k) + k).max(EPSILON)
}

/// Smith geometry term: shadowing towards the eye times masking towards the light.
pub fn smith(
    normal: &Vector3<f32>,
    view: &Vector3<f32>,
    light: &Vector3<f32>,
    roughness: f32,
) -> f32 {
    schlick_beckmann(normal, view, roughness) * schlick_beckmann(normal, light, roughness)
}

/// Fresnel-Schlick with the specular color as F0.
///
/// F0 is in the 0..255 domain, so the result is too.
pub fn fresnel_schlick(cos_theta: f32, f0: &Vector3<f32>) -> Vector3<f32> {
    let t = (1.0 - cos_theta).powi(5);
    f0 + (Vector3::repeat(1.0) - f0) * t
}

/// Outgoing radiance of the single white light through the Cook-Torrance BRDF.
///
/// Used as a per-channel gain on the Phong terms.
pub fn cook_torrance_shade(
    roughness: f32,
    sample: &MaterialSample,
    vectors: &LightingVectors,
) -> Vector3<f32> {
    let n = &sample.normal;
    let n_dot_h = n.dot(&vectors.halfway).max(0.0);
    let n_dot_v = vectors.view.dot(n).max(0.0);
    let n_dot_l = vectors.light.dot(n).max(0.0);
    let v_dot_h = vectors.view.dot(&vectors.halfway).max(0.0);

    let d = distribution(n_dot_h, roughness);
    let g = smith(n, &vectors.view, &vectors.light, roughness);
    let f = fresnel_schlick(v_dot_h, &sample.specular);

    let k_s = f;
    let k_d = Vector3::repeat(1.0) - k_s;
    let lambert = sample.albedo / PI;

    let numerator = k_s * (d * g);
    let denominator = (4.0 * n_dot_v * n_dot_l).max(EPSILON);
    let specular = numerator / denominator;

    let brdf = k_d.component_mul(&lambert) + specular;
    brdf.component_mul(&LIGHT_COLOR) * n_dot_l
}
