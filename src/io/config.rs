use crate::error::{RenderError, Result};
use crate::pipeline::shaders::ShadingMode;
use crate::scene::material::Material;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scene description read from TOML. Every field has a default, so an empty
/// file is a valid config.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub material: MaterialConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub shading: ShadingMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            shading: ShadingMode::default(),
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_output() -> String {
    "output.png".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_eye")]
    pub eye: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: default_eye(),
            target: [0.0, 0.0, 0.0],
            up: default_up(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_eye() -> [f32; 3] {
    [0.0, 0.5, 3.0]
}
fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_position")]
    pub position: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: default_light_position(),
        }
    }
}

fn default_light_position() -> [f32; 3] {
    [2.0, 2.0, 3.0]
}

#[derive(Debug, Deserialize)]
pub struct MaterialConfig {
    #[serde(default = "default_ambient")]
    pub ambient: f32,
    #[serde(default = "default_diffuse")]
    pub diffuse: f32,
    #[serde(default = "default_specular")]
    pub specular: f32,
    #[serde(default = "default_gloss")]
    pub gloss: f32,
    #[serde(default = "default_roughness")]
    pub roughness: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            ambient: default_ambient(),
            diffuse: default_diffuse(),
            specular: default_specular(),
            gloss: default_gloss(),
            roughness: default_roughness(),
        }
    }
}

fn default_ambient() -> f32 {
    1.0
}
fn default_diffuse() -> f32 {
    1.0
}
fn default_specular() -> f32 {
    0.2
}
fn default_gloss() -> f32 {
    5.0
}
fn default_roughness() -> f32 {
    0.1
}

impl From<&MaterialConfig> for Material {
    fn from(cfg: &MaterialConfig) -> Self {
        Self {
            ambient: cfg.ambient,
            diffuse: cfg.diffuse,
            specular: cfg.specular,
            gloss: cfg.gloss,
            roughness: cfg.roughness,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Wavefront OBJ. A built-in quad is rendered when it cannot be loaded.
    #[serde(default)]
    pub path: Option<String>,
    pub albedo_texture: Option<String>,
    pub specular_texture: Option<String>,
    pub normal_texture: Option<String>,
    /// Center the model and scale it to fit the unit cube.
    #[serde(default = "default_true")]
    pub normalize: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            albedo_texture: None,
            specular_texture: None,
            normal_texture: None,
            normalize: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RenderError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
