use crate::error::{RenderError, Result};
use image::RgbImage;
use log::info;
use nalgebra::Vector3;
use std::path::Path;

/// Maps a texture coordinate to the nearest texel.
///
/// `v` is flipped because images are stored top row first while UV grows
/// upwards. Coordinates are truncated, then clamped so `u == 1` or `v == 0`
/// still land on the last column or row.
#[inline]
pub fn nearest_texel(u: f32, v: f32, width: u32, height: u32) -> (u32, u32) {
    let x = (u * width as f32) as u32;
    let y = ((1.0 - v) * height as f32) as u32;
    (
        x.min(width.saturating_sub(1)),
        y.min(height.saturating_sub(1)),
    )
}

/// A decoded RGB image sampled with nearest-neighbor lookup.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .map_err(|source| RenderError::TextureLoad {
                path: path_ref.display().to_string(),
                source,
            })?
            .to_rgb8();
        let img = require_pixels(img, path_ref)?;

        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref,
            img.width(),
            img.height()
        );
        Ok(Self::from_image(img))
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// Texel at integer coordinates, channels in 0..255. Black outside the image.
    pub fn texel(&self, x: u32, y: u32) -> Vector3<f32> {
        self.image
            .get_pixel_checked(x, y)
            .map_or_else(Vector3::zeros, |p| {
                Vector3::new(p[0] as f32, p[1] as f32, p[2] as f32)
            })
    }

    /// Nearest-neighbor sample, channels in 0..255.
    pub fn sample(&self, u: f32, v: f32) -> Vector3<f32> {
        let (x, y) = nearest_texel(u, v, self.width, self.height);
        self.texel(x, y)
    }
}

fn require_pixels(image: RgbImage, path: &Path) -> Result<RgbImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(RenderError::EmptyTexture {
            path: path.display().to_string(),
        });
    }
    Ok(image)
}

/// Normal map decoded once into unit vectors, one per texel.
#[derive(Debug, Clone)]
pub struct NormalMap {
    pub width: u32,
    pub height: u32,
    normals: Vec<Vector3<f32>>,
}

impl NormalMap {
    /// Decodes each texel from [0, 255] to [-1, 1] and normalizes it.
    /// Texels that decode to a zero vector fall back to +Z.
    pub fn from_texture(texture: &Texture) -> Self {
        let normals = texture
            .image
            .pixels()
            .map(|p| {
                let n = Vector3::new(p[0] as f32, p[1] as f32, p[2] as f32) / 127.5
                    - Vector3::new(1.0, 1.0, 1.0);
                n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::z)
            })
            .collect();

        Self {
            width: texture.width,
            height: texture.height,
            normals,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Texture::load(path).map(|t| Self::from_texture(&t))
    }

    pub fn sample(&self, u: f32, v: f32) -> Vector3<f32> {
        let (x, y) = nearest_texel(u, v, self.width, self.height);
        self.normals
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or_else(Vector3::z)
    }
}
