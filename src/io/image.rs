use crate::core::color::BYTES_PER_PIXEL;
use crate::core::framebuffer::FrameBuffer;
use crate::error::{RenderError, Result};
use crate::pipeline::renderer::FrameSink;
use image::RgbaImage;
use log::info;
use rayon::prelude::*;
use std::path::PathBuf;

/// Converts the BGRA framebuffer into a tightly packed RGBA image.
pub fn to_rgba_image(frame: &FrameBuffer) -> RgbaImage {
    let row_bytes = frame.width * BYTES_PER_PIXEL;
    let mut rgba = vec![0u8; row_bytes * frame.height];

    if row_bytes > 0 {
        rgba.par_chunks_mut(row_bytes)
            .zip(frame.as_bytes().par_chunks(frame.stride))
            .for_each(|(dst, src)| {
                for (d, s) in dst
                    .chunks_exact_mut(BYTES_PER_PIXEL)
                    .zip(src[..row_bytes].chunks_exact(BYTES_PER_PIXEL))
                {
                    d.copy_from_slice(&[s[2], s[1], s[0], s[3]]);
                }
            });
    }

    // length always matches, so this never falls back
    RgbaImage::from_raw(frame.width as u32, frame.height as u32, rgba).unwrap_or_default()
}

/// Writes each committed frame to a PNG file.
#[derive(Debug, Clone)]
pub struct PngSink {
    pub path: PathBuf,
}

impl PngSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl FrameSink for PngSink {
    fn commit(&mut self, frame: FrameBuffer) -> Result<()> {
        to_rgba_image(&frame)
            .save(&self.path)
            .map_err(|source| RenderError::ImageSave {
                path: self.path.display().to_string(),
                source,
            })?;
        info!("Render saved to {}", self.path.display());
        Ok(())
    }
}
