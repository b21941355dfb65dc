use crate::core::framebuffer::{DepthBuffer, FrameBuffer};
use crate::core::pipeline::Shader;
use crate::core::rasterizer::{RasterStats, Rasterizer};
use crate::error::Result;
use crate::pipeline::shaders::ShadingMode;
use crate::pipeline::shaders::combined::PhongPbrShader;
use crate::pipeline::shaders::phong::PhongShader;
use crate::scene::context::SceneContext;
use log::debug;

/// Destination of finished frames.
///
/// The renderer asks the sink for a buffer to draw into and hands it back once
/// every triangle has been rasterized.
pub trait FrameSink {
    fn acquire(&mut self, width: usize, height: usize) -> FrameBuffer {
        FrameBuffer::new(width, height)
    }

    fn commit(&mut self, frame: FrameBuffer) -> Result<()>;
}

/// Keeps the most recent frame in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frame: Option<FrameBuffer>,
}

impl FrameSink for MemorySink {
    fn commit(&mut self, frame: FrameBuffer) -> Result<()> {
        self.frame = Some(frame);
        Ok(())
    }
}

/// The high-level renderer that orchestrates the pipeline stages.
#[derive(Debug, Default, Clone)]
pub struct Renderer {
    pub rasterizer: Rasterizer,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws one frame of `scene` with `shader` into a buffer from `sink`.
    ///
    /// Depth starts over every frame; the color buffer is used as acquired.
    pub fn render<S, K>(&self, scene: &SceneContext, shader: &S, sink: &mut K) -> Result<RasterStats>
    where
        S: Shader + ?Sized,
        K: FrameSink + ?Sized,
    {
        let mut frame = sink.acquire(scene.width, scene.height);
        let mut depth = DepthBuffer::new(frame.width, frame.height);

        let stats =
            self.rasterizer
                .draw_triangles(scene.model.triangles(), shader, &mut frame, &mut depth);
        debug!("{stats:?}");

        sink.commit(frame)?;
        Ok(stats)
    }

    /// Picks the shader for `mode` and renders one frame.
    pub fn render_scene<K>(
        &self,
        scene: &SceneContext,
        mode: ShadingMode,
        sink: &mut K,
    ) -> Result<RasterStats>
    where
        K: FrameSink + ?Sized,
    {
        match mode {
            ShadingMode::PhongPbr => self.render(scene, &PhongPbrShader::new(scene), sink),
            ShadingMode::Phong => self.render(scene, &PhongShader::new(scene), sink),
        }
    }
}
