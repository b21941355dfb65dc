use crate::error::Result;
use crate::io::cli::Cli;
use crate::io::image::PngSink;
use crate::pipeline::renderer::Renderer;
use crate::scene::loader::build_scene;
use log::info;
use std::time::Instant;

/// Loads the scene described by `cli`, renders one frame and saves it.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;

    let load_start = Instant::now();
    let scene = build_scene(&config)?;
    info!(
        "Scene ready in {:.2?} ({}x{}, {} triangles)",
        load_start.elapsed(),
        scene.width,
        scene.height,
        scene.model.triangle_count()
    );

    info!("Rendering with {:?} shading...", config.render.shading);
    let render_start = Instant::now();
    let mut sink = PngSink::new(&config.render.output);
    let stats = Renderer::new().render_scene(&scene, config.render.shading, &mut sink)?;
    info!(
        "Frame done in {:.2?}: {} pixels shaded, {} of {} triangles culled",
        render_start.elapsed(),
        stats.fragments_shaded,
        stats.culled,
        stats.triangles
    );

    Ok(())
}
