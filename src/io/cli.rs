use crate::error::Result;
use crate::io::config::Config;
use crate::pipeline::shaders::ShadingMode;
use clap::Parser;
use log::info;

/// Renders one frame of a TOML-described scene to a PNG.
#[derive(Parser, Debug)]
#[command(name = "phong-pbr-rasterizer")]
#[command(about = "CPU rasterizer with Phong x Cook-Torrance shading")]
pub struct Cli {
    /// Scene configuration (TOML). Built-in defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Output PNG, overrides `render.output`.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Lighting model, overrides `render.shading`.
    #[arg(long, value_enum)]
    pub shading: Option<ShadingMode>,

    #[arg(long)]
    pub width: Option<usize>,

    #[arg(long)]
    pub height: Option<usize>,
}

impl Cli {
    /// Loads the config file (or defaults) and applies command line overrides.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading config: {path}");
                Config::load(path)?
            }
            None => {
                info!("No config given, using defaults");
                Config::default()
            }
        };

        if let Some(output) = &self.output {
            config.render.output = output.clone();
        }
        if let Some(shading) = self.shading {
            config.render.shading = shading;
        }
        if let Some(width) = self.width {
            config.render.width = width;
        }
        if let Some(height) = self.height {
            config.render.height = height;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let cli = Cli::parse_from([
            "phong-pbr-rasterizer",
            "--output",
            "frame.png",
            "--shading",
            "phong",
            "--width",
            "64",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.render.output, "frame.png");
        assert_eq!(config.render.shading, ShadingMode::Phong);
        assert_eq!(config.render.width, 64);
        assert_eq!(config.render.height, 600);
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let cli = Cli::parse_from(["phong-pbr-rasterizer"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.render.shading, ShadingMode::PhongPbr);
        assert_eq!(config.render.output, "output.png");
    }

    #[test]
    fn test_unknown_shading_is_rejected() {
        assert!(Cli::try_parse_from(["phong-pbr-rasterizer", "--shading", "toon"]).is_err());
    }
}
