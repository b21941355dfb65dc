use thiserror::Error;

/// Errors raised while preparing a scene or emitting a frame.
///
/// The rasterization pass itself never fails: degenerate geometry and
/// out-of-range pixels are skipped silently.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to load OBJ '{path}': {source}")]
    ObjLoad {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
    #[error("failed to load texture '{path}': {source}")]
    TextureLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("texture '{path}' has no pixels")]
    EmptyTexture { path: String },
    #[error("failed to save image '{path}': {source}")]
    ImageSave {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("row stride {stride} is smaller than {width} pixels of 4 bytes")]
    InvalidStride { stride: usize, width: usize },
    #[error("face {face} references {stream} index {index}, but only {len} are available")]
    IndexOutOfRange {
        face: usize,
        stream: &'static str,
        index: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;
