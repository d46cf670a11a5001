/// Error types for shape construction, scene configuration and drawing
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while building shapes, worlds or scenes
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("outline height must be a positive integer, got {0}")]
    OutlineHeight(f64),

    #[error("object {index} is not a shape (kind `{kind}`)")]
    NotAShape { index: usize, kind: String },

    #[error("invalid window size {width}x{height}")]
    WindowSize { width: u32, height: u32 },

    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Recoverable call-site errors on an existing shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("invalid rotation selector `{0}`, expected one of x, y, z")]
    InvalidAxis(String),
}

/// Failure while drawing a single shape; contained to that shape's frame
#[derive(Error, Debug)]
pub enum DrawError {
    #[error("failed to load image {path}: {reason}")]
    Image { path: PathBuf, reason: String },

    #[error("topology index {index} out of range for {len} projected vertices")]
    Topology { index: usize, len: usize },

    #[error("surface I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
