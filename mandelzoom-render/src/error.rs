use thiserror::Error;

/// Errors originating from the rendering and export pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid image dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("buffer of {actual} bytes does not match a {width}×{height} RGB image")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF encoding failed: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error(transparent)]
    Core(#[from] mandelzoom_core::CoreError),
}
