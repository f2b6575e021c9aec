pub mod buffer;
pub mod error;
pub mod export;
pub mod palette;
pub mod raster;

pub use buffer::{RgbBuffer, BACKGROUND};
pub use error::RenderError;
pub use export::{export_tiff, write_tiff, ExportMetadata};
pub use palette::{shade, CosineGradient, SHADE_FACTOR};
pub use raster::{rasterize, RenderParams, RenderProgress};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
