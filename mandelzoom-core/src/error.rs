use thiserror::Error;

/// Errors originating from the core search engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("invalid search parameters: {reason}")]
    InvalidSearchParams { reason: String },

    /// The sampling grid for a region produced no usable samples, either
    /// because the radius is not positive or because it is too small for
    /// `f64` steps to advance across the region.
    #[error("degenerate sample grid for radius {radius:e}")]
    DegenerateSampleGrid { radius: f64 },
}
