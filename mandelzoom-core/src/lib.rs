pub mod complex;
pub mod error;
pub mod interest;
pub mod mandelbrot;
pub mod search;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use interest::{score_interest, InterestScore, InterestScorer, SampleStats};
pub use mandelbrot::{escape_count, Mandelbrot};
pub use search::{
    resolve_round_count, select_candidate, Candidate, NoiseParams, RoundOutcome, SearchParams,
    Selection, ZoomSearch,
};
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
