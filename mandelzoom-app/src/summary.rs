use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use mandelzoom_core::{Complex, Viewport};

/// Everything needed to reproduce a run.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) seed: u64,
    pub(crate) rounds: u32,
    pub(crate) center: Complex,
    pub(crate) radius: f64,
    /// Magnification relative to the default view.
    pub(crate) zoom: f64,
    pub(crate) search_iterations: u32,
    pub(crate) render_iterations: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) output: PathBuf,
}

impl RunSummary {
    pub(crate) fn zoom_of(viewport: &Viewport) -> f64 {
        viewport.zoom_relative_to(Viewport::DEFAULT_RADIUS)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Random seed [-S]: {}", self.seed)?;
        writeln!(
            f,
            "Radius: {:e} ({} zoom rounds [-d], {:.3e}x)",
            self.radius, self.rounds, self.zoom
        )?;
        writeln!(f, "Center: ({}, {}) [-x, -y]", self.center.re, self.center.im)?;
        writeln!(f, "Search iterations [-m]: {}", self.search_iterations)?;
        writeln!(f, "Image iterations [-i]: {}", self.render_iterations)?;
        write!(
            f,
            "Wrote {}x{} image to {}",
            self.width,
            self.height,
            self.output.display()
        )
    }
}
