use std::path::PathBuf;

use clap::Parser;

use mandelzoom_core::{SearchParams, Viewport};
use mandelzoom_render::{CosineGradient, RenderParams};

/// Find an interesting spot on the Mandelbrot set and render it as a TIFF.
///
/// Every run prints the seed and final view; pass `--seed` and `--depth` (or
/// the final center with `--depth 0`) to reproduce an image.
#[derive(Parser, Debug)]
#[command(name = "mandelzoom", version)]
pub(crate) struct Cli {
    /// Iteration cap for the final image.
    #[arg(short = 'i', long = "iterations", default_value_t = RenderParams::DEFAULT_MAX_ITERATIONS)]
    pub(crate) render_iterations: u32,

    /// Iteration cap for the interest search.
    #[arg(short = 'm', long = "search-iterations", default_value_t = SearchParams::DEFAULT_MAX_ITERATIONS)]
    pub(crate) search_iterations: u32,

    /// Number of zoom rounds (random in 10..=34 when omitted).
    #[arg(short = 'd', long)]
    pub(crate) depth: Option<u32>,

    /// Random seed (derived from the clock when omitted).
    #[arg(short = 'S', long)]
    pub(crate) seed: Option<u64>,

    /// Real part of the starting center.
    #[arg(short = 'x', long = "center-re", default_value_t = Viewport::DEFAULT_CENTER.re, allow_negative_numbers = true)]
    pub(crate) center_re: f64,

    /// Imaginary part of the starting center.
    #[arg(short = 'y', long = "center-im", default_value_t = Viewport::DEFAULT_CENTER.im, allow_negative_numbers = true)]
    pub(crate) center_im: f64,

    /// Starting radius (half-width of the view).
    #[arg(short = 'f', long, default_value_t = Viewport::DEFAULT_RADIUS)]
    pub(crate) radius: f64,

    /// Color gradient frequency (phase per iteration).
    #[arg(short = 'g', long, default_value_t = CosineGradient::DEFAULT_FREQUENCY, allow_negative_numbers = true)]
    pub(crate) gradient: f64,

    /// Color gradient phase shift.
    #[arg(short = 'c', long, default_value_t = CosineGradient::DEFAULT_SHIFT, allow_negative_numbers = true)]
    pub(crate) color_shift: f64,

    /// Darken pixels whose iteration count drops below the pixel above.
    #[arg(short = 's', long)]
    pub(crate) shading: bool,

    /// Output name; `.tiff` is appended when it has no extension.
    #[arg(short = 'n', long, default_value = "Mandelbrot")]
    pub(crate) name: String,

    /// Image width in pixels.
    #[arg(long, default_value_t = RenderParams::DEFAULT_SIZE)]
    pub(crate) width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = RenderParams::DEFAULT_SIZE)]
    pub(crate) height: u32,

    /// Also write the run summary as JSON to this path.
    #[arg(long)]
    pub(crate) summary_json: Option<PathBuf>,
}

impl Cli {
    /// Path of the TIFF to write.
    pub(crate) fn output_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.name);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension("tiff")
        }
    }

    pub(crate) fn render_params(&self) -> mandelzoom_render::Result<RenderParams> {
        Ok(RenderParams::new(self.render_iterations, self.width, self.height)?
            .with_gradient(CosineGradient::new(self.gradient, self.color_shift))
            .with_shading(self.shading))
    }
}
