use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use mandelzoom_core::{Mandelbrot, Viewport};

use crate::buffer::RgbBuffer;
use crate::error::RenderError;
use crate::palette::{shade, CosineGradient};

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Immutable settings of the final render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    /// Evaluator for the final image; its cap is usually above the search cap.
    evaluator: Mandelbrot,
    pub width: u32,
    pub height: u32,
    pub gradient: CosineGradient,
    /// Darken pixels whose count drops below the pixel above them.
    pub shading: bool,
}

impl RenderParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 3000;
    pub const DEFAULT_SIZE: u32 = 2000;

    pub fn new(max_iterations: u32, width: u32, height: u32) -> crate::Result<Self> {
        let evaluator = Mandelbrot::new(max_iterations)
            .map_err(|_| RenderError::InvalidMaxIterations(max_iterations))?;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            evaluator,
            width,
            height,
            gradient: CosineGradient::default(),
            shading: false,
        })
    }

    #[inline]
    pub fn max_iterations(&self) -> u32 {
        self.evaluator.max_iterations()
    }

    pub fn with_gradient(self, gradient: CosineGradient) -> Self {
        Self { gradient, ..self }
    }

    pub fn with_shading(self, shading: bool) -> Self {
        Self { shading, ..self }
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Column counter shared between the render and whoever reports progress.
#[derive(Debug, Default)]
pub struct RenderProgress {
    done: AtomicUsize,
    total: AtomicUsize,
}

impl RenderProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset progress for a new render with `total` work units.
    pub fn reset(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
    }

    /// Increment completed work units by one.
    pub fn inc(&self) {
        self.done.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current progress as `(done, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.done.load(Ordering::Relaxed),
            self.total.load(Ordering::Relaxed),
        )
    }

    /// Completed share in percent; 0 before a render starts.
    pub fn percent(&self) -> f64 {
        match self.progress() {
            (_, 0) => 0.0,
            (done, total) => done as f64 / total as f64 * 100.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Rasterization
// ---------------------------------------------------------------------------

/// Colors for one column, top to bottom. Interior points are `None`.
///
/// Shading compares each sample with the one directly above it. The first
/// row and any row below an interior point compare against the iteration
/// cap, which every escaped count is below, so those rows are always shaded.
fn render_column(viewport: &Viewport, params: &RenderParams, px: u32) -> Vec<Option<[u8; 3]>> {
    let evaluator = params.evaluator;
    let mut previous = evaluator.max_iterations();
    (0..params.height)
        .map(|py| {
            let c = viewport.pixel_to_complex(px, py, params.width, params.height);
            let count = evaluator.escape_count(c);
            let rgb = (!evaluator.is_interior(count)).then(|| {
                let rgb = params.gradient.color(count);
                if params.shading && count < previous {
                    shade(rgb)
                } else {
                    rgb
                }
            });
            previous = count;
            rgb
        })
        .collect()
}

/// Render `viewport` into a fresh RGB buffer.
///
/// Columns are independent (shading resets per column) and are computed in
/// parallel via Rayon; `progress` counts finished columns.
pub fn rasterize(viewport: &Viewport, params: &RenderParams, progress: &RenderProgress) -> RgbBuffer {
    let start = Instant::now();
    progress.reset(params.width as usize);
    debug!(
        width = params.width,
        height = params.height,
        max_iterations = params.max_iterations(),
        shading = params.shading,
        "Starting rasterization"
    );

    let columns: Vec<Vec<Option<[u8; 3]>>> = (0..params.width)
        .into_par_iter()
        .map(|px| {
            let column = render_column(viewport, params, px);
            progress.inc();
            column
        })
        .collect();

    let mut buffer = RgbBuffer::new(params.width, params.height);
    for (px, column) in columns.iter().enumerate() {
        buffer.blit_column(px as u32, column);
    }

    info!(elapsed_ms = start.elapsed().as_millis(), "Rasterization complete");
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandelzoom_core::{escape_count, Complex};

    use crate::buffer::BACKGROUND;

    fn params(max: u32, w: u32, h: u32) -> RenderParams {
        RenderParams::new(max, w, h).unwrap()
    }

    #[test]
    fn invalid_params() {
        assert!(RenderParams::new(0, 10, 10).is_err());
        assert!(RenderParams::new(100, 0, 10).is_err());
        assert!(RenderParams::new(100, 10, 0).is_err());
    }

    #[test]
    fn defaults() {
        let p = params(3000, 8, 8);
        assert!(!p.shading);
        assert_eq!(p.gradient, CosineGradient::default());
    }

    #[test]
    fn far_region_is_fully_colored() {
        let vp = Viewport::new(Complex::new(10.0, 10.0), 1.0).unwrap();
        let p = params(100, 16, 16);
        let buf = rasterize(&vp, &p, &RenderProgress::new());
        let expected = p.gradient.color(0);
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(buf.pixel(x, y), expected);
            }
        }
    }

    #[test]
    fn interior_pixels_keep_background() {
        let vp = Viewport::default();
        let p = params(200, 64, 64);
        let buf = rasterize(&vp, &p, &RenderProgress::new());
        // The center pixel maps to -0.75 + 0i, inside the set.
        assert_eq!(buf.pixel(32, 32), BACKGROUND);
        // The top-left corner maps to -2 - 1.25i, outside.
        assert_ne!(buf.pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn column_matches_direct_evaluation() {
        let vp = Viewport::default();
        let p = params(150, 20, 30);
        let column = render_column(&vp, &p, 7);
        assert_eq!(column.len(), 30);
        for (py, rgb) in column.iter().enumerate() {
            let count = escape_count(vp.pixel_to_complex(7, py as u32, 20, 30), 150);
            if count == 150 {
                assert_eq!(*rgb, None);
            } else {
                assert_eq!(*rgb, Some(p.gradient.color(count)));
            }
        }
    }

    #[test]
    fn shading_darkens_only_decreasing_counts() {
        let vp = Viewport::default();
        let plain = params(150, 20, 30);
        let shaded = plain.with_shading(true);
        for px in [0, 5, 13] {
            let a = render_column(&vp, &plain, px);
            let b = render_column(&vp, &shaded, px);
            let mut previous = 150;
            for py in 0..30u32 {
                let count = escape_count(vp.pixel_to_complex(px, py, 20, 30), 150);
                let i = py as usize;
                match a[i] {
                    None => assert_eq!(b[i], None),
                    Some(rgb) if count < previous => assert_eq!(b[i], Some(shade(rgb))),
                    Some(rgb) => assert_eq!(b[i], Some(rgb)),
                }
                previous = count;
            }
        }
    }

    #[test]
    fn first_row_is_always_shaded() {
        let vp = Viewport::new(Complex::new(10.0, 10.0), 1.0).unwrap();
        let p = params(100, 4, 4).with_shading(true);
        let buf = rasterize(&vp, &p, &RenderProgress::new());
        // Every count is 0: the first row compares against the cap, later
        // rows against an equal count.
        let plain = p.gradient.color(0);
        for x in 0..4 {
            assert_eq!(buf.pixel(x, 0), shade(plain));
            for y in 1..4 {
                assert_eq!(buf.pixel(x, y), plain);
            }
        }
    }

    #[test]
    fn pixel_below_interior_is_shaded() {
        // Column 2 runs down re = 0 through im = -2, -1.5, ..., 1.5.
        let vp = Viewport::new(Complex::ZERO, 2.0).unwrap();
        let p = params(50, 4, 8).with_shading(true);
        let counts: Vec<u32> = (0..8)
            .map(|py| escape_count(vp.pixel_to_complex(2, py, 4, 8), 50))
            .collect();
        assert_eq!(counts, [1, 1, 50, 50, 50, 50, 50, 1]);

        let column = render_column(&vp, &p, 2);
        let plain = p.gradient.color(1);
        assert_eq!(column[0], Some(shade(plain)));
        assert_eq!(column[1], Some(plain));
        assert!(column[2..7].iter().all(Option::is_none));
        // Row 7 follows the interior run, so it compares against the cap.
        assert_eq!(column[7], Some(shade(plain)));
    }

    #[test]
    fn progress_counts_columns() {
        let progress = RenderProgress::new();
        assert_eq!(progress.percent(), 0.0);
        let vp = Viewport::default();
        rasterize(&vp, &params(50, 24, 8), &progress);
        assert_eq!(progress.progress(), (24, 24));
        assert!((progress.percent() - 100.0).abs() < 1e-9);
    }
}
