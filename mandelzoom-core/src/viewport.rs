use serde::Serialize;

use crate::complex::Complex;
use crate::error::CoreError;

/// The square region of the complex plane under consideration.
///
/// `radius` is the half-width on both axes, so the region spans
/// `[center.re - radius, center.re + radius] × [center.im - radius, center.im + radius]`.
/// Viewports are plain values: the zoom search replaces the whole viewport
/// each round instead of mutating it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    center: Complex,
    radius: f64,
}

impl Viewport {
    /// Multiplicative radius change applied after every zoom round.
    pub const ZOOM_FACTOR: f64 = 0.5;

    pub const DEFAULT_CENTER: Complex = Complex { re: -0.75, im: 0.0 };
    pub const DEFAULT_RADIUS: f64 = 1.25;

    /// Create a viewport, rejecting non-finite centers and radii that are
    /// not strictly positive.
    pub fn new(center: Complex, radius: f64) -> crate::Result<Self> {
        if !center.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("center must be finite, got {center}"),
            });
        }
        if radius <= 0.0 || !radius.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("radius must be positive and finite, got {radius}"),
            });
        }
        Ok(Self { center, radius })
    }

    #[inline]
    pub fn center(&self) -> Complex {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The viewport for the next round: recentred on `center` with the
    /// radius scaled by [`ZOOM_FACTOR`](Self::ZOOM_FACTOR).
    #[inline]
    pub fn zoomed_to(&self, center: Complex) -> Self {
        Self {
            center,
            radius: self.radius * Self::ZOOM_FACTOR,
        }
    }

    /// Magnification relative to a viewport of radius `reference`.
    pub fn zoom_relative_to(&self, reference: f64) -> f64 {
        reference / self.radius
    }

    /// Map a pixel of a `width × height` raster onto the viewport.
    ///
    /// `(0, 0)` is the top-left pixel and maps to
    /// `(center.re - radius, center.im - radius)`; the imaginary part grows
    /// with the row index. Each axis is normalised by its own half-dimension,
    /// so non-square rasters stretch the square viewport.
    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32, width: u32, height: u32) -> Complex {
        let half_w = width as f64 / 2.0;
        let half_h = height as f64 / 2.0;
        Complex::new(
            (px as f64 - half_w) / half_w * self.radius + self.center.re,
            (py as f64 - half_h) / half_h * self.radius + self.center.im,
        )
    }
}

impl Default for Viewport {
    /// The starting view: the whole set, centred on `-0.75 + 0i`.
    fn default() -> Self {
        Self {
            center: Self::DEFAULT_CENTER,
            radius: Self::DEFAULT_RADIUS,
        }
    }
}
