use crate::complex::Complex;
use crate::error::CoreError;

/// Squared bailout radius: an orbit has escaped once `|z|² > 4`.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Number of `z ← z² + c` steps taken before `|z|² > 4`, capped at
/// `max_iterations`.
///
/// The orbit is seeded with `z₀ = c` rather than `z₀ = 0`, so every count is
/// one step behind the textbook iteration. A return value equal to
/// `max_iterations` means the point never escaped and is treated as inside
/// the set.
///
/// Inputs must be finite.
#[inline]
pub fn escape_count(c: Complex, max_iterations: u32) -> u32 {
    let mut z = c;
    let mut n = 0;
    while n < max_iterations && z.norm_sq() <= ESCAPE_RADIUS_SQ {
        z = z.square_add(c);
        n += 1;
    }
    n
}

/// The Mandelbrot escape-time evaluator with a fixed iteration cap.
///
/// The search and the final render use different caps, so each holds its
/// own `Mandelbrot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mandelbrot {
    max_iterations: u32,
}

impl Mandelbrot {
    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self { max_iterations })
    }

    #[inline]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[inline]
    pub fn escape_count(&self, c: Complex) -> u32 {
        escape_count(c, self.max_iterations)
    }

    /// `true` when `count` is the in-set sentinel for this cap.
    #[inline]
    pub fn is_interior(&self, count: u32) -> bool {
        count >= self.max_iterations
    }
}
