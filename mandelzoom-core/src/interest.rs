//! Region interest scoring.
//!
//! A region is "interesting" when its escape counts are spread out: most
//! samples in a region sit close to the minimum count, so a large gap
//! between the average and the minimum means the region contains fine
//! structure near the set boundary. Regions fully inside the set score 0.

use serde::Serialize;

use crate::complex::Complex;
use crate::error::CoreError;
use crate::mandelbrot::Mandelbrot;

/// Dispersion score of a sampled region: `average - minimum` escape count,
/// truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct InterestScore(pub u32);

impl InterestScore {
    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    /// The score reduced modulo `modulus`. Used by the search to inject
    /// per-candidate noise. `modulus` must be non-zero.
    #[inline]
    pub fn reduced(self, modulus: u32) -> Self {
        Self(self.0 % modulus)
    }
}

/// Running statistics over the escape counts of a sample grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleStats {
    pub min: u32,
    pub sum: u64,
    pub count: u64,
}

impl SampleStats {
    fn new(max_iterations: u32) -> Self {
        Self {
            min: max_iterations,
            sum: 0,
            count: 0,
        }
    }

    #[inline]
    fn push(&mut self, iterations: u32) {
        self.min = self.min.min(iterations);
        self.sum += iterations as u64;
        self.count += 1;
    }

    /// Mean escape count, or `None` for an empty grid.
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum as f64 / self.count as f64)
    }

    /// `trunc(average - min)`, or `None` for an empty grid.
    pub fn score(&self) -> Option<InterestScore> {
        let spread = self.average()? - self.min as f64;
        Some(InterestScore(spread as u32))
    }
}

/// Samples a uniform grid over a square region and scores its dispersion.
#[derive(Debug, Clone, Copy)]
pub struct InterestScorer {
    evaluator: Mandelbrot,
    divisions: u32,
}

impl InterestScorer {
    /// Grid steps per radius along each axis: `2 * 10 = 20` samples per
    /// axis, 400 per region.
    pub const DEFAULT_DIVISIONS: u32 = 10;

    pub fn new(evaluator: Mandelbrot) -> Self {
        Self {
            evaluator,
            divisions: Self::DEFAULT_DIVISIONS,
        }
    }

    /// Use `divisions` grid steps per radius instead of the default.
    pub fn with_divisions(self, divisions: u32) -> crate::Result<Self> {
        if divisions == 0 {
            return Err(CoreError::InvalidSearchParams {
                reason: "sample grid needs at least one division per radius".into(),
            });
        }
        Ok(Self { divisions, ..self })
    }

    /// Evaluate every grid point of
    /// `[center.re - radius, center.re + radius) × [center.im - radius, center.im + radius)`.
    ///
    /// Coordinates are accumulated (`x += step`) rather than computed from
    /// an index, so the exact sample count depends on rounding at the far
    /// edge. Fails when the region yields no samples or the step is too
    /// small to move the accumulator.
    pub fn sample(&self, center: Complex, radius: f64) -> crate::Result<SampleStats> {
        if radius <= 0.0 || !radius.is_finite() {
            return Err(CoreError::DegenerateSampleGrid { radius });
        }
        let step = radius / self.divisions as f64;
        let x_end = center.re + radius;
        let y_end = center.im + radius;
        let mut stats = SampleStats::new(self.evaluator.max_iterations());

        let mut x = center.re - radius;
        while x < x_end {
            let mut y = center.im - radius;
            while y < y_end {
                stats.push(self.evaluator.escape_count(Complex::new(x, y)));
                y = advance(y, step, radius)?;
            }
            x = advance(x, step, radius)?;
        }

        if stats.count == 0 {
            return Err(CoreError::DegenerateSampleGrid { radius });
        }
        Ok(stats)
    }

    /// Interest score of the square region around `center`.
    pub fn score(&self, center: Complex, radius: f64) -> crate::Result<InterestScore> {
        self.sample(center, radius)?
            .score()
            .ok_or(CoreError::DegenerateSampleGrid { radius })
    }
}

#[inline]
fn advance(value: f64, step: f64, radius: f64) -> crate::Result<f64> {
    let next = value + step;
    if next > value {
        Ok(next)
    } else {
        Err(CoreError::DegenerateSampleGrid { radius })
    }
}

/// Score a region with the default grid resolution.
pub fn score_interest(
    center: Complex,
    radius: f64,
    max_iterations: u32,
) -> crate::Result<InterestScore> {
    InterestScorer::new(Mandelbrot::new(max_iterations)?).score(center, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer(max: u32) -> InterestScorer {
        InterestScorer::new(Mandelbrot::new(max).unwrap())
    }

    #[test]
    fn default_grid_is_twenty_by_twenty() {
        // Steps of 0.25 are exact in binary, so no edge sample is gained or lost.
        let stats = scorer(100).sample(Complex::ZERO, 2.5).unwrap();
        assert_eq!(stats.count, 400);
    }

    #[test]
    fn interior_region_scores_zero() {
        // Every sample lies inside the main cardioid.
        let stats = scorer(500).sample(Complex::new(-0.1, 0.0), 0.05).unwrap();
        assert_eq!(stats.min, 500);
        assert_eq!(stats.sum, 500 * stats.count);
        assert_eq!(stats.score(), Some(InterestScore(0)));
    }

    #[test]
    fn far_region_scores_zero() {
        // Every sample escapes before the first step.
        let score = score_interest(Complex::new(10.0, 10.0), 1.0, 500).unwrap();
        assert_eq!(score, InterestScore(0));
    }

    #[test]
    fn boundary_region_scores_positive() {
        let score = score_interest(Complex::new(-0.75, 0.0), 1.25, 2000).unwrap();
        assert!(score.value() > 0, "the full set should be interesting, got {score:?}");
    }

    #[test]
    fn score_is_deterministic() {
        let s = scorer(1000);
        let center = Complex::new(-0.7453, 0.1127);
        let a = s.score(center, 0.01).unwrap();
        let b = s.score(center, 0.01).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn score_truncates_toward_zero() {
        let stats = SampleStats {
            min: 3,
            sum: 19,
            count: 4,
        };
        // average 4.75 - 3 = 1.75 → 1
        assert_eq!(stats.score(), Some(InterestScore(1)));
    }

    #[test]
    fn empty_stats_have_no_score() {
        let stats = SampleStats::new(10);
        assert_eq!(stats.average(), None);
        assert_eq!(stats.score(), None);
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let s = scorer(100);
        assert!(matches!(
            s.score(Complex::ZERO, 0.0),
            Err(CoreError::DegenerateSampleGrid { .. })
        ));
        assert!(s.score(Complex::ZERO, -1.0).is_err());
    }

    #[test]
    fn radius_below_f64_resolution_is_rejected() {
        // The step is far below one ulp of the center, so `x += step` stalls.
        let result = scorer(100).score(Complex::new(1.0, 1.0), 1e-300);
        assert!(matches!(result, Err(CoreError::DegenerateSampleGrid { .. })));
    }

    #[test]
    fn custom_divisions() {
        let s = scorer(100).with_divisions(2).unwrap();
        let stats = s.sample(Complex::ZERO, 1.0).unwrap();
        assert_eq!(stats.count, 16);
        assert!(scorer(100).with_divisions(0).is_err());
    }

    #[test]
    fn reduced_applies_modulus() {
        assert_eq!(InterestScore(47).reduced(10), InterestScore(7));
        assert_eq!(InterestScore(5).reduced(29), InterestScore(5));
    }
}
