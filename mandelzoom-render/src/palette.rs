//! Periodic cosine coloring.
//!
//! The escape count is scaled to a phase `t = count * frequency + shift` and
//! each channel follows its own cosine wave, offset by one radian per channel.
//! Red and green swing over `[100, 200]`, blue over `[129, 255]`, so escaped
//! points are never black and stay distinct from the background.

/// Factor applied to every channel of a shaded pixel.
pub const SHADE_FACTOR: f64 = 0.6;

/// Maps escape counts to colors with three phase-shifted cosine waves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosineGradient {
    /// Phase advance per iteration.
    pub frequency: f64,
    /// Constant phase offset.
    pub shift: f64,
}

impl CosineGradient {
    pub const DEFAULT_FREQUENCY: f64 = 0.01;
    pub const DEFAULT_SHIFT: f64 = 0.0;

    pub fn new(frequency: f64, shift: f64) -> Self {
        Self { frequency, shift }
    }

    /// Color for a point that escaped after `iterations` steps.
    #[inline]
    pub fn color(&self, iterations: u32) -> [u8; 3] {
        let t = iterations as f64 * self.frequency + self.shift;
        [
            ((t + 2.0).cos() * 50.0 + 150.0) as u8,
            ((t + 1.0).cos() * 50.0 + 150.0) as u8,
            (t.cos() * 63.0 + 192.0) as u8,
        ]
    }
}

impl Default for CosineGradient {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FREQUENCY, Self::DEFAULT_SHIFT)
    }
}

/// Darken a color by [`SHADE_FACTOR`], truncating each channel.
#[inline]
pub fn shade(rgb: [u8; 3]) -> [u8; 3] {
    rgb.map(|c| (c as f64 * SHADE_FACTOR) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_phase_color() {
        // t = 0: cos 2 ≈ -0.416, cos 1 ≈ 0.540, cos 0 = 1.
        let rgb = CosineGradient::new(0.01, 0.0).color(0);
        assert_eq!(rgb, [129, 177, 255]);
    }

    #[test]
    fn shift_moves_phase() {
        let base = CosineGradient::new(0.01, 0.0);
        let shifted = CosineGradient::new(0.01, 1.0);
        // count 100 at frequency 0.01 is one radian, same as a shift of 1.
        assert_eq!(base.color(100), shifted.color(0));
    }

    #[test]
    fn channels_stay_in_range() {
        let g = CosineGradient::default();
        for n in (0..5000).step_by(7) {
            let [r, gch, b] = g.color(n);
            assert!((100..=200).contains(&r));
            assert!((100..=200).contains(&gch));
            assert!(b >= 129);
        }
    }

    #[test]
    fn color_is_periodic() {
        let g = CosineGradient::new(std::f64::consts::PI / 50.0, 0.3);
        // Period of 100 iterations; allow one step of rounding at truncation.
        let a = g.color(13);
        let b = g.color(113);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((*x as i32 - *y as i32).abs() <= 1);
        }
    }

    #[test]
    fn shade_truncates() {
        assert_eq!(shade([200, 150, 255]), [120, 90, 153]);
        assert_eq!(shade([1, 0, 2]), [0, 0, 1]);
    }
}
