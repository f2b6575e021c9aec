//! Interest-guided zoom search.
//!
//! Each round jitters the current center, lays an 8×8 lattice of candidate
//! sub-regions around the jittered reference point, scores every candidate,
//! reduces each score modulo a freshly drawn divisor, and recentres on the
//! best noisy candidate while halving the radius. The modulus noise lets
//! regions with moderate variety win now and then, so different seeds reach
//! visibly different places instead of the same high-variance spots.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::complex::Complex;
use crate::error::CoreError;
use crate::interest::{InterestScore, InterestScorer};
use crate::mandelbrot::Mandelbrot;
use crate::viewport::Viewport;

/// Candidates per axis; offsets run over `{-1, -0.75, …, 0.75}`.
pub const CANDIDATES_PER_AXIS: usize = 8;

/// Lattice spacing of candidate offsets, in units of the current radius.
pub const CANDIDATE_SPACING: f64 = 0.25;

/// A candidate is scored over `radius / CANDIDATE_RADIUS_DIVISOR`.
pub const CANDIDATE_RADIUS_DIVISOR: f64 = 8.0;

/// Unrequested round counts are drawn from `[MIN_RANDOM_ROUNDS, MIN_RANDOM_ROUNDS + RANDOM_ROUND_SPAN)`.
pub const MIN_RANDOM_ROUNDS: u32 = 10;
pub const RANDOM_ROUND_SPAN: u32 = 25;

/// Constants of the randomised parts of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Smallest modulus applied to a candidate score.
    pub modulus_base: u32,
    /// The modulus is `modulus_base + draw`, `draw ∈ [0, modulus_span)`.
    pub modulus_span: u32,
    /// Resolution of the center jitter. The offset on each axis is
    /// `(k - jitter_steps / 2) / jitter_steps * radius`, `k ∈ [0, jitter_steps)`.
    pub jitter_steps: u32,
}

impl NoiseParams {
    pub const DEFAULT_MODULUS_BASE: u32 = 10;
    pub const DEFAULT_MODULUS_SPAN: u32 = 20;
    pub const DEFAULT_JITTER_STEPS: u32 = 2000;

    pub fn new(modulus_base: u32, modulus_span: u32, jitter_steps: u32) -> crate::Result<Self> {
        let noise = Self {
            modulus_base,
            modulus_span,
            jitter_steps,
        };
        noise.validate()?;
        Ok(noise)
    }

    /// Check that every modulus is non-zero and the ranges are drawable.
    pub fn validate(&self) -> crate::Result<()> {
        let Self {
            modulus_base,
            modulus_span,
            jitter_steps,
        } = *self;
        if modulus_base == 0 {
            return Err(CoreError::InvalidSearchParams {
                reason: "modulus base must be >= 1".into(),
            });
        }
        if modulus_span == 0 || modulus_base.checked_add(modulus_span).is_none() {
            return Err(CoreError::InvalidSearchParams {
                reason: format!("modulus span must be in 1..={}", u32::MAX - modulus_base),
            });
        }
        if jitter_steps == 0 {
            return Err(CoreError::InvalidSearchParams {
                reason: "jitter steps must be >= 1".into(),
            });
        }
        Ok(())
    }

    /// Offset along one axis for jitter draw `k`.
    #[inline]
    fn jitter_offset(&self, k: u32, radius: f64) -> f64 {
        let centred = k as i64 - (self.jitter_steps / 2) as i64;
        centred as f64 / self.jitter_steps as f64 * radius
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            modulus_base: Self::DEFAULT_MODULUS_BASE,
            modulus_span: Self::DEFAULT_MODULUS_SPAN,
            jitter_steps: Self::DEFAULT_JITTER_STEPS,
        }
    }
}

/// Immutable per-run configuration of the zoom search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Iteration cap used while scoring candidates.
    pub max_iterations: u32,
    /// Number of zoom rounds.
    pub rounds: u32,
    /// Interest grid steps per radius.
    pub sample_divisions: u32,
    pub noise: NoiseParams,
}

impl SearchParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 2000;

    pub fn new(max_iterations: u32, rounds: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self {
            max_iterations,
            rounds,
            sample_divisions: InterestScorer::DEFAULT_DIVISIONS,
            noise: NoiseParams::default(),
        })
    }

    /// Return a copy with different noise constants.
    pub fn with_noise(self, noise: NoiseParams) -> Self {
        Self { noise, ..self }
    }

    /// Return a copy with a different interest grid resolution.
    pub fn with_sample_divisions(self, sample_divisions: u32) -> Self {
        Self {
            sample_divisions,
            ..self
        }
    }

    fn scorer(&self) -> crate::Result<InterestScorer> {
        InterestScorer::new(Mandelbrot::new(self.max_iterations)?)
            .with_divisions(self.sample_divisions)
    }
}

/// Resolve the number of zoom rounds.
///
/// Always consumes exactly one draw from `rng`, so the rest of the random
/// sequence is the same whether or not a count was requested. Without a
/// request the count falls in `[10, 34]`.
pub fn resolve_round_count<R: Rng>(rng: &mut R, requested: Option<u32>) -> u32 {
    let draw = rng.random_range(0..RANDOM_ROUND_SPAN);
    requested.unwrap_or(MIN_RANDOM_ROUNDS + draw)
}

/// Candidate offsets in enumeration order: x outer, y inner, both ascending.
pub fn candidate_offsets() -> impl Iterator<Item = (f64, f64)> {
    let offset = |i: usize| -1.0 + CANDIDATE_SPACING * i as f64;
    (0..CANDIDATES_PER_AXIS)
        .flat_map(move |ix| (0..CANDIDATES_PER_AXIS).map(move |iy| (offset(ix), offset(iy))))
}

/// Candidate centers laid around `reference` for a viewport of `radius`.
pub fn candidate_centers(reference: Complex, radius: f64) -> Vec<Complex> {
    candidate_offsets()
        .map(|(x, y)| Complex::new(x, y) * radius + reference)
        .collect()
}

/// One scored candidate of a round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub center: Complex,
    /// Interest score before noise.
    pub score: InterestScore,
}

/// The candidate a round settled on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub center: Complex,
    /// Index into the round's candidates, or `None` if the reference point
    /// was kept because no candidate beat it.
    pub index: Option<usize>,
    /// Best noisy score.
    pub score: InterestScore,
}

/// Pick the next center among `candidates`.
///
/// The incumbent starts as `reference` with score 0. Each candidate, in
/// order, draws its own modulus; a strictly higher noisy score wins, and an
/// equal one wins on a coin flip that is drawn only for ties.
pub fn select_candidate<R: Rng>(
    rng: &mut R,
    noise: &NoiseParams,
    reference: Complex,
    candidates: &[Candidate],
) -> Selection {
    let mut best = Selection {
        center: reference,
        index: None,
        score: InterestScore(0),
    };
    for (index, candidate) in candidates.iter().enumerate() {
        let modulus = noise.modulus_base + rng.random_range(0..noise.modulus_span);
        let noisy = candidate.score.reduced(modulus);
        if noisy > best.score || (noisy == best.score && rng.random_bool(0.5)) {
            best = Selection {
                center: candidate.center,
                index: Some(index),
                score: noisy,
            };
        }
    }
    best
}

/// Everything that happened in one round.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// 1-based round number.
    pub round: u32,
    /// The jittered center the candidates were laid around.
    pub reference: Complex,
    pub candidates: Vec<Candidate>,
    pub selection: Selection,
    /// The viewport after this round.
    pub viewport: Viewport,
}

/// The zoom search state machine.
///
/// Owns its random source; every draw happens on the calling thread in a
/// fixed order, so a given seed always reproduces the same path.
pub struct ZoomSearch<R> {
    scorer: InterestScorer,
    params: SearchParams,
    viewport: Viewport,
    round: u32,
    rng: R,
}

impl<R: Rng> ZoomSearch<R> {
    pub fn new(start: Viewport, params: SearchParams, rng: R) -> crate::Result<Self> {
        params.noise.validate()?;
        Ok(Self {
            scorer: params.scorer()?,
            params,
            viewport: start,
            round: 0,
            rng,
        })
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Rounds completed so far.
    #[inline]
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_finished(&self) -> bool {
        self.round >= self.params.rounds
    }

    /// Run one perturb / score / select / shrink round.
    pub fn step(&mut self) -> crate::Result<RoundOutcome> {
        let radius = self.viewport.radius();
        let reference = self.perturb();
        let sub_radius = radius / CANDIDATE_RADIUS_DIVISOR;

        // Raw scores involve no randomness, so they can be computed in
        // parallel ahead of the sequential noise and selection pass.
        let scorer = self.scorer;
        let candidates = candidate_centers(reference, radius)
            .into_par_iter()
            .map(|center| {
                scorer
                    .score(center, sub_radius)
                    .map(|score| Candidate { center, score })
            })
            .collect::<crate::Result<Vec<_>>>()?;

        let selection = select_candidate(&mut self.rng, &self.params.noise, reference, &candidates);
        self.viewport = self.viewport.zoomed_to(selection.center);
        self.round += 1;

        debug!(
            round = self.round,
            winner = ?selection.index,
            score = selection.score.value(),
            radius = self.viewport.radius(),
            "Zoom round selected candidate"
        );

        Ok(RoundOutcome {
            round: self.round,
            reference,
            candidates,
            selection,
            viewport: self.viewport,
        })
    }

    /// Run the remaining rounds and return the final viewport.
    ///
    /// With zero rounds the starting viewport is returned untouched and no
    /// random draws are made.
    pub fn run(mut self) -> crate::Result<Viewport> {
        let rounds = self.params.rounds;
        while !self.is_finished() {
            info!("Zoom {} of {}", self.round + 1, rounds);
            self.step()?;
        }
        info!(
            rounds,
            center = %self.viewport.center(),
            radius = self.viewport.radius(),
            "Zoom search complete"
        );
        Ok(self.viewport)
    }

    /// Jitter the current center; x is drawn before y.
    fn perturb(&mut self) -> Complex {
        let noise = self.params.noise;
        let radius = self.viewport.radius();
        let dx = noise.jitter_offset(self.rng.random_range(0..noise.jitter_steps), radius);
        let dy = noise.jitter_offset(self.rng.random_range(0..noise.jitter_steps), radius);
        self.viewport.center() + Complex::new(dx, dy)
    }
}
