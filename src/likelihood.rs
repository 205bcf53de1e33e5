//! Offset likelihood engine
//!
//! Scores every whole-hour UTC offset in [-12, 12] by circularly rotating the
//! hourly profile and taking its sum-of-products with the inactivity
//! template (a discrete cross-correlation evaluated at every integer lag).
//!
//! # Rotation convention
//!
//! For candidate offset `k`, the value at UTC hour `i` moves to local hour
//! `(i + k) mod 24`, i.e. local time = UTC + k. Someone who is quiet between
//! 05:00 and 11:00 UTC therefore scores best at `k = -5` (US Eastern).
//!
//! # Scoring
//!
//! The activity vector `p` is the normalized histogram. Its rotated dot
//! product with the template is the share of activity falling inside the
//! local night (`night_activity`). Likelihood is taken from the inactivity
//! profile `q_i = (1 - p_i) / 23`, so offsets that put quiet hours inside the
//! night window score higher. `q` sums to 1 like `p`, and scaling the
//! histogram changes neither.

use crate::error::{InferenceError, Result};
use crate::histogram::{ActivityHistogram, HOURS_PER_DAY};
use crate::template::InactivityTemplate;
use serde::Serialize;
use std::fmt;

/// A whole-hour UTC offset in [-12, 12]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CandidateOffset(i32);

impl CandidateOffset {
    pub const MIN: i32 = -12;
    pub const MAX: i32 = 12;
    /// Number of candidate offsets (25)
    pub const COUNT: usize = (Self::MAX - Self::MIN + 1) as usize;

    pub fn new(hours: i32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&hours) {
            Ok(Self(hours))
        } else {
            Err(InferenceError::InvalidOffset(hours))
        }
    }

    /// All candidates in ascending order, -12 first
    pub fn all() -> impl Iterator<Item = CandidateOffset> {
        (Self::MIN..=Self::MAX).map(CandidateOffset)
    }

    pub fn hours(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CandidateOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "UTC-{}", -self.0)
        } else {
            write!(f, "UTC+{}", self.0)
        }
    }
}

/// Circularly shift `values` by `shift` positions: index `i` moves to `(i + shift) mod 24`
pub fn rotate(values: &[f64; HOURS_PER_DAY], shift: i32) -> [f64; HOURS_PER_DAY] {
    let mut rotated = [0.0; HOURS_PER_DAY];
    for (i, &v) in values.iter().enumerate() {
        let target = (i as i32 + shift).rem_euclid(HOURS_PER_DAY as i32) as usize;
        rotated[target] = v;
    }
    rotated
}

/// Sum of elementwise products
pub fn dot(a: &[f64; HOURS_PER_DAY], b: &[f64; HOURS_PER_DAY]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Inactivity profile `q_i = (1 - p_i) / (N - 1)` for a normalized activity vector
pub fn inactivity_profile(p: &[f64; HOURS_PER_DAY]) -> [f64; HOURS_PER_DAY] {
    let mut q = [0.0; HOURS_PER_DAY];
    for (slot, &pi) in q.iter_mut().zip(p.iter()) {
        *slot = (1.0 - pi) / (HOURS_PER_DAY - 1) as f64;
    }
    q
}

/// Scores for a single candidate offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OffsetScore {
    pub offset: CandidateOffset,
    /// Share of activity landing in the local inactive window
    pub night_activity: f64,
    /// Raw (unnormalized) likelihood
    pub likelihood: f64,
    /// Posterior probability under a uniform prior
    pub probability: f64,
}

/// Posterior over the 25 candidate offsets, ascending by offset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PosteriorDistribution {
    scores: Vec<OffsetScore>,
}

impl PosteriorDistribution {
    /// Per-offset scores, -12 first
    pub fn scores(&self) -> &[OffsetScore] {
        &self.scores
    }

    pub fn probability(&self, offset: CandidateOffset) -> f64 {
        self.scores[(offset.hours() - CandidateOffset::MIN) as usize].probability
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.scores.iter().map(|s| s.probability).collect()
    }
}

/// Compute the posterior over candidate offsets for a histogram
///
/// # Errors
///
/// - `InsufficientData` if the histogram total is zero
/// - `CountOverflow` if the histogram total exceeds `u64::MAX`
/// - `DegenerateDistribution` if the likelihoods sum to zero or a non-finite value
pub fn posterior(histogram: &ActivityHistogram) -> Result<PosteriorDistribution> {
    let p = histogram.normalized()?;
    let q = inactivity_profile(&p);
    let template = InactivityTemplate::global().weights();

    let mut scores: Vec<OffsetScore> = CandidateOffset::all()
        .map(|offset| OffsetScore {
            offset,
            night_activity: dot(&rotate(&p, offset.hours()), template),
            likelihood: dot(&rotate(&q, offset.hours()), template),
            probability: 0.0,
        })
        .collect();

    let sum: f64 = scores.iter().map(|s| s.likelihood).sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(InferenceError::DegenerateDistribution { sum });
    }
    for score in scores.iter_mut() {
        score.probability = score.likelihood / sum;
    }

    tracing::trace!(total = histogram.total(), likelihood_sum = sum, "computed offset posterior");

    Ok(PosteriorDistribution { scores })
}
