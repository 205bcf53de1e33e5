//! Offset selection from the posterior
//!
//! # Tie-break policy
//!
//! When several offsets share the maximum probability (a perfectly uniform
//! activity profile makes all 25 equal), the first one in ascending order
//! wins, i.e. the most negative offset. Ties are exact floating-point
//! equality; no epsilon is applied.

use crate::likelihood::{CandidateOffset, OffsetScore, PosteriorDistribution};

/// Offset with maximum posterior probability, smallest offset on ties
pub fn select_offset(posterior: &PosteriorDistribution) -> CandidateOffset {
    best_score(posterior.scores()).offset
}

fn best_score(scores: &[OffsetScore]) -> &OffsetScore {
    let mut best = &scores[0];
    for score in &scores[1..] {
        // Strict comparison keeps the earlier (smaller) offset on ties
        if score.probability > best.probability {
            best = score;
        }
    }
    best
}

/// The `n` most probable offsets, descending; ties keep ascending offset order
pub fn ranked(posterior: &PosteriorDistribution, n: usize) -> Vec<OffsetScore> {
    let mut scores = posterior.scores().to_vec();
    // sort_by is stable, so equal probabilities stay in ascending offset order
    scores.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    scores.truncate(n);
    scores
}
