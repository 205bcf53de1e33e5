//! Time-zone inference entry points
//!
//! Pure, synchronous functions from already-fetched timestamps to a selected
//! offset plus the full posterior. No I/O, retries or shared state; calls for
//! different addresses may run concurrently.

use crate::error::{InferenceError, Result};
use crate::histogram::{ActivityHistogram, TransactionTimestamp};
use crate::likelihood::{posterior, CandidateOffset, PosteriorDistribution};
use crate::selector::select_offset;
use serde::Serialize;

/// Result of a single inference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeZoneInference {
    /// Best-supported offset
    pub offset: CandidateOffset,
    /// Posterior over all 25 candidate offsets
    pub posterior: PosteriorDistribution,
    /// Histogram the posterior was computed from
    pub histogram: ActivityHistogram,
}

impl TimeZoneInference {
    /// Posterior probability of the selected offset
    pub fn confidence(&self) -> f64 {
        self.posterior.probability(self.offset)
    }
}

/// Infer the most probable UTC offset from transaction timestamps
///
/// Order of `timestamps` does not matter.
///
/// # Errors
///
/// - `EmptyInput` if `timestamps` is empty
/// - `DegenerateDistribution` if scoring yields no mass (internal invariant violation)
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use satzone::{infer_time_zone_offset, TransactionTimestamp};
///
/// // Active every hour except 05:00-11:00 UTC
/// let stamps: Vec<TransactionTimestamp> = (0..24)
///     .filter(|h| !(5..11).contains(h))
///     .map(|h| TransactionTimestamp::new(Utc.with_ymd_and_hms(2024, 1, 15, h, 30, 0).unwrap()))
///     .collect();
///
/// let result = infer_time_zone_offset(&stamps).unwrap();
/// assert_eq!(result.offset.hours(), -5);
/// ```
pub fn infer_time_zone_offset(timestamps: &[TransactionTimestamp]) -> Result<TimeZoneInference> {
    if timestamps.is_empty() {
        return Err(InferenceError::EmptyInput);
    }
    infer_from_histogram(ActivityHistogram::from_timestamps(timestamps))
}

/// Infer from a pre-binned histogram
///
/// # Errors
///
/// - `InsufficientData` if the histogram total is zero
/// - `CountOverflow` if the bins do not sum within `u64`
/// - `DegenerateDistribution` if scoring yields no mass
pub fn infer_from_histogram(histogram: ActivityHistogram) -> Result<TimeZoneInference> {
    let posterior = posterior(&histogram)?;
    let offset = select_offset(&posterior);

    tracing::debug!(
        transactions = histogram.total(),
        offset = offset.hours(),
        probability = posterior.probability(offset),
        "inferred UTC offset"
    );

    Ok(TimeZoneInference {
        offset,
        posterior,
        histogram,
    })
}
