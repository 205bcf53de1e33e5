//! Hour-of-day activity histogram
//!
//! Bins transaction timestamps into 24 half-open UTC hour buckets `[i, i+1)`
//! using the fractional hour `hour + minute / 60`. No smoothing is applied.

use crate::error::{InferenceError, Result};
use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Number of hour-of-day bins
pub const HOURS_PER_DAY: usize = 24;

/// A transaction instant in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionTimestamp(DateTime<Utc>);

impl TransactionTimestamp {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Build from Unix seconds (as returned by ledger APIs)
    pub fn from_unix(secs: i64) -> Result<Self> {
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(Self)
            .ok_or(InferenceError::InvalidTimestamp(secs))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Fractional hour of day in [0, 24), seconds are ignored
    pub fn fractional_hour(&self) -> f64 {
        self.0.hour() as f64 + self.0.minute() as f64 / 60.0
    }
}

impl From<DateTime<Utc>> for TransactionTimestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

/// Transaction counts per UTC hour of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityHistogram {
    counts: [u64; HOURS_PER_DAY],
}

impl ActivityHistogram {
    /// Build from pre-binned counts
    pub fn from_counts(counts: [u64; HOURS_PER_DAY]) -> Self {
        Self { counts }
    }

    /// Bin a sequence of timestamps; empty input yields all zeros
    pub fn from_timestamps<'a, I>(timestamps: I) -> Self
    where
        I: IntoIterator<Item = &'a TransactionTimestamp>,
    {
        let mut histogram = Self::default();
        for ts in timestamps {
            histogram.record(ts);
        }
        histogram
    }

    /// Add one timestamp to its bin
    pub fn record(&mut self, timestamp: &TransactionTimestamp) {
        let bin = &mut self.counts[Self::bin_index(timestamp.fractional_hour())];
        *bin = bin.saturating_add(1);
    }

    /// Bin index for a fractional hour in [0, 24)
    fn bin_index(hour: f64) -> usize {
        // floor keeps the interval half-open; the clamp only guards float edge cases
        (hour.floor().max(0.0) as usize).min(HOURS_PER_DAY - 1)
    }

    pub fn counts(&self) -> &[u64; HOURS_PER_DAY] {
        &self.counts
    }

    /// Sum of all bins, saturating at `u64::MAX` (display and logging)
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Exact sum of all bins, `None` on overflow
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Multiply every bin by `factor`
    ///
    /// # Errors
    ///
    /// `CountOverflow` if any scaled bin exceeds `u64::MAX`
    pub fn scaled(&self, factor: u64) -> Result<Self> {
        let mut counts = self.counts;
        for c in counts.iter_mut() {
            *c = c.checked_mul(factor).ok_or(InferenceError::CountOverflow)?;
        }
        Ok(Self { counts })
    }

    /// Activity probability vector `p = counts / total`
    pub fn normalized(&self) -> Result<[f64; HOURS_PER_DAY]> {
        let total = self.checked_total().ok_or(InferenceError::CountOverflow)?;
        if total == 0 {
            return Err(InferenceError::InsufficientData);
        }

        let mut p = [0.0; HOURS_PER_DAY];
        for (slot, &count) in p.iter_mut().zip(self.counts.iter()) {
            *slot = count as f64 / total as f64;
        }
        Ok(p)
    }
}
