//! Nighttime inactivity template
//!
//! Uniform weight over local hours [0, 6), zero elsewhere, normalized to sum
//! to 1. Built once per process and shared read-only.

use crate::histogram::HOURS_PER_DAY;
use std::sync::OnceLock;

/// First local hour of the assumed inactive window
pub const INACTIVE_START_HOUR: usize = 0;
/// End (exclusive) of the assumed inactive window
pub const INACTIVE_END_HOUR: usize = 6;

/// Reference distribution of assumed low-activity hours
#[derive(Debug, Clone, PartialEq)]
pub struct InactivityTemplate {
    weights: [f64; HOURS_PER_DAY],
}

impl InactivityTemplate {
    fn build() -> Self {
        let mut weights = [0.0; HOURS_PER_DAY];
        for w in &mut weights[INACTIVE_START_HOUR..INACTIVE_END_HOUR] {
            *w = 1.0;
        }
        let sum: f64 = weights.iter().sum();
        for w in weights.iter_mut() {
            *w /= sum;
        }
        Self { weights }
    }

    /// The process-wide template
    pub fn global() -> &'static InactivityTemplate {
        static TEMPLATE: OnceLock<InactivityTemplate> = OnceLock::new();
        TEMPLATE.get_or_init(Self::build)
    }

    pub fn weights(&self) -> &[f64; HOURS_PER_DAY] {
        &self.weights
    }
}
