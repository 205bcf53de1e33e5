//! JSON output format for inference reports

use crate::histogram::HOURS_PER_DAY;
use crate::inference::TimeZoneInference;
use crate::likelihood::OffsetScore;
use serde::{Deserialize, Serialize};

/// Per-offset scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOffsetScore {
    /// UTC offset in whole hours
    pub offset: i32,
    /// Share of activity inside the local night window
    pub night_activity: f64,
    /// Raw likelihood
    pub likelihood: f64,
    /// Posterior probability
    pub probability: f64,
}

impl From<&OffsetScore> for JsonOffsetScore {
    fn from(score: &OffsetScore) -> Self {
        Self {
            offset: score.offset.hours(),
            night_activity: score.night_activity,
            likelihood: score.likelihood,
            probability: score.probability,
        }
    }
}

/// Complete inference report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Address balance in BTC, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_btc: Option<f64>,
    pub transactions: u64,
    /// Selected offset in whole hours
    pub utc_offset: i32,
    /// Display label, e.g. `UTC-5`
    pub label: String,
    /// Posterior probability of the selected offset
    pub confidence: f64,
    /// Transactions per UTC hour
    pub histogram: Vec<u64>,
    /// Scores ascending by offset
    pub posterior: Vec<JsonOffsetScore>,
}

impl JsonReport {
    pub fn new(address: Option<String>, inference: &TimeZoneInference) -> Self {
        let histogram: Vec<u64> = inference.histogram.counts().to_vec();
        debug_assert_eq!(histogram.len(), HOURS_PER_DAY);

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "satzone-json-v1".to_string(),
            address,
            balance_btc: None,
            transactions: inference.histogram.total(),
            utc_offset: inference.offset.hours(),
            label: inference.offset.to_string(),
            confidence: inference.confidence(),
            histogram,
            posterior: inference
                .posterior
                .scores()
                .iter()
                .map(JsonOffsetScore::from)
                .collect(),
        }
    }

    pub fn with_balance(mut self, balance_btc: f64) -> Self {
        self.balance_btc = Some(balance_btc);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
