//! Human-readable text report

use crate::inference::TimeZoneInference;
use crate::selector::ranked;
use std::fmt;

const BAR_WIDTH: usize = 40;

/// Bar chart of the hourly histogram plus the `top` most probable offsets
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    inference: &'a TimeZoneInference,
    top: usize,
    address: Option<&'a str>,
    balance_btc: Option<f64>,
}

impl<'a> TextReport<'a> {
    pub fn new(inference: &'a TimeZoneInference, top: usize) -> Self {
        Self {
            inference,
            top,
            address: None,
            balance_btc: None,
        }
    }

    pub fn with_address(mut self, address: &'a str) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_balance(mut self, balance_btc: f64) -> Self {
        self.balance_btc = Some(balance_btc);
        self
    }
}

/// Bar length for `count`, scaled so `max` fills `BAR_WIDTH`
fn bar_width(count: u64, max: u64) -> usize {
    // u128 keeps count * BAR_WIDTH exact for any u64 count
    (count as u128 * BAR_WIDTH as u128).div_ceil(max.max(1) as u128) as usize
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inference = self.inference;
        let counts = inference.histogram.counts();
        let max = counts.iter().copied().max().unwrap_or(0);

        if let Some(address) = self.address {
            writeln!(f, "Address: {}", address)?;
        }
        if let Some(balance) = self.balance_btc {
            writeln!(f, "Balance: {:.8} BTC", balance)?;
        }
        writeln!(f, "Transactions: {}", inference.histogram.total())?;
        writeln!(f)?;
        writeln!(f, "UTC hour  count")?;
        for (hour, &count) in counts.iter().enumerate() {
            writeln!(
                f,
                "   {:02}    {:>5} {}",
                hour,
                count,
                "#".repeat(bar_width(count, max))
            )?;
        }
        writeln!(f)?;

        writeln!(f, "offset    probability")?;
        for score in ranked(&inference.posterior, self.top) {
            writeln!(f, "{:<9} {:>10.4}", score.offset.to_string(), score.probability)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Estimated time zone: {} (p = {:.4})",
            inference.offset,
            inference.confidence()
        )
    }
}

/// Render a report without address details
pub fn render(inference: &TimeZoneInference, top: usize) -> String {
    TextReport::new(inference, top).to_string()
}
