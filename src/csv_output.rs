//! CSV output formats
//!
//! - transaction table (`time_utc,inputs,outputs,total_btc`)
//! - posterior table (`offset,night_activity,likelihood,probability`)
//! - address summary sink (`address,balance_btc,ins,outs,transactions[,utc_offset]`)
//!
//! The summary format is also readable back, so a saved rich-list extract
//! can be fed to `--addresses`.

use crate::likelihood::{CandidateOffset, PosteriorDistribution};
use crate::provider::TransactionRecord;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Transaction table formatter
pub fn transactions_to_csv(records: &[TransactionRecord]) -> String {
    let mut output = String::from("time_utc,inputs,outputs,total_btc\n");
    for record in records {
        output.push_str(&format!(
            "{},{},{},{:.8}\n",
            record.time.format("%Y-%m-%d %H:%M:%S"),
            record.inputs,
            record.outputs,
            record.total_output_btc
        ));
    }
    output
}

/// Posterior table formatter, ascending by offset
pub fn posterior_to_csv(posterior: &PosteriorDistribution) -> String {
    let mut output = String::from("offset,night_activity,likelihood,probability\n");
    for score in posterior.scores() {
        output.push_str(&format!(
            "{},{:.6},{:.9},{:.6}\n",
            score.offset.hours(),
            score.night_activity,
            score.likelihood,
            score.probability
        ));
    }
    output
}

/// Errors reading an address summary CSV
#[derive(Error, Debug)]
pub enum SummaryParseError {
    #[error("Missing header row with an `address` column")]
    MissingHeader,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the address summary sink
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressSummary {
    pub address: String,
    /// Balance in BTC; thousands separators are accepted
    #[serde(deserialize_with = "deserialize_balance")]
    pub balance_btc: f64,
    /// Incoming transaction count
    #[serde(deserialize_with = "deserialize_count")]
    pub ins: u64,
    /// Outgoing transaction count
    #[serde(deserialize_with = "deserialize_count")]
    pub outs: u64,
}

impl AddressSummary {
    pub fn transactions(&self) -> u64 {
        self.ins.saturating_add(self.outs)
    }
}

fn deserialize_balance<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.replace(',', "")
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("invalid balance {:?}", raw)))
}

/// Blank counts read as zero
fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .map_err(|_| serde::de::Error::custom(format!("invalid count {:?}", raw)))
}

/// Keep rows with at least `min_transactions` total transactions
pub fn filter_active(rows: Vec<AddressSummary>, min_transactions: u64) -> Vec<AddressSummary> {
    rows.into_iter()
        .filter(|row| row.transactions() >= min_transactions)
        .collect()
}

/// Parse a summary CSV
///
/// Columns are matched by header name (`address,balance_btc,ins,outs`); any
/// other columns, such as the sink's `transactions` and `utc_offset`, are
/// ignored. Blank lines are skipped.
pub fn parse_summary_csv(content: &str) -> Result<Vec<AddressSummary>, SummaryParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    if !reader.headers()?.iter().any(|h| h == "address") {
        return Err(SummaryParseError::MissingHeader);
    }

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: AddressSummary = result?;
        rows.push(row);
    }
    Ok(rows)
}

/// Address summary sink
#[derive(Debug, Default)]
pub struct CsvSummaryOutput {
    rows: Vec<(AddressSummary, Option<Option<CandidateOffset>>)>,
    include_offset: bool,
}

impl CsvSummaryOutput {
    /// Create a sink; `include_offset` adds the `utc_offset` column
    pub fn new(include_offset: bool) -> Self {
        Self {
            rows: Vec::new(),
            include_offset,
        }
    }

    /// Add a row without an inference result
    pub fn add_summary(&mut self, summary: AddressSummary) {
        self.rows.push((summary, None));
    }

    /// Add a row with its inferred offset (`None` is written as `unknown`)
    pub fn add_inferred(&mut self, summary: AddressSummary, offset: Option<CandidateOffset>) {
        self.rows.push((summary, Some(offset)));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn header(&self) -> String {
        let mut headers = vec!["address", "balance_btc", "ins", "outs", "transactions"];
        if self.include_offset {
            headers.push("utc_offset");
        }
        headers.join(",")
    }

    pub fn to_csv(&self) -> String {
        let mut output = self.header();
        output.push('\n');

        for (summary, inferred) in &self.rows {
            let mut fields = vec![
                escape_field(&summary.address),
                format!("{:.8}", summary.balance_btc),
                summary.ins.to_string(),
                summary.outs.to_string(),
                summary.transactions().to_string(),
            ];

            if self.include_offset {
                fields.push(match inferred {
                    Some(Some(offset)) => offset.hours().to_string(),
                    Some(None) => "unknown".to_string(),
                    None => String::new(),
                });
            }

            output.push_str(&fields.join(","));
            output.push('\n');
        }
        output
    }
}
