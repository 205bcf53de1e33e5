//! Ledger-data provider
//!
//! Fetches address balances, block metadata and recent transactions from a
//! Blockchain.com-compatible HTTP API.
//!
//! # Endpoints
//!
//! ```text
//! GET {base}/q/addressbalance/{address}      -> satoshis as plain text
//! GET {base}/rawblock/{hash_or_height}       -> block JSON
//! GET {base}/rawaddr/{address}?limit={n}     -> address JSON with `txs`
//! ```
//!
//! Error policy: any HTTP or payload failure is returned immediately, no
//! retries and no fallback values.

use crate::config::SatzoneConfig;
use crate::histogram::TransactionTimestamp;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::blocking::Client;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Satoshis per bitcoin
pub const SATOSHIS_PER_BTC: f64 = 1e8;

/// Errors from the ledger-data provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failure (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Request to {url} failed with status code {status}")]
    Status { url: String, status: u16 },

    /// JSON payload did not match the expected schema
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-JSON payload could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Transaction time outside the representable range
    #[error("Invalid transaction time: {0}")]
    InvalidTime(i64),
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// A fetched transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub hash: String,
    pub time: DateTime<Utc>,
    pub inputs: usize,
    pub outputs: usize,
    /// Sum of all output values in BTC
    pub total_output_btc: f64,
}

impl TransactionRecord {
    pub fn timestamp(&self) -> TransactionTimestamp {
        TransactionTimestamp::new(self.time)
    }
}

/// Project records onto the timestamps consumed by inference
pub fn timestamps(records: &[TransactionRecord]) -> Vec<TransactionTimestamp> {
    records.iter().map(TransactionRecord::timestamp).collect()
}

/// Source of recent transactions for an address
pub trait TransactionProvider {
    /// Up to `limit` most recent transactions, newest first
    fn last_transactions(&self, address: &str, limit: usize) -> Result<Vec<TransactionRecord>>;
}

#[derive(Debug, Deserialize)]
struct RawAddress {
    #[serde(default)]
    txs: Vec<RawTransaction>,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    #[serde(default)]
    hash: String,
    time: i64,
    #[serde(default)]
    inputs: Vec<IgnoredAny>,
    #[serde(default)]
    out: Vec<RawOutput>,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    #[serde(default)]
    value: u64,
}

impl RawTransaction {
    fn into_record(self) -> Result<TransactionRecord> {
        let time = Utc
            .timestamp_opt(self.time, 0)
            .single()
            .ok_or(ProviderError::InvalidTime(self.time))?;
        let satoshis: u64 = self.out.iter().map(|o| o.value).sum();

        Ok(TransactionRecord {
            hash: self.hash,
            time,
            inputs: self.inputs.len(),
            outputs: self.out.len(),
            total_output_btc: satoshis as f64 / SATOSHIS_PER_BTC,
        })
    }
}

/// Parse a `rawaddr` response, keeping at most `limit` transactions
pub fn parse_transactions(body: &str, limit: usize) -> Result<Vec<TransactionRecord>> {
    let raw: RawAddress = serde_json::from_str(body)?;
    raw.txs
        .into_iter()
        .take(limit)
        .map(RawTransaction::into_record)
        .collect()
}

/// Parse an `addressbalance` response (satoshis) into BTC
pub fn parse_balance(body: &str) -> Result<f64> {
    let satoshis: u64 = body
        .trim()
        .parse()
        .map_err(|e| ProviderError::Parse(format!("invalid balance {:?}: {}", body.trim(), e)))?;
    Ok(satoshis as f64 / SATOSHIS_PER_BTC)
}

/// Blocking client for the Blockchain.com data API
#[derive(Debug, Clone)]
pub struct BlockchainInfoClient {
    client: Client,
    base_url: String,
}

impl BlockchainInfoClient {
    /// Create a client from configuration (base URL and timeout)
    pub fn new(config: &SatzoneConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("satzone/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "request failed");
            return Err(ProviderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }

    /// Confirmed balance of an address in BTC
    pub fn address_balance(&self, address: &str) -> Result<f64> {
        let url = format!("{}/q/addressbalance/{}", self.base_url, address);
        parse_balance(&self.get_text(&url)?)
    }

    /// Raw block details by hash or height
    ///
    /// Library API only; the `satzone` binary does not look up blocks.
    pub fn block_info(&self, block: &str) -> Result<serde_json::Value> {
        let url = format!("{}/rawblock/{}", self.base_url, block);
        Ok(serde_json::from_str(&self.get_text(&url)?)?)
    }
}

impl TransactionProvider for BlockchainInfoClient {
    fn last_transactions(&self, address: &str, limit: usize) -> Result<Vec<TransactionRecord>> {
        let url = format!("{}/rawaddr/{}?limit={}", self.base_url, address, limit);
        let records = parse_transactions(&self.get_text(&url)?, limit)?;
        tracing::info!(address, fetched = records.len(), "fetched transactions");
        Ok(records)
    }
}
