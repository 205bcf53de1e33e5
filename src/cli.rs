//! CLI argument parsing for Satzone

use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for inference reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// Where transaction timestamps come from (exactly one)
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct InputSource {
    /// Bitcoin address to fetch recent transactions for
    #[arg(short = 'a', long = "address", value_name = "ADDRESS")]
    pub address: Option<String>,

    /// File of timestamps (Unix seconds or RFC 3339), one per line
    #[arg(short = 't', long = "timestamps", value_name = "FILE")]
    pub timestamps: Option<PathBuf>,

    /// Address summary CSV (address,balance_btc,ins,outs); infers each active address
    #[arg(long = "addresses", value_name = "FILE")]
    pub addresses: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(name = "satzone")]
#[command(version)]
#[command(
    about = "Infer the probable UTC offset of a Bitcoin address owner from transaction timing",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub input: InputSource,

    /// Maximum number of recent transactions to fetch per address
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Minimum ins + outs for an address in --addresses to be analysed
    #[arg(long = "min-transactions", value_name = "N")]
    pub min_transactions: Option<u64>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Number of most probable offsets listed in text output
    #[arg(long = "top", value_name = "N", default_value = "5")]
    pub top: usize,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write fetched transactions to a CSV file (with --address)
    #[arg(long = "export-transactions", value_name = "FILE")]
    pub export_transactions: Option<PathBuf>,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
