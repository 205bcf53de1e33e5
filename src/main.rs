use anyhow::{Context, Result};
use clap::Parser;
use satzone::cli::{Cli, OutputFormat};
use satzone::config::SatzoneConfig;
use satzone::csv_output::{self, CsvSummaryOutput};
use satzone::json_output::JsonReport;
use satzone::provider::{self, BlockchainInfoClient, TransactionProvider, TransactionRecord};
use satzone::text_output::TextReport;
use satzone::{infer_time_zone_offset, input, TimeZoneInference};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; --debug forces TRACE, otherwise RUST_LOG (default warn)
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration file (if any) and apply command-line overrides
fn load_config(args: &Cli) -> Result<SatzoneConfig> {
    let mut config = match &args.config {
        Some(path) => SatzoneConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SatzoneConfig::default(),
    };

    if let Some(limit) = args.limit {
        config.max_transactions = limit;
    }
    if let Some(min) = args.min_transactions {
        config.min_transactions = min;
    }
    config.validate()?;
    Ok(config)
}

/// Print a single-address report in the requested format
fn print_report(
    address: Option<&str>,
    balance_btc: Option<f64>,
    inference: &TimeZoneInference,
    format: OutputFormat,
    top: usize,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let mut report = TextReport::new(inference, top);
            if let Some(address) = address {
                report = report.with_address(address);
            }
            if let Some(balance) = balance_btc {
                report = report.with_balance(balance);
            }
            print!("{}", report);
        }
        OutputFormat::Json => {
            let mut report = JsonReport::new(address.map(str::to_string), inference);
            if let Some(balance) = balance_btc {
                report = report.with_balance(balance);
            }
            println!("{}", report.to_json()?);
        }
        OutputFormat::Csv => print!("{}", csv_output::posterior_to_csv(&inference.posterior)),
    }
    Ok(())
}

/// Fetch recent transactions for an address and infer its offset
fn infer_address<P: TransactionProvider>(
    provider: &P,
    address: &str,
    limit: usize,
) -> Result<(Vec<TransactionRecord>, TimeZoneInference)> {
    let records = provider
        .last_transactions(address, limit)
        .with_context(|| format!("Failed to fetch transactions for {}", address))?;
    let inference = infer_time_zone_offset(&provider::timestamps(&records))
        .with_context(|| format!("Cannot infer time zone for {}", address))?;
    Ok((records, inference))
}

fn run_timestamps(path: &Path, args: &Cli) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let stamps = input::parse_timestamps(&content)?;
    tracing::info!(count = stamps.len(), file = %path.display(), "loaded timestamps");

    let inference = infer_time_zone_offset(&stamps)?;
    print_report(None, None, &inference, args.format, args.top)
}

fn run_address(address: &str, args: &Cli, config: &SatzoneConfig) -> Result<()> {
    let client = BlockchainInfoClient::new(config)?;
    let (records, inference) = infer_address(&client, address, config.max_transactions)?;
    let balance = client
        .address_balance(address)
        .with_context(|| format!("Failed to fetch balance for {}", address))?;

    if let Some(path) = &args.export_transactions {
        std::fs::write(path, csv_output::transactions_to_csv(&records))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(file = %path.display(), rows = records.len(), "exported transactions");
    }

    print_report(Some(address), Some(balance), &inference, args.format, args.top)
}

fn run_addresses(path: &Path, args: &Cli, config: &SatzoneConfig) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let rows = csv_output::parse_summary_csv(&content)?;
    let total = rows.len();
    let rows = csv_output::filter_active(rows, config.min_transactions);
    tracing::info!(
        total,
        kept = rows.len(),
        min_transactions = config.min_transactions,
        "filtered address summary"
    );

    let client = BlockchainInfoClient::new(config)?;
    let mut sink = CsvSummaryOutput::new(true);
    let mut reports = Vec::new();

    for row in rows {
        match infer_address(&client, &row.address, config.max_transactions) {
            Ok((_, inference)) => {
                reports.push(
                    JsonReport::new(Some(row.address.clone()), &inference)
                        .with_balance(row.balance_btc),
                );
                sink.add_inferred(row, Some(inference.offset));
            }
            Err(e) => {
                tracing::warn!(address = %row.address, "{:#}", e);
                sink.add_inferred(row, None);
            }
        }
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text | OutputFormat::Csv => print!("{}", sink.to_csv()),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.top == 0 {
        anyhow::bail!("Invalid value for --top: 0 (must be >= 1)");
    }

    init_tracing(args.debug);

    let config = load_config(&args)?;

    if args.export_transactions.is_some() && args.input.address.is_none() {
        anyhow::bail!("--export-transactions requires --address");
    }

    match (&args.input.address, &args.input.timestamps, &args.input.addresses) {
        (Some(address), None, None) => run_address(address, &args, &config),
        (None, Some(path), None) => run_timestamps(path, &args),
        (None, None, Some(path)) => run_addresses(path, &args, &config),
        _ => anyhow::bail!("Specify exactly one of --address, --timestamps or --addresses"),
    }
}
