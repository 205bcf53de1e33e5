//! Integration tests for the satzone binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests
//!
//! Network-free: timestamps come from files, and address lookups point at a
//! closed local port so every fetch fails fast.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Unix seconds at 2024-01-01 00:00:00 UTC
const JAN_1_2024: i64 = 1_704_067_200;

/// Timestamps active at every UTC hour except 05:00-10:59
fn eastern_timestamps() -> String {
    let mut out = String::from("# synthetic UTC-5 owner\n");
    for day in 0..10 {
        for hour in (0..24).filter(|h| !(5..11).contains(h)) {
            out.push_str(&format!("{}\n", JAN_1_2024 + day * 86_400 + hour * 3_600 + 1_200));
        }
    }
    out
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn offline_config(dir: &TempDir) -> std::path::PathBuf {
    write_file(
        dir,
        "satzone.toml",
        "api_base_url = \"http://127.0.0.1:9\"\nrequest_timeout_secs = 2\n",
    )
}

#[test]
fn test_text_report_from_timestamps() {
    let dir = TempDir::new().unwrap();
    let stamps = write_file(&dir, "stamps.txt", &eastern_timestamps());

    Command::cargo_bin("satzone")
        .unwrap()
        .arg("--timestamps")
        .arg(&stamps)
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions: 180"))
        .stdout(predicate::str::contains("Estimated time zone: UTC-5"));
}

#[test]
fn test_json_report_from_timestamps() {
    let dir = TempDir::new().unwrap();
    let stamps = write_file(&dir, "stamps.txt", &eastern_timestamps());

    let output = Command::cargo_bin("satzone")
        .unwrap()
        .arg("-t")
        .arg(&stamps)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["format"], "satzone-json-v1");
    assert_eq!(parsed["utc_offset"], -5);
    assert_eq!(parsed["label"], "UTC-5");
    assert_eq!(parsed["transactions"], 180);
    assert_eq!(parsed["posterior"].as_array().unwrap().len(), 25);
}

#[test]
fn test_csv_posterior_from_timestamps() {
    let dir = TempDir::new().unwrap();
    let stamps = write_file(&dir, "stamps.txt", &eastern_timestamps());

    Command::cargo_bin("satzone")
        .unwrap()
        .arg("-t")
        .arg(&stamps)
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "offset,night_activity,likelihood,probability\n-12,",
        ))
        .stdout(predicate::str::contains("\n-5,0.000000,"));
}

#[test]
fn test_empty_timestamps_file_fails() {
    let dir = TempDir::new().unwrap();
    let stamps = write_file(&dir, "empty.txt", "# nothing here\n");

    Command::cargo_bin("satzone")
        .unwrap()
        .arg("-t")
        .arg(&stamps)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty input"));
}

#[test]
fn test_malformed_timestamps_file_fails() {
    let dir = TempDir::new().unwrap();
    let stamps = write_file(&dir, "bad.txt", "1704067200\nlast tuesday\n");

    Command::cargo_bin("satzone")
        .unwrap()
        .arg("-t")
        .arg(&stamps)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2"));
}

#[test]
fn test_missing_input_source_fails() {
    Command::cargo_bin("satzone").unwrap().assert().failure();
}

#[test]
fn test_export_requires_address() {
    let dir = TempDir::new().unwrap();
    let stamps = write_file(&dir, "stamps.txt", &eastern_timestamps());

    Command::cargo_bin("satzone")
        .unwrap()
        .arg("-t")
        .arg(&stamps)
        .arg("--export-transactions")
        .arg(dir.path().join("txs.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires --address"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let stamps = write_file(&dir, "stamps.txt", &eastern_timestamps());
    let config = write_file(&dir, "bad.toml", "max_transactions = 0\n");

    Command::cargo_bin("satzone")
        .unwrap()
        .arg("-t")
        .arg(&stamps)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_transactions"));
}

#[test]
fn test_unreachable_provider_reports_error() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(&dir);

    Command::cargo_bin("satzone")
        .unwrap()
        .arg("--address")
        .arg("1BoatSLRHtKNngkdXEeobR76b53LETtpyT")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch transactions"));
}

#[test]
fn test_addresses_filter_and_unknown_offsets() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(&dir);
    let summary = write_file(
        &dir,
        "addresses.csv",
        "address,balance_btc,ins,outs\n\
         1Active,10.5,15,10\n\
         1Dormant,3.0,4,2\n",
    );

    Command::cargo_bin("satzone")
        .unwrap()
        .arg("--addresses")
        .arg(&summary)
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "address,balance_btc,ins,outs,transactions,utc_offset",
        ))
        .stdout(predicate::str::contains("1Active,10.50000000,15,10,25,unknown"))
        .stdout(predicate::str::contains("1Dormant").not());
}

#[test]
fn test_min_transactions_override() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(&dir);
    let summary = write_file(
        &dir,
        "addresses.csv",
        "address,balance_btc,ins,outs\n1Dormant,3.0,4,2\n",
    );

    Command::cargo_bin("satzone")
        .unwrap()
        .arg("--addresses")
        .arg(&summary)
        .arg("--config")
        .arg(&config)
        .arg("--min-transactions")
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::contains("1Dormant,3.00000000,4,2,6,unknown"));
}

#[test]
fn test_addresses_reads_back_summary_output() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(&dir);
    let summary = write_file(
        &dir,
        "previous.csv",
        "address,balance_btc,ins,outs,transactions,utc_offset\n\
         \"1Multi\nline\",\"1,000.0\",20,5,25,unknown\n",
    );

    Command::cargo_bin("satzone")
        .unwrap()
        .arg("--addresses")
        .arg(&summary)
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"1Multi\nline\",1000.00000000,20,5,25,unknown",
        ));
}
