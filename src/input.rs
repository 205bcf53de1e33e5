//! Offline timestamp input
//!
//! One instant per line, either Unix seconds (`1700000000`) or RFC 3339
//! (`2023-11-14T22:13:20Z`). Blank lines and `#` comments are skipped.

use crate::histogram::TransactionTimestamp;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors parsing a timestamp list
#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Line {line}: cannot parse {value:?} as Unix seconds or RFC 3339")]
    Unparseable { line: usize, value: String },

    #[error("Line {line}: timestamp {value} out of range")]
    OutOfRange { line: usize, value: i64 },
}

/// Parse a single timestamp token
fn parse_token(token: &str, line: usize) -> Result<TransactionTimestamp, InputError> {
    if let Ok(secs) = token.parse::<i64>() {
        return TransactionTimestamp::from_unix(secs)
            .map_err(|_| InputError::OutOfRange { line, value: secs });
    }

    DateTime::parse_from_rfc3339(token)
        .map(|dt| TransactionTimestamp::new(dt.with_timezone(&Utc)))
        .map_err(|_| InputError::Unparseable {
            line,
            value: token.to_string(),
        })
}

/// Parse a newline-separated list of timestamps
pub fn parse_timestamps(content: &str) -> Result<Vec<TransactionTimestamp>, InputError> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let token = raw.split('#').next().unwrap_or("").trim();
            (!token.is_empty()).then(|| parse_token(token, index + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_mixed_formats() {
        let content = "# exported from wallet\n\
                       1700000000\n\
                       \n\
                       2024-06-01T08:30:00+02:00  # local time, converted to UTC\n";
        let stamps = parse_timestamps(content).unwrap();
        assert_eq!(stamps.len(), 2);
        assert_eq!(stamps[0].instant().hour(), 22);
        assert_eq!(stamps[1].instant().hour(), 6);
        assert_eq!(stamps[1].fractional_hour(), 6.5);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_timestamps("").unwrap(), vec![]);
        assert_eq!(parse_timestamps("# nothing\n\n").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_unparseable_reports_line() {
        assert_eq!(
            parse_timestamps("1700000000\nyesterday\n"),
            Err(InputError::Unparseable {
                line: 2,
                value: "yesterday".to_string()
            })
        );
    }

    #[test]
    fn test_parse_out_of_range() {
        let content = format!("{}\n", i64::MAX);
        assert_eq!(
            parse_timestamps(&content),
            Err(InputError::OutOfRange {
                line: 1,
                value: i64::MAX
            })
        );
    }
}
