//! Snapshot loading
//!
//! Parses the scraped stock-data snapshot produced by the companion fetch
//! script. The file is a single JSON object:
//!
//! ```json
//! {
//!   "stock_data": {
//!     "AAPL": {"symbol": "AAPL", "shortName": "Apple Inc.", "logo_url": "https://..."},
//!     ...
//!   }
//! }
//! ```
//!
//! Rows missing any of symbol, shortName, or logo_url are dropped, matching
//! the scraper's loose guarantees. Records come out in ticker order, which is
//! the "original order" used for distance tie-breaking downstream.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{RecommendError, Result};
use crate::LogoRecord;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    stock_data: BTreeMap<String, serde_json::Value>,
}

/// Load the snapshot file into descriptor-less records.
///
/// # Errors
///
/// Returns `RecommendError::Snapshot` if the file cannot be read, is not
/// valid JSON, or lacks the `stock_data` key. Incomplete rows are skipped,
/// not errors.
pub fn load(path: &Path) -> Result<Vec<LogoRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        RecommendError::snapshot(format!("cannot read snapshot {}", path.display()), e)
    })?;

    let file: SnapshotFile = serde_json::from_str(&content).map_err(|e| {
        RecommendError::snapshot(format!("malformed snapshot {}", path.display()), e)
    })?;

    let total = file.stock_data.len();
    let records: Vec<LogoRecord> = file
        .stock_data
        .into_iter()
        .filter_map(|(ticker, row)| match parse_row(&row) {
            Some((symbol, name, logo_url)) => Some(LogoRecord {
                ticker: symbol,
                name,
                logo_url,
                descriptor: None,
            }),
            None => {
                debug!(ticker = %ticker, "skipping incomplete snapshot row");
                None
            }
        })
        .collect();

    info!(
        total,
        usable = records.len(),
        "loaded snapshot {}",
        path.display()
    );
    Ok(records)
}

/// Extract (symbol, shortName, logo_url) if all three are non-empty strings
fn parse_row(row: &serde_json::Value) -> Option<(String, String, String)> {
    let symbol = nonempty_str(row.get("symbol")?)?;
    let name = nonempty_str(row.get("shortName")?)?;
    let logo_url = nonempty_str(row.get("logo_url")?)?;
    Some((symbol, name, logo_url))
}

fn nonempty_str(value: &serde_json::Value) -> Option<String> {
    let s = value.as_str()?;
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_snapshot(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_snapshot() {
        let file = write_snapshot(
            r#"{"stock_data": {
                "MSFT": {"symbol": "MSFT", "shortName": "Microsoft", "logo_url": "http://x/msft.png"},
                "AAPL": {"symbol": "AAPL", "shortName": "Apple Inc.", "logo_url": "http://x/aapl.png"}
            }}"#,
        );

        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        // Ticker order
        assert_eq!(records[0].ticker, "AAPL");
        assert_eq!(records[1].ticker, "MSFT");
        assert_eq!(records[0].name, "Apple Inc.");
        assert!(records[0].descriptor.is_none());
    }

    #[test]
    fn test_incomplete_rows_are_dropped() {
        let file = write_snapshot(
            r#"{"stock_data": {
                "AAPL": {"symbol": "AAPL", "shortName": "Apple Inc.", "logo_url": "http://x/aapl.png"},
                "NOLOGO": {"symbol": "NOLOGO", "shortName": "No Logo Corp", "logo_url": null},
                "EMPTY": {"symbol": "EMPTY", "shortName": "Empty Corp", "logo_url": ""},
                "BARE": {}
            }}"#,
        );

        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ticker, "AAPL");
    }

    #[test]
    fn test_empty_snapshot_yields_empty_list() {
        let file = write_snapshot(r#"{"stock_data": {}}"#);
        let records = load(file.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_stock_data_key_is_fatal() {
        let file = write_snapshot(r#"{"prices": {}}"#);
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, RecommendError::Snapshot { .. }));
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        let file = write_snapshot("not json at all");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, RecommendError::Snapshot { .. }));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load(Path::new("does_not_exist.json")).unwrap_err();
        assert!(matches!(err, RecommendError::Snapshot { .. }));
    }
}
