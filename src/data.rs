//! Series parsing
//!
//! Turns raw CSV-like text for one symbol into a deduplicated collection of
//! daily bars, returned sorted ascending by date. Handles the quirks of
//! spreadsheet exports: byte-order marks, CRLF line endings, blank lines, and
//! metadata rows preceding the real header.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use thiserror::Error;
use tracing::{debug, warn};

use crate::Bar;

/// Required column names, matched case-insensitively in any order
pub const REQUIRED_COLUMNS: [&str; 3] = ["date", "close", "sma200"];

/// The header row must appear within the first this-many lines
pub const HEADER_SCAN_WINDOW: usize = 10;

/// Structural parse failures. Row-level defects are never errors; each has a
/// local policy (skip the row, or null out the optional field).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CSV must contain at least a header row and one data row")]
    TooFewLines,

    #[error(
        "no header containing required columns [{}] found within the first {} lines; scanned: [{}]",
        .required.join(", "),
        .window,
        .scanned.join("; ")
    )]
    HeaderNotFound {
        required: Vec<String>,
        window: usize,
        scanned: Vec<String>,
    },
}

/// Column indices bound by the detected header row
struct HeaderLayout {
    line_idx: usize,
    date_col: usize,
    close_col: usize,
    sma200_col: usize,
}

/// Parse raw CSV text into bars: one per unique date, sorted ascending.
///
/// Rows sharing a date collapse to the occurrence appearing last in the input.
/// A row is silently skipped when its date or close is missing or malformed;
/// a missing or malformed sma200 only nulls that field.
pub fn parse_series_csv(text: &str) -> Result<Vec<Bar>, ParseError> {
    let text = strip_bom(text).replace("\r\n", "\n");
    let text = text.trim();

    let mut lines: Vec<&str> = text.lines().collect();
    if lines.len() < 2 {
        return Err(ParseError::TooFewLines);
    }
    // Defensive double-strip: some exports carry a BOM that survives the
    // initial pass when metadata precedes the header.
    lines[0] = strip_bom(lines[0]);

    let layout = detect_header(&lines)?;

    let mut bars: BTreeMap<String, Bar> = BTreeMap::new();
    let mut skipped = 0usize;
    let max_col = layout.date_col.max(layout.close_col).max(layout.sma200_col);

    let data = lines[layout.line_idx + 1..].join("\n");
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data.as_bytes());

    for (row_idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                debug!("Skipping unreadable row {}: {}", row_idx + 1, e);
                skipped += 1;
                continue;
            }
        };

        // A short row is skipped outright, even when only the optional column
        // is the one cut off.
        if record.len() <= max_col {
            debug!("Skipping row {}: {} columns, need {}", row_idx + 1, record.len(), max_col + 1);
            skipped += 1;
            continue;
        }

        let Some(date) = record.get(layout.date_col).and_then(normalize_date) else {
            debug!("Skipping row {}: missing or invalid date", row_idx + 1);
            skipped += 1;
            continue;
        };

        let Some(close) = record.get(layout.close_col).and_then(parse_decimal) else {
            debug!("Skipping row {} ({}): missing or invalid close", row_idx + 1, date);
            skipped += 1;
            continue;
        };

        let sma200 = record.get(layout.sma200_col).and_then(parse_decimal);

        // Later occurrences of a date replace earlier ones entirely.
        bars.insert(date.clone(), Bar { date, close, sma200 });
    }

    if skipped > 0 {
        warn!("Skipped {} malformed rows out of {}", skipped, skipped + bars.len());
    }

    Ok(bars.into_values().collect())
}

/// Scan the first [`HEADER_SCAN_WINDOW`] lines for a row containing all
/// required column names (any order, any casing) and bind their positions.
fn detect_header(lines: &[&str]) -> Result<HeaderLayout, ParseError> {
    let window = lines.len().min(HEADER_SCAN_WINDOW);
    let mut scanned = Vec::with_capacity(window);

    for (line_idx, line) in lines[..window].iter().enumerate() {
        let fields: Vec<String> = line
            .split(',')
            .map(|f| f.trim().to_lowercase())
            .collect();

        let position = |name: &str| fields.iter().position(|f| f.as_str() == name);
        if let (Some(date_col), Some(close_col), Some(sma200_col)) =
            (position("date"), position("close"), position("sma200"))
        {
            return Ok(HeaderLayout {
                line_idx,
                date_col,
                close_col,
                sma200_col,
            });
        }

        scanned.push(format!("line {}: [{}]", line_idx, fields.join(", ")));
    }

    Err(ParseError::HeaderNotFound {
        required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        window: HEADER_SCAN_WINDOW,
        scanned,
    })
}

fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}

/// Accept `YYYY-MM-DD` or `YYYY/MM/DD` (fixed-width, real calendar date) and
/// return the canonical dash form used as the dedup key.
fn normalize_date(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let sep = bytes[4];
    if (sep != b'-' && sep != b'/') || bytes[7] != sep {
        return None;
    }

    let canonical = raw.replace('/', "-");
    NaiveDate::parse_from_str(&canonical, "%Y-%m-%d").ok()?;
    Some(canonical)
}

fn parse_decimal(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
