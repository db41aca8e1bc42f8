//! SMA200 Tracker
//!
//! Derives a binary risk regime for a market symbol from its daily closing
//! prices relative to the 200-day simple moving average, annotates regime
//! transitions, and answers summary questions about the current streak.
//!
//! The pipeline is strictly one-directional:
//! raw CSV text -> bars (deduplicated, sorted) -> signal points -> summary scalars.
//!
//! # Example
//! ```
//! use sma200_tracker::{compute_signals, count_holding_days, last_switch_date, parse_series_csv};
//!
//! let csv = "date,close,sma200\n\
//!            2023-01-02,95.0,100.0\n\
//!            2023-01-03,101.0,100.0\n\
//!            2023-01-04,102.0,100.0";
//!
//! let bars = parse_series_csv(csv)?;
//! let points = compute_signals(&bars);
//! assert_eq!(last_switch_date(&points), Some("2023-01-03"));
//! assert_eq!(count_holding_days(&points), 2);
//! # Ok::<(), sma200_tracker::ParseError>(())
//! ```

pub mod config;
pub mod data;
pub mod signal;
pub mod source;
pub mod summary;
pub mod types;

pub use config::TrackerConfig;
pub use data::{parse_series_csv, ParseError, HEADER_SCAN_WINDOW, REQUIRED_COLUMNS};
pub use signal::{classify_state, compute_signals};
pub use source::{fetch_daily_series, SeriesSource, SheetCsvSource, MIN_BARS};
pub use summary::{count_holding_days, last_switch_date};
pub use types::*;
