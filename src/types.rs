//! Core data types used across the tracker

use serde::{Deserialize, Serialize};

/// Tracked market symbol (e.g., "QQQ", "SPY")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Symbol(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One trading day's closing price and, when the upstream source had at least
/// 200 days of history, its 200-day simple moving average.
///
/// `date` is always the canonical fixed-width `YYYY-MM-DD` form, which makes
/// lexicographic ordering chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: String,
    pub close: f64,
    pub sma200: Option<f64>,
}

/// Risk regime derived from a bar's close relative to its SMA200
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegimeState {
    /// SMA200 not yet available for that day
    Unknown,
    /// Close strictly above SMA200
    RiskOn,
    /// Close at or below SMA200 (equality is OFF, not a tie state)
    RiskOff,
}

/// Transition annotation for one day, relative to the previous day's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalAction {
    /// First bar in the sequence; no prior state to compare against
    None,
    /// RiskOff yesterday, RiskOn today
    Enter,
    /// RiskOn yesterday, RiskOff today
    Exit,
    /// Everything else, including any transition touching Unknown
    Hold,
}

/// A bar annotated with its derived state and transition action.
/// Sequences of points are chronological ascending and never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPoint {
    pub date: String,
    pub close: f64,
    pub sma200: Option<f64>,
    pub state: RegimeState,
    pub action: SignalAction,
}

/// Result of fetching and parsing one symbol's daily series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPayload {
    pub symbol: Symbol,
    pub bars: Vec<Bar>,
}
