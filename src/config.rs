//! Configuration management
//!
//! Each tracked symbol maps to one published-CSV source URL, supplied through
//! the environment as `{SYMBOL}_CSV_URL` (e.g. `QQQ_CSV_URL`). A `.env` file is
//! honored when present. A symbol without a configured URL is not a startup
//! error; the fetch for that symbol fails with a descriptive message instead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Per-symbol CSV source URLs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub sources: HashMap<Symbol, String>,
}

impl TrackerConfig {
    /// Collect source URLs from the environment for the given symbols.
    /// Missing variables are simply left unconfigured.
    pub fn from_env(symbols: &[Symbol]) -> Self {
        let mut sources = HashMap::new();
        for symbol in symbols {
            let var = Self::env_var_name(symbol);
            if let Ok(url) = std::env::var(&var) {
                sources.insert(symbol.clone(), url);
            }
        }
        TrackerConfig { sources }
    }

    /// Environment variable holding a symbol's CSV URL
    pub fn env_var_name(symbol: &Symbol) -> String {
        format!("{}_CSV_URL", symbol.as_str().to_uppercase())
    }

    pub fn csv_url(&self, symbol: &Symbol) -> Option<&str> {
        self.sources.get(symbol).map(|s| s.as_str())
    }

    /// Add or replace a source URL (used by tests and programmatic callers)
    pub fn with_source(mut self, symbol: Symbol, url: impl Into<String>) -> Self {
        self.sources.insert(symbol, url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_name_uppercased() {
        assert_eq!(
            TrackerConfig::env_var_name(&Symbol::new("qqq")),
            "QQQ_CSV_URL"
        );
    }

    #[test]
    fn test_with_source_and_lookup() {
        let config = TrackerConfig::default()
            .with_source(Symbol::new("SPY"), "https://example.com/spy.csv");

        assert_eq!(
            config.csv_url(&Symbol::new("SPY")),
            Some("https://example.com/spy.csv")
        );
        assert_eq!(config.csv_url(&Symbol::new("QQQ")), None);
    }
}
