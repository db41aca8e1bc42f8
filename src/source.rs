//! Series sources
//!
//! The parser, engine, and summary queries never touch a transport. Anything
//! that can produce raw CSV text for a symbol satisfies [`SeriesSource`]; the
//! HTTP implementation here fetches published spreadsheet CSVs, and test
//! suites substitute an in-memory stub.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use tracing::{debug, info};

use crate::config::TrackerConfig;
use crate::data::parse_series_csv;
use crate::{SeriesPayload, Symbol};

/// Minimum bars required before a symbol's data is considered usable.
/// This is a caller-side policy, not a parser rule.
pub const MIN_BARS: usize = 5;

/// HTTP request timeout
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Capability interface: given a symbol, produce raw CSV text or fail.
#[allow(async_fn_in_trait)]
pub trait SeriesSource {
    async fn fetch_raw_csv(&self, symbol: &Symbol) -> Result<String>;
}

/// Fetches published-CSV exports (e.g. Google Sheets "publish to web" URLs)
/// over HTTP, one configured URL per symbol.
#[derive(Debug, Clone)]
pub struct SheetCsvSource {
    client: Client,
    config: TrackerConfig,
}

impl SheetCsvSource {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(SheetCsvSource { client, config })
    }
}

impl SeriesSource for SheetCsvSource {
    async fn fetch_raw_csv(&self, symbol: &Symbol) -> Result<String> {
        let Some(url) = self.config.csv_url(symbol) else {
            bail!(
                "Missing CSV URL configuration for {} (set {})",
                symbol,
                TrackerConfig::env_var_name(symbol)
            );
        };

        debug!("Fetching CSV for {}", symbol);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context(format!("Request failed for {}", symbol))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {} fetching CSV for {}", status, symbol);
        }

        response
            .text()
            .await
            .context(format!("Failed to read CSV body for {}", symbol))
    }
}

/// Fetch, parse, and validate one symbol's daily series.
///
/// Structural parse errors and transport errors bubble up unmodified; fewer
/// than [`MIN_BARS`] resulting bars is rejected here as a policy error so that
/// downstream signal computation is always meaningful.
pub async fn fetch_daily_series<S: SeriesSource>(
    source: &S,
    symbol: &Symbol,
) -> Result<SeriesPayload> {
    let text = source
        .fetch_raw_csv(symbol)
        .await
        .context(format!("Failed to fetch data for {}", symbol))?;

    let bars =
        parse_series_csv(&text).context(format!("Failed to parse series for {}", symbol))?;

    if bars.len() < MIN_BARS {
        bail!(
            "Insufficient data for {}: expected at least {} bars, got {}",
            symbol,
            MIN_BARS,
            bars.len()
        );
    }

    info!("Loaded {} bars for {}", bars.len(), symbol);
    Ok(SeriesPayload {
        symbol: symbol.clone(),
        bars,
    })
}
