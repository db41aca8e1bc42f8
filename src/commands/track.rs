//! Track command - fetch each configured symbol and summarize its regime
//!
//! Symbols are fetched as independent pipelines on the runtime; a failed
//! symbol degrades to a per-symbol error block and never aborts the others.

use anyhow::Result;
use serde::Serialize;
use tracing::{error, info};

use sma200_tracker::{
    compute_signals, count_holding_days, fetch_daily_series, last_switch_date, SheetCsvSource,
    SignalPoint, Symbol, TrackerConfig,
};

use super::{action_label, state_label};

/// Everything a consumer needs to render one symbol's current standing
#[derive(Debug, Serialize)]
struct SymbolSummary {
    symbol: Symbol,
    latest: Option<SignalPoint>,
    last_switch_date: Option<String>,
    holding_days: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(symbols: String, json: bool) -> Result<()> {
    let symbols: Vec<Symbol> = symbols
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(Symbol::new)
        .collect();

    let config = TrackerConfig::from_env(&symbols);
    let source = SheetCsvSource::new(config)?;

    info!("Tracking {} symbols", symbols.len());

    let rt = tokio::runtime::Runtime::new()?;
    let summaries = rt.block_on(async {
        let mut handles = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let source = source.clone();
            handles.push(tokio::spawn(
                async move { derive_summary(&source, symbol).await },
            ));
        }

        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            summaries.push(handle.await?);
        }
        Ok::<_, anyhow::Error>(summaries)
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print_summaries(&summaries);
    }

    Ok(())
}

async fn derive_summary(source: &SheetCsvSource, symbol: Symbol) -> SymbolSummary {
    match fetch_daily_series(source, &symbol).await {
        Ok(payload) => {
            let points = compute_signals(&payload.bars);
            SymbolSummary {
                latest: points.last().cloned(),
                last_switch_date: last_switch_date(&points).map(str::to_string),
                holding_days: count_holding_days(&points),
                symbol,
                error: None,
            }
        }
        Err(e) => {
            error!("{}: {:#}", symbol, e);
            SymbolSummary {
                symbol,
                latest: None,
                last_switch_date: None,
                holding_days: 0,
                error: Some(format!("{:#}", e)),
            }
        }
    }
}

fn print_summaries(summaries: &[SymbolSummary]) {
    println!("\n{}", "=".repeat(60));
    println!("SMA200 RISK REGIME SUMMARY");
    println!("{}", "=".repeat(60));

    for summary in summaries {
        println!("\n{}:", summary.symbol);

        if let Some(error) = &summary.error {
            println!("  Data unavailable: {}", error);
            continue;
        }

        let Some(latest) = &summary.latest else {
            println!("  No data available");
            continue;
        };

        println!("  State:        {}", state_label(latest.state));
        println!("  Latest close: {:.2}", latest.close);
        match latest.sma200 {
            Some(sma200) => println!("  SMA200:       {:.2}", sma200),
            None => println!("  SMA200:       n/a"),
        }
        println!("  Last action:  {}", action_label(latest.action));
        println!(
            "  Last switch:  {}",
            summary.last_switch_date.as_deref().unwrap_or("none")
        );
        println!("  Holding days: {}", summary.holding_days);
        println!("  As of:        {}", latest.date);
    }

    println!();
}
