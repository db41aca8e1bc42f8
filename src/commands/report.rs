//! Report command - parse a local CSV and print the annotated signal series

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use sma200_tracker::{
    compute_signals, count_holding_days, last_switch_date, parse_series_csv, SignalPoint,
};

use super::{action_label, state_label};

#[derive(Debug, Serialize)]
struct Report {
    points: Vec<SignalPoint>,
    last_switch_date: Option<String>,
    holding_days: usize,
}

pub fn run(file: PathBuf, json: bool, out: Option<PathBuf>) -> Result<()> {
    let text = std::fs::read_to_string(&file)
        .context(format!("Failed to read {}", file.display()))?;

    let bars = parse_series_csv(&text)?;
    let points = compute_signals(&bars);

    let report = Report {
        last_switch_date: last_switch_date(&points).map(str::to_string),
        holding_days: count_holding_days(&points),
        points,
    };

    if let Some(out) = &out {
        write_signal_csv(out, &report.points)?;
        info!("Wrote {} annotated rows to {}", report.points.len(), out.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }

    Ok(())
}

/// Write the annotated series back out as CSV. The output header contains the
/// parser's required columns, so the file round-trips through `report` again.
fn write_signal_csv(path: &Path, points: &[SignalPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .context(format!("Failed to create {}", path.display()))?;

    for point in points {
        writer.serialize(point)?;
    }
    writer.flush()?;

    Ok(())
}

fn print_table(report: &Report) {
    println!("\n{:<12} {:>10} {:>10}  {:<9} {:<6}", "DATE", "CLOSE", "SMA200", "STATE", "ACTION");
    println!("{}", "-".repeat(52));

    for point in &report.points {
        let sma200 = point
            .sma200
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{:<12} {:>10.2} {:>10}  {:<9} {:<6}",
            point.date,
            point.close,
            sma200,
            state_label(point.state),
            action_label(point.action)
        );
    }

    println!("{}", "-".repeat(52));
    println!(
        "Last switch: {}   Holding days: {}",
        report.last_switch_date.as_deref().unwrap_or("none"),
        report.holding_days
    );
    println!();
}
