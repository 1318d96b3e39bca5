//! Efficient Frontier Example
//!
//! Builds the frontier for three asset classes from ten years of synthetic
//! monthly prices:
//!
//! minimize    w' Σ w                (minimize risk)
//! subject to  r' w >= target        (minimum return)
//!             sum(w) = 1            (fully invested)
//!             w >= 0                (long-only)
//!
//! Run with `RUST_LOG=mvfrontier=debug` to see each solve.

use chrono::NaiveDate;
use mvfrontier::prelude::*;
use tracing_subscriber::EnvFilter;

fn synthetic_prices(months: usize) -> Result<PriceTable> {
    let drift: [f64; 6] = [0.008, 0.003, 0.005, 0.004, 0.006, 0.009];
    let swing = [0.05, 0.01, 0.06, 0.015, 0.035, 0.07];
    let freq = [0.8, 1.7, 0.45, 1.2, 0.6, 0.95];

    let periods = (0..months)
        .map(|i| {
            NaiveDate::from_ymd_opt(2014 + (i / 12) as i32, (i % 12) as u32 + 1, 1)
                .ok_or_else(|| FrontierError::MalformedInput(format!("bad month {}", i)))
        })
        .collect::<Result<Vec<_>>>()?;
    let assets = AssetClass::ALL.iter().map(|a| a.name().to_string()).collect();
    let rows = (0..months)
        .map(|i| {
            let t = i as f64;
            (0..6)
                .map(|j| {
                    100.0 * (1.0 + drift[j]).powf(t) * (1.0 + swing[j] * (freq[j] * t).sin())
                })
                .collect()
        })
        .collect();

    PriceTable::from_rows(periods, assets, rows)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Efficient Frontier ===\n");

    let prices = synthetic_prices(120)?;
    let selection = AssetSelection::parse(&["S&P 500", "Fixed Income", "Gold"])?;
    let lookback_years = 5;

    let report = FrontierEngine::new(FrontierConfig::default())?.run(
        &prices,
        &selection,
        lookback_years,
    )?;

    println!("Assets: {}", selection.names().join(", "));
    println!(
        "Lookback: {} years ({} monthly returns)\n",
        lookback_years,
        report.statistics.observations()
    );

    println!("Annualized statistics:");
    let vols = report.statistics.volatilities();
    for (i, asset) in report.statistics.assets().iter().enumerate() {
        println!(
            "  {:<14} return {:>6.2}%  volatility {:>6.2}%",
            asset,
            report.statistics.expected_returns()[i] * 100.0,
            vols[i] * 100.0
        );
    }

    for skipped in report.sweep.skipped() {
        println!(
            "  skipped target {:.2}%: {:?}",
            skipped.target * 100.0,
            skipped.outcome
        );
    }

    println!("\n--- Efficient Frontier ---\n");

    let columns = report.table.columns();
    print!("{:<14}", "");
    for c in &columns {
        print!("{:>24}", c);
    }
    println!();

    for row in &report.table.rows {
        print!("{:<14}", row.label);
        for w in &row.weights {
            print!("{:>24.2}", w);
        }
        println!("{:>24.2}{:>24.2}", row.expected_return, row.std_dev);
    }

    println!("\n--- Risk / Return ---\n");
    for (label, risk, ret) in report.table.scatter_points() {
        println!("  {:<14} risk {:>6.2}%  →  return {:>6.2}%", label, risk, ret);
    }

    Ok(())
}
