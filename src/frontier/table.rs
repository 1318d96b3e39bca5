//! Presentation table for the efficient frontier.
//!
//! Turns raw [`PortfolioPoint`]s into labeled rows of percentages:
//!
//! | | `<asset> Weight (%)` ... | `Expected Return (%)` | `Standard Deviation (%)` |
//! |-|-|-|-|
//! | Portfolio 1 | ... | ... | ... |
//!
//! Duplicate (return, variance) pairs are dropped before labeling, keeping the
//! first occurrence in sweep order. Standard deviation is taken from the
//! unrounded variance; every displayed value is rounded to two decimals with
//! ties to even.

use serde::{Deserialize, Serialize};

use super::optimizer::PortfolioPoint;
use crate::error::{FrontierError, Result};

pub const EXPECTED_RETURN_COLUMN: &str = "Expected Return (%)";
pub const STD_DEV_COLUMN: &str = "Standard Deviation (%)";

/// Default absolute tolerance when comparing (return, variance) pairs.
pub const DEFAULT_DEDUP_TOLERANCE: f64 = 1e-8;

/// Scale a fraction to percent and round to two decimals.
pub fn percent(x: f64) -> f64 {
    (x * 100.0 * 100.0).round_ties_even() / 100.0
}

/// Column header for an asset's weight.
pub fn weight_column(asset: &str) -> String {
    format!("{} Weight (%)", asset)
}

/// Indices of the points that survive deduplication, in input order.
///
/// Two points are duplicates when both their returns and their variances
/// differ by at most `tolerance`. A tolerance of zero compares exactly.
pub fn dedup_indices(points: &[PortfolioPoint], tolerance: f64) -> Vec<usize> {
    let mut kept: Vec<usize> = Vec::with_capacity(points.len());

    for (i, p) in points.iter().enumerate() {
        let duplicate = kept.iter().any(|&k| {
            let q = &points[k];
            (p.expected_return - q.expected_return).abs() <= tolerance
                && (p.variance - q.variance).abs() <= tolerance
        });
        if !duplicate {
            kept.push(i);
        }
    }

    kept
}

/// One labeled portfolio of the frontier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierRow {
    /// "Portfolio N", 1-based in output order.
    pub label: String,
    /// Weight per asset in percent, in asset order.
    pub weights: Vec<f64>,
    /// Expected annual return in percent.
    pub expected_return: f64,
    /// Annual standard deviation in percent.
    pub std_dev: f64,
}

/// Efficient frontier ready for display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrontierTable {
    /// Asset names, one per weight column.
    pub assets: Vec<String>,
    /// Rows in sweep order.
    pub rows: Vec<FrontierRow>,
}

impl FrontierTable {
    /// Build the table from raw points.
    ///
    /// # Errors
    ///
    /// [`FrontierError::ShapeMismatch`] if a weight vector does not have one
    /// entry per asset.
    pub fn from_points(
        points: &[PortfolioPoint],
        assets: &[String],
        tolerance: f64,
    ) -> Result<Self> {
        if let Some(p) = points.iter().find(|p| p.weights.len() != assets.len()) {
            return Err(FrontierError::ShapeMismatch {
                expected: format!("{} weights", assets.len()),
                got: format!("{}", p.weights.len()),
            });
        }

        let kept = dedup_indices(points, tolerance);
        if kept.len() < points.len() {
            tracing::debug!(
                removed = points.len() - kept.len(),
                "dropped duplicate frontier points"
            );
        }

        let rows = kept
            .iter()
            .enumerate()
            .map(|(n, &i)| {
                let p = &points[i];
                FrontierRow {
                    label: format!("Portfolio {}", n + 1),
                    weights: p.weights.iter().map(|&w| percent(w)).collect(),
                    expected_return: percent(p.expected_return),
                    std_dev: percent(p.std_dev()),
                }
            })
            .collect();

        Ok(FrontierTable {
            assets: assets.to_vec(),
            rows,
        })
    }

    /// Column headers: one weight column per asset, then return and risk.
    pub fn columns(&self) -> Vec<String> {
        self.assets
            .iter()
            .map(|a| weight_column(a))
            .chain([
                EXPECTED_RETURN_COLUMN.to_string(),
                STD_DEV_COLUMN.to_string(),
            ])
            .collect()
    }

    /// (label, standard deviation %, expected return %) per row, for a
    /// risk/return scatter plot.
    pub fn scatter_points(&self) -> Vec<(&str, f64, f64)> {
        self.rows
            .iter()
            .map(|r| (r.label.as_str(), r.std_dev, r.expected_return))
            .collect()
    }

    pub fn row(&self, label: &str) -> Option<&FrontierRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
