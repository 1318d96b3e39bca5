//! End-to-end frontier runs.
//!
//! prices -> returns -> statistics -> sweep -> table. Every stage returns a
//! new value; nothing is cached between runs.

use crate::config::{FrontierConfig, NonFinitePolicy};
use crate::data::{AssetSelection, PriceTable, ReturnTable};
use crate::error::Result;
use crate::frontier::{
    FrontierOptimizer, FrontierSweep, FrontierTable, PortfolioPoint, TargetReturnGrid,
};
use crate::stats::AssetStatistics;

/// Everything produced by one run.
#[derive(Debug, Clone)]
pub struct FrontierReport {
    /// Annualized statistics the frontier was built from.
    pub statistics: AssetStatistics,
    /// Target returns swept.
    pub grid: TargetReturnGrid,
    /// Per-target solver outcomes.
    pub sweep: FrontierSweep,
    /// Deduplicated, labeled frontier.
    pub table: FrontierTable,
}

impl FrontierReport {
    /// Optimal points in sweep order, before deduplication.
    pub fn points(&self) -> Vec<&PortfolioPoint> {
        self.sweep.points()
    }

    /// No target produced an optimal point.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Runs the frontier pipeline under one configuration.
#[derive(Debug, Clone)]
pub struct FrontierEngine {
    config: FrontierConfig,
}

impl FrontierEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: FrontierConfig) -> Result<Self> {
        config.validate()?;
        Ok(FrontierEngine { config })
    }

    pub fn config(&self) -> &FrontierConfig {
        &self.config
    }

    /// Build the frontier for the selected assets over the last
    /// `lookback_years` of the price history.
    pub fn run(
        &self,
        prices: &PriceTable,
        selection: &AssetSelection,
        lookback_years: u32,
    ) -> Result<FrontierReport> {
        let window = prices.select(&selection.names())?.lookback(
            lookback_years,
            self.config.window,
            self.config.periods_per_year,
        )?;

        tracing::info!(
            assets = ?selection.names(),
            lookback_years,
            rows = window.nrows(),
            "running frontier"
        );

        self.run_on_returns(&ReturnTable::from_prices(&window))
    }

    /// Build the frontier from periodic returns.
    pub fn run_on_returns(&self, returns: &ReturnTable) -> Result<FrontierReport> {
        let statistics = match self.config.non_finite {
            NonFinitePolicy::Reject => AssetStatistics::estimate(
                returns,
                self.config.annualization,
                self.config.periods_per_year,
            )?,
            NonFinitePolicy::DropRows => AssetStatistics::estimate(
                &returns.drop_non_finite_rows(),
                self.config.annualization,
                self.config.periods_per_year,
            )?,
        };

        self.run_on_statistics(statistics)
    }

    /// Build the frontier from annualized statistics.
    pub fn run_on_statistics(&self, statistics: AssetStatistics) -> Result<FrontierReport> {
        let grid = TargetReturnGrid::from_expected_returns(
            statistics.expected_returns(),
            self.config.num_points,
        )?;

        let sweep = FrontierOptimizer::from_config(&self.config).sweep(
            &grid,
            statistics.covariance(),
            statistics.expected_returns(),
        )?;

        let points: Vec<PortfolioPoint> = sweep.points().into_iter().cloned().collect();
        let table = FrontierTable::from_points(
            &points,
            statistics.assets(),
            self.config.dedup_tolerance,
        )?;

        if table.is_empty() {
            tracing::warn!("no target return produced an optimal portfolio");
        }

        Ok(FrontierReport {
            statistics,
            grid,
            sweep,
            table,
        })
    }
}
