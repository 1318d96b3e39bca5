//! Run configuration.
//!
//! Every convention that changes the numbers produced by a run is an explicit
//! field here: how periodic returns are annualized, how a lookback in years
//! maps to price rows, and whether the target return is a floor or an
//! equality.

use serde::{Deserialize, Serialize};

use crate::error::{FrontierError, Result};
use crate::frontier::table::DEFAULT_DEDUP_TOLERANCE;
use crate::solver::Settings;

/// How the mean periodic return is converted to an annual figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnualizationMode {
    /// `mean * periods_per_year`.
    #[default]
    Simple,
    /// `(1 + mean)^periods_per_year - 1`.
    Compounded,
}

impl AnnualizationMode {
    /// Annualize a mean periodic return.
    pub fn annualize(self, mean: f64, periods_per_year: u32) -> f64 {
        match self {
            AnnualizationMode::Simple => mean * f64::from(periods_per_year),
            AnnualizationMode::Compounded => {
                (1.0 + mean).powf(f64::from(periods_per_year)) - 1.0
            }
        }
    }
}

/// How a lookback expressed in years maps to a number of price rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowConvention {
    /// `years * periods_per_year` price rows, one return fewer than that.
    #[default]
    Exact,
    /// `years * periods_per_year + 1` price rows, so the window holds a full
    /// year's worth of returns per year.
    Inclusive,
}

impl WindowConvention {
    /// Number of price rows covered by `years`.
    pub fn price_rows(self, years: u32, periods_per_year: u32) -> usize {
        let rows = years as usize * periods_per_year as usize;
        match self {
            WindowConvention::Exact => rows,
            WindowConvention::Inclusive => rows + 1,
        }
    }
}

/// Form of the per-target return constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnConstraint {
    /// `r'w >= target`.
    #[default]
    AtLeast,
    /// `r'w == target`.
    Exactly,
}

/// What to do with returns that are NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFinitePolicy {
    /// Fail the run with [`FrontierError::NonFiniteReturn`].
    #[default]
    Reject,
    /// Drop every period that has a non-finite return in any asset.
    DropRows,
}

/// Configuration for a frontier run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontierConfig {
    /// Return annualization convention.
    pub annualization: AnnualizationMode,
    /// Lookback window convention.
    pub window: WindowConvention,
    /// Per-target return constraint.
    pub return_constraint: ReturnConstraint,
    /// Handling of undefined returns.
    pub non_finite: NonFinitePolicy,
    /// Observations per year (12 for monthly data).
    pub periods_per_year: u32,
    /// Number of target returns in the sweep.
    pub num_points: usize,
    /// Absolute tolerance for collapsing duplicate (return, variance) pairs.
    /// Zero removes exact duplicates only.
    pub dedup_tolerance: f64,
    /// Solve the targets on the rayon pool.
    pub parallel: bool,
    /// Solver settings shared by every target.
    pub solver: Settings,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        FrontierConfig {
            annualization: AnnualizationMode::default(),
            window: WindowConvention::default(),
            return_constraint: ReturnConstraint::default(),
            non_finite: NonFinitePolicy::default(),
            periods_per_year: 12,
            num_points: 10,
            dedup_tolerance: DEFAULT_DEDUP_TOLERANCE,
            parallel: false,
            solver: Settings::default(),
        }
    }
}

impl FrontierConfig {
    pub fn with_annualization(mut self, mode: AnnualizationMode) -> Self {
        self.annualization = mode;
        self
    }

    pub fn with_window(mut self, window: WindowConvention) -> Self {
        self.window = window;
        self
    }

    pub fn with_return_constraint(mut self, constraint: ReturnConstraint) -> Self {
        self.return_constraint = constraint;
        self
    }

    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    pub fn with_dedup_tolerance(mut self, tolerance: f64) -> Self {
        self.dedup_tolerance = tolerance;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_solver(mut self, settings: Settings) -> Self {
        self.solver = settings;
        self
    }

    /// Check that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.periods_per_year == 0 {
            return Err(FrontierError::InvalidConfig(
                "periods_per_year must be positive".into(),
            ));
        }
        if self.num_points == 0 {
            return Err(FrontierError::InvalidConfig(
                "num_points must be positive".into(),
            ));
        }
        if !self.dedup_tolerance.is_finite() || self.dedup_tolerance < 0.0 {
            return Err(FrontierError::InvalidConfig(format!(
                "dedup_tolerance must be a non-negative number, got {}",
                self.dedup_tolerance
            )));
        }
        if self.solver.max_iter == 0 {
            return Err(FrontierError::InvalidConfig(
                "solver.max_iter must be positive".into(),
            ));
        }
        Ok(())
    }
}
