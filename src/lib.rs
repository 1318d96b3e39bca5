//! # mvfrontier
//!
//! Mean-variance efficient frontiers from monthly price history.
//!
//! Given prices for a selection of asset classes, mvfrontier derives
//! annualized expected returns and covariance, then solves one long-only,
//! fully invested minimum-variance problem per target return with the
//! Clarabel solver.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mvfrontier::prelude::*;
//!
//! let prices = PriceTable::from_rows(periods, assets, rows)?;
//! let selection = AssetSelection::parse(&["S&P 500", "Fixed Income", "Gold"])?;
//!
//! let report = FrontierEngine::new(FrontierConfig::default())?
//!     .run(&prices, &selection, 5)?;
//!
//! for row in &report.table.rows {
//!     println!("{}: {:.2}% @ {:.2}%", row.label, row.expected_return, row.std_dev);
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Returns**: `(p[t] - p[t-1]) / p[t-1]`, first period dropped
//! - **Statistics**: mean return and sample covariance, both annualized
//! - **Sweep**: for each target `t` in an evenly spaced grid over
//!   `[min(r), max(r)]`:
//!
//! ```text
//! minimize    w' Σ w
//! subject to  w >= 0,  sum(w) = 1,  r'w >= t
//! ```
//!
//! - **Table**: duplicates dropped, values in percent, rows labeled
//!   "Portfolio N"
//!
//! Targets that no portfolio can reach are skipped, not reported as errors.

pub mod config;
pub mod data;
pub mod error;
pub mod frontier;
pub mod pipeline;
pub mod solver;
pub mod sparse;
pub mod stats;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use mvfrontier::prelude::*;
/// ```
pub mod prelude {
    // Configuration
    pub use crate::config::{
        AnnualizationMode, FrontierConfig, NonFinitePolicy, ReturnConstraint, WindowConvention,
    };

    // Data
    pub use crate::data::{AssetClass, AssetSelection, PriceTable, ReturnTable};

    // Statistics
    pub use crate::stats::AssetStatistics;

    // Frontier
    pub use crate::frontier::{
        FrontierOptimizer, FrontierRow, FrontierSweep, FrontierTable, MinVarianceProblem,
        PointOutcome, PortfolioPoint, TargetOutcome, TargetReturnGrid,
    };

    // Pipeline
    pub use crate::pipeline::{FrontierEngine, FrontierReport};

    // Solver
    pub use crate::solver::{Settings, Solution, SolveStatus};

    // Errors
    pub use crate::error::{FrontierError, Result};
}

// Re-export main types at crate root
pub use error::{FrontierError, Result};
pub use pipeline::{FrontierEngine, FrontierReport};
