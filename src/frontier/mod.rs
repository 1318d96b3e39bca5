//! Efficient frontier construction.
//!
//! This module provides:
//! - The target return grid
//! - The single-target minimum-variance problem
//! - The sweep over all targets, with per-target outcomes
//! - The labeled, deduplicated presentation table

pub mod grid;
pub mod optimizer;
pub mod problem;
pub mod table;

pub use grid::TargetReturnGrid;
pub use optimizer::{FrontierOptimizer, FrontierSweep, PointOutcome, PortfolioPoint, TargetOutcome};
pub use problem::MinVarianceProblem;
pub use table::{FrontierRow, FrontierTable};
