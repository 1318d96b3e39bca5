//! Frontier sweep.
//!
//! Solves one [`MinVarianceProblem`] per target return. Each solve is
//! independent of the others, so the sweep may run on the rayon pool without
//! changing its output.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::grid::TargetReturnGrid;
use super::problem::{symmetrize, validate_inputs, MinVarianceProblem};
use crate::config::{FrontierConfig, ReturnConstraint};
use crate::error::Result;
use crate::solver::{Settings, SolveStatus};

/// An optimal portfolio for one target return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPoint {
    /// Target return the point was solved for.
    pub target: f64,
    /// Non-negative weights summing to one, in asset order.
    pub weights: DVector<f64>,
    /// Realized annual return `r'w`.
    pub expected_return: f64,
    /// Realized annual variance `w' Σ w`.
    pub variance: f64,
}

impl PortfolioPoint {
    /// Annualized standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance.max(0.0).sqrt()
    }
}

/// Result of solving a single target.
#[derive(Debug, Clone, PartialEq)]
pub enum PointOutcome {
    /// Solver reported an optimal solution.
    Solved(PortfolioPoint),
    /// No long-only, fully invested portfolio reaches the target.
    Infeasible,
    /// Solver stopped without an optimal solution.
    NotConverged(SolveStatus),
}

impl PointOutcome {
    pub fn point(&self) -> Option<&PortfolioPoint> {
        match self {
            PointOutcome::Solved(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, PointOutcome::Solved(_))
    }
}

/// Outcome for one target of the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetOutcome {
    pub target: f64,
    pub outcome: PointOutcome,
}

/// All per-target outcomes of a sweep, in sweep order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontierSweep {
    outcomes: Vec<TargetOutcome>,
}

impl FrontierSweep {
    pub fn outcomes(&self) -> &[TargetOutcome] {
        &self.outcomes
    }

    /// Optimal points in sweep order.
    pub fn points(&self) -> Vec<&PortfolioPoint> {
        self.outcomes.iter().filter_map(|o| o.outcome.point()).collect()
    }

    /// Consume the sweep, keeping optimal points in sweep order.
    pub fn into_points(self) -> Vec<PortfolioPoint> {
        self.outcomes
            .into_iter()
            .filter_map(|o| match o.outcome {
                PointOutcome::Solved(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Targets that produced no point.
    pub fn skipped(&self) -> Vec<&TargetOutcome> {
        self.outcomes.iter().filter(|o| !o.outcome.is_solved()).collect()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Solves the minimum-variance problem across a grid of target returns.
#[derive(Debug, Clone, Default)]
pub struct FrontierOptimizer {
    settings: Settings,
    constraint: ReturnConstraint,
    parallel: bool,
}

impl FrontierOptimizer {
    pub fn new(settings: Settings) -> Self {
        FrontierOptimizer {
            settings,
            ..Default::default()
        }
    }

    pub fn from_config(config: &FrontierConfig) -> Self {
        FrontierOptimizer {
            settings: config.solver.clone(),
            constraint: config.return_constraint,
            parallel: config.parallel,
        }
    }

    pub fn with_constraint(mut self, constraint: ReturnConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Solve a single target.
    ///
    /// Infeasibility and non-convergence are outcomes, not errors.
    pub fn solve_target(
        &self,
        covariance: &DMatrix<f64>,
        expected_returns: &DVector<f64>,
        target: f64,
    ) -> Result<PointOutcome> {
        let problem = MinVarianceProblem::new(covariance, expected_returns, target)?
            .with_constraint(self.constraint);
        self.solve_problem(&problem)
    }

    /// Solve every target of the grid.
    ///
    /// # Errors
    ///
    /// Fails as a whole on mismatched dimensions, non-finite inputs or
    /// rejected solver settings. Individual infeasible targets are recorded
    /// in the returned sweep.
    pub fn sweep(
        &self,
        grid: &TargetReturnGrid,
        covariance: &DMatrix<f64>,
        expected_returns: &DVector<f64>,
    ) -> Result<FrontierSweep> {
        validate_inputs(covariance, expected_returns)?;
        let covariance = symmetrize(covariance);

        let solve_one = |&target: &f64| -> Result<TargetOutcome> {
            let problem = MinVarianceProblem::from_symmetric(
                covariance.clone(),
                expected_returns.clone(),
                target,
            )
            .with_constraint(self.constraint);
            let outcome = self.solve_problem(&problem)?;
            Ok(TargetOutcome { target, outcome })
        };

        let outcomes = if self.parallel {
            grid.targets()
                .par_iter()
                .map(solve_one)
                .collect::<Result<Vec<_>>>()?
        } else {
            grid.targets()
                .iter()
                .map(solve_one)
                .collect::<Result<Vec<_>>>()?
        };

        let sweep = FrontierSweep { outcomes };
        tracing::info!(
            targets = sweep.len(),
            solved = sweep.points().len(),
            "frontier sweep finished"
        );
        Ok(sweep)
    }

    fn solve_problem(&self, problem: &MinVarianceProblem) -> Result<PointOutcome> {
        let solution = problem.solve_with(&self.settings)?;

        let weights = match (solution.status, solution.primal) {
            (SolveStatus::Optimal, Some(w)) => w,
            (SolveStatus::Infeasible, _) => {
                tracing::debug!(
                    target_return = problem.target(),
                    "target return infeasible, skipping"
                );
                return Ok(PointOutcome::Infeasible);
            }
            (status, _) => {
                tracing::warn!(
                    target_return = problem.target(),
                    ?status,
                    iterations = solution.iterations,
                    "solver did not reach an optimal solution, skipping"
                );
                return Ok(PointOutcome::NotConverged(status));
            }
        };

        let expected_return = problem.portfolio_return(&weights);
        let variance = problem.portfolio_variance(&weights);

        Ok(PointOutcome::Solved(PortfolioPoint {
            target: problem.target(),
            weights,
            expected_return,
            variance,
        }))
    }
}
