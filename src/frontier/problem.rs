//! Single-target minimum-variance problem.
//!
//! ```text
//! minimize    w' Σ w
//! subject to  w >= 0
//!             sum(w) = 1
//!             r'w >= target     (or r'w = target)
//! ```
//!
//! ```ignore
//! let solution = MinVarianceProblem::new(&cov, &mu, 0.08)?
//!     .with_constraint(ReturnConstraint::AtLeast)
//!     .solve()?;
//! ```

use nalgebra::{DMatrix, DVector};

use crate::config::ReturnConstraint;
use crate::error::{FrontierError, Result};
use crate::solver::{solve, stuff_problem, Settings, Solution};

/// Largest asymmetry tolerated silently before symmetrizing.
const SYMMETRY_TOL: f64 = 1e-10;

/// Check dimensions and finiteness of optimizer inputs.
pub fn validate_inputs(covariance: &DMatrix<f64>, expected_returns: &DVector<f64>) -> Result<()> {
    let n = expected_returns.len();
    if n == 0 {
        return Err(FrontierError::MalformedInput("no assets to optimize".into()));
    }
    if covariance.shape() != (n, n) {
        return Err(FrontierError::ShapeMismatch {
            expected: format!("{}x{} covariance", n, n),
            got: format!("{}x{}", covariance.nrows(), covariance.ncols()),
        });
    }
    if expected_returns.iter().any(|v| !v.is_finite()) {
        return Err(FrontierError::MalformedInput(
            "expected returns contain non-finite values".into(),
        ));
    }
    if covariance.iter().any(|v| !v.is_finite()) {
        return Err(FrontierError::MalformedInput(
            "covariance contains non-finite values".into(),
        ));
    }
    Ok(())
}

/// `(Σ + Σ') / 2`, logging when the input drifted from symmetry.
pub fn symmetrize(covariance: &DMatrix<f64>) -> DMatrix<f64> {
    let asymmetry = (covariance - covariance.transpose()).amax();
    if asymmetry > SYMMETRY_TOL {
        tracing::warn!(asymmetry, "covariance matrix is not symmetric, symmetrizing");
    }
    (covariance + covariance.transpose()) * 0.5
}

/// Minimum-variance portfolio at one target return.
#[derive(Debug, Clone)]
pub struct MinVarianceProblem {
    covariance: DMatrix<f64>,
    expected_returns: DVector<f64>,
    target: f64,
    constraint: ReturnConstraint,
}

impl MinVarianceProblem {
    /// Create a problem with a return floor.
    ///
    /// # Errors
    ///
    /// [`FrontierError::ShapeMismatch`] or [`FrontierError::MalformedInput`]
    /// if the inputs cannot describe a portfolio problem.
    pub fn new(
        covariance: &DMatrix<f64>,
        expected_returns: &DVector<f64>,
        target: f64,
    ) -> Result<Self> {
        validate_inputs(covariance, expected_returns)?;
        if !target.is_finite() {
            return Err(FrontierError::MalformedInput(format!(
                "target return {} is not finite",
                target
            )));
        }

        Ok(MinVarianceProblem::from_symmetric(
            symmetrize(covariance),
            expected_returns.clone(),
            target,
        ))
    }

    /// Build from inputs that already passed [`validate_inputs`] and
    /// [`symmetrize`], with a finite target.
    pub(crate) fn from_symmetric(
        covariance: DMatrix<f64>,
        expected_returns: DVector<f64>,
        target: f64,
    ) -> Self {
        MinVarianceProblem {
            covariance,
            expected_returns,
            target,
            constraint: ReturnConstraint::AtLeast,
        }
    }

    /// Set the form of the return constraint.
    pub fn with_constraint(mut self, constraint: ReturnConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn constraint(&self) -> ReturnConstraint {
        self.constraint
    }

    /// Symmetrized covariance used by the objective.
    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.covariance
    }

    pub fn expected_returns(&self) -> &DVector<f64> {
        &self.expected_returns
    }

    pub fn num_assets(&self) -> usize {
        self.expected_returns.len()
    }

    /// Solve the problem with default settings.
    pub fn solve(&self) -> Result<Solution> {
        self.solve_with(&Settings::default())
    }

    /// Solve the problem with custom settings.
    pub fn solve_with(&self, settings: &Settings) -> Result<Solution> {
        let stuffed = stuff_problem(
            &self.covariance,
            &self.expected_returns,
            self.target,
            self.constraint,
        );
        solve(&stuffed, settings)
    }

    /// Portfolio return `r'w`.
    pub fn portfolio_return(&self, weights: &DVector<f64>) -> f64 {
        self.expected_returns.dot(weights)
    }

    /// Portfolio variance `w' Σ w`.
    pub fn portfolio_variance(&self, weights: &DVector<f64>) -> f64 {
        weights.dot(&(&self.covariance * weights))
    }
}
