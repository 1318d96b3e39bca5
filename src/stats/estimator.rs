//! Expected returns and covariance from a return table.
//!
//! Both statistics are annualized from periodic (monthly) observations:
//!
//! - expected return: `mean * 12` ([`AnnualizationMode::Simple`]) or
//!   `(1 + mean)^12 - 1` ([`AnnualizationMode::Compounded`])
//! - covariance: sample covariance (`n - 1` denominator) `* 12`
//!
//! The covariance matrix is built from its upper triangle and mirrored, so it
//! is exactly symmetric.

use nalgebra::{DMatrix, DVector};

use crate::config::AnnualizationMode;
use crate::data::ReturnTable;
use crate::error::{FrontierError, Result};

/// Minimum number of return observations for a sample covariance.
pub const MIN_OBSERVATIONS: usize = 2;

/// Column means of a `periods x assets` matrix.
pub fn sample_mean(returns: &DMatrix<f64>) -> DVector<f64> {
    let n = returns.nrows();
    if n == 0 {
        return DVector::zeros(returns.ncols());
    }
    DVector::from_fn(returns.ncols(), |j, _| returns.column(j).sum() / n as f64)
}

/// Sample covariance of the columns of a `periods x assets` matrix.
///
/// Returns a zero matrix when fewer than two observations are available.
pub fn sample_covariance(returns: &DMatrix<f64>) -> DMatrix<f64> {
    let (n, k) = returns.shape();
    let mut cov = DMatrix::zeros(k, k);
    if n < MIN_OBSERVATIONS {
        return cov;
    }

    let mean = sample_mean(returns);
    let denom = (n - 1) as f64;

    for i in 0..k {
        for j in i..k {
            let mut acc = 0.0;
            for t in 0..n {
                acc += (returns[(t, i)] - mean[i]) * (returns[(t, j)] - mean[j]);
            }
            let c = acc / denom;
            cov[(i, j)] = c;
            cov[(j, i)] = c;
        }
    }

    cov
}

/// Annualized per-asset expected returns and covariance.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetStatistics {
    assets: Vec<String>,
    expected_returns: DVector<f64>,
    covariance: DMatrix<f64>,
    observations: usize,
}

impl AssetStatistics {
    /// Estimate statistics from periodic returns.
    ///
    /// # Errors
    ///
    /// - [`FrontierError::InsufficientData`] with fewer than two observations
    /// - [`FrontierError::NonFiniteReturn`] if any return is NaN or infinite
    pub fn estimate(
        returns: &ReturnTable,
        annualization: AnnualizationMode,
        periods_per_year: u32,
    ) -> Result<Self> {
        if returns.nrows() < MIN_OBSERVATIONS {
            return Err(FrontierError::InsufficientData {
                available: returns.nrows(),
                required: MIN_OBSERVATIONS,
            });
        }
        returns.ensure_finite()?;

        let scale = f64::from(periods_per_year);
        let mean = sample_mean(returns.returns());
        let expected_returns = mean.map(|m| annualization.annualize(m, periods_per_year));
        let covariance = sample_covariance(returns.returns()) * scale;

        tracing::debug!(
            assets = returns.ncols(),
            observations = returns.nrows(),
            ?annualization,
            "estimated asset statistics"
        );

        Ok(AssetStatistics {
            assets: returns.assets().to_vec(),
            expected_returns,
            covariance,
            observations: returns.nrows(),
        })
    }

    /// Assemble statistics that were estimated elsewhere.
    pub fn from_parts(
        assets: Vec<String>,
        expected_returns: DVector<f64>,
        covariance: DMatrix<f64>,
    ) -> Result<Self> {
        let n = assets.len();
        if expected_returns.len() != n {
            return Err(FrontierError::ShapeMismatch {
                expected: format!("{} expected returns", n),
                got: format!("{}", expected_returns.len()),
            });
        }
        if covariance.shape() != (n, n) {
            return Err(FrontierError::ShapeMismatch {
                expected: format!("{}x{} covariance", n, n),
                got: format!("{}x{}", covariance.nrows(), covariance.ncols()),
            });
        }
        if expected_returns.iter().chain(covariance.iter()).any(|v| !v.is_finite()) {
            return Err(FrontierError::MalformedInput(
                "statistics contain non-finite values".into(),
            ));
        }

        Ok(AssetStatistics {
            assets,
            expected_returns,
            covariance,
            observations: 0,
        })
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn expected_returns(&self) -> &DVector<f64> {
        &self.expected_returns
    }

    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.covariance
    }

    /// Number of return observations behind the estimate (0 if assembled).
    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Expected annual return of one asset.
    pub fn expected_return(&self, asset: &str) -> Option<f64> {
        self.assets
            .iter()
            .position(|a| a == asset)
            .map(|i| self.expected_returns[i])
    }

    /// Annualized standard deviation per asset.
    pub fn volatilities(&self) -> DVector<f64> {
        self.covariance.diagonal().map(|v| v.max(0.0).sqrt())
    }
}
