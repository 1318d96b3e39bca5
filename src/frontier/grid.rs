//! Target return grid.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{FrontierError, Result};

/// Equally spaced target returns between the lowest and highest expected
/// asset return, endpoints included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetReturnGrid {
    targets: Vec<f64>,
}

impl TargetReturnGrid {
    /// `num` evenly spaced values over `[start, stop]`.
    ///
    /// The last value is exactly `stop`. A single point yields `[start]`.
    pub fn linspace(start: f64, stop: f64, num: usize) -> Result<Self> {
        if !start.is_finite() || !stop.is_finite() {
            return Err(FrontierError::MalformedInput(format!(
                "target range [{}, {}] is not finite",
                start, stop
            )));
        }

        let targets = match num {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (num - 1) as f64;
                let mut targets: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
                targets[num - 1] = stop;
                targets
            }
        };

        Ok(TargetReturnGrid { targets })
    }

    /// Grid spanning `[min(r), max(r)]` of the expected returns.
    pub fn from_expected_returns(expected_returns: &DVector<f64>, num: usize) -> Result<Self> {
        if expected_returns.is_empty() {
            return Err(FrontierError::MalformedInput(
                "no expected returns to span".into(),
            ));
        }

        let grid = TargetReturnGrid::linspace(expected_returns.min(), expected_returns.max(), num)?;
        if grid.is_degenerate() {
            tracing::warn!(
                target_return = grid.targets[0],
                "all expected returns are equal, target grid is a single value"
            );
        }
        Ok(grid)
    }

    /// Use explicit targets, in the given order.
    pub fn from_targets(targets: Vec<f64>) -> Result<Self> {
        if let Some(t) = targets.iter().find(|t| !t.is_finite()) {
            return Err(FrontierError::MalformedInput(format!(
                "target return {} is not finite",
                t
            )));
        }
        Ok(TargetReturnGrid { targets })
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// All targets are the same value.
    pub fn is_degenerate(&self) -> bool {
        match self.targets.first() {
            Some(first) => self.targets.iter().all(|t| t == first),
            None => false,
        }
    }
}
