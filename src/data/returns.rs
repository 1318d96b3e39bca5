//! Period-over-period returns.

use chrono::NaiveDate;
use nalgebra::DMatrix;

use super::prices::{check_assets, check_periods, PriceTable};
use crate::error::{FrontierError, Result};

/// Fractional returns indexed by period (rows) and asset (columns).
///
/// Built from a [`PriceTable`], a return table has one row fewer than its
/// source. A zero price yields an infinite or NaN cell, which is kept as is;
/// use [`ReturnTable::ensure_finite`] or [`ReturnTable::drop_non_finite_rows`]
/// before estimating statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnTable {
    periods: Vec<NaiveDate>,
    assets: Vec<String>,
    returns: DMatrix<f64>,
}

impl ReturnTable {
    /// Create a return table from precomputed returns.
    pub fn new(periods: Vec<NaiveDate>, assets: Vec<String>, returns: DMatrix<f64>) -> Result<Self> {
        if returns.nrows() != periods.len() || returns.ncols() != assets.len() {
            return Err(FrontierError::ShapeMismatch {
                expected: format!("{}x{}", periods.len(), assets.len()),
                got: format!("{}x{}", returns.nrows(), returns.ncols()),
            });
        }
        check_periods(&periods)?;
        check_assets(&assets)?;

        Ok(ReturnTable {
            periods,
            assets,
            returns,
        })
    }

    /// Compute `(p[t] - p[t-1]) / p[t-1]` for every asset.
    ///
    /// The first period has no return and is dropped. Fewer than two price
    /// rows yield an empty table with the same columns.
    pub fn from_prices(prices: &PriceTable) -> ReturnTable {
        let assets = prices.assets().to_vec();
        let n = prices.nrows();

        if n < 2 {
            return ReturnTable {
                periods: Vec::new(),
                returns: DMatrix::zeros(0, assets.len()),
                assets,
            };
        }

        let p = prices.prices();
        let returns = DMatrix::from_fn(n - 1, p.ncols(), |i, j| {
            let prev = p[(i, j)];
            (p[(i + 1, j)] - prev) / prev
        });

        ReturnTable {
            periods: prices.periods()[1..].to_vec(),
            assets,
            returns,
        }
    }

    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn returns(&self) -> &DMatrix<f64> {
        &self.returns
    }

    /// Number of return observations.
    pub fn nrows(&self) -> usize {
        self.returns.nrows()
    }

    /// Number of assets.
    pub fn ncols(&self) -> usize {
        self.returns.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.nrows() == 0
    }

    /// Return series of one asset.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        self.assets
            .iter()
            .position(|a| a == name)
            .map(|j| self.returns.column(j).iter().copied().collect())
    }

    /// Fail on the first NaN or infinite return.
    pub fn ensure_finite(&self) -> Result<()> {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                if !self.returns[(i, j)].is_finite() {
                    return Err(FrontierError::NonFiniteReturn {
                        asset: self.assets[j].clone(),
                        period: self.periods[i],
                    });
                }
            }
        }
        Ok(())
    }

    /// New table without the periods that hold a non-finite return.
    pub fn drop_non_finite_rows(&self) -> ReturnTable {
        let keep: Vec<usize> = (0..self.nrows())
            .filter(|&i| self.returns.row(i).iter().all(|r| r.is_finite()))
            .collect();

        if keep.len() < self.nrows() {
            tracing::warn!(
                dropped = self.nrows() - keep.len(),
                "dropping periods with non-finite returns"
            );
        }

        ReturnTable {
            periods: keep.iter().map(|&i| self.periods[i]).collect(),
            assets: self.assets.clone(),
            returns: DMatrix::from_fn(keep.len(), self.ncols(), |i, j| {
                self.returns[(keep[i], j)]
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(i: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, i + 1, 1).unwrap()
    }

    fn prices(rows: Vec<Vec<f64>>) -> PriceTable {
        let periods = (0..rows.len() as u32).map(month).collect();
        PriceTable::from_rows(periods, vec!["A".into(), "B".into()], rows).unwrap()
    }

    #[test]
    fn test_simple_returns() {
        let table = ReturnTable::from_prices(&prices(vec![
            vec![100.0, 10.0],
            vec![110.0, 9.0],
            vec![99.0, 9.0],
        ]));
        assert_eq!(table.nrows(), 2);
        assert_eq!(table.ncols(), 2);
        assert_eq!(table.periods(), &[month(1), month(2)]);
        assert!((table.returns()[(0, 0)] - 0.10).abs() < 1e-12);
        assert!((table.returns()[(0, 1)] + 0.10).abs() < 1e-12);
        assert!((table.returns()[(1, 0)] + 0.10).abs() < 1e-12);
        assert_eq!(table.returns()[(1, 1)], 0.0);
    }

    #[test]
    fn test_single_row_is_empty() {
        let table = ReturnTable::from_prices(&prices(vec![vec![1.0, 2.0]]));
        assert!(table.is_empty());
        assert_eq!(table.ncols(), 2);
    }

    #[test]
    fn test_zero_price_surfaces_non_finite() {
        let table = ReturnTable::from_prices(&prices(vec![
            vec![0.0, 10.0],
            vec![1.0, 11.0],
            vec![2.0, 12.0],
        ]));
        assert!(table.returns()[(0, 0)].is_infinite());
        match table.ensure_finite() {
            Err(FrontierError::NonFiniteReturn { asset, period }) => {
                assert_eq!(asset, "A");
                assert_eq!(period, month(1));
            }
            other => panic!("expected NonFiniteReturn, got {:?}", other),
        }

        let cleaned = table.drop_non_finite_rows();
        assert_eq!(cleaned.nrows(), 1);
        assert!(cleaned.ensure_finite().is_ok());
    }

    #[test]
    fn test_zero_over_zero_is_nan() {
        let table = ReturnTable::from_prices(&prices(vec![vec![0.0, 1.0], vec![0.0, 1.0]]));
        assert!(table.returns()[(0, 0)].is_nan());
        assert!(table.ensure_finite().is_err());
    }

    #[test]
    fn test_new_checks_shape() {
        let result = ReturnTable::new(vec![month(0)], vec!["A".into()], DMatrix::zeros(2, 1));
        assert!(matches!(result, Err(FrontierError::ShapeMismatch { .. })));
    }
}
