//! Monthly price history.

use chrono::NaiveDate;
use nalgebra::DMatrix;

use crate::config::WindowConvention;
use crate::error::{FrontierError, Result};

/// Prices indexed by period (rows) and asset (columns).
///
/// Periods are strictly increasing and every cell holds a finite price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    periods: Vec<NaiveDate>,
    assets: Vec<String>,
    prices: DMatrix<f64>,
}

impl PriceTable {
    /// Create a price table from a dense `periods x assets` matrix.
    pub fn new(periods: Vec<NaiveDate>, assets: Vec<String>, prices: DMatrix<f64>) -> Result<Self> {
        if prices.nrows() != periods.len() || prices.ncols() != assets.len() {
            return Err(FrontierError::ShapeMismatch {
                expected: format!("{}x{}", periods.len(), assets.len()),
                got: format!("{}x{}", prices.nrows(), prices.ncols()),
            });
        }
        check_periods(&periods)?;
        check_assets(&assets)?;

        for i in 0..prices.nrows() {
            for j in 0..prices.ncols() {
                if !prices[(i, j)].is_finite() {
                    return Err(FrontierError::MalformedInput(format!(
                        "missing or non-finite price for {} in period {}",
                        assets[j], periods[i]
                    )));
                }
            }
        }

        Ok(PriceTable {
            periods,
            assets,
            prices,
        })
    }

    /// Create a price table from one row of prices per period.
    pub fn from_rows(
        periods: Vec<NaiveDate>,
        assets: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let ncols = assets.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(FrontierError::ShapeMismatch {
                expected: format!("{} prices in row {}", ncols, i),
                got: format!("{}", row.len()),
            });
        }

        let nrows = rows.len();
        let prices = DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]);
        PriceTable::new(periods, assets, prices)
    }

    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn prices(&self) -> &DMatrix<f64> {
        &self.prices
    }

    /// Number of periods.
    pub fn nrows(&self) -> usize {
        self.prices.nrows()
    }

    /// Number of assets.
    pub fn ncols(&self) -> usize {
        self.prices.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Column index of an asset.
    pub fn asset_index(&self, name: &str) -> Option<usize> {
        self.assets.iter().position(|a| a == name)
    }

    /// Price series of one asset.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        self.asset_index(name)
            .map(|j| self.prices.column(j).iter().copied().collect())
    }

    /// New table with only the named assets, in the given order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<PriceTable> {
        let indices = names
            .iter()
            .map(|n| {
                self.asset_index(n.as_ref()).ok_or_else(|| {
                    FrontierError::MalformedInput(format!(
                        "asset '{}' not present in price table",
                        n.as_ref()
                    ))
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        let assets: Vec<String> = indices.iter().map(|&j| self.assets[j].clone()).collect();
        check_assets(&assets)?;

        let prices = DMatrix::from_fn(self.nrows(), indices.len(), |i, j| {
            self.prices[(i, indices[j])]
        });

        Ok(PriceTable {
            periods: self.periods.clone(),
            assets,
            prices,
        })
    }

    /// New table with the last `rows` periods, or all of them if fewer exist.
    pub fn tail(&self, rows: usize) -> PriceTable {
        let rows = rows.min(self.nrows());
        let start = self.nrows() - rows;

        PriceTable {
            periods: self.periods[start..].to_vec(),
            assets: self.assets.clone(),
            prices: self.prices.rows(start, rows).into_owned(),
        }
    }

    /// New table covering the last `years` of history.
    pub fn lookback(
        &self,
        years: u32,
        convention: WindowConvention,
        periods_per_year: u32,
    ) -> Result<PriceTable> {
        if years == 0 {
            return Err(FrontierError::InvalidConfig(
                "lookback must be at least one year".into(),
            ));
        }

        let rows = convention.price_rows(years, periods_per_year);
        if rows > self.nrows() {
            tracing::warn!(
                requested = rows,
                available = self.nrows(),
                "lookback window longer than price history, using all periods"
            );
        }

        Ok(self.tail(rows))
    }
}

pub(crate) fn check_periods(periods: &[NaiveDate]) -> Result<()> {
    for pair in periods.windows(2) {
        if pair[1] <= pair[0] {
            return Err(FrontierError::MalformedInput(format!(
                "periods must be strictly increasing, found {} after {}",
                pair[1], pair[0]
            )));
        }
    }
    Ok(())
}

pub(crate) fn check_assets(assets: &[String]) -> Result<()> {
    for (i, name) in assets.iter().enumerate() {
        if assets[..i].contains(name) {
            return Err(FrontierError::MalformedInput(format!(
                "duplicate asset column '{}'",
                name
            )));
        }
    }
    Ok(())
}
