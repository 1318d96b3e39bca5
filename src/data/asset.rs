//! Asset vocabulary and user selections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FrontierError, Result};

/// Minimum number of assets in a selection.
pub const MIN_ASSETS: usize = 2;

/// Maximum number of assets in a selection.
pub const MAX_ASSETS: usize = 6;

/// The asset classes carried by the price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    #[serde(rename = "S&P 500")]
    Sp500,
    #[serde(rename = "Fixed Income")]
    FixedIncome,
    #[serde(rename = "Gold")]
    Gold,
    #[serde(rename = "Private Credit")]
    PrivateCredit,
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Private Equity")]
    PrivateEquity,
}

impl AssetClass {
    /// All asset classes, in price-file column order.
    pub const ALL: [AssetClass; 6] = [
        AssetClass::Sp500,
        AssetClass::FixedIncome,
        AssetClass::Gold,
        AssetClass::PrivateCredit,
        AssetClass::RealEstate,
        AssetClass::PrivateEquity,
    ];

    /// Column name in the price table.
    pub fn name(self) -> &'static str {
        match self {
            AssetClass::Sp500 => "S&P 500",
            AssetClass::FixedIncome => "Fixed Income",
            AssetClass::Gold => "Gold",
            AssetClass::PrivateCredit => "Private Credit",
            AssetClass::RealEstate => "Real Estate",
            AssetClass::PrivateEquity => "Private Equity",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssetClass {
    type Err = FrontierError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        AssetClass::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FrontierError::InvalidSelection(format!("unknown asset '{}'", s)))
    }
}

/// A validated, ordered choice of 2 to 6 distinct asset classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSelection {
    assets: Vec<AssetClass>,
}

impl AssetSelection {
    /// Validate a selection, keeping the caller's order.
    pub fn new(assets: impl IntoIterator<Item = AssetClass>) -> Result<Self> {
        let assets: Vec<AssetClass> = assets.into_iter().collect();

        if assets.len() < MIN_ASSETS || assets.len() > MAX_ASSETS {
            return Err(FrontierError::InvalidSelection(format!(
                "choose between {} and {} assets, got {}",
                MIN_ASSETS,
                MAX_ASSETS,
                assets.len()
            )));
        }

        for (i, asset) in assets.iter().enumerate() {
            if assets[..i].contains(asset) {
                return Err(FrontierError::InvalidSelection(format!(
                    "'{}' selected more than once",
                    asset
                )));
            }
        }

        Ok(AssetSelection { assets })
    }

    /// Parse and validate a selection from column names.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let assets = names
            .iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<Vec<AssetClass>>>()?;
        AssetSelection::new(assets)
    }

    /// Every asset class, in column order.
    pub fn all() -> Self {
        AssetSelection {
            assets: AssetClass::ALL.to_vec(),
        }
    }

    pub fn assets(&self) -> &[AssetClass] {
        &self.assets
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.assets.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
