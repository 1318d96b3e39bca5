//! Price history and return series.
//!
//! This module provides:
//! - The fixed asset vocabulary and validated selections
//! - Price tables with column selection and lookback windows
//! - The return series builder

pub mod asset;
pub mod prices;
pub mod returns;

pub use asset::{AssetClass, AssetSelection, MAX_ASSETS, MIN_ASSETS};
pub use prices::PriceTable;
pub use returns::ReturnTable;
