//! Annualized return statistics.

pub mod estimator;

pub use estimator::{sample_covariance, sample_mean, AssetStatistics};
