//! Solver interface for mvfrontier.
//!
//! This module provides:
//! - Matrix stuffing to convert a minimum-variance problem to solver format
//! - Clarabel solver integration

pub mod clarabel;
pub mod stuffing;

pub use self::clarabel::{solve, Settings, Solution, SolveStatus};
pub use stuffing::{stuff_problem, ConeDims, StuffedProblem};
