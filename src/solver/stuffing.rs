//! Matrix stuffing: converts a minimum-variance problem to solver format.
//!
//! Clarabel solves
//!
//! ```text
//! minimize    (1/2) x' P x + q' x
//! subject to  A x + s = b,  s in K
//! ```
//!
//! For portfolio weights `w` the rows of `A` are laid out as:
//!
//! | rows        | cone    | meaning                         |
//! |-------------|---------|---------------------------------|
//! | budget      | zero    | `sum(w) = 1`                    |
//! | return      | zero    | `r'w = target` (equality form)  |
//! | return      | nonneg  | `r'w >= target` (floor form)    |
//! | long-only   | nonneg  | `w >= 0`                        |

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CscMatrix;

use crate::config::ReturnConstraint;
use crate::sparse::{csc_from_triplets, upper_triangle_csc};

/// Cone dimensions for Clarabel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConeDims {
    /// Number of zero cone (equality) rows.
    pub zero: usize,
    /// Number of nonnegative cone rows.
    pub nonneg: usize,
}

impl ConeDims {
    /// Total number of constraint rows.
    pub fn total(&self) -> usize {
        self.zero + self.nonneg
    }
}

/// Stuffed problem ready for Clarabel.
#[derive(Debug)]
pub struct StuffedProblem {
    /// Quadratic cost matrix P (n x n, upper triangle).
    pub p: CscMatrix<f64>,
    /// Linear cost vector q (n).
    pub q: Vec<f64>,
    /// Constraint matrix A (m x n).
    pub a: CscMatrix<f64>,
    /// Constraint vector b (m).
    pub b: Vec<f64>,
    /// Cone dimensions.
    pub cone_dims: ConeDims,
}

impl StuffedProblem {
    /// Number of optimization variables.
    pub fn num_vars(&self) -> usize {
        self.q.len()
    }
}

/// Build the stuffed problem for `minimize w' Σ w` at one target return.
///
/// `covariance` must already be symmetric.
pub fn stuff_problem(
    covariance: &DMatrix<f64>,
    expected_returns: &DVector<f64>,
    target: f64,
    constraint: ReturnConstraint,
) -> StuffedProblem {
    let n = expected_returns.len();

    // Clarabel minimizes (1/2) x' P x, so P = 2Σ gives w' Σ w.
    let p = upper_triangle_csc(covariance, 2.0);
    let q = vec![0.0; n];

    let mut a_rows = Vec::with_capacity(3 * n);
    let mut a_cols = Vec::with_capacity(3 * n);
    let mut a_vals = Vec::with_capacity(3 * n);
    let mut b = Vec::with_capacity(n + 2);
    let mut row = 0;

    // Budget: 1'w = 1
    for j in 0..n {
        a_rows.push(row);
        a_cols.push(j);
        a_vals.push(1.0);
    }
    b.push(1.0);
    row += 1;

    // Return row. Equality: r'w = t. Floor: -r'w + s = -t with s >= 0.
    let (sign, zero_rows) = match constraint {
        ReturnConstraint::Exactly => (1.0, 2),
        ReturnConstraint::AtLeast => (-1.0, 1),
    };
    for j in 0..n {
        a_rows.push(row);
        a_cols.push(j);
        a_vals.push(sign * expected_returns[j]);
    }
    b.push(sign * target);
    row += 1;

    // Long-only: -w + s = 0 with s >= 0.
    for j in 0..n {
        a_rows.push(row + j);
        a_cols.push(j);
        a_vals.push(-1.0);
        b.push(0.0);
    }
    row += n;

    let cone_dims = ConeDims {
        zero: zero_rows,
        nonneg: row - zero_rows,
    };
    let a = csc_from_triplets(row, n, a_rows, a_cols, a_vals);

    StuffedProblem {
        p,
        q,
        a,
        b,
        cone_dims,
    }
}
