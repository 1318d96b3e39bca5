//! Sparse matrix utilities.
//!
//! Helpers for building the nalgebra-sparse matrices handed to the solver.

use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CscMatrix};

/// Create a CSC matrix from triplets (row, col, value).
///
/// Duplicates are summed together. Out-of-range entries are ignored.
pub fn csc_from_triplets(
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
) -> CscMatrix<f64> {
    if rows.is_empty() {
        return CscMatrix::zeros(nrows, ncols);
    }

    let mut coo = CooMatrix::new(nrows, ncols);
    for ((row, col), val) in rows.into_iter().zip(cols).zip(vals) {
        if row < nrows && col < ncols {
            coo.push(row, col, val);
        }
    }

    CscMatrix::from(&coo)
}

/// Upper triangle (diagonal included) of a square dense matrix, scaled.
///
/// Clarabel reads only the upper triangle of the quadratic cost.
pub fn upper_triangle_csc(dense: &DMatrix<f64>, scale: f64) -> CscMatrix<f64> {
    let n = dense.nrows().min(dense.ncols());
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut vals = Vec::new();

    for j in 0..n {
        for i in 0..=j {
            let v = dense[(i, j)];
            if v != 0.0 {
                rows.push(i);
                cols.push(j);
                vals.push(v * scale);
            }
        }
    }

    csc_from_triplets(n, n, rows, cols, vals)
}

/// Convert CSC to dense matrix.
pub fn csc_to_dense(sparse: &CscMatrix<f64>) -> DMatrix<f64> {
    let mut dense = DMatrix::zeros(sparse.nrows(), sparse.ncols());
    for (row, col, val) in sparse.triplet_iter() {
        dense[(row, col)] = *val;
    }
    dense
}
