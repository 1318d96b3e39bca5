//! Frontier sweep and post-processing tests.
//!
//! The two-asset cases have closed-form answers: with Σ = diag(0.04, 0.09)
//! and r = [0.05, 0.10], the global minimum-variance portfolio is
//! w = [9/13, 4/13] (return ≈ 0.0654), and above that return the budget and
//! return constraints pin w1 = (0.10 - t) / 0.05.

use mvfrontier::frontier::table::dedup_indices;
use mvfrontier::prelude::*;
use nalgebra::{DMatrix, DVector};

/// Tolerance for comparing solver results against closed forms
const TOL: f64 = 1e-5;

/// Tolerance for constraint satisfaction
const FEAS_TOL: f64 = 1e-6;

fn two_assets() -> (DMatrix<f64>, DVector<f64>) {
    (
        DMatrix::from_row_slice(2, 2, &[0.04, 0.0, 0.0, 0.09]),
        DVector::from_vec(vec![0.05, 0.10]),
    )
}

fn four_assets() -> (DMatrix<f64>, DVector<f64>) {
    #[rustfmt::skip]
    let cov = DMatrix::from_row_slice(4, 4, &[
        0.04,  0.01,  0.00, -0.01,
        0.01,  0.03,  0.00,  0.00,
        0.00,  0.00,  0.02,  0.00,
        -0.01, 0.00,  0.00,  0.01,
    ]);
    (cov, DVector::from_vec(vec![0.12, 0.10, 0.07, 0.05]))
}

fn sweep(
    cov: &DMatrix<f64>,
    mu: &DVector<f64>,
    constraint: ReturnConstraint,
) -> FrontierSweep {
    let grid = TargetReturnGrid::from_expected_returns(mu, 10).unwrap();
    FrontierOptimizer::default()
        .with_constraint(constraint)
        .sweep(&grid, cov, mu)
        .unwrap()
}

fn assert_feasible(point: &PortfolioPoint) {
    let sum: f64 = point.weights.iter().sum();
    assert!(
        (sum - 1.0).abs() < FEAS_TOL,
        "weights sum to {} at target {}",
        sum,
        point.target
    );
    for &w in point.weights.iter() {
        assert!(w >= -FEAS_TOL, "negative weight {} at target {}", w, point.target);
    }
    assert!(
        point.expected_return >= point.target - FEAS_TOL,
        "return {} below target {}",
        point.expected_return,
        point.target
    );
}

// ============================================================================
// Two-asset closed form
// ============================================================================

#[test]
fn test_two_asset_sweep_solves_every_target() {
    let (cov, mu) = two_assets();
    let sweep = sweep(&cov, &mu, ReturnConstraint::AtLeast);

    assert_eq!(sweep.len(), 10);
    assert!(sweep.skipped().is_empty());

    let points = sweep.points();
    assert_eq!(points.len(), 10);
    for p in &points {
        assert_feasible(p);
    }
}

#[test]
fn test_two_asset_low_targets_give_minimum_variance_portfolio() {
    let (cov, mu) = two_assets();
    let sweep = sweep(&cov, &mu, ReturnConstraint::AtLeast);
    let first = sweep.points()[0];

    assert_eq!(first.target, 0.05);
    assert!((first.weights[0] - 9.0 / 13.0).abs() < TOL);
    assert!((first.weights[1] - 4.0 / 13.0).abs() < TOL);
    assert!((first.variance - 0.036 / 1.3).abs() < TOL);
    assert!((first.expected_return - 0.85 / 13.0).abs() < TOL);
}

#[test]
fn test_two_asset_active_targets_match_closed_form() {
    let (cov, mu) = two_assets();
    let sweep = sweep(&cov, &mu, ReturnConstraint::AtLeast);
    let gmv_return = 0.85 / 13.0;

    for p in sweep.points().into_iter().filter(|p| p.target > gmv_return + TOL) {
        let w1 = (0.10 - p.target) / 0.05;
        let variance = 0.04 * w1 * w1 + 0.09 * (1.0 - w1) * (1.0 - w1);
        assert!(
            (p.weights[0] - w1).abs() < TOL,
            "target {}: w1 expected {}, got {}",
            p.target,
            w1,
            p.weights[0]
        );
        assert!((p.variance - variance).abs() < TOL);
        assert!((p.expected_return - p.target).abs() < TOL);
    }
}

#[test]
fn test_two_asset_frontier_is_monotone() {
    let (cov, mu) = two_assets();
    let sweep = sweep(&cov, &mu, ReturnConstraint::AtLeast);
    let points = sweep.points();

    for pair in points.windows(2) {
        assert!(
            pair[1].weights[0] <= pair[0].weights[0] + FEAS_TOL,
            "weight on asset 1 increased from {} to {}",
            pair[0].weights[0],
            pair[1].weights[0]
        );
        assert!(
            pair[1].variance >= pair[0].variance - FEAS_TOL,
            "variance decreased from {} to {}",
            pair[0].variance,
            pair[1].variance
        );
    }
}

#[test]
fn test_two_asset_equality_constraint_starts_at_lowest_return_asset() {
    let (cov, mu) = two_assets();
    let sweep = sweep(&cov, &mu, ReturnConstraint::Exactly);
    let points = sweep.points();

    assert_eq!(points.len(), 10);
    assert!((points[0].weights[0] - 1.0).abs() < TOL);
    assert!(points[0].weights[1].abs() < TOL);
    assert!((points[9].weights[1] - 1.0).abs() < TOL);

    for pair in points.windows(2) {
        assert!(pair[1].weights[0] < pair[0].weights[0]);
    }
    for p in &points {
        assert_feasible(p);
        assert!((p.expected_return - p.target).abs() < TOL);
    }
}

// ============================================================================
// Larger problems
// ============================================================================

#[test]
fn test_four_asset_sweep_is_feasible_and_monotone() {
    let (cov, mu) = four_assets();
    let sweep = sweep(&cov, &mu, ReturnConstraint::AtLeast);
    let points = sweep.points();

    assert_eq!(points.len(), 10);
    for p in &points {
        assert_feasible(p);
    }
    for pair in points.windows(2) {
        assert!(pair[1].variance >= pair[0].variance - FEAS_TOL);
    }

    // The top target is only reachable by holding the best asset alone.
    let last = points[9];
    assert!((last.weights[0] - 1.0).abs() < 1e-4);
}

#[test]
fn test_sweep_is_deterministic() {
    let (cov, mu) = four_assets();
    let a = sweep(&cov, &mu, ReturnConstraint::AtLeast);
    let b = sweep(&cov, &mu, ReturnConstraint::AtLeast);
    assert_eq!(a, b);
}

#[test]
fn test_asymmetric_covariance_is_symmetrized() {
    let (cov, mu) = two_assets();
    let mut skewed = cov.clone();
    skewed[(0, 1)] = 1e-6;
    skewed[(1, 0)] = -1e-6;

    let a = sweep(&cov, &mu, ReturnConstraint::AtLeast);
    let b = sweep(&skewed, &mu, ReturnConstraint::AtLeast);
    for (p, q) in a.points().iter().zip(b.points()) {
        assert!((p.variance - q.variance).abs() < TOL);
    }
}

// ============================================================================
// Degenerate and failing inputs
// ============================================================================

#[test]
fn test_degenerate_target_range_collapses_to_one_row() {
    let cov = DMatrix::from_row_slice(3, 3, &[0.04, 0.0, 0.0, 0.0, 0.09, 0.0, 0.0, 0.0, 0.16]);
    let mu = DVector::from_vec(vec![0.07, 0.07, 0.07]);

    let grid = TargetReturnGrid::from_expected_returns(&mu, 10).unwrap();
    assert!(grid.is_degenerate());

    let sweep = FrontierOptimizer::default().sweep(&grid, &cov, &mu).unwrap();
    assert_eq!(sweep.points().len(), 10);

    let points: Vec<PortfolioPoint> = sweep.into_points();
    let assets = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let table = FrontierTable::from_points(&points, &assets, 0.0).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0].label, "Portfolio 1");
}

#[test]
fn test_all_targets_infeasible_gives_empty_frontier() {
    let (cov, mu) = two_assets();
    let grid = TargetReturnGrid::from_targets(vec![0.2, 0.3, 0.4]).unwrap();
    let sweep = FrontierOptimizer::default().sweep(&grid, &cov, &mu).unwrap();

    assert_eq!(sweep.len(), 3);
    assert!(sweep.points().is_empty());
    for skipped in sweep.skipped() {
        assert_eq!(skipped.outcome, PointOutcome::Infeasible);
    }

    let assets = vec!["A".to_string(), "B".to_string()];
    let table = FrontierTable::from_points(&sweep.into_points(), &assets, 0.0).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.columns().len(), 4);
}

#[test]
fn test_mismatched_dimensions_abort_sweep() {
    let (cov, _) = two_assets();
    let mu = DVector::from_vec(vec![0.05, 0.10, 0.07]);
    let grid = TargetReturnGrid::linspace(0.05, 0.10, 10).unwrap();

    match FrontierOptimizer::default().sweep(&grid, &cov, &mu) {
        Err(FrontierError::ShapeMismatch { .. }) => {}
        other => panic!("expected ShapeMismatch, got {:?}", other),
    }
}

#[test]
fn test_non_finite_covariance_aborts_sweep() {
    let (mut cov, mu) = two_assets();
    cov[(1, 1)] = f64::INFINITY;
    let grid = TargetReturnGrid::linspace(0.05, 0.10, 10).unwrap();

    match FrontierOptimizer::default().sweep(&grid, &cov, &mu) {
        Err(FrontierError::MalformedInput(_)) => {}
        other => panic!("expected MalformedInput, got {:?}", other),
    }
}

#[test]
fn test_iteration_limit_is_not_fatal() {
    let (cov, mu) = four_assets();
    let settings = Settings {
        max_iter: 1,
        ..Settings::default()
    };
    let grid = TargetReturnGrid::from_expected_returns(&mu, 5).unwrap();
    let sweep = FrontierOptimizer::new(settings).sweep(&grid, &cov, &mu).unwrap();

    assert_eq!(sweep.len(), 5);
    for skipped in sweep.skipped() {
        assert!(matches!(skipped.outcome, PointOutcome::NotConverged(_)));
    }
}

// ============================================================================
// Post-processing
// ============================================================================

#[test]
fn test_post_processing_is_idempotent() {
    let (cov, mu) = four_assets();
    let points = sweep(&cov, &mu, ReturnConstraint::AtLeast).into_points();
    let assets: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();

    let a = FrontierTable::from_points(&points, &assets, 0.0).unwrap();
    let b = FrontierTable::from_points(&points, &assets, 0.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_post_processing_values() {
    let (cov, mu) = two_assets();
    let points = sweep(&cov, &mu, ReturnConstraint::Exactly).into_points();
    let assets = vec!["Fixed Income".to_string(), "S&P 500".to_string()];
    let table = FrontierTable::from_points(&points, &assets, 0.0).unwrap();

    assert_eq!(table.len(), 10);
    let first = &table.rows[0];
    assert_eq!(first.weights, vec![100.0, 0.0]);
    assert_eq!(first.expected_return, 5.0);
    assert_eq!(first.std_dev, 20.0);

    let last = table.row("Portfolio 10").unwrap();
    assert_eq!(last.weights, vec![0.0, 100.0]);
    assert_eq!(last.expected_return, 10.0);
    assert_eq!(last.std_dev, 30.0);

    for row in &table.rows {
        let total: f64 = row.weights.iter().sum();
        assert!((total - 100.0).abs() <= 0.011);
    }
}

#[test]
fn test_duplicate_points_keep_first() {
    let make = |w: &[f64]| PortfolioPoint {
        target: 0.07,
        weights: DVector::from_column_slice(w),
        expected_return: 0.07,
        variance: 0.02,
    };
    let points = vec![make(&[0.3, 0.7]), make(&[0.7, 0.3])];

    assert_eq!(dedup_indices(&points, 0.0), vec![0]);

    let assets = vec!["A".to_string(), "B".to_string()];
    let table = FrontierTable::from_points(&points, &assets, 0.0).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0].weights, vec![30.0, 70.0]);
}

#[test]
fn test_default_tolerance_collapses_repeated_minimum_variance_points() {
    // Targets 0.05, 0.0556 and 0.0611 all sit below the minimum-variance
    // return and solve to the same portfolio, up to solver noise.
    let (cov, mu) = two_assets();
    let points = sweep(&cov, &mu, ReturnConstraint::AtLeast).into_points();
    assert_eq!(points.len(), 10);

    let config = FrontierConfig::default();
    let assets = vec!["Fixed Income".to_string(), "S&P 500".to_string()];
    let table = FrontierTable::from_points(&points, &assets, config.dedup_tolerance).unwrap();

    assert_eq!(table.len(), 8);
    assert_eq!(table.rows[0].weights, vec![69.23, 30.77]);
    assert_eq!(table.rows[0].expected_return, 6.54);
    assert_ne!(table.rows[1].expected_return, table.rows[0].expected_return);
    assert_eq!(table.rows[7].label, "Portfolio 8");
}

#[test]
fn test_engine_default_table_has_distinct_rows() {
    let (cov, mu) = two_assets();
    let statistics = AssetStatistics::from_parts(
        vec!["Fixed Income".to_string(), "S&P 500".to_string()],
        mu,
        cov,
    )
    .unwrap();
    let report = FrontierEngine::new(FrontierConfig::default())
        .unwrap()
        .run_on_statistics(statistics)
        .unwrap();

    assert_eq!(report.points().len(), 10);
    assert_eq!(report.table.len(), 8);
    for pair in report.table.rows.windows(2) {
        assert_ne!(
            (pair[0].expected_return, pair[0].std_dev),
            (pair[1].expected_return, pair[1].std_dev)
        );
    }
}
