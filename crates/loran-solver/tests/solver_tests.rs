//! Integration tests for the hyperbola solver.

use loran_common::{BoundingBox, GeoPoint, Station, StationRole};
use loran_solver::{HyperbolaSolver, Propagation, SolverParams};

fn station(id: &str, lat: f64, lon: f64, role: StationRole) -> Station {
    Station::new(id, GeoPoint { lat, lon }, role)
}

/// Two coastal stations ~196 km apart, a chart region around the Gulf of
/// Maine, and a ground-wave speed of 299,700 km/s.
fn coastal_pair() -> (Station, Station, BoundingBox, Propagation) {
    (
        station("M", 44.0, -68.0, StationRole::Master),
        station("X", 43.0, -70.0, StationRole::Secondary),
        BoundingBox::new(42.0, -72.0, 46.0, -66.0),
        Propagation::new(299_700_000.0).unwrap(),
    )
}

const CODING_DELAY_US: f64 = 11_000.0;

// ============================================================================
// Tolerance and connectivity properties
// ============================================================================

#[test]
fn test_solver_returns_connected_line_within_tolerance() {
    let (master, secondary, region, propagation) = coastal_pair();
    let params = SolverParams::default();
    let solver = HyperbolaSolver::new(&params, propagation, region);

    let td_us = 11_300.0;
    let line = solver
        .solve(&master, &secondary, CODING_DELAY_US, td_us)
        .unwrap();

    assert!(!line.points.is_empty(), "expected a non-empty line");
    assert!(line.points.len() > 10, "expected a substantial walk");

    // Every returned point satisfies the TD to within the tolerance.
    for p in &line.points {
        let master_dist = geodesy::distance(*p, master.position).unwrap();
        let secondary_dist = geodesy::distance(*p, secondary.position).unwrap();
        let td = propagation.time_difference(master_dist, secondary_dist, CODING_DELAY_US);
        assert!(
            (td - td_us).abs() <= params.tolerance_us,
            "point ({}, {}) has residual {} us",
            p.lat,
            p.lon,
            td - td_us
        );
    }

    // The walk is connected: consecutive points stay within the step bound.
    for pair in line.points.windows(2) {
        let gap = geodesy::distance(pair[0], pair[1]).unwrap();
        assert!(gap <= 2.0 * params.step_m, "gap of {gap} m breaks the walk");
    }
}

#[test]
fn test_solver_covers_the_region() {
    let (master, secondary, region, propagation) = coastal_pair();
    let params = SolverParams::default();
    let solver = HyperbolaSolver::new(&params, propagation, region);

    let line = solver
        .solve(&master, &secondary, CODING_DELAY_US, 11_300.0)
        .unwrap();

    // The unclipped walk must reach the region so the clipper has something
    // to keep.
    assert!(
        line.points.iter().any(|p| region.contains(p)),
        "no solved point fell inside the region"
    );
}

#[test]
fn test_out_of_band_td_yields_empty_line_not_error() {
    let (master, secondary, region, propagation) = coastal_pair();
    let params = SolverParams::default();
    let solver = HyperbolaSolver::new(&params, propagation, region);

    // The reachable band for a 196 km baseline at an 11,000 us coding delay
    // is roughly [10345, 11655] us; 14,000 us has no locus.
    let line = solver
        .solve(&master, &secondary, CODING_DELAY_US, 14_000.0)
        .unwrap();
    assert!(line.points.is_empty());
    assert_eq!(line.nonconverged, 0);
}

#[test]
fn test_baseline_extension_td_yields_empty_line() {
    let (master, secondary, region, propagation) = coastal_pair();
    let params = SolverParams::default();
    let solver = HyperbolaSolver::new(&params, propagation, region);

    // A TD exactly on the edge of the band collapses onto the baseline
    // extension; the solver declines to draw it.
    let baseline = geodesy::distance(master.position, secondary.position).unwrap();
    let edge_td = CODING_DELAY_US + baseline / propagation.speed_m_per_us();
    let line = solver
        .solve(&master, &secondary, CODING_DELAY_US, edge_td)
        .unwrap();
    assert!(line.points.is_empty());
}

// ============================================================================
// Degenerate geometry
// ============================================================================

#[test]
fn test_coincident_stations_raise_degenerate_geometry() {
    let (master, _, region, propagation) = coastal_pair();
    let secondary = station("X", 44.0, -68.0, StationRole::Secondary);
    let params = SolverParams::default();
    let solver = HyperbolaSolver::new(&params, propagation, region);

    let result = solver.solve(&master, &secondary, CODING_DELAY_US, 11_300.0);
    assert!(matches!(
        result,
        Err(loran_solver::GridError::DegenerateGeometry { .. })
    ));
}

// ============================================================================
// Distant-region behavior
// ============================================================================

#[test]
fn test_region_far_from_stations_gives_no_in_region_points() {
    let (master, secondary, _, propagation) = coastal_pair();
    let far_region = BoundingBox::new(-5.0, -160.0, 5.0, -150.0);
    let params = SolverParams::default();
    let solver = HyperbolaSolver::new(&params, propagation, far_region);

    // The locus exists but nowhere near the region; clipping would remove
    // everything.
    let line = solver
        .solve(&master, &secondary, CODING_DELAY_US, 11_300.0)
        .unwrap();
    assert!(!line.points.iter().any(|p| far_region.contains(p)));
}

// ============================================================================
// Tighter tolerance still converges
// ============================================================================

#[test]
fn test_tight_tolerance_converges() {
    let (master, secondary, region, propagation) = coastal_pair();
    let mut params = SolverParams::default();
    params.tolerance_us = 0.01;
    let solver = HyperbolaSolver::new(&params, propagation, region);

    let line = solver
        .solve(&master, &secondary, CODING_DELAY_US, 11_300.0)
        .unwrap();
    assert!(!line.points.is_empty());
    assert_eq!(line.nonconverged, 0, "Newton should converge at 0.01 us");
}
