use hyd_core::{Domain, HydroError};
use hyd_curve::{at, grid, sample, QueryPolicy};
use hyd_models::catalog::{baseflow_recession, well_capture};
use proptest::prelude::*;

#[test]
fn default_grid_covers_half_open_domain() {
    let spec = baseflow_recession();
    let params = spec.resolve(&spec.defaults()).unwrap();
    let xs = sample(&spec, &params, 200).unwrap();
    assert_eq!(xs.len(), 200);
    assert_eq!(xs[0], 0.0);
    assert!(xs[199] < 91.0);
    assert!((xs[1] - 91.0 / 200.0).abs() < 1e-12);
}

#[test]
fn dynamic_domains_follow_parameters() {
    let spec = well_capture().unwrap();
    let wide = spec.resolve(&spec.defaults().with("q", 0.01)).unwrap();
    let xs = sample(&spec, &wide, 100).unwrap();
    assert!((xs[0] + 0.999 * 250.0).abs() < 1e-9);
}

#[test]
fn resolution_below_two_is_rejected() {
    let domain = Domain::new(0.0, 1.0).unwrap();
    for resolution in [0, 1] {
        let err = grid(domain, resolution).unwrap_err();
        assert!(matches!(err, HydroError::InvalidArgument(_)));
        assert_eq!(err.info().code, "hyd_curve.resolution");
    }
    assert_eq!(grid(domain, 2).unwrap(), vec![0.0, 0.5]);
}

#[test]
fn query_policies() {
    let spec = baseflow_recession();
    let params = spec.resolve(&spec.defaults()).unwrap();

    let inside = at(&spec, &params, 10.0, QueryPolicy::Clamp).unwrap();
    assert_eq!(inside.x, 10.0);
    assert!(!inside.clamped);

    // the closed upper bound is admitted even though sampling excludes it
    let edge = at(&spec, &params, 91.0, QueryPolicy::Reject).unwrap();
    assert!(!edge.clamped);

    let high = at(&spec, &params, 500.0, QueryPolicy::Clamp).unwrap();
    assert_eq!(high.x, 91.0);
    assert_eq!(high.requested, 500.0);
    assert!(high.clamped);

    let low = at(&spec, &params, -3.0, QueryPolicy::default()).unwrap();
    assert_eq!(low.x, 0.0);

    let err = at(&spec, &params, 500.0, QueryPolicy::Reject).unwrap_err();
    assert_eq!(err.info().code, "hyd_curve.query_out_of_domain");
    assert_eq!(err.info().context["model"], "baseflow_recession");

    let err = at(&spec, &params, f64::NAN, QueryPolicy::Clamp).unwrap_err();
    assert_eq!(err.info().code, "hyd_curve.query_not_finite");
}

proptest! {
    #[test]
    fn grids_are_sized_ordered_and_anchored(
        start in -1e3f64..1e3,
        width in 1e-3f64..1e3,
        resolution in 2usize..2000,
    ) {
        let domain = Domain::new(start, start + width).unwrap();
        let xs = grid(domain, resolution).unwrap();
        prop_assert_eq!(xs.len(), resolution);
        prop_assert_eq!(xs[0], domain.start);
        prop_assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(*xs.last().unwrap() < domain.end);
    }
}
