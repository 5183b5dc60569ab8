use std::f64::consts::PI;

use hyd_core::{HydroError, ParameterValues, ShadeBound};
use hyd_models::catalog::{
    baseflow_recession, evapotranspiration, ghyben_herzberg, infiltration_capacity,
    s_star_model, sichardt_radius, slug_test, theis_drawdown, thiem_confined,
    thiem_confined_drawdown, transport_1d, well_capture,
};
use hyd_models::special::exp_integral_e1;
use hyd_models::{ModelSpec, ResolvedParameters};
use proptest::prelude::*;

fn resolve(spec: &ModelSpec, overrides: &[(&str, f64)]) -> ResolvedParameters {
    let mut values = spec.defaults();
    for (name, value) in overrides {
        values.set(*name, *value);
    }
    spec.resolve(&values).unwrap()
}

fn readout(spec: &ModelSpec, params: &ResolvedParameters, name: &str) -> f64 {
    spec.readouts(params)
        .unwrap()
        .into_iter()
        .find(|r| r.name == name)
        .unwrap()
        .value
}

#[test]
fn baseflow_starts_at_q0_and_decays() {
    let spec = baseflow_recession();
    let params = resolve(&spec, &[("q0", 1000.0), ("a", 0.01)]);
    assert_eq!(spec.eval(&params, 0.0), 1000.0);
    let mut previous = spec.eval(&params, 0.0);
    for day in 1..91 {
        let q = spec.eval(&params, day as f64);
        assert!(q < previous);
        previous = q;
    }
    assert!(spec.eval(&params, 1e5) < 1e-300);
}

#[test]
fn baseflow_shades_the_recession_volume() {
    let spec = baseflow_recession();
    let params = resolve(&spec, &[]);
    let guides = spec.guides(&params);
    assert!(guides.lines.is_empty());
    assert_eq!(guides.shades.len(), 1);
    let shade = &guides.shades[0];
    assert_eq!(shade.label, "baseflow volume");
    assert_eq!(shade.upper, ShadeBound::Curve);
    assert_eq!(shade.lower, ShadeBound::Constant(0.0));
}

#[test]
fn infiltration_clamps_initial_capacity() {
    let spec = infiltration_capacity();
    let params = resolve(&spec, &[("f0", 3.0), ("fc", 5.0)]);
    assert_eq!(params.value("f0"), 5.0);
    for t in [0.0, 10.0, 3600.0, 86_399.0] {
        assert_eq!(spec.eval(&params, t), 5.0);
    }
}

#[test]
fn infiltration_scenario_and_ponding_time() {
    let spec = infiltration_capacity();
    let params = resolve(&spec, &[("f0", 7.0), ("fc", 5.0), ("k", 0.01)]);
    assert_eq!(spec.eval(&params, 0.0), 7.0);
    assert!((spec.eval(&params, 1e6) - 5.0).abs() < 1e-12);
    assert!(spec.readouts(&params).unwrap().is_empty());

    let raining = resolve(&spec, &[("precipitation", 6.0), ("k", 0.01)]);
    let ponding = readout(&spec, &raining, "ponding_time");
    assert!((ponding - 2f64.ln() / 0.01).abs() < 1e-9);
    let guides = spec.guides(&raining);
    assert_eq!(guides.lines[0].y, 6.0);
    assert_eq!(guides.shades.len(), 2);
    assert_eq!(guides.shades[1].upper, ShadeBound::Constant(6.0));
    assert!(guides.shades[1].only_where_exceeds);
}

#[test]
fn slug_test_decays_below_one_percent_within_a_minute() {
    let spec = slug_test();
    let params = resolve(&spec, &[("k", 1e-3)]);
    assert_eq!(spec.eval(&params, 0.0), 1.0);
    assert!(spec.eval(&params, 60.0) < 0.01);
    let shape = 2.0 * PI * 2.1 / (2.1f64 / 0.085).ln();
    assert!((readout(&spec, &params, "shape_factor") - shape).abs() < 1e-12);
    let rate = shape / (PI * 0.025 * 0.025) * 1e-3;
    assert!((readout(&spec, &params, "half_time") - 2f64.ln() / rate).abs() < 1e-9);
}

#[test]
fn slug_test_rejects_degenerate_screen() {
    let spec = slug_test();
    let values = spec
        .defaults()
        .with("screen_length", 0.1)
        .with("screen_radius", 0.2);
    let err = spec.resolve(&values).unwrap_err();
    assert!(matches!(err, HydroError::InvalidArgument(_)));
    assert_eq!(err.info().code, "hyd_models.slug_geometry");
    assert_eq!(err.info().context["model"], "slug_test");
}

#[test]
fn capture_zone_limit_and_readouts() {
    let spec = well_capture().unwrap();
    let params = resolve(&spec, &[]);
    let x0 = -0.005 / (2.0 * PI * 1e-3 * 1e-3 * 20.0);
    assert!((spec.eval(&params, 0.0) - x0).abs() < 1e-12);
    assert!((spec.eval(&params, 1e-9) - x0).abs() < 1e-9);
    assert!((spec.eval(&params, 1e-2) - x0).abs() < 1e-3);
    assert!((readout(&spec, &params, "culmination_point") - x0).abs() < 1e-12);
    assert!((readout(&spec, &params, "full_width") - 250.0).abs() < 1e-9);
    // opens towards +x
    assert!(spec.eval(&params, 120.0) > 0.0);

    let domain = spec.domain_for(&params).unwrap();
    assert!((domain.start + 124.875).abs() < 1e-9);
    assert!((domain.end - 124.875).abs() < 1e-9);
}

#[test]
fn theis_matches_well_function() {
    let spec = theis_drawdown();
    let params = resolve(&spec, &[]);
    assert_eq!(spec.eval(&params, 0.0), 0.0);
    // r^2 S / (4 T t) = 1 at t = 360 s
    let expected = 0.005 / (4.0 * PI * 1e-3) * exp_integral_e1(1.0);
    assert!((spec.eval(&params, 360.0) - expected).abs() < 1e-12);
    assert!(spec.eval(&params, 9000.0) > spec.eval(&params, 1000.0));
}

#[test]
fn thiem_head_is_continuous_at_radius_of_influence() {
    let spec = thiem_confined().unwrap();
    let params = resolve(&spec, &[]);
    let radius = readout(&spec, &params, "radius_of_influence");
    assert_eq!(spec.eval(&params, radius), 20.0);
    assert!((spec.eval(&params, radius * (1.0 - 1e-9)) - 20.0).abs() < 1e-6);
    assert_eq!(spec.eval(&params, 1.4 * radius), 20.0);
    let well_head = readout(&spec, &params, "well_head");
    assert!((spec.eval(&params, 0.1) - well_head).abs() < 1e-6);

    let domain = spec.domain_for(&params).unwrap();
    assert_eq!(domain.start, 0.1);
    assert!((domain.end - 1.5 * radius).abs() < 1e-9);
}

#[test]
fn thiem_rejects_head_below_aquifer_top() {
    let spec = thiem_confined().unwrap();
    let values = spec.defaults().with("head", 15.0).with("thickness", 20.0);
    let err = spec.resolve(&values).unwrap_err();
    assert!(matches!(err, HydroError::InvalidArgument(_)));
    assert_eq!(err.info().code, "hyd_models.thiem_unconfined");
    assert_eq!(err.info().context["model"], "thiem_confined");
}

#[test]
fn thiem_rejects_well_head_below_aquifer_top() {
    // R is about 90 m, so the well is drawn down by about 3 m to 17 m
    let spec = thiem_confined().unwrap();
    let values = spec.defaults().with("head", 20.0).with("thickness", 18.0);
    let err = spec.resolve(&values).unwrap_err();
    assert_eq!(err.info().code, "hyd_models.thiem_unconfined");
    assert!(err.info().context.contains_key("drawdown"));

    let params = resolve(&spec, &[]);
    let lines = spec.guides(&params).lines;
    assert_eq!(lines[0].label, "aquifer top");
    assert_eq!(lines[0].y, 10.0);
}

#[test]
fn thiem_drawdown_mode_derives_pumping_rate() {
    let spec = thiem_confined_drawdown().unwrap();
    let params = resolve(&spec, &[]);
    // R = 3000 * 2 * sqrt(1e-4) = 60
    assert!((readout(&spec, &params, "radius_of_influence") - 60.0).abs() < 1e-9);
    let q = readout(&spec, &params, "pumping_rate");
    let expected = 2.0 * PI * 1e-4 * 10.0 * 2.0 / 600f64.ln();
    assert!((q - expected).abs() < 1e-15);
    assert!((spec.eval(&params, 0.1) - 18.0).abs() < 1e-9);
    assert!((spec.eval(&params, 60.0) - 20.0).abs() < 1e-9);
    assert_eq!(spec.eval(&params, 61.0), 20.0);
    assert!((spec.domain.end - 90.0).abs() < 1e-9);

    // pumping that rate reproduces the prescribed drawdown
    let rate_driven = thiem_confined().unwrap();
    let back = resolve(&rate_driven, &[("q", q)]);
    assert!((readout(&rate_driven, &back, "well_drawdown") - 2.0).abs() < 1e-6);
}

#[test]
fn thiem_drawdown_mode_checks_geometry() {
    let spec = thiem_confined_drawdown().unwrap();
    let dry = spec.defaults().with("head", 15.0).with("drawdown", 9.5);
    let err = spec.resolve(&dry).unwrap_err();
    assert_eq!(err.info().code, "hyd_models.thiem_unconfined");

    let short = spec.defaults().with("drawdown", 0.01).with("k", 1e-5);
    let err = spec.resolve(&short).unwrap_err();
    assert_eq!(err.info().code, "hyd_models.thiem_radius");
}

#[test]
fn sichardt_iteration_fails_without_a_fixed_point() {
    // c / rw below e has no solution of R = c ln(R / rw)
    let err = sichardt_radius(1e-6, 50.0, 1e-1, 1.0).unwrap_err();
    assert!(matches!(err, HydroError::Numeric(_)));
}

#[test]
fn ghyben_herzberg_forty_to_one() {
    let spec = ghyben_herzberg();
    let params = resolve(&spec, &[]);
    assert!((readout(&spec, &params, "ratio") - 40.0).abs() < 1e-12);
    assert!((spec.eval(&params, 0.0) - 200.0).abs() < 1e-9);
    assert_eq!(spec.eval(&params, 1000.0), 0.0);

    let values = spec.defaults().with("rho_s", 990.0);
    let err = spec.resolve(&values).unwrap_err();
    assert_eq!(err.info().code, "hyd_models.density_order");
}

#[test]
fn evapotranspiration_is_piecewise_linear() {
    let spec = evapotranspiration();
    let params = resolve(&spec, &[]);
    assert_eq!(spec.eval(&params, -0.5), 2.0);
    assert_eq!(spec.eval(&params, -1.0), 2.0);
    assert!((spec.eval(&params, -3.0) - 1.0).abs() < 1e-12);
    assert_eq!(spec.eval(&params, -5.0), 0.0);
    assert_eq!(spec.eval(&params, -6.0), 0.0);
    assert_eq!(readout(&spec, &params, "extinction_elevation"), -5.0);
}

#[test]
fn breakthrough_is_near_half_at_advective_arrival() {
    let spec = transport_1d().unwrap();
    let params = resolve(&spec, &[]);
    let arrival = readout(&spec, &params, "arrival_time");
    assert!((arrival - 150_000.0).abs() < 1e-6);
    assert_eq!(spec.eval(&params, 0.0), 0.0);
    assert!((spec.eval(&params, arrival) - 0.5).abs() < 0.05);
    assert!(spec.eval(&params, 2.9 * arrival) > 0.99);

    // exp(vL/D) alone overflows at this Peclet number
    let sharp = resolve(&spec, &[("distance", 100.0), ("dispersivity", 0.001)]);
    let c = spec.eval(&sharp, 100.0 / 1e-4);
    assert!(c.is_finite());
    assert!((c - 0.5).abs() < 0.05);
}

#[test]
fn s_star_model_reports_integral() {
    let spec = s_star_model();
    let params = resolve(&spec, &[]);
    assert_eq!(spec.eval(&params, 0.0), 0.0);
    let value = readout(&spec, &params, "s_star");
    assert!(value.is_finite() && value > 0.0);
}

#[test]
fn slider_positions_drive_log_parameters() {
    let spec = slug_test();
    let positions = [("k".to_string(), -4.0)].into_iter().collect();
    let values = ParameterValues::from_slider_positions(&spec.params, &positions).unwrap();
    let params = spec.resolve(&values).unwrap();
    assert!((params.value("k") - 1e-4).abs() < 1e-18);
}

proptest! {
    #[test]
    fn capture_zone_is_symmetric(y in 0.0f64..124.0, q in 0.001f64..0.2, b in 1.0f64..100.0) {
        let spec = well_capture().unwrap();
        let params = resolve(&spec, &[("q", q), ("b", b)]);
        let half = q / (2.0 * 1e-3 * 1e-3 * b);
        let y = y / 125.0 * 0.999 * half;
        prop_assert_eq!(spec.eval(&params, y), spec.eval(&params, -y));
    }
}
