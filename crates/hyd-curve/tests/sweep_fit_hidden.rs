use hyd_core::{HydroError, ParameterValues};
use hyd_curve::{
    draw_hidden_parameters, fit_statistics, sweep_parameter, sweep_values, swept_param,
    FitStatistics, Observation,
};
use hyd_models::catalog::{infiltration_capacity, slug_test};
use hyd_models::global;

fn baseflow() -> ParameterValues {
    [("q0", 1000.0), ("a", 0.01)].into_iter().collect()
}

#[test]
fn sweep_yields_one_curve_per_value() {
    let values = [250.0, 500.0, 750.0];
    let results = sweep_parameter("baseflow_recession", &baseflow(), "q0", &values, 0.0).unwrap();
    let starts: Vec<f64> = results.iter().map(|r| r.query.y).collect();
    assert_eq!(starts, vec![250.0, 500.0, 750.0]);
    assert_ne!(
        results[0].provenance.input_hash,
        results[1].provenance.input_hash
    );
}

#[test]
fn sweep_rejects_unknown_parameter_and_empty_values() {
    let err = sweep_parameter("baseflow_recession", &baseflow(), "k", &[1.0], 0.0).unwrap_err();
    assert_eq!(err.info().code, "hyd_curve.sweep_param");

    let err = sweep_parameter("baseflow_recession", &baseflow(), "q0", &[], 0.0).unwrap_err();
    assert_eq!(err.info().code, "hyd_curve.sweep_empty");

    let err = sweep_parameter("baseflow_recession", &baseflow(), "q0", &[100.0, 9000.0], 0.0)
        .unwrap_err();
    assert_eq!(err.info().context["sweep_value"], "9000");
}

#[test]
fn swept_param_looks_up_the_declaration() {
    let spec = slug_test();
    assert_eq!(swept_param(&spec, "k").unwrap().name, "k");
    let err = swept_param(&spec, "q0").unwrap_err();
    assert_eq!(err.info().code, "hyd_curve.sweep_param");
    assert_eq!(err.info().context["model"], "slug_test");
    assert_eq!(err.info().context["param"], "q0");
}

#[test]
fn sweep_values_are_log_spaced_for_log_parameters() {
    let spec = slug_test();
    let k = spec.param_decl("k").unwrap();
    let values = sweep_values(k, 5).unwrap();
    let expected = [1e-6, 1e-5, 1e-4, 1e-3, 1e-2];
    for (value, expected) in values.iter().zip(expected) {
        assert!(((value - expected) / expected).abs() < 1e-9);
    }
    let linear = sweep_values(spec.param_decl("screen_length").unwrap(), 3).unwrap();
    assert_eq!(linear.first(), Some(&0.1));
    assert_eq!(linear.last(), Some(&30.0));
    assert!(sweep_values(k, 0).is_err());
}

#[test]
fn fit_statistics_on_known_residuals() {
    let stats = FitStatistics::from_residuals(&[1.0, -1.0, 3.0, -3.0]).unwrap();
    assert_eq!(stats.count, 4);
    assert_eq!(stats.mean_error, 0.0);
    assert_eq!(stats.mean_absolute_error, 2.0);
    assert!((stats.rmse - 5f64.sqrt()).abs() < 1e-15);
}

#[test]
fn fit_statistics_against_a_model() {
    let exact: Vec<Observation> = [0.0, 10.0, 20.0]
        .into_iter()
        .map(|t| Observation {
            x: t,
            y: 1000.0 * (-0.01 * t).exp(),
        })
        .collect();
    let stats = fit_statistics("baseflow_recession", &baseflow(), &exact).unwrap();
    assert!(stats.rmse < 1e-9);

    let shifted: Vec<Observation> = exact
        .iter()
        .map(|o| Observation { x: o.x, y: o.y + 1.0 })
        .collect();
    let stats = fit_statistics("baseflow_recession", &baseflow(), &shifted).unwrap();
    assert!((stats.mean_error + 1.0).abs() < 1e-9);
    assert!((stats.mean_absolute_error - 1.0).abs() < 1e-9);
    assert!((stats.rmse - 1.0).abs() < 1e-9);

    let err = fit_statistics("baseflow_recession", &baseflow(), &[]).unwrap_err();
    assert!(matches!(err, HydroError::InvalidArgument(_)));
    assert_eq!(err.info().code, "hyd_curve.fit_empty");
}

#[test]
fn hidden_parameters_are_deterministic_and_admissible() {
    let registry = global().unwrap();
    for id in registry.ids() {
        let spec = registry.get(id).unwrap();
        let first = draw_hidden_parameters(&spec, 7).unwrap();
        let second = draw_hidden_parameters(&spec, 7).unwrap();
        assert_eq!(first, second);
        for decl in &spec.params {
            let value = first.get(&decl.name).unwrap();
            assert!(value >= decl.min && value <= decl.max, "{id}.{}", decl.name);
        }
        assert!(spec.resolve(&first).is_ok());
    }
}

#[test]
fn hidden_parameters_respect_model_constraints() {
    let infiltration = infiltration_capacity();
    let slug = slug_test();
    for seed in 0..32 {
        let values = draw_hidden_parameters(&infiltration, seed).unwrap();
        assert!(values.value("f0") >= values.value("fc"));
        let values = draw_hidden_parameters(&slug, seed).unwrap();
        assert!(values.value("screen_length") > values.value("screen_radius"));
    }
    assert_ne!(
        draw_hidden_parameters(&slug, 1).unwrap(),
        draw_hidden_parameters(&slug, 2).unwrap()
    );
}
