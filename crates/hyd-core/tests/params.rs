use std::collections::BTreeMap;

use hyd_core::{Domain, HydroError, ParamDecl, ParameterValues, RangePolicy};
use proptest::prelude::*;

fn decls() -> Vec<ParamDecl> {
    vec![
        ParamDecl::new("q0", "Initial flow", "m3/s", (0.0, 5000.0), 1000.0, 0.01),
        ParamDecl::new("a", "Recession constant", "1/d", (1e-3, 1.0), 1.0, 0.01).log_scale(),
        ParamDecl::new("x", "Clamped value", "-", (0.0, 10.0), 5.0, 1.0).clamped(),
    ]
}

#[test]
fn defaults_cover_every_declaration() {
    let values = ParameterValues::from_defaults(&decls());
    assert_eq!(values.len(), 3);
    assert_eq!(values.get("q0"), Some(1000.0));
    assert!(values.check_declared(&decls()).is_ok());
}

#[test]
fn slider_positions_map_through_log_scale() {
    let positions: BTreeMap<String, f64> = [("a".to_string(), -2.0)].into_iter().collect();
    let values = ParameterValues::from_slider_positions(&decls(), &positions).expect("positions");
    assert!((values.value("a") - 0.01).abs() < 1e-15);
    assert_eq!(values.value("q0"), 1000.0);
    assert_eq!(decls()[1].slider_range(), (-3.0, 0.0));
}

#[test]
fn missing_unknown_and_nan_are_rejected() {
    let decls = decls();
    let missing = ParameterValues::new().with("q0", 1.0).with("a", 0.1);
    let err = missing.admit(&decls).unwrap_err();
    assert_eq!(err.info().code, "hyd_core.param_missing");

    let unknown = ParameterValues::from_defaults(&decls).with("bogus", 1.0);
    let err = unknown.admit(&decls).unwrap_err();
    assert_eq!(err.info().code, "hyd_core.param_unknown");

    let nan = ParameterValues::from_defaults(&decls).with("q0", f64::NAN);
    let err = nan.admit(&decls).unwrap_err();
    assert!(matches!(err, HydroError::InvalidArgument(_)));
    assert_eq!(err.info().code, "hyd_core.param_not_finite");
}

#[test]
fn range_policy_rejects_or_clamps() {
    let decls = decls();
    assert_eq!(decls[0].policy, RangePolicy::Reject);
    let too_big = ParameterValues::from_defaults(&decls).with("q0", 6000.0);
    let err = too_big.admit(&decls).unwrap_err();
    assert_eq!(err.info().code, "hyd_core.param_out_of_range");
    assert_eq!(err.info().context.get("param").map(String::as_str), Some("q0"));

    let clamped = ParameterValues::from_defaults(&decls)
        .with("x", 42.0)
        .admit(&decls)
        .expect("clamp");
    assert_eq!(clamped.value("x"), 10.0);
}

#[test]
fn declarations_are_validated() {
    let bad_default = ParamDecl::new("k", "k", "1/s", (0.0, 1.0), 2.0, 0.1);
    assert_eq!(
        bad_default.validate().unwrap_err().info().code,
        "hyd_core.decl_default"
    );
    let bad_log = ParamDecl::new("k", "k", "1/s", (0.0, 1.0), 0.5, 0.1).log_scale();
    assert_eq!(
        bad_log.validate().unwrap_err().info().code,
        "hyd_core.decl_log_bounds"
    );
    for decl in decls() {
        decl.validate().expect("valid declaration");
    }
}

#[test]
fn domains_require_ordered_finite_bounds() {
    assert!(Domain::new(0.0, 91.0).is_ok());
    assert_eq!(
        Domain::new(1.0, 1.0).unwrap_err().info().code,
        "hyd_core.domain_empty"
    );
    assert_eq!(
        Domain::new(0.0, f64::INFINITY).unwrap_err().info().code,
        "hyd_core.domain_not_finite"
    );
    let domain = Domain::new(-3.0, 3.0).expect("domain");
    assert_eq!(domain.clamp(10.0), 3.0);
    assert!(domain.contains(3.0));
}

proptest! {
    #[test]
    fn clamped_values_always_land_inside(value in -1e6f64..1e6) {
        let decl = ParamDecl::new("x", "x", "-", (0.0, 10.0), 5.0, 1.0).clamped();
        let admitted = decl.admit(value).unwrap();
        prop_assert!((0.0..=10.0).contains(&admitted));
        if (0.0..=10.0).contains(&value) {
            prop_assert_eq!(admitted, value);
        }
    }
}
