use hyd_core::errors::{ErrorInfo, HydroError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("model", "baseflow_recession")
        .with_context("value", 1.5)
}

#[test]
fn invalid_argument_surface() {
    let err = HydroError::InvalidArgument(sample_info("hyd_core.param_out_of_range", "too big"));
    assert_eq!(err.info().code, "hyd_core.param_out_of_range");
    assert_eq!(err.family(), "InvalidArgument");
    assert_eq!(err.info().context.get("value").map(String::as_str), Some("1.5"));
}

#[test]
fn not_found_and_conflict_surface() {
    let missing = HydroError::NotFound(sample_info("hyd_models.unknown_model", "no such model"));
    let conflict = HydroError::Conflict(sample_info("hyd_models.conflict", "already registered"));
    assert_eq!(missing.family(), "NotFound");
    assert_eq!(conflict.family(), "Conflict");
    assert!(missing.info().context.contains_key("model"));
}

#[test]
fn numeric_error_display_lists_context_and_hint() {
    let err = HydroError::numeric("hyd_curve.non_finite", "formula returned NaN")
        .with_context("x", 0.0)
        .with_context("model", "well_capture");
    let HydroError::Numeric(info) = err.clone() else {
        panic!("expected numeric family");
    };
    let rendered = info.with_hint("check the pumping rate").to_string();
    assert!(rendered.starts_with("formula returned NaN (code: hyd_curve.non_finite)"));
    assert!(rendered.contains("model=well_capture, x=0"));
    assert!(rendered.ends_with("hint: check the pumping rate"));
    assert!(err.to_string().starts_with("numeric error:"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = HydroError::invalid("hyd_curve.resolution", "resolution must be at least 2");
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "InvalidArgument");
    assert_eq!(json["detail"]["code"], "hyd_curve.resolution");
}
