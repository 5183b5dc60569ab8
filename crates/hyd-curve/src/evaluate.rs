//! Elementwise evaluation with non-finite results surfaced as errors.

use hyd_core::{ErrorInfo, HydroError};
use hyd_models::{ModelSpec, ResolvedParameters};

/// Evaluates the model at a single abscissa.
pub fn evaluate_point(
    spec: &ModelSpec,
    params: &ResolvedParameters,
    x: f64,
) -> Result<f64, HydroError> {
    let y = spec.eval(params, x);
    if y.is_finite() {
        Ok(y)
    } else {
        Err(HydroError::Numeric(
            ErrorInfo::new("hyd_curve.non_finite", "model produced a non-finite value")
                .with_context("model", &spec.id)
                .with_context("x", x)
                .with_context("y", y),
        ))
    }
}

/// Evaluates the model at every abscissa, failing on the first non-finite value.
pub fn evaluate(
    spec: &ModelSpec,
    params: &ResolvedParameters,
    xs: &[f64],
) -> Result<Vec<f64>, HydroError> {
    xs.iter().map(|&x| evaluate_point(spec, params, x)).collect()
}
