//! Parameter assembly from command line assignments.

use std::collections::BTreeMap;

use hyd_core::{ErrorInfo, HydroError, ParameterValues};
use hyd_models::ModelSpec;

/// Parses `name=value`.
pub fn parse_assignment(text: &str) -> Result<(String, f64), HydroError> {
    let invalid = || {
        HydroError::InvalidArgument(
            ErrorInfo::new("hyd_lab.assignment", "expected NAME=VALUE")
                .with_context("input", text),
        )
    };
    let (name, value) = text.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    let value: f64 = value.trim().parse().map_err(|_| invalid())?;
    Ok((name.to_string(), value))
}

/// Defaults, then slider positions (`log10` for log-scale parameters), then
/// explicit values.
pub fn build_values(
    spec: &ModelSpec,
    sliders: &BTreeMap<String, f64>,
    values: &BTreeMap<String, f64>,
) -> Result<ParameterValues, HydroError> {
    let mut params = ParameterValues::from_slider_positions(&spec.params, sliders)
        .map_err(|err| err.with_context("model", &spec.id))?;
    for (name, value) in values {
        params.set(name.clone(), *value);
    }
    Ok(params)
}

/// Collects repeated `--param` style assignments.
pub fn collect_assignments(items: &[String]) -> Result<BTreeMap<String, f64>, HydroError> {
    items.iter().map(|item| parse_assignment(item)).collect()
}

/// Query abscissa used when none is given: the middle of the domain the
/// model takes for these parameter values.
pub fn default_query_x(spec: &ModelSpec, values: &ParameterValues) -> Result<f64, HydroError> {
    let domain = spec.domain_for(&spec.resolve(values)?)?;
    Ok(domain.start + 0.5 * domain.width())
}
