//! Families of curves obtained by varying one parameter.

use hyd_core::{ErrorInfo, HydroError, ParamDecl, ParameterValues};
use hyd_models::{global, ModelRegistry, ModelSpec};
use log::debug;

use crate::pipeline::{compute_curve_in, CurveOptions, CurveResult};

/// Evaluates a built-in model once per value of `name`, all other parameters fixed.
pub fn sweep_parameter(
    model_id: &str,
    params: &ParameterValues,
    name: &str,
    values: &[f64],
    query_x: f64,
) -> Result<Vec<CurveResult>, HydroError> {
    sweep_parameter_in(
        global()?,
        model_id,
        params,
        name,
        values,
        query_x,
        &CurveOptions::default(),
    )
}

/// Registry-explicit variant of [`sweep_parameter`].
pub fn sweep_parameter_in(
    registry: &ModelRegistry,
    model_id: &str,
    params: &ParameterValues,
    name: &str,
    values: &[f64],
    query_x: f64,
    options: &CurveOptions,
) -> Result<Vec<CurveResult>, HydroError> {
    let spec = registry.get(model_id)?;
    swept_param(&spec, name)?;
    if values.is_empty() {
        return Err(HydroError::InvalidArgument(
            ErrorInfo::new("hyd_curve.sweep_empty", "sweep needs at least one value")
                .with_context("model", model_id)
                .with_context("param", name),
        ));
    }
    debug!("sweeping {name} of {model_id} over {} values", values.len());
    values
        .iter()
        .map(|&value| {
            let varied = params.clone().with(name, value);
            compute_curve_in(registry, model_id, &varied, query_x, options)
                .map_err(|err| err.with_context("sweep_value", value))
        })
        .collect()
}

/// Declaration of the parameter a sweep varies.
pub fn swept_param<'a>(spec: &'a ModelSpec, name: &str) -> Result<&'a ParamDecl, HydroError> {
    spec.param_decl(name).ok_or_else(|| {
        HydroError::InvalidArgument(
            ErrorInfo::new("hyd_curve.sweep_param", "swept parameter is not declared")
                .with_context("model", &spec.id)
                .with_context("param", name),
        )
    })
}

/// `count` values spanning the declared range, log-spaced for log-scale parameters.
pub fn sweep_values(decl: &ParamDecl, count: usize) -> Result<Vec<f64>, HydroError> {
    if count == 0 {
        return Err(HydroError::InvalidArgument(
            ErrorInfo::new("hyd_curve.sweep_empty", "sweep needs at least one value")
                .with_context("param", &decl.name),
        ));
    }
    if count == 1 {
        return Ok(vec![decl.default]);
    }
    let (lo, hi) = decl.slider_range();
    let step = (hi - lo) / (count - 1) as f64;
    Ok((0..count)
        .map(|i| {
            let position = if i == count - 1 { hi } else { lo + i as f64 * step };
            decl.from_slider(position).clamp(decl.min, decl.max)
        })
        .collect())
}
