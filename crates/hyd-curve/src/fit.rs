//! Goodness of fit between a model curve and measured data.

use hyd_core::{ErrorInfo, HydroError, ParameterValues};
use hyd_models::{global, ModelRegistry};
use serde::{Deserialize, Serialize};

use crate::evaluate::evaluate_point;

/// One measured `(x, y)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
}

/// Residual statistics with residuals taken as `model - observed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitStatistics {
    pub count: usize,
    pub mean_error: f64,
    pub mean_absolute_error: f64,
    pub rmse: f64,
}

impl FitStatistics {
    /// Statistics over precomputed residuals.
    pub fn from_residuals(residuals: &[f64]) -> Result<Self, HydroError> {
        if residuals.is_empty() {
            return Err(HydroError::invalid(
                "hyd_curve.fit_empty",
                "at least one observation is required",
            ));
        }
        let n = residuals.len() as f64;
        let (sum, sum_abs, sum_sq) = residuals
            .iter()
            .fold((0.0, 0.0, 0.0), |(s, a, q), &r| (s + r, a + r.abs(), q + r * r));
        Ok(Self {
            count: residuals.len(),
            mean_error: sum / n,
            mean_absolute_error: sum_abs / n,
            rmse: (sum_sq / n).sqrt(),
        })
    }
}

/// Compares a built-in model against observations.
pub fn fit_statistics(
    model_id: &str,
    params: &ParameterValues,
    observations: &[Observation],
) -> Result<FitStatistics, HydroError> {
    fit_statistics_in(global()?, model_id, params, observations)
}

/// Registry-explicit variant of [`fit_statistics`].
///
/// Observations are evaluated where they were taken, including outside the
/// plotting domain.
pub fn fit_statistics_in(
    registry: &ModelRegistry,
    model_id: &str,
    params: &ParameterValues,
    observations: &[Observation],
) -> Result<FitStatistics, HydroError> {
    let spec = registry.get(model_id)?;
    let resolved = spec.resolve(params)?;
    let residuals = observations
        .iter()
        .enumerate()
        .map(|(idx, obs)| {
            if !obs.x.is_finite() || !obs.y.is_finite() {
                return Err(HydroError::InvalidArgument(
                    ErrorInfo::new("hyd_curve.fit_observation", "observation must be finite")
                        .with_context("index", idx)
                        .with_context("x", obs.x)
                        .with_context("y", obs.y),
                ));
            }
            Ok(evaluate_point(&spec, &resolved, obs.x)? - obs.y)
        })
        .collect::<Result<Vec<_>, _>>()?;
    FitStatistics::from_residuals(&residuals).map_err(|err| err.with_context("model", model_id))
}
