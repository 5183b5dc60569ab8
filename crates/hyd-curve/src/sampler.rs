//! Evaluation grids and query-point admission.

use hyd_core::{Domain, ErrorInfo, HydroError};
use hyd_models::{ModelSpec, ResolvedParameters};
use log::debug;
use serde::{Deserialize, Serialize};

/// Number of grid points used when the caller does not choose one.
pub const DEFAULT_RESOLUTION: usize = 200;
/// Upper bound on the grid size of a single request.
pub const MAX_RESOLUTION: usize = 1_000_000;

/// Handling of query points outside the closed domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueryPolicy {
    /// Move the point onto the nearest domain bound without an error.
    #[default]
    Clamp,
    /// Fail with [`HydroError::InvalidArgument`].
    Reject,
}

/// Admitted query abscissa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryX {
    pub x: f64,
    pub requested: f64,
    pub clamped: bool,
}

/// `resolution` evenly spaced values covering `[start, end)`, starting exactly at `start`.
pub fn grid(domain: Domain, resolution: usize) -> Result<Vec<f64>, HydroError> {
    if !(2..=MAX_RESOLUTION).contains(&resolution) {
        return Err(HydroError::InvalidArgument(
            ErrorInfo::new("hyd_curve.resolution", "resolution must lie in [2, 1000000]")
                .with_context("resolution", resolution),
        ));
    }
    let step = domain.width() / resolution as f64;
    let xs: Vec<f64> = (0..resolution)
        .map(|i| domain.start + i as f64 * step)
        .collect();
    if xs.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(HydroError::InvalidArgument(
            ErrorInfo::new(
                "hyd_curve.grid_degenerate",
                "domain is too narrow for the requested resolution",
            )
            .with_context("start", domain.start)
            .with_context("end", domain.end)
            .with_context("resolution", resolution),
        ));
    }
    Ok(xs)
}

/// Sampling grid of a model for the given parameters.
pub fn sample(
    spec: &ModelSpec,
    params: &ResolvedParameters,
    resolution: usize,
) -> Result<Vec<f64>, HydroError> {
    let domain = spec.domain_for(params)?;
    grid(domain, resolution).map_err(|err| err.with_context("model", &spec.id))
}

/// Admits a query abscissa on the closed domain `[start, end]`.
pub fn at(
    spec: &ModelSpec,
    params: &ResolvedParameters,
    x: f64,
    policy: QueryPolicy,
) -> Result<QueryX, HydroError> {
    let domain = spec.domain_for(params)?;
    admit_query(&domain, x, policy).map_err(|err| err.with_context("model", &spec.id))
}

pub(crate) fn admit_query(
    domain: &Domain,
    x: f64,
    policy: QueryPolicy,
) -> Result<QueryX, HydroError> {
    if !x.is_finite() {
        return Err(HydroError::InvalidArgument(
            ErrorInfo::new("hyd_curve.query_not_finite", "query point must be finite")
                .with_context("x", x),
        ));
    }
    if domain.contains(x) {
        return Ok(QueryX {
            x,
            requested: x,
            clamped: false,
        });
    }
    match policy {
        QueryPolicy::Clamp => {
            let clamped = domain.clamp(x);
            debug!("query {x} clamped to {clamped}");
            Ok(QueryX {
                x: clamped,
                requested: x,
                clamped: true,
            })
        }
        QueryPolicy::Reject => Err(HydroError::InvalidArgument(
            ErrorInfo::new("hyd_curve.query_out_of_domain", "query point outside the domain")
                .with_context("x", x)
                .with_context("start", domain.start)
                .with_context("end", domain.end)
                .with_hint("use the clamp query policy to pin the point to the nearest bound"),
        )),
    }
}
