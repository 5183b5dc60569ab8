//! The recompute entry points: parameters in, sampled curve and readouts out.

use hyd_core::{stable_hash_string, Domain, Guides, HydroError, ParameterValues, Readout};
use hyd_models::{global, ModelRegistry, ModelSpec, ModelSummary};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::evaluate::{evaluate, evaluate_point};
use crate::sampler::{admit_query, grid, QueryPolicy, DEFAULT_RESOLUTION};

/// One sampled `(x, y)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Ordered samples of a model over its domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledCurve {
    pub model_id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub domain: Domain,
    pub transposed: bool,
    pub points: Vec<CurvePoint>,
}

impl SampledCurve {
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The highlighted point for a user-selected abscissa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryPoint {
    pub x: f64,
    pub y: f64,
    /// Abscissa as requested, before clamping.
    pub requested_x: f64,
    pub clamped: bool,
}

/// Identifies the request that produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveProvenance {
    pub model_id: String,
    pub resolution: usize,
    /// SHA-256 of the canonical JSON of the request.
    pub input_hash: String,
}

/// Everything one recompute produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveResult {
    pub curve: SampledCurve,
    pub query: QueryPoint,
    pub readouts: Vec<Readout>,
    pub guides: Guides,
    pub provenance: CurveProvenance,
}

/// Knobs of a single recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveOptions {
    #[serde(default = "CurveOptions::default_resolution")]
    pub resolution: usize,
    #[serde(default)]
    pub query_policy: QueryPolicy,
}

impl CurveOptions {
    const fn default_resolution() -> usize {
        DEFAULT_RESOLUTION
    }
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            resolution: Self::default_resolution(),
            query_policy: QueryPolicy::default(),
        }
    }
}

#[derive(Serialize)]
struct RequestFingerprint<'a> {
    model_id: &'a str,
    params: &'a ParameterValues,
    query_x: f64,
    options: &'a CurveOptions,
}

/// Summaries of every built-in model, ordered by identifier.
pub fn list_models() -> Result<Vec<ModelSummary>, HydroError> {
    Ok(global()?.summaries())
}

/// Evaluates a built-in model with default options.
pub fn compute_curve(
    model_id: &str,
    params: &ParameterValues,
    query_x: f64,
) -> Result<CurveResult, HydroError> {
    compute_curve_with(model_id, params, query_x, &CurveOptions::default())
}

/// Evaluates a built-in model.
pub fn compute_curve_with(
    model_id: &str,
    params: &ParameterValues,
    query_x: f64,
    options: &CurveOptions,
) -> Result<CurveResult, HydroError> {
    compute_curve_in(global()?, model_id, params, query_x, options)
}

/// Evaluates a model looked up in `registry`.
pub fn compute_curve_in(
    registry: &ModelRegistry,
    model_id: &str,
    params: &ParameterValues,
    query_x: f64,
    options: &CurveOptions,
) -> Result<CurveResult, HydroError> {
    let spec = registry.get(model_id)?;
    compute_spec(&spec, params, query_x, options)
}

/// Runs the pipeline for an explicit model declaration: resolve parameters,
/// sample the grid, evaluate the curve and the query point, collect readouts.
pub fn compute_spec(
    spec: &ModelSpec,
    params: &ParameterValues,
    query_x: f64,
    options: &CurveOptions,
) -> Result<CurveResult, HydroError> {
    let resolved = spec.resolve(params)?;
    let domain = spec.domain_for(&resolved)?;
    let tag = |err: HydroError| err.with_context("model", &spec.id);
    let xs = grid(domain, options.resolution).map_err(tag)?;
    let query = admit_query(&domain, query_x, options.query_policy).map_err(tag)?;
    let ys = evaluate(spec, &resolved, &xs)?;
    let query_y = evaluate_point(spec, &resolved, query.x)?;
    let readouts = spec.readouts(&resolved)?;
    let input_hash = stable_hash_string(&RequestFingerprint {
        model_id: &spec.id,
        params,
        query_x,
        options,
    })?;
    debug!(
        "computed {} on [{}, {}) with {} points",
        spec.id, domain.start, domain.end, options.resolution
    );
    Ok(CurveResult {
        curve: SampledCurve {
            model_id: spec.id.clone(),
            title: spec.title.clone(),
            x_label: spec.x_label.clone(),
            y_label: spec.y_label.clone(),
            domain,
            transposed: spec.transposed,
            points: xs
                .into_iter()
                .zip(ys)
                .map(|(x, y)| CurvePoint { x, y })
                .collect(),
        },
        query: QueryPoint {
            x: query.x,
            y: query_y,
            requested_x: query.requested,
            clamped: query.clamped,
        },
        readouts,
        guides: spec.guides(&resolved),
        provenance: CurveProvenance {
            model_id: spec.id.clone(),
            resolution: options.resolution,
            input_hash,
        },
    })
}
