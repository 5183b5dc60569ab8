//! Sampling and evaluation pipeline for hydrolab models.
//!
//! Every entry point is a pure function of its inputs; callers own the
//! parameter state and invoke [`compute_curve`] on each change.

pub mod evaluate;
pub mod fit;
pub mod hidden;
pub mod pipeline;
pub mod sampler;
pub mod sweep;

pub use evaluate::{evaluate, evaluate_point};
pub use fit::{fit_statistics, fit_statistics_in, FitStatistics, Observation};
pub use hidden::draw_hidden_parameters;
pub use pipeline::{
    compute_curve, compute_curve_in, compute_curve_with, compute_spec, list_models, CurveOptions,
    CurvePoint, CurveProvenance, CurveResult, QueryPoint, SampledCurve,
};
pub use sampler::{at, grid, sample, QueryPolicy, QueryX, DEFAULT_RESOLUTION, MAX_RESOLUTION};
pub use sweep::{sweep_parameter, sweep_parameter_in, sweep_values, swept_param};
