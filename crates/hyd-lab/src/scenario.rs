//! End-to-end execution of a [`ScenarioConfig`].

use std::path::{Path, PathBuf};

use hyd_core::{to_canonical_json_bytes, HydroError, ParameterValues};
use hyd_curve::{
    compute_spec, draw_hidden_parameters, fit_statistics_in, sweep_parameter_in, sweep_values,
    swept_param, CurveResult, FitStatistics, Observation,
};
use hyd_models::{global, ModelRegistry};
use hyd_plot::{check_axis_bounds, sweep_plot, to_plot_spec, PlotSpec, PresentationOptions};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{ScenarioConfig, SweepConfig};
use crate::observations::read_observations;
use crate::output::{write_bytes, write_plot};
use crate::params::{build_values, default_query_x};

pub const REPORT_FILE: &str = "scenario_report.json";

/// Everything a scenario run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub model_id: String,
    /// Parameter values as submitted, before normalization.
    pub params: ParameterValues,
    pub result: CurveResult,
    #[serde(default)]
    pub sweep_values: Vec<f64>,
    /// Model against the observation file.
    #[serde(default)]
    pub fit: Option<FitStatistics>,
    /// Model against the curve of the hidden parameter set.
    #[serde(default)]
    pub hidden_fit: Option<FitStatistics>,
    pub plot_path: PathBuf,
}

/// Runs a scenario against the built-in catalogue.
///
/// Relative observation paths resolve against `base_dir`; the plot and the
/// JSON report are written into `out_dir`.
pub fn run_scenario(
    config: &ScenarioConfig,
    base_dir: &Path,
    out_dir: &Path,
) -> Result<ScenarioReport, HydroError> {
    run_scenario_in(global()?, config, base_dir, out_dir)
}

/// Registry-explicit variant of [`run_scenario`].
pub fn run_scenario_in(
    registry: &ModelRegistry,
    config: &ScenarioConfig,
    base_dir: &Path,
    out_dir: &Path,
) -> Result<ScenarioReport, HydroError> {
    let spec = registry.get(&config.model)?;
    let params = build_values(&spec, &config.sliders, &config.params)?;
    let query_x = match config.query_x {
        Some(x) => x,
        None => default_query_x(&spec, &params)?,
    };
    let options = config.curve_options();
    let result = compute_spec(&spec, &params, query_x, &options)?;
    debug!(
        "scenario {} evaluated at x = {}, y = {}",
        spec.id, result.query.x, result.query.y
    );

    let (plot, swept) = match &config.sweep {
        Some(sweep) => {
            let values = resolve_sweep_values(registry, &config.model, sweep)?;
            let results = sweep_parameter_in(
                registry,
                &config.model,
                &params,
                &sweep.param,
                &values,
                query_x,
                &options,
            )?;
            let mut plot = sweep_plot(&results, &sweep.param, &values)?;
            apply_overrides(&mut plot, config)?;
            (plot, values)
        }
        None => {
            let mut presentation = PresentationOptions::for_result(&result);
            presentation.title = config.plot.title.clone();
            presentation.x_bounds = config.plot.x_bounds;
            presentation.y_bounds = config.plot.y_bounds;
            (to_plot_spec(&result.curve, &result.query, &presentation)?, Vec::new())
        }
    };
    let plot_path = out_dir.join(config.plot.path.clone().unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", spec.id, config.plot.format.extension()))
    }));
    write_plot(&plot_path, &plot, config.plot.format, &config.plot.svg_config())?;

    let fit = match &config.observations {
        Some(path) => {
            let observations = read_observations(&base_dir.join(path))?;
            Some(fit_statistics_in(registry, &config.model, &params, &observations)?)
        }
        None => None,
    };

    let hidden_fit = match config.hidden_seed {
        Some(seed) => {
            let hidden = draw_hidden_parameters(&spec, seed)?;
            let target = compute_spec(&spec, &hidden, query_x, &options)?;
            let observations: Vec<Observation> = target
                .curve
                .points
                .iter()
                .map(|point| Observation {
                    x: point.x,
                    y: point.y,
                })
                .collect();
            Some(fit_statistics_in(registry, &config.model, &params, &observations)?)
        }
        None => None,
    };

    let report = ScenarioReport {
        model_id: spec.id.clone(),
        params,
        result,
        sweep_values: swept,
        fit,
        hidden_fit,
        plot_path,
    };
    write_bytes(&out_dir.join(REPORT_FILE), &to_canonical_json_bytes(&report)?)?;
    info!("scenario {} complete", report.model_id);
    Ok(report)
}

fn resolve_sweep_values(
    registry: &ModelRegistry,
    model_id: &str,
    sweep: &SweepConfig,
) -> Result<Vec<f64>, HydroError> {
    if !sweep.values.is_empty() {
        return Ok(sweep.values.clone());
    }
    let spec = registry.get(model_id)?;
    sweep_values(swept_param(&spec, &sweep.param)?, sweep.count)
}

fn apply_overrides(plot: &mut PlotSpec, config: &ScenarioConfig) -> Result<(), HydroError> {
    if let Some(title) = &config.plot.title {
        plot.title = title.clone();
    }
    if let Some(bounds) = config.plot.x_bounds {
        (plot.axes.x_min, plot.axes.x_max) = check_axis_bounds("x", bounds)?;
    }
    if let Some(bounds) = config.plot.y_bounds {
        (plot.axes.y_min, plot.axes.y_max) = check_axis_bounds("y", bounds)?;
    }
    Ok(())
}
