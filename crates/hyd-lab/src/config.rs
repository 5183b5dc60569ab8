//! YAML scenario files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use hyd_core::{ErrorInfo, HydroError};
use hyd_curve::{CurveOptions, QueryPolicy, DEFAULT_RESOLUTION};
use hyd_plot::{AxisOverrides, SvgConfig};
use serde::{Deserialize, Serialize};

/// One reproducible session: model, parameter state, query and outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Model identifier from the built-in catalogue.
    pub model: String,
    /// Explicit parameter values; these win over slider positions.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
    /// Widget positions, `log10(value)` for log-scale parameters.
    #[serde(default)]
    pub sliders: BTreeMap<String, f64>,
    /// Query abscissa; the middle of the declared domain when absent.
    #[serde(default)]
    pub query_x: Option<f64>,
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default)]
    pub query_policy: QueryPolicy,
    #[serde(default)]
    pub plot: PlotConfig,
    /// Optional family of curves over one parameter.
    #[serde(default)]
    pub sweep: Option<SweepConfig>,
    /// CSV file with `x,y` columns, relative to the scenario file.
    #[serde(default)]
    pub observations: Option<PathBuf>,
    /// Seed of a hidden parameter set to compare the current state against.
    #[serde(default)]
    pub hidden_seed: Option<u64>,
}

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

impl ScenarioConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            params: BTreeMap::new(),
            sliders: BTreeMap::new(),
            query_x: None,
            resolution: DEFAULT_RESOLUTION,
            query_policy: QueryPolicy::default(),
            plot: PlotConfig::default(),
            sweep: None,
            observations: None,
            hidden_seed: None,
        }
    }

    pub fn curve_options(&self) -> CurveOptions {
        CurveOptions {
            resolution: self.resolution,
            query_policy: self.query_policy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlotFormat {
    #[default]
    Svg,
    Json,
}

impl PlotFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PlotFormat::Svg => "svg",
            PlotFormat::Json => "json",
        }
    }
}

/// Plot output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default)]
    pub format: PlotFormat,
    /// Output file, relative to the output directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub x_bounds: Option<(f64, f64)>,
    #[serde(default)]
    pub y_bounds: Option<(f64, f64)>,
}

fn default_width() -> u32 {
    SvgConfig::default().width
}

fn default_height() -> u32 {
    SvgConfig::default().height
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            format: PlotFormat::default(),
            path: None,
            title: None,
            width: default_width(),
            height: default_height(),
            x_bounds: None,
            y_bounds: None,
        }
    }
}

impl PlotConfig {
    pub fn svg_config(&self) -> SvgConfig {
        SvgConfig {
            width: self.width,
            height: self.height,
            ..SvgConfig::default()
        }
    }

    pub fn axis_overrides(&self) -> AxisOverrides {
        AxisOverrides {
            x: self.x_bounds,
            y: self.y_bounds,
        }
    }
}

/// Parameter sweep: explicit `values`, or `count` values across the declared range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub param: String,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default = "default_sweep_count")]
    pub count: usize,
}

fn default_sweep_count() -> usize {
    5
}

fn config_error(code: &str, path: &Path, err: impl ToString) -> HydroError {
    HydroError::Serde(ErrorInfo::new(code, err.to_string()).with_context("path", path.display()))
}

pub fn parse_scenario(text: &str) -> Result<ScenarioConfig, HydroError> {
    serde_yaml::from_str(text)
        .map_err(|err| HydroError::Serde(ErrorInfo::new("hyd_lab.config_parse", err.to_string())))
}

pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, HydroError> {
    let text =
        fs::read_to_string(path).map_err(|err| config_error("hyd_lab.config_read", path, err))?;
    parse_scenario(&text).map_err(|err| err.with_context("path", path.display()))
}
