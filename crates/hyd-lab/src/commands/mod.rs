pub mod curve;
pub mod fit;
pub mod list;
pub mod plot;
pub mod scenario;
pub mod sweep;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use hyd_core::{HydroError, ParameterValues};
use hyd_curve::{CurveOptions, QueryPolicy, DEFAULT_RESOLUTION};
use hyd_lab::params::{build_values, collect_assignments, default_query_x};
use hyd_lab::PlotFormat;
use hyd_models::{global, ModelSpec};
use hyd_plot::SvgConfig;

/// Model selection and parameter state shared by the evaluating commands.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Model identifier, see `hydrolab list`.
    #[arg(long, short)]
    pub model: String,
    /// Parameter value as NAME=VALUE; repeatable.
    #[arg(long = "param", short = 'p', value_name = "NAME=VALUE")]
    pub params: Vec<String>,
    /// Widget position as NAME=POSITION, log10 of the value for log-scale parameters.
    #[arg(long = "slider", value_name = "NAME=POSITION")]
    pub sliders: Vec<String>,
    /// Query abscissa; defaults to the middle of the model's domain.
    #[arg(long, short = 'x', allow_negative_numbers = true)]
    pub query: Option<f64>,
    /// Number of grid points.
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    pub resolution: usize,
    /// Fail instead of clamping when the query lies outside the domain.
    #[arg(long)]
    pub reject_query: bool,
}

impl ModelArgs {
    pub fn spec(&self) -> Result<Arc<ModelSpec>, HydroError> {
        global()?.get(&self.model)
    }

    pub fn values(&self, spec: &ModelSpec) -> Result<ParameterValues, HydroError> {
        build_values(
            spec,
            &collect_assignments(&self.sliders)?,
            &collect_assignments(&self.params)?,
        )
    }

    pub fn query_x(&self, spec: &ModelSpec, values: &ParameterValues) -> Result<f64, HydroError> {
        match self.query {
            Some(x) => Ok(x),
            None => default_query_x(spec, values),
        }
    }

    pub fn options(&self) -> CurveOptions {
        CurveOptions {
            resolution: self.resolution,
            query_policy: if self.reject_query {
                QueryPolicy::Reject
            } else {
                QueryPolicy::Clamp
            },
        }
    }
}

/// Output settings shared by the plotting commands.
#[derive(Args, Debug, Clone)]
pub struct PlotOutArgs {
    /// Output file; the format follows the extension (`.json` or `.svg`).
    #[arg(long, short)]
    pub out: PathBuf,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, default_value_t = 640)]
    pub width: u32,
    #[arg(long, default_value_t = 480)]
    pub height: u32,
}

impl PlotOutArgs {
    pub fn format(&self) -> PlotFormat {
        match self.out.extension().and_then(|ext| ext.to_str()) {
            Some("json") => PlotFormat::Json,
            _ => PlotFormat::Svg,
        }
    }

    pub fn svg_config(&self) -> SvgConfig {
        SvgConfig {
            width: self.width,
            height: self.height,
            ..SvgConfig::default()
        }
    }
}
