//! Plot assembly: curve, query marker, guides and axis bounds in one description.
//!
//! Coordinates stay in model space. The horizontal axis of the description is
//! the independent variable; renderers swap the axes when `transposed` is set.

use hyd_core::{ErrorInfo, Guides, HydroError, ReferenceLine, ShadeBound, ShadeRule};
use hyd_curve::{CurvePoint, CurveResult, QueryPoint, SampledCurve};
use log::trace;
use serde::{Deserialize, Serialize};

/// Headroom factor applied to the data extent for default y bounds.
pub const Y_HEADROOM: f64 = 1.1;

/// A named polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub label: String,
    pub points: Vec<CurvePoint>,
}

/// The highlighted query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMarker {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// One grid point of a shaded band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadePoint {
    pub x: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Contiguous run of grid points where the band is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadeSpan {
    pub points: Vec<ShadePoint>,
}

/// A band evaluated pointwise on the sampling grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadedRegion {
    pub label: String,
    pub spans: Vec<ShadeSpan>,
}

/// Axis extents in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Renderer-neutral plot description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Draw the independent variable on the vertical axis.
    pub transposed: bool,
    pub series: Vec<PlotSeries>,
    pub query: QueryMarker,
    pub lines: Vec<ReferenceLine>,
    pub shades: Vec<ShadedRegion>,
    pub axes: AxisBounds,
}

/// Caller choices layered over the computed curve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresentationOptions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub series_label: Option<String>,
    /// Reference lines and shaded regions to draw.
    #[serde(default)]
    pub guides: Guides,
    /// Additional curves, e.g. a parameter sweep.
    #[serde(default)]
    pub overlays: Vec<PlotSeries>,
    #[serde(default)]
    pub x_bounds: Option<(f64, f64)>,
    #[serde(default)]
    pub y_bounds: Option<(f64, f64)>,
}

impl PresentationOptions {
    /// Options carrying the guides suggested by the model.
    pub fn for_result(result: &CurveResult) -> Self {
        Self {
            guides: result.guides.clone(),
            ..Self::default()
        }
    }
}

/// Overrides for [`assemble`]; `None` keeps the default for that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisOverrides {
    pub x: Option<(f64, f64)>,
    pub y: Option<(f64, f64)>,
}

/// Validates an explicit axis range: finite and strictly increasing.
pub fn check_axis_bounds(axis: &str, (lo, hi): (f64, f64)) -> Result<(f64, f64), HydroError> {
    if lo.is_finite() && hi.is_finite() && lo < hi {
        return Ok((lo, hi));
    }
    Err(HydroError::InvalidArgument(
        ErrorInfo::new("hyd_plot.axis_bounds", "axis bounds must be finite and increasing")
            .with_context("axis", axis)
            .with_context("min", lo)
            .with_context("max", hi),
    ))
}

/// Default dependent-axis range: `[0, 1.1 max]`, reaching down to `1.1 min`
/// when values go negative, widened to `[0, 1]` when everything is zero.
pub fn default_y_bounds<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let lo = Y_HEADROOM * min;
    let hi = Y_HEADROOM * max;
    if hi > lo {
        (lo, hi)
    } else {
        (0.0, 1.0)
    }
}

fn bound_value(bound: ShadeBound, y: f64) -> f64 {
    match bound {
        ShadeBound::Curve => y,
        ShadeBound::Constant(level) => level,
    }
}

/// Evaluates a shade rule at every grid point of the curve.
pub fn shade_region(points: &[CurvePoint], rule: &ShadeRule) -> ShadedRegion {
    let mut spans = Vec::new();
    let mut current: Vec<ShadePoint> = Vec::new();
    for point in points {
        let lower = bound_value(rule.lower, point.y);
        let upper = bound_value(rule.upper, point.y);
        if rule.only_where_exceeds && upper <= lower {
            if !current.is_empty() {
                spans.push(ShadeSpan {
                    points: std::mem::take(&mut current),
                });
            }
            continue;
        }
        current.push(ShadePoint {
            x: point.x,
            lower,
            upper,
        });
    }
    if !current.is_empty() {
        spans.push(ShadeSpan { points: current });
    }
    ShadedRegion {
        label: rule.label.clone(),
        spans,
    }
}

/// Builds a plot description from a sampled curve and its query point.
pub fn assemble(
    curve: &SampledCurve,
    query: &QueryPoint,
    aux_lines: &[ReferenceLine],
    shades: &[ShadeRule],
    axis_bounds: AxisOverrides,
) -> Result<PlotSpec, HydroError> {
    let series = PlotSeries {
        label: curve.title.clone(),
        points: curve.points.clone(),
    };
    build(curve, query, vec![series], aux_lines, shades, axis_bounds)
}

fn build(
    curve: &SampledCurve,
    query: &QueryPoint,
    series: Vec<PlotSeries>,
    aux_lines: &[ReferenceLine],
    shades: &[ShadeRule],
    overrides: AxisOverrides,
) -> Result<PlotSpec, HydroError> {
    let (x_min, x_max) = match overrides.x {
        Some(bounds) => check_axis_bounds("x", bounds)?,
        None => (curve.domain.start, curve.domain.end),
    };
    let (y_min, y_max) = match overrides.y {
        Some(bounds) => check_axis_bounds("y", bounds)?,
        None => default_y_bounds(
            series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.y))
                .chain(aux_lines.iter().map(|line| line.y)),
        ),
    };
    let shades: Vec<ShadedRegion> = shades
        .iter()
        .map(|rule| shade_region(&curve.points, rule))
        .collect();
    trace!(
        "assembled plot for {} with {} series and {} shaded regions",
        curve.model_id,
        series.len(),
        shades.len()
    );
    Ok(PlotSpec {
        title: curve.title.clone(),
        x_label: curve.x_label.clone(),
        y_label: curve.y_label.clone(),
        transposed: curve.transposed,
        series,
        query: QueryMarker {
            label: "your input".into(),
            x: query.x,
            y: query.y,
        },
        lines: aux_lines.to_vec(),
        shades,
        axes: AxisBounds {
            x_min,
            x_max,
            y_min,
            y_max,
        },
    })
}

/// Presentation-ready description of a curve and query point.
pub fn to_plot_spec(
    curve: &SampledCurve,
    query: &QueryPoint,
    options: &PresentationOptions,
) -> Result<PlotSpec, HydroError> {
    let mut series = vec![PlotSeries {
        label: options
            .series_label
            .clone()
            .unwrap_or_else(|| curve.title.clone()),
        points: curve.points.clone(),
    }];
    series.extend(options.overlays.iter().cloned());
    let mut plot = build(
        curve,
        query,
        series,
        &options.guides.lines,
        &options.guides.shades,
        AxisOverrides {
            x: options.x_bounds,
            y: options.y_bounds,
        },
    )?;
    if let Some(title) = &options.title {
        plot.title = title.clone();
    }
    Ok(plot)
}

/// Family plot of a sweep: the first result is the primary series and
/// provides the query marker and guides.
pub fn sweep_plot(
    results: &[CurveResult],
    param: &str,
    values: &[f64],
) -> Result<PlotSpec, HydroError> {
    let (first, _) = results.split_first().ok_or_else(|| {
        HydroError::invalid("hyd_plot.sweep_empty", "sweep produced no curves")
    })?;
    let label = |idx: usize| match values.get(idx) {
        Some(value) => format!("{param} = {value}"),
        None => format!("{param} #{idx}"),
    };
    let overlays = results
        .iter()
        .enumerate()
        .skip(1)
        .map(|(idx, result)| PlotSeries {
            label: label(idx),
            points: result.curve.points.clone(),
        })
        .collect();
    let mut options = PresentationOptions::for_result(first);
    options.series_label = Some(label(0));
    options.overlays = overlays;
    // overlays may live on other domains
    let x_min = results
        .iter()
        .map(|r| r.curve.domain.start)
        .fold(f64::INFINITY, f64::min);
    let x_max = results
        .iter()
        .map(|r| r.curve.domain.end)
        .fold(f64::NEG_INFINITY, f64::max);
    options.x_bounds = Some((x_min, x_max));
    to_plot_spec(&first.curve, &first.query, &options)
}
