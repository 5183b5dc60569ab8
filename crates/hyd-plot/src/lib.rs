//! Plot assembly for hydrolab curves, with SVG and JSON output.

pub mod assemble;
pub mod export;
pub mod svg;

pub use assemble::{
    assemble, check_axis_bounds, default_y_bounds, shade_region, sweep_plot, to_plot_spec,
    AxisBounds, AxisOverrides, PlotSeries, PlotSpec, PresentationOptions, QueryMarker, ShadePoint,
    ShadeSpan, ShadedRegion, Y_HEADROOM,
};
pub use export::{plot_from_json_slice, plot_to_json_bytes};
pub use svg::{render_svg, SvgConfig};
