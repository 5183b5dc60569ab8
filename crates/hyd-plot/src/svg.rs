//! Minimal static SVG rendering of a [`PlotSpec`].

use serde::{Deserialize, Serialize};

use crate::assemble::{AxisBounds, PlotSpec};

const SERIES_COLORS: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#9467bd", "#8c564b", "#17becf",
];
const SHADE_COLORS: [&str; 3] = ["#add8e6", "#ff0000", "#90ee90"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgConfig {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin: 56,
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}

/// Maps model coordinates onto the canvas, swapping axes for transposed plots.
struct Frame {
    axes: AxisBounds,
    transposed: bool,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new(plot: &PlotSpec, config: &SvgConfig) -> Self {
        let margin = config.margin as f64;
        Self {
            axes: plot.axes,
            transposed: plot.transposed,
            left: margin,
            top: margin,
            width: (config.width as f64 - 2.0 * margin).max(1.0),
            height: (config.height as f64 - 2.0 * margin).max(1.0),
        }
    }

    /// Canvas position of an `(independent, dependent)` pair.
    fn project(&self, x: f64, y: f64) -> (f64, f64) {
        let a = &self.axes;
        let (h, h_min, h_max, v, v_min, v_max) = if self.transposed {
            (y, a.y_min, a.y_max, x, a.x_min, a.x_max)
        } else {
            (x, a.x_min, a.x_max, y, a.y_min, a.y_max)
        };
        let px = self.left + (h - h_min) / (h_max - h_min) * self.width;
        let py = self.top + self.height - (v - v_min) / (v_max - v_min) * self.height;
        (px, py)
    }
}

fn path_points<I: IntoIterator<Item = (f64, f64)>>(frame: &Frame, points: I) -> String {
    points
        .into_iter()
        .map(|(x, y)| {
            let (px, py) = frame.project(x, y);
            format!("{px:.2},{py:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the plot as a standalone SVG document.
///
/// Output depends only on the plot and the configuration.
pub fn render_svg(plot: &PlotSpec, config: &SvgConfig) -> String {
    let frame = Frame::new(plot, config);
    let mut parts = vec![format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>",
        w = config.width,
        h = config.height
    )];
    parts.push(format!(
        "<rect x='0' y='0' width='{}' height='{}' fill='#ffffff' />",
        config.width, config.height
    ));
    parts.push(format!(
        "<clipPath id='plot-area'><rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' /></clipPath>",
        frame.left, frame.top, frame.width, frame.height
    ));
    parts.push("<g clip-path='url(#plot-area)'>".into());

    for (idx, region) in plot.shades.iter().enumerate() {
        let color = SHADE_COLORS[idx % SHADE_COLORS.len()];
        for span in &region.spans {
            let upper = span.points.iter().map(|p| (p.x, p.upper));
            let lower = span.points.iter().rev().map(|p| (p.x, p.lower));
            parts.push(format!(
                "<polygon points='{}' fill='{color}' fill-opacity='0.5' stroke='none'><title>{}</title></polygon>",
                path_points(&frame, upper.chain(lower)),
                escape(&region.label)
            ));
        }
    }

    let axes = plot.axes;
    for line in &plot.lines {
        let (x1, y1) = frame.project(axes.x_min, line.y);
        let (x2, y2) = frame.project(axes.x_max, line.y);
        parts.push(format!(
            "<line x1='{x1:.2}' y1='{y1:.2}' x2='{x2:.2}' y2='{y2:.2}' stroke='#d62728' stroke-dasharray='6 3'><title>{}</title></line>",
            escape(&line.label)
        ));
    }

    for (idx, series) in plot.series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        parts.push(format!(
            "<polyline points='{}' fill='none' stroke='{color}' stroke-width='{}'><title>{}</title></polyline>",
            path_points(&frame, series.points.iter().map(|p| (p.x, p.y))),
            if idx == 0 { 3 } else { 1 },
            escape(&series.label)
        ));
    }

    let (qx, qy) = frame.project(plot.query.x, plot.query.y);
    parts.push(format!(
        "<circle cx='{qx:.2}' cy='{qy:.2}' r='5' fill='#ff0000'><title>{}</title></circle>",
        escape(&plot.query.label)
    ));
    parts.push("</g>".into());

    parts.push(format!(
        "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='none' stroke='#000000' />",
        frame.left, frame.top, frame.width, frame.height
    ));
    let (h_label, v_label) = if plot.transposed {
        (&plot.y_label, &plot.x_label)
    } else {
        (&plot.x_label, &plot.y_label)
    };
    let (h_min, h_max, v_min, v_max) = if plot.transposed {
        (axes.y_min, axes.y_max, axes.x_min, axes.x_max)
    } else {
        (axes.x_min, axes.x_max, axes.y_min, axes.y_max)
    };
    let bottom = frame.top + frame.height;
    let right = frame.left + frame.width;
    parts.push(format!(
        "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-size='16'>{}</text>",
        config.width as f64 / 2.0,
        frame.top / 2.0,
        escape(&plot.title)
    ));
    parts.push(format!(
        "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-size='12'>{}</text>",
        frame.left + frame.width / 2.0,
        bottom + frame.top * 0.75,
        escape(h_label)
    ));
    parts.push(format!(
        "<text x='{x:.2}' y='{y:.2}' text-anchor='middle' font-size='12' transform='rotate(-90 {x:.2} {y:.2})'>{}</text>",
        escape(v_label),
        x = frame.left / 3.0,
        y = frame.top + frame.height / 2.0
    ));
    for (value, x, y, anchor) in [
        (h_min, frame.left, bottom + 14.0, "start"),
        (h_max, right, bottom + 14.0, "end"),
        (v_min, frame.left - 4.0, bottom, "end"),
        (v_max, frame.left - 4.0, frame.top + 10.0, "end"),
    ] {
        parts.push(format!(
            "<text x='{x:.2}' y='{y:.2}' text-anchor='{anchor}' font-size='10'>{value:.4}</text>"
        ));
    }
    parts.push("</svg>".into());
    parts.join("")
}
