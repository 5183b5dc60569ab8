use hyd_core::ParameterValues;
use hyd_curve::compute_curve;
use hyd_plot::{
    plot_from_json_slice, plot_to_json_bytes, render_svg, to_plot_spec, PresentationOptions,
    SvgConfig,
};

fn capture_plot() -> hyd_plot::PlotSpec {
    let params = ParameterValues::new()
        .with("q", 0.005)
        .with("k", 1e-3)
        .with("i", 1e-3)
        .with("b", 20.0);
    let result = compute_curve("well_capture", &params, 0.0).unwrap();
    let options = PresentationOptions {
        y_bounds: Some((-100.0, 500.0)),
        ..PresentationOptions::for_result(&result)
    };
    to_plot_spec(&result.curve, &result.query, &options).unwrap()
}

#[test]
fn svg_is_deterministic() {
    let plot = capture_plot();
    let config = SvgConfig::default();
    let a = render_svg(&plot, &config);
    let b = render_svg(&plot, &config);
    assert_eq!(a, b);
    assert!(a.starts_with("<svg"));
    assert!(a.ends_with("</svg>"));
    assert!(a.contains("<polyline"));
    assert!(a.contains("<circle"));
}

#[test]
fn transposed_plot_puts_the_dependent_variable_on_the_horizontal_axis() {
    let plot = capture_plot();
    assert!(plot.transposed);
    let config = SvgConfig {
        width: 600,
        height: 400,
        margin: 50,
    };
    let svg = render_svg(&plot, &config);
    // culmination point x0 ~ -39.79 on a [-100, 500] horizontal axis, y = 0 mid-height
    let expected_cx = 50.0 + (plot.query.y + 100.0) / 600.0 * 500.0;
    assert!(svg.contains(&format!("cx='{expected_cx:.2}' cy='200.00'")));
}

#[test]
fn labels_are_escaped() {
    let mut plot = capture_plot();
    plot.title = "a < b & c".into();
    let svg = render_svg(&plot, &SvgConfig::default());
    assert!(svg.contains("a &lt; b &amp; c"));
}

#[test]
fn json_export_round_trips() {
    let plot = capture_plot();
    let bytes = plot_to_json_bytes(&plot).unwrap();
    assert_eq!(bytes, plot_to_json_bytes(&plot).unwrap());
    let restored = plot_from_json_slice(&bytes).unwrap();
    assert_eq!(restored, plot);
    for (back, point) in restored.series[0].points.iter().zip(&plot.series[0].points) {
        assert_eq!(back.x.to_bits(), point.x.to_bits());
        assert_eq!(back.y.to_bits(), point.y.to_bits());
    }
}
